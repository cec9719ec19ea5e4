/// Cooperative cancellation of interpretation passes.
///
/// A shared flag a host sets to stop a pass that has become stale; the pass
/// polls it between lines and on every parser dispatch.
pub mod cancellation;
/// The document interpretation driver.
///
/// Runs the statement dispatch on every line of a document, records one
/// outcome per line and threads the variables forward.
///
/// # Responsibilities
/// - Turns per-line parse and runtime errors into line outcomes without
///   stopping the pass.
/// - Rejects lines with unconsumed tokens other than a trailing comment.
/// - Keeps a document's result current as its text changes
///   ([`document::DocumentSession`]).
pub mod document;
/// The evaluator module applies operators and built-in functions to values.
///
/// Parsers evaluate what they recognize right away; the evaluator holds the
/// semantics they call into.
///
/// # Responsibilities
/// - Implements arithmetic and comparison on every pair of value types.
/// - Reports runtime errors such as division by zero or overflow.
/// - Provides the built-in function table.
pub mod evaluator;
/// The lexer module tokenizes document text.
///
/// Produces classified tokens with their byte offset, length, leading
/// whitespace and line. Input the lexer does not understand becomes an
/// `Unknown` token instead of an error.
pub mod lexer;
/// The parser module recognizes and interprets statements and expressions.
///
/// Every parser is a plain function registered in the
/// [`registry`]; parsing a construct and computing its value happen in the
/// same step.
pub mod parser;
/// Registration and ordering of the pluggable parsers.
///
/// # Responsibilities
/// - Holds the statement and expression parsers with their culture tags and
///   before/after constraints.
/// - Resolves one dispatch order per culture with a stable topological sort.
/// - Provides the cached registry of built-in parsers.
pub mod registry;
/// Cursors over the tokens of one line.
pub mod stream;
/// The value module defines the runtime data types.
///
/// This module declares the values expressions evaluate to: booleans,
/// integers, reals and texts, with the promotions between numeric types.
pub mod value;
/// The symbol table of one interpretation pass.
pub mod variables;
