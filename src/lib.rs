//! # linecalc
//!
//! linecalc is the interpretation engine of a "smart calculator" notepad.
//! Every line of a free-form document is parsed and evaluated in order by a
//! culture-aware, priority-ordered registry of pluggable parsers; variables
//! declared on one line are visible on the lines below.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    cancellation::CancellationToken,
    document::{DocumentResult, Engine},
};

/// Defines the structure of recognized statements.
///
/// This module declares the `Statement` and `Expression` trees the parsers
/// build while interpreting a line, and the binary operators with their
/// precedence.
///
/// # Responsibilities
/// - Defines expression and statement types for every recognized construct.
/// - Attaches the covered token range to each node.
pub mod ast;
/// Provides unified error types for parsing, evaluation and registry setup.
///
/// Every error that can be attached to a line carries the source line
/// number. Registry errors are configuration mistakes raised once, when the
/// parsers are resolved.
///
/// # Responsibilities
/// - Defines error enums per phase (parse, runtime, registry).
/// - Wraps them in `InterpretError` for the dispatch loop.
pub mod error;
/// Orchestrates the interpretation of documents.
///
/// This module ties together tokenizing, parser registration and dispatch,
/// evaluation, values and variables, and exposes the document driver.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, token stream, registry, parsers
///   and evaluator.
/// - Provides entry points for interpreting single lines and whole
///   documents.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
pub mod util;

/// Interprets a document with the built-in parsers.
///
/// Each line of `source` produces one outcome in the returned
/// [`DocumentResult`]; a failing line does not stop the lines after it.
///
/// # Errors
/// Returns an error if the built-in registry cannot be built. Per-line
/// errors are part of the result, not of this `Result`.
///
/// # Examples
/// ```
/// use linecalc::interpret_document;
///
/// let result = interpret_document("price = 12\nprice * 3\n10 / 0", "en-US").unwrap();
/// assert_eq!(result.to_string(), "12\n36\nError on line 3: Division by zero.");
///
/// let result = interpret_document("price = 12\nif price > 10 then 1 else 2", "en-US").unwrap();
/// assert_eq!(result.to_string(), "12\n1");
/// assert!(result.errors().next().is_none());
/// ```
pub fn interpret_document(source: &str, culture: &str) -> Result<DocumentResult, Box<dyn std::error::Error>> {
    let engine = Engine::builtin()?;
    Ok(engine.interpret(source, culture, &CancellationToken::new())?)
}
