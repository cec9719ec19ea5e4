/// Parse-and-interpret dispatch.
///
/// Holds the state of one interpretation pass and the "first match wins"
/// loop that tries registered parsers in their resolved order.
pub mod core;

/// Statement parsers.
///
/// Comments, headers, variable declarations and the two expression
/// statements (the comparison fast path and the numerical fallback).
pub mod statement;

/// The `if ... then ... [else ...]` statement parser.
pub mod condition;

/// Binary operator parsing.
///
/// Builds left-associative operator chains by precedence, evaluating each
/// operation as soon as both operands are known.
pub mod binary;

/// Primary expression parsers: literals, variable references, groups and
/// culture-specific number formats.
pub mod primary;

/// Built-in function call parsing.
pub mod function;

/// Helpers shared by the parsers.
pub mod utils;
