use crate::error::RuntimeError;

/// Binary operator evaluation.
///
/// Applies comparison and arithmetic operators to evaluated operands.
pub mod binary;

/// Built-in function evaluation.
///
/// Holds the table of functions callable from expressions and their
/// implementations.
pub mod function;

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;
