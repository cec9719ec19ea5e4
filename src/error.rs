use thiserror::Error;

/// Parsing errors.
///
/// Raised when a line is recognized by a parser but its shape is malformed,
/// or when no statement parser accepts the line at all. A parser declining a
/// position is not an error; it is reported as `Ok(None)` during dispatch.
pub mod parse_error;
/// Registry build errors.
///
/// Raised once, while resolving the dispatch order of the registered parsers.
/// These are configuration mistakes and are never attached to a line.
pub mod registry_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a parsed
/// expression: division by zero, type mismatches, overflow and invalid
/// function calls.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use registry_error::RegistryError;
pub use runtime_error::RuntimeError;

/// Any failure that can stop the interpretation of a single line.
///
/// Parse and runtime errors are attached to the line that produced them.
/// `Cancelled` is not a user-visible error: it unwinds the whole pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpretError {
    /// The line could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The line parsed but could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// The interpretation pass was cancelled.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

/// Signals that an interpretation pass was cancelled before completion.
///
/// Partial results of a cancelled pass are discarded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Interpretation was cancelled.")]
pub struct Cancelled;

/// Result type used by parsers and the dispatch loop.
pub type InterpretResult<T> = Result<T, InterpretError>;
