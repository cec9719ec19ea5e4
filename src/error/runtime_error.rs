use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// An operator was applied to values it does not support.
    #[error("Error on line {line}: Type error: cannot apply '{operator}' to {left} and {right}.")]
    TypeMismatch {
        /// The operator symbol.
        operator: String,
        /// Type name of the left operand.
        left:     String,
        /// Type name of the right operand.
        right:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Expected number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed or produced a non-finite number.
    #[error("Error on line {line}: Overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is not defined.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Argument count mismatch for '{name}': expected {expected}, found {found}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The number of arguments the function takes.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument was outside the domain of a function.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}
