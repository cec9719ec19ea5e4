use thiserror::Error;

/// Represents all errors that can occur while parsing a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No registered statement parser accepted the line.
    #[error("Error on line {line}: Unrecognized statement.")]
    UnrecognizedStatement {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after the statement was complete.
    #[error("Error on line {line}: Extra tokens after statement. Check your input: {token}")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A condition keyword was not followed by a statement.
    #[error("Error on line {line}: Expected a statement after '{keyword}'.")]
    MissingBranch {
        /// The keyword introducing the branch (`then` or `else`).
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The expression or statement nesting exceeded the supported depth.
    #[error("Error on line {line}: Expression is nested too deeply.")]
    NestingTooDeep {
        /// The source line where the error occurred.
        line: usize,
    },
}
