use thiserror::Error;

/// Represents all errors that can occur while building a parser registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The before/after constraints of one culture form a cycle.
    #[error("Parser ordering for culture '{culture}' contains a cycle between: {}.", .parsers.join(", "))]
    OrderingCycle {
        /// The culture partition in which the cycle was found.
        culture: String,
        /// The parsers that could not be ordered.
        parsers: Vec<String>,
    },
    /// Two parsers of the same registry share a name.
    #[error("Parser '{name}' is registered more than once.")]
    DuplicateParser {
        /// The duplicated name.
        name: String,
    },
    /// A before/after constraint names a parser that was never registered.
    #[error("Parser '{parser}' is ordered relative to unknown parser '{reference}'.")]
    UnknownParser {
        /// The parser declaring the constraint.
        parser:    String,
        /// The missing parser name.
        reference: String,
    },
}
