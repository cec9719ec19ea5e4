use crate::interpreter::value::core::Data;

/// Inclusive range of token indices covered by a syntax node.
///
/// Indices refer to the token arena of the
/// [`TokenStream`](crate::interpreter::stream::TokenStream) the node was
/// parsed from. `first <= last` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// Index of the first token.
    pub first: usize,
    /// Index of the last token.
    pub last:  usize,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions are produced by the expression parsers together with their
/// evaluated value; the tree records what was recognized and where.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A binary operation (`a + b`, `a < b`, ...).
    BinaryOperator {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: BinaryOperatorType,
        /// Right operand.
        right:    Box<Self>,
        /// Tokens covered by the node.
        span:     TokenSpan,
    },
    /// A parenthesized expression.
    Group {
        /// The expression between the parentheses.
        inner: Box<Self>,
        /// Tokens covered by the node, parentheses included.
        span:  TokenSpan,
    },
    /// A literal value (number, boolean or text).
    Data {
        /// The constant value.
        literal: Data,
        /// Tokens covered by the node.
        span:    TokenSpan,
    },
    /// Reference to a variable by name.
    VariableReference {
        /// Name of the variable.
        name: String,
        /// Tokens covered by the node.
        span: TokenSpan,
    },
    /// Call of a built-in function (e.g. `sqrt(x)`).
    Function {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Tokens covered by the node.
        span:      TokenSpan,
    },
}

impl Expression {
    /// Gets the span of tokens covered by `self`.
    #[must_use]
    pub const fn span(&self) -> TokenSpan {
        match self {
            Self::BinaryOperator { span, .. }
            | Self::Group { span, .. }
            | Self::Data { span, .. }
            | Self::VariableReference { span, .. }
            | Self::Function { span, .. } => *span,
        }
    }

    /// Returns the operator if `self` is a binary operation.
    #[must_use]
    pub const fn binary_operator(&self) -> Option<BinaryOperatorType> {
        match self {
            Self::BinaryOperator { operator, .. } => Some(*operator),
            _ => None,
        }
    }
}

/// Represents a top-level statement.
///
/// Statements are the units recognized on each input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `if <condition> then <statement> [else <statement>]`, or a bare
    /// comparison used as a statement.
    ///
    /// Only the branch that was taken is parsed; `taken_branch` is `None` for
    /// a bare comparison and for a false condition without `else`.
    Condition {
        /// The condition expression.
        condition:    Expression,
        /// The branch that was interpreted.
        taken_branch: Option<Box<Self>>,
        /// Tokens covered by the node.
        span:         TokenSpan,
    },
    /// `<name> = <expression>`.
    VariableDeclaration {
        /// The name of the variable.
        name:  String,
        /// The value expression.
        value: Expression,
        /// Tokens covered by the node.
        span:  TokenSpan,
    },
    /// A standalone expression evaluated for its result.
    NumericalCalculus {
        /// The expression to evaluate.
        expression: Expression,
        /// Tokens covered by the node.
        span:       TokenSpan,
    },
    /// A `// comment` line.
    Comment {
        /// Tokens covered by the node.
        span: TokenSpan,
    },
    /// A `# title` line.
    Header {
        /// The text after the `#`.
        title: String,
        /// Tokens covered by the node.
        span:  TokenSpan,
    },
}

impl Statement {
    /// Gets the span of tokens covered by `self`.
    #[must_use]
    pub const fn span(&self) -> TokenSpan {
        match self {
            Self::Condition { span, .. }
            | Self::VariableDeclaration { span, .. }
            | Self::NumericalCalculus { span, .. }
            | Self::Comment { span }
            | Self::Header { span, .. } => *span,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators are either relational (always yielding a boolean) or
/// arithmetic (numbers only).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperatorType {
    /// Equal to (`==`)
    Equality,
    /// Not equal to (`!=`)
    NoEquality,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanOrEqualTo,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanOrEqualTo,
    /// Addition (`+`)
    Addition,
    /// Subtraction (`-`)
    Subtraction,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Division,
}

impl BinaryOperatorType {
    /// The textual symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equality => "==",
            Self::NoEquality => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiply => "*",
            Self::Division => "/",
        }
    }

    /// Binding strength; higher binds tighter. All levels are
    /// left-associative.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Equality
            | Self::NoEquality
            | Self::LessThan
            | Self::LessThanOrEqualTo
            | Self::GreaterThan
            | Self::GreaterThanOrEqualTo => 1,
            Self::Addition | Self::Subtraction => 2,
            Self::Multiply | Self::Division => 3,
        }
    }

    /// Returns `true` for comparison operators.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        self.precedence() == 1
    }

    /// Returns `true` for `+ - * /`.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        !self.is_relational()
    }
}

impl std::fmt::Display for BinaryOperatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
