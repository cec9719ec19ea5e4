use crate::{
    error::RuntimeError,
    interpreter::evaluator::EvalResult,
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to exactly one `Data`. `Integer` and `Real`
/// together form the numeric type; integers are promoted to reals when the
/// two are mixed.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// A boolean value (`true` or `false`).
    /// Produced by literals and by comparison operators. Used as conditions
    /// in `if` statements, where the condition must evaluate to `Boolean`.
    Boolean(bool),
    /// An integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A text value from a quoted literal.
    Text(String),
}

impl From<bool> for Data {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Data {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Data {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Data {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl Data {
    /// Name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) | Self::Real(_) => "number",
            Self::Text(_) => "text",
        }
    }

    /// Returns `true` for integers and reals.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }

    /// Returns the boolean value, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// For integers, conversion fails with `Overflow` if the value is too
    /// large to be represented as `f64` exactly.
    ///
    /// # Example
    /// ```
    /// use linecalc::interpreter::value::core::Data;
    ///
    /// assert_eq!(Data::Integer(10).as_real(1).unwrap(), 10.0);
    /// assert!(Data::Boolean(true).as_real(1).is_err());
    /// ```
    pub const fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, line),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Promotes an integer to a real value for mixed math, or returns values
    /// as-is if already matching.
    ///
    /// - If one side is an integer and the other is a real, the integer is
    ///   converted to a real.
    /// - Otherwise, both values are returned unchanged.
    pub fn promote_to_real(self, other: &Self, line: usize) -> EvalResult<(Self, Self)> {
        match (&self, other) {
            (Self::Real(_), Self::Integer(_)) => Ok((self, Self::Real(other.as_real(line)?))),
            (Self::Integer(_), Self::Real(_)) => Ok((Self::Real(self.as_real(line)?), other.clone())),
            _ => Ok((self, other.clone())),
        }
    }
}

impl std::fmt::Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
