use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{EvalResult, function::builtin},
        value::core::Data,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line number.
type BuiltinFn = fn(&[Data], usize) -> EvalResult<Data>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"   => { arity: Arity::Exact(1), func: builtin::abs },
    "sqrt"  => { arity: Arity::Exact(1), func: builtin::sqrt },
    "ln"    => { arity: Arity::Exact(1), func: builtin::ln },
    "exp"   => { arity: Arity::Exact(1), func: builtin::exp },
    "sin"   => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"   => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"   => { arity: Arity::Exact(1), func: builtin::tan },
    "round" => { arity: Arity::Exact(1), func: |args, line| builtin::unary_round("round", args, line) },
    "floor" => { arity: Arity::Exact(1), func: |args, line| builtin::unary_round("floor", args, line) },
    "ceil"  => { arity: Arity::Exact(1), func: |args, line| builtin::unary_round("ceil", args, line) },
    "min"   => { arity: Arity::AtLeast(1), func: |args, line| builtin::min_max("min", args, line) },
    "max"   => { arity: Arity::AtLeast(1), func: |args, line| builtin::min_max("max", args, line) },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }

    const fn expected(self) -> usize {
        match self {
            Self::Exact(m) | Self::AtLeast(m) => m,
        }
    }
}

/// Returns `true` if `name` is a builtin function.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Calls a builtin function with already evaluated arguments.
///
/// # Errors
/// - `UnknownFunction` if `name` is not a builtin.
/// - `ArgumentCountMismatch` if the arity does not match.
/// - Any error raised by the function itself.
///
/// # Example
/// ```
/// use linecalc::interpreter::{evaluator::function::core::call_builtin, value::core::Data};
///
/// let v = call_builtin("max", &[Data::Integer(3), Data::Real(4.5)], 1).unwrap();
/// assert_eq!(v, Data::Real(4.5));
/// ```
pub fn call_builtin(name: &str, args: &[Data], line: usize) -> EvalResult<Data> {
    let def = BUILTIN_TABLE.iter()
                           .find(|def| def.name == name)
                           .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                          line })?;

    if !def.arity.check(args.len()) {
        return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                         expected: def.arity.expected(),
                                                         found: args.len(),
                                                         line });
    }

    (def.func)(args, line)
}
