use crate::{
    error::RuntimeError,
    interpreter::{evaluator::EvalResult, value::core::Data},
    util::num::f64_to_i64_exact,
};

/// Wraps a real result, rejecting NaN and infinities.
fn finite(value: f64, line: usize) -> EvalResult<Data> {
    if value.is_finite() {
        Ok(Data::Real(value))
    } else {
        Err(RuntimeError::Overflow { line })
    }
}

/// Defines a builtin that applies an `f64` method to its single argument.
///
/// Integers are converted to reals first. Non-numeric arguments produce an
/// `ExpectedNumber` error.
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[Data], line: usize) -> EvalResult<Data> {
            let x = args.first()
                        .ok_or(RuntimeError::ExpectedNumber { line })?
                        .as_real(line)?;
            finite(x.$real_fn(), line)
        }
    };
}

real_builtin!(exp, exp);
real_builtin!(sin, sin);
real_builtin!(cos, cos);
real_builtin!(tan, tan);

/// Natural logarithm; the argument must be positive.
pub fn ln(args: &[Data], line: usize) -> EvalResult<Data> {
    let x = first_real(args, line)?;
    if x <= 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("ln is undefined for {x}"),
                                                   line });
    }
    finite(x.ln(), line)
}

/// Square root; the argument must not be negative.
///
/// Perfect squares of integers stay integers.
///
/// # Example
/// ```
/// use linecalc::interpreter::{evaluator::function::builtin::sqrt, value::core::Data};
///
/// assert_eq!(sqrt(&[Data::Integer(9)], 1).unwrap(), Data::Integer(3));
/// assert_eq!(sqrt(&[Data::Real(2.25)], 1).unwrap(), Data::Real(1.5));
/// assert!(sqrt(&[Data::Integer(-1)], 1).is_err());
/// ```
pub fn sqrt(args: &[Data], line: usize) -> EvalResult<Data> {
    let x = first_real(args, line)?;
    if x < 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("sqrt is undefined for {x}"),
                                                   line });
    }
    let root = x.sqrt();
    match args.first() {
        Some(Data::Integer(n)) => match f64_to_i64_exact(root) {
            Some(r) if r.checked_mul(r) == Some(*n) => Ok(Data::Integer(r)),
            _ => finite(root, line),
        },
        _ => finite(root, line),
    }
}

/// Absolute value, keeping integers as integers.
pub fn abs(args: &[Data], line: usize) -> EvalResult<Data> {
    match args.first() {
        Some(Data::Integer(n)) => n.checked_abs()
                                   .map(Data::Integer)
                                   .ok_or(RuntimeError::Overflow { line }),
        Some(Data::Real(r)) => Ok(Data::Real(r.abs())),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Applies `round`, `floor` or `ceil`.
///
/// Integers are returned unchanged; reals become integers when the result
/// fits exactly.
pub fn unary_round(kind: &str, args: &[Data], line: usize) -> EvalResult<Data> {
    if let Some(Data::Integer(n)) = args.first() {
        return Ok(Data::Integer(*n));
    }
    let x = first_real(args, line)?;
    let rounded = match kind {
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        _ => x.round(),
    };
    f64_to_i64_exact(rounded).map_or_else(|| finite(rounded, line), |n| Ok(Data::Integer(n)))
}

/// Returns the smallest (`min`) or largest (`max`) numeric argument.
///
/// The winning argument is returned as-is, so its numeric kind is kept.
pub fn min_max(kind: &str, args: &[Data], line: usize) -> EvalResult<Data> {
    let mut best: Option<(&Data, f64)> = None;
    for arg in args {
        let value = arg.as_real(line)?;
        let better = match best {
            None => true,
            Some((_, current)) if kind == "min" => value < current,
            Some((_, current)) => value > current,
        };
        if better {
            best = Some((arg, value));
        }
    }
    best.map(|(arg, _)| arg.clone())
        .ok_or(RuntimeError::ExpectedNumber { line })
}

fn first_real(args: &[Data], line: usize) -> EvalResult<f64> {
    args.first()
        .ok_or(RuntimeError::ExpectedNumber { line })?
        .as_real(line)
}
