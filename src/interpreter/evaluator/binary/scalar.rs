use crate::{
    ast::BinaryOperatorType,
    error::RuntimeError,
    interpreter::{
        evaluator::{EvalResult, binary::core::type_mismatch},
        value::core::Data,
    },
};

/// Evaluates a scalar arithmetic operation.
///
/// Integer arithmetic is checked and reports `Overflow` instead of wrapping.
/// Dividing two integers yields an integer when the division is exact and a
/// real otherwise. Mixed operands are promoted to reals; a non-finite real
/// result is reported as `Overflow`. Division by zero is checked explicitly
/// for both numeric kinds.
///
/// # Example
/// ```
/// use linecalc::{
///     ast::BinaryOperatorType,
///     interpreter::{evaluator::binary::scalar::eval_scalar_op, value::core::Data},
/// };
///
/// let half = eval_scalar_op(BinaryOperatorType::Division, &Data::Integer(5), &Data::Integer(2), 1);
/// assert_eq!(half.unwrap(), Data::Real(2.5));
///
/// let zero = eval_scalar_op(BinaryOperatorType::Division, &Data::Integer(5), &Data::Integer(0), 1);
/// assert!(zero.is_err());
/// ```
pub fn eval_scalar_op(op: BinaryOperatorType,
                      left: &Data,
                      right: &Data,
                      line: usize)
                      -> EvalResult<Data> {
    use BinaryOperatorType::{Addition, Division, Multiply, Subtraction};

    match (left, right) {
        (Data::Integer(a), Data::Integer(b)) => {
            let result = match op {
                Addition => a.checked_add(*b),
                Subtraction => a.checked_sub(*b),
                Multiply => a.checked_mul(*b),
                Division => {
                    if *b == 0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    if a.checked_rem(*b).is_some_and(|rest| rest != 0) {
                        return Ok(Data::Real(inexact_quotient(*a, *b)));
                    }
                    a.checked_div(*b)
                },
                _ => return Err(type_mismatch(op, left, right, line)),
            };
            result.map(Data::Integer)
                  .ok_or(RuntimeError::Overflow { line })
        },
        (Data::Integer(_) | Data::Real(_), Data::Integer(_) | Data::Real(_)) => {
            let (a, b) = left.clone().promote_to_real(right, line)?;
            let a = a.as_real(line)?;
            let b = b.as_real(line)?;

            let result = match op {
                Addition => a + b,
                Subtraction => a - b,
                Multiply => a * b,
                Division => {
                    if b == 0.0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    a / b
                },
                _ => return Err(type_mismatch(op, left, right, line)),
            };

            if result.is_finite() {
                Ok(Data::Real(result))
            } else {
                Err(RuntimeError::Overflow { line })
            }
        },
        _ => Err(type_mismatch(op, left, right, line)),
    }
}

/// The real quotient of two integers that do not divide evenly.
#[allow(clippy::cast_precision_loss)]
fn inexact_quotient(a: i64, b: i64) -> f64 {
    a as f64 / b as f64
}
