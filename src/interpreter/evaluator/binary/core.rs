use crate::{
    ast::BinaryOperatorType,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            EvalResult,
            binary::{comparison::eval_comparison, scalar::eval_scalar_op},
        },
        value::core::Data,
    },
};

/// Evaluates a binary operation between two already evaluated values.
///
/// Relational operators always produce a `Data::Boolean` and are routed to
/// [`eval_comparison`]; arithmetic operators are routed to
/// [`eval_scalar_op`].
///
/// # Example
/// ```
/// use linecalc::{
///     ast::BinaryOperatorType,
///     interpreter::{evaluator::binary::core::eval_binary, value::core::Data},
/// };
///
/// let result = eval_binary(BinaryOperatorType::Addition, &Data::Integer(3), &Data::Integer(4), 1);
/// assert_eq!(result.unwrap(), Data::Integer(7));
/// ```
pub fn eval_binary(op: BinaryOperatorType,
                   left: &Data,
                   right: &Data,
                   line: usize)
                   -> EvalResult<Data> {
    if op.is_relational() {
        eval_comparison(op, left, right, line)
    } else {
        eval_scalar_op(op, left, right, line)
    }
}

/// Builds the `TypeMismatch` error for `op` applied to `left` and `right`.
pub(in crate::interpreter::evaluator) fn type_mismatch(op: BinaryOperatorType,
                                                       left: &Data,
                                                       right: &Data,
                                                       line: usize)
                                                       -> RuntimeError {
    RuntimeError::TypeMismatch { operator: op.symbol().to_string(),
                                 left: left.type_name().to_string(),
                                 right: right.type_name().to_string(),
                                 line }
}
