use crate::{
    ast::BinaryOperatorType,
    interpreter::{
        evaluator::{EvalResult, binary::core::type_mismatch},
        value::core::Data,
    },
};

/// Evaluates a comparison of the form `Data <Operator> Data`.
///
/// Equality operators accept two values of the same type family (numbers,
/// booleans or texts); numbers are promoted to reals when mixed. Ordering
/// operators accept numbers only. Anything else is a `TypeMismatch`.
///
/// # Example
/// ```
/// use linecalc::{
///     ast::BinaryOperatorType,
///     interpreter::{evaluator::binary::comparison::eval_comparison, value::core::Data},
/// };
///
/// let result = eval_comparison(BinaryOperatorType::LessThan, &Data::Real(3.0), &Data::Integer(5), 1);
/// assert_eq!(result.unwrap(), Data::Boolean(true));
/// ```
pub fn eval_comparison(op: BinaryOperatorType,
                       left: &Data,
                       right: &Data,
                       line: usize)
                       -> EvalResult<Data> {
    use BinaryOperatorType::{
        Equality, GreaterThan, GreaterThanOrEqualTo, LessThan, LessThanOrEqualTo, NoEquality,
    };

    match op {
        Equality | NoEquality => {
            let equal = strict_eq(op, left, right, line)?;
            Ok(Data::Boolean(if op == Equality { equal } else { !equal }))
        },

        LessThan | LessThanOrEqualTo | GreaterThan | GreaterThanOrEqualTo => {
            if !left.is_number() || !right.is_number() {
                return Err(type_mismatch(op, left, right, line));
            }
            let ordering = match (left, right) {
                (Data::Integer(a), Data::Integer(b)) => a.partial_cmp(b),
                _ => left.as_real(line)?.partial_cmp(&right.as_real(line)?),
            };

            Ok(Data::Boolean(ordering.is_some_and(|ordering| match op {
                                          LessThan => ordering.is_lt(),
                                          LessThanOrEqualTo => ordering.is_le(),
                                          GreaterThan => ordering.is_gt(),
                                          _ => ordering.is_ge(),
                                      })))
        },

        _ => Err(type_mismatch(op, left, right, line)),
    }
}

/// Compares two values for equality without implicit conversion between
/// type families.
fn strict_eq(op: BinaryOperatorType, left: &Data, right: &Data, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Data::Boolean(a), Data::Boolean(b)) => Ok(a == b),
        (Data::Text(a), Data::Text(b)) => Ok(a == b),
        (Data::Integer(a), Data::Integer(b)) => Ok(a == b),
        (Data::Integer(_) | Data::Real(_), Data::Integer(_) | Data::Real(_)) => {
            Ok(left.as_real(line)? == right.as_real(line)?)
        },
        _ => Err(type_mismatch(op, left, right, line)),
    }
}
