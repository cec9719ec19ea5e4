use crate::{
    ast::{BinaryOperatorType, Expression},
    error::InterpretResult,
    interpreter::{
        evaluator::binary::core::eval_binary,
        parser::{
            core::{Attempt, ExpressionMatch, Interpretation, Parsed},
            utils::{join_spans, token_to_binary_operator},
        },
        stream::LinkedToken,
    },
};

/// Registry name of the binary operation parser.
pub const BINARY_OPERATION: &str = "BinaryOperation";

/// Parses a chain of binary operations.
///
/// Operands are obtained from the expression parsers ordered after
/// [`BINARY_OPERATION`], so groups, calls, literals and variables can appear
/// on either side. Operators bind by [`BinaryOperatorType::precedence`] and
/// associate to the left:
///
/// ```text
/// relational     := additive (("==" | "!=" | "<" | "<=" | ">" | ">=") additive)*
/// additive       := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := operand (("*" | "/") operand)*
/// ```
///
/// A lone operand is returned as is, which makes this parser the entry point
/// of every expression. Each operation is evaluated as soon as it is built.
/// When an operator is not followed by a parsable operand, the chain stops
/// before that operator and the caller sees it as an unconsumed token.
///
/// # Errors
/// Propagates evaluation errors such as division by zero or a type
/// mismatch.
pub fn parse_binary_operation<'a>(interpretation: &mut Interpretation<'_>,
                                  cursor: LinkedToken<'a>)
                                  -> Attempt<ExpressionMatch<'a>> {
    let Some(first) = interpretation.parse_expression_after(BINARY_OPERATION, cursor)? else {
        return Ok(None);
    };

    parse_operators(interpretation, first, 1).map(Some)
}

/// Extends `left` with every following operator of at least
/// `min_precedence`.
fn parse_operators<'a>(interpretation: &mut Interpretation<'_>,
                       mut left: ExpressionMatch<'a>,
                       min_precedence: u8)
                       -> InterpretResult<ExpressionMatch<'a>> {
    while let Some(operator) = token_to_binary_operator(left.next)
          && operator.precedence() >= min_precedence
    {
        let operator_token = left.next;
        let Some(mut right) =
            interpretation.parse_expression_after(BINARY_OPERATION, operator_token.advance())?
        else {
            break;
        };

        while let Some(next) = token_to_binary_operator(right.next)
              && next.precedence() > operator.precedence()
        {
            let extended = parse_operators(interpretation, right.clone(), operator.precedence() + 1)?;
            // No operand after the operator: leave it unconsumed.
            if extended.next == right.next {
                break;
            }
            right = extended;
        }

        left = combine(left, operator, right, operator_token.line())?;
    }

    Ok(left)
}

/// Evaluates `left operator right` and builds the resulting node.
fn combine<'a>(left: ExpressionMatch<'a>,
               operator: BinaryOperatorType,
               right: ExpressionMatch<'a>,
               line: usize)
               -> InterpretResult<ExpressionMatch<'a>> {
    let data = eval_binary(operator, &left.data, &right.data, line)?;
    let span = join_spans(left.node.span(), right.node.span());

    Ok(Parsed::new(Expression::BinaryOperator { left: Box::new(left.node),
                                                operator,
                                                right: Box::new(right.node),
                                                span },
                   data,
                   right.next))
}
