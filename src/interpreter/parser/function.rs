use crate::{
    ast::Expression,
    interpreter::{
        evaluator::function::core::{call_builtin, is_builtin},
        lexer::TokenKind,
        parser::{
            core::{Attempt, ExpressionMatch, Interpretation, Parsed},
            utils::parse_separated_list,
        },
        stream::LinkedToken,
        value::core::Data,
    },
};

/// Parses and evaluates a call of a built-in function.
///
/// The rule is: `call := name "(" [expression (("," | ";") expression)*] ")"`
///
/// Only names of built-in functions followed by `(` are recognized; any
/// other word is left to the variable parser.
///
/// # Errors
/// - `ExpectedClosingParen` if the argument list is malformed.
/// - `ArgumentCountMismatch` or a function-specific error from the call.
///
/// # Example
/// ```
/// use linecalc::interpreter::{document::Engine, value::core::Data};
///
/// let engine = Engine::builtin().unwrap();
/// let result = engine.evaluate_line("max(2; 7) + 1", "en-US").unwrap();
/// assert_eq!(result, Some(Data::Integer(8)));
/// ```
pub fn parse_function_call<'a>(interpretation: &mut Interpretation<'_>,
                               cursor: LinkedToken<'a>)
                               -> Attempt<ExpressionMatch<'a>> {
    if !cursor.is(TokenKind::Word) || !is_builtin(cursor.text()) {
        return Ok(None);
    }
    let Some(arguments_start) = cursor.advance().skip_token(TokenKind::LParen, false) else {
        return Ok(None);
    };

    let (arguments, next) = parse_separated_list(interpretation, arguments_start)?;
    let values: Vec<Data> = arguments.iter().map(|argument| argument.data.clone()).collect();
    let data = call_builtin(cursor.text(), &values, cursor.line())?;

    Ok(Some(Parsed::new(Expression::Function { name:      cursor.text().to_string(),
                                               arguments: arguments.into_iter()
                                                                   .map(|argument| argument.node)
                                                                   .collect(),
                                               span:      cursor.span_to(next), },
                        data,
                        next)))
}
