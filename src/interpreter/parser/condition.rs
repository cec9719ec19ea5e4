use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{Attempt, Interpretation, Parsed, StatementMatch},
        stream::LinkedToken,
    },
};

/// Parses and interprets `if <condition> then <statement> [else <statement>]`.
///
/// Words in front of `if` are skipped (`so if x > 2 then ...`). The
/// condition is read up to `then` and must evaluate to a boolean; any other
/// outcome makes the parser decline. Only the taken branch is parsed and
/// interpreted, so a declaration in the other branch never runs. The line's
/// result is the value of the taken branch; a false condition without
/// `else` yields nothing.
///
/// # Errors
/// Returns `MissingBranch` when the taken branch is empty or cannot be
/// parsed as a statement.
///
/// # Example
/// ```
/// use linecalc::interpreter::{document::Engine, value::core::Data};
///
/// let engine = Engine::builtin().unwrap();
/// let result = engine.evaluate_line("if 3 > 2 then 10 else 20", "en-US").unwrap();
/// assert_eq!(result, Some(Data::Integer(10)));
/// ```
pub fn parse_condition_statement<'a>(interpretation: &mut Interpretation<'_>,
                                     cursor: LinkedToken<'a>)
                                     -> Attempt<StatementMatch<'a>> {
    let Some(condition_start) = cursor.skip_token(TokenKind::If, true) else {
        return Ok(None);
    };
    let Some(then_token) = condition_start.jump_to_next_token_of_type(TokenKind::Then) else {
        return Ok(None);
    };
    let Some(condition) = interpretation.parse_expression_until(condition_start, TokenKind::Then)?
    else {
        return Ok(None);
    };
    if condition.next != then_token {
        return Ok(None);
    }
    let Some(taken) = condition.data.as_bool() else {
        return Ok(None);
    };

    let branch_start = then_token.advance();
    let (branch, next) = if taken {
        let branch = interpretation.parse_statement_until(branch_start, TokenKind::Else)?
                                   .ok_or_else(|| missing_branch("then", cursor))?;
        let next = if branch.next.is(TokenKind::Else) {
            branch.next.end_of_view()
        } else {
            branch.next
        };
        (Some(branch), next)
    } else if let Some(else_token) = branch_start.jump_to_next_token_of_type(TokenKind::Else) {
        let branch = interpretation.parse_statement(else_token.advance())?
                                   .ok_or_else(|| missing_branch("else", cursor))?;
        let next = branch.next;
        (Some(branch), next)
    } else {
        (None, cursor.end_of_view())
    };

    let (taken_branch, data) = match branch {
        Some(branch) => (Some(Box::new(branch.node)), branch.data),
        None => (None, None),
    };

    Ok(Some(Parsed::new(Statement::Condition { condition: condition.node,
                                               taken_branch,
                                               span: cursor.span_to(next) },
                        data,
                        next)))
}

fn missing_branch(keyword: &str, cursor: LinkedToken<'_>) -> ParseError {
    ParseError::MissingBranch { keyword: keyword.to_string(),
                                line:    cursor.line(), }
}
