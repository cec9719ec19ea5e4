use crate::{
    ast::Statement,
    interpreter::{
        lexer::TokenKind,
        parser::core::{Attempt, Interpretation, Parsed, StatementMatch},
        stream::LinkedToken,
    },
};

/// Parses a `// comment` line. Comments produce no value.
pub fn parse_comment<'a>(_: &mut Interpretation<'_>,
                         cursor: LinkedToken<'a>)
                         -> Attempt<StatementMatch<'a>> {
    if !cursor.is(TokenKind::Comment) {
        return Ok(None);
    }

    let next = cursor.advance();
    Ok(Some(Parsed::new(Statement::Comment { span: cursor.span_to(next) }, None, next)))
}

/// Parses a `# title` line. The rest of the line is the title, whatever
/// it contains; headers produce no value.
pub fn parse_header<'a>(_: &mut Interpretation<'_>,
                        cursor: LinkedToken<'a>)
                        -> Attempt<StatementMatch<'a>> {
    let Some(title_start) = cursor.skip_token(TokenKind::Hash, false) else {
        return Ok(None);
    };

    let next = cursor.end_of_view();
    Ok(Some(Parsed::new(Statement::Header { title: title_start.text_to_end().to_string(),
                                            span:  cursor.span_to(next), },
                        None,
                        next)))
}

/// Parses `name = expression`, binds the value and yields it.
///
/// A missing or unparsable right-hand side makes the parser decline; the
/// variable is only bound once the value is known.
pub fn parse_variable_declaration<'a>(interpretation: &mut Interpretation<'_>,
                                      cursor: LinkedToken<'a>)
                                      -> Attempt<StatementMatch<'a>> {
    if !cursor.is(TokenKind::Word) {
        return Ok(None);
    }
    let Some(value_start) = cursor.advance().skip_token(TokenKind::Equals, false) else {
        return Ok(None);
    };
    let Some(value) = interpretation.parse_expression(value_start)? else {
        return Ok(None);
    };

    let name = cursor.text();
    interpretation.variables_mut().declare(name, value.data.clone());

    Ok(Some(Parsed::new(Statement::VariableDeclaration { name:  name.to_string(),
                                                         value: value.node,
                                                         span:  cursor.span_to(value.next), },
                        Some(value.data),
                        value.next)))
}

/// Fast path for lines whose top-level expression is a binary operation.
///
/// A comparison becomes a [`Statement::Condition`] without branch and yields
/// its boolean; an arithmetic operation becomes a
/// [`Statement::NumericalCalculus`]. Any other expression makes the parser
/// decline so that [`parse_numerical_expression`] handles it.
pub fn parse_conditional_expression<'a>(interpretation: &mut Interpretation<'_>,
                                        cursor: LinkedToken<'a>)
                                        -> Attempt<StatementMatch<'a>> {
    let Some(found) = interpretation.parse_expression(cursor)? else {
        return Ok(None);
    };
    let Some(operator) = found.node.binary_operator() else {
        return Ok(None);
    };

    let span = cursor.span_to(found.next);
    let statement = if operator.is_relational() {
        Statement::Condition { condition: found.node,
                               taken_branch: None,
                               span }
    } else if operator.is_arithmetic() {
        Statement::NumericalCalculus { expression: found.node,
                                       span }
    } else {
        return Ok(None);
    };

    Ok(Some(Parsed::new(statement, Some(found.data), found.next)))
}

/// Parses any expression as a statement and yields its value.
///
/// This is the last statement parser tried.
pub fn parse_numerical_expression<'a>(interpretation: &mut Interpretation<'_>,
                                      cursor: LinkedToken<'a>)
                                      -> Attempt<StatementMatch<'a>> {
    let Some(found) = interpretation.parse_expression(cursor)? else {
        return Ok(None);
    };

    let span = cursor.span_to(found.next);
    Ok(Some(Parsed::new(Statement::NumericalCalculus { expression: found.node,
                                                       span },
                        Some(found.data),
                        found.next)))
}
