use crate::{
    ast::Expression,
    error::{ParseError, RuntimeError},
    interpreter::{
        lexer::TokenKind,
        parser::core::{Attempt, ExpressionMatch, Interpretation, Parsed},
        stream::LinkedToken,
        value::core::Data,
    },
};

/// Parses a parenthesized expression.
///
/// The rule is: `group := "(" expression ")"`
///
/// # Errors
/// Returns `ExpectedClosingParen` if the inner expression cannot be parsed
/// or is not followed by `)`.
pub fn parse_group<'a>(interpretation: &mut Interpretation<'_>,
                       cursor: LinkedToken<'a>)
                       -> Attempt<ExpressionMatch<'a>> {
    let Some(inner_start) = cursor.skip_token(TokenKind::LParen, false) else {
        return Ok(None);
    };

    let missing_paren = || ParseError::ExpectedClosingParen { line: cursor.line() };
    let inner = interpretation.parse_expression(inner_start)?
                              .ok_or_else(missing_paren)?;
    let next = inner.next
                    .skip_token(TokenKind::RParen, false)
                    .ok_or_else(missing_paren)?;

    Ok(Some(Parsed::new(Expression::Group { inner: Box::new(inner.node),
                                            span:  cursor.span_to(next), },
                        inner.data,
                        next)))
}

/// Parses a literal: a number, `true`, `false` or a quoted text.
///
/// A `-` directly attached to a number (`-3`, not `- 3`) makes a negative
/// literal. Numbers with a fractional part are reals, all others integers.
///
/// # Errors
/// Returns `Overflow` for an integer literal that does not fit in 64 bits.
pub fn parse_data<'a>(_: &mut Interpretation<'_>,
                      cursor: LinkedToken<'a>)
                      -> Attempt<ExpressionMatch<'a>> {
    let (literal, next) = match cursor.kind() {
        Some(TokenKind::True) => (Data::from(true), cursor.advance()),
        Some(TokenKind::False) => (Data::from(false), cursor.advance()),
        Some(TokenKind::Text) => (Data::from(unquote(cursor.text())), cursor.advance()),
        Some(TokenKind::Number) => (parse_number(cursor.text(), false, cursor.line())?, cursor.advance()),
        Some(TokenKind::Minus) => {
            let Some(number) = cursor.next()
                                     .filter(|number| number.is(TokenKind::Number) && !number.has_leading_whitespace())
            else {
                return Ok(None);
            };
            (parse_number(number.text(), true, cursor.line())?, number.advance())
        },
        _ => return Ok(None),
    };

    Ok(Some(Parsed::new(Expression::Data { literal: literal.clone(),
                                           span:    cursor.span_to(next), },
                        literal,
                        next)))
}

/// Parses a reference to a declared variable.
///
/// An unknown name is not an error here: the parser declines and later
/// candidates (or the statement fallback) get a chance.
pub fn parse_variable_reference<'a>(interpretation: &mut Interpretation<'_>,
                                    cursor: LinkedToken<'a>)
                                    -> Attempt<ExpressionMatch<'a>> {
    if !cursor.is(TokenKind::Word) {
        return Ok(None);
    }
    let name = cursor.text();
    let Some(value) = interpretation.variables().try_get(name) else {
        return Ok(None);
    };

    let next = cursor.advance();
    Ok(Some(Parsed::new(Expression::VariableReference { name: name.to_string(),
                                                        span: cursor.span_to(next), },
                        value.clone(),
                        next)))
}

/// Parses a decimal number written with a comma (`12,5`), as used by
/// several European cultures.
///
/// Both parts must be plain digit runs written without surrounding
/// whitespace, so `max(1, 5)` still reads as two arguments.
pub fn parse_decimal_comma<'a>(_: &mut Interpretation<'_>,
                               cursor: LinkedToken<'a>)
                               -> Attempt<ExpressionMatch<'a>> {
    let is_digits = |token: &LinkedToken<'_>| {
        token.is(TokenKind::Number) && token.text().bytes().all(|byte| byte.is_ascii_digit())
    };
    if !is_digits(&cursor) {
        return Ok(None);
    }
    let Some(fraction) = cursor.next()
                               .filter(|comma| comma.is(TokenKind::Comma) && !comma.has_leading_whitespace())
                               .and_then(LinkedToken::next)
                               .filter(|fraction| is_digits(fraction) && !fraction.has_leading_whitespace())
    else {
        return Ok(None);
    };

    let text = format!("{}.{}", cursor.text(), fraction.text());
    let Ok(value) = text.parse::<f64>() else {
        return Ok(None);
    };

    let literal = Data::Real(value);
    let next = fraction.advance();
    Ok(Some(Parsed::new(Expression::Data { literal: literal.clone(),
                                           span:    cursor.span_to(next), },
                        literal,
                        next)))
}

/// Converts the text of a number token into a value.
fn parse_number(text: &str, negative: bool, line: usize) -> Result<Data, RuntimeError> {
    if text.contains('.') {
        let value: f64 = text.parse().map_err(|_| RuntimeError::Overflow { line })?;
        return Ok(Data::from(if negative { -value } else { value }));
    }

    let digits = if negative { format!("-{text}") } else { text.to_string() };
    digits.parse::<i64>()
          .map(Data::from)
          .map_err(|_| RuntimeError::Overflow { line })
}

/// Strips the surrounding double quotes of a text token.
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}
