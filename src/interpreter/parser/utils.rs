use crate::{
    ast::{BinaryOperatorType, TokenSpan},
    error::{InterpretResult, ParseError},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ExpressionMatch, Interpretation},
        stream::LinkedToken,
    },
};

/// Parses a list of expressions separated by `,` or `;` up to a closing
/// parenthesis.
///
/// Both separators are accepted so that cultures writing decimals with a
/// comma can still pass several arguments. An immediately encountered `)`
/// produces an empty list.
///
/// Grammar (simplified): `list := expression ((","|";") expression)* ")"`
///
/// # Parameters
/// - `interpretation`: The running pass, used to parse each item.
/// - `cursor`: Positioned at the first item or at the closing parenthesis.
///
/// # Returns
/// The parsed items and the cursor after the closing parenthesis.
///
/// # Errors
/// Returns `ExpectedClosingParen` if an item cannot be parsed or is not
/// followed by a separator or `)`.
pub(in crate::interpreter::parser) fn parse_separated_list<'a>(
    interpretation: &mut Interpretation<'_>,
    cursor: LinkedToken<'a>)
    -> InterpretResult<(Vec<ExpressionMatch<'a>>, LinkedToken<'a>)> {
    let mut items = Vec::new();
    if let Some(after) = cursor.skip_token(TokenKind::RParen, false) {
        return Ok((items, after));
    }

    let mut current = cursor;
    loop {
        let Some(item) = interpretation.parse_expression(current)? else {
            return Err(ParseError::ExpectedClosingParen { line: cursor.line() }.into());
        };
        let next = item.next;
        items.push(item);

        match next.kind() {
            Some(TokenKind::Comma | TokenKind::Semicolon) => current = next.advance(),
            Some(TokenKind::RParen) => return Ok((items, next.advance())),
            _ => return Err(ParseError::ExpectedClosingParen { line: cursor.line() }.into()),
        }
    }
}

/// Maps the token under the cursor to the binary operator it spells.
///
/// Returns `None` for any other token and at the end of the view.
#[must_use]
pub fn token_to_binary_operator(cursor: LinkedToken<'_>) -> Option<BinaryOperatorType> {
    Some(match cursor.kind()? {
        TokenKind::Plus => BinaryOperatorType::Addition,
        TokenKind::Minus => BinaryOperatorType::Subtraction,
        TokenKind::Star => BinaryOperatorType::Multiply,
        TokenKind::Slash => BinaryOperatorType::Division,
        TokenKind::EqualEqual => BinaryOperatorType::Equality,
        TokenKind::BangEqual => BinaryOperatorType::NoEquality,
        TokenKind::Less => BinaryOperatorType::LessThan,
        TokenKind::LessEqual => BinaryOperatorType::LessThanOrEqualTo,
        TokenKind::Greater => BinaryOperatorType::GreaterThan,
        TokenKind::GreaterEqual => BinaryOperatorType::GreaterThanOrEqualTo,
        _ => return None,
    })
}

/// The span from the first token of `first` to the last token of `last`.
pub(in crate::interpreter::parser) const fn join_spans(first: TokenSpan, last: TokenSpan) -> TokenSpan {
    TokenSpan { first: first.first,
                last:  last.last, }
}
