use std::ops::Range;

use crate::{
    ast::TokenSpan,
    interpreter::lexer::{Token, TokenKind, tokenize},
};

/// A tokenized document.
///
/// Tokens are stored in one flat arena; lines are ranges of indices into it,
/// newline tokens excluded. The stream is rebuilt whenever the source text
/// changes and parsers only ever borrow it through [`LinkedToken`] cursors.
#[derive(Debug, Clone)]
pub struct TokenStream {
    source: String,
    tokens: Vec<Token>,
    lines:  Vec<Range<usize>>,
}

impl TokenStream {
    /// Tokenizes `source` and indexes its lines.
    ///
    /// A document always has at least one line; a trailing line break starts
    /// a final empty line, as in a text editor.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let tokens = tokenize(source);
        let mut lines = Vec::new();
        let mut start = 0;

        for (index, token) in tokens.iter().enumerate() {
            if token.kind == TokenKind::NewLine {
                lines.push(start..index);
                start = index + 1;
            }
        }
        lines.push(start..tokens.len());

        Self { source: source.to_string(),
               tokens,
               lines }
    }

    /// All tokens of the document, newlines included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The number of lines in the document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The source text a token covers.
    #[must_use]
    pub fn text(&self, token: &Token) -> &str {
        self.source.get(token.offset..token.end()).unwrap_or_default()
    }

    /// Returns a cursor on the first token of a line (0-based index), or
    /// `None` when the document has no such line.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<LinkedToken<'_>> {
        let range = self.lines.get(index)?;
        Some(LinkedToken { stream: self,
                           index:  range.start,
                           start:  range.start,
                           end:    range.end,
                           line:   index + 1, })
    }
}

/// A cursor on one token of a line.
///
/// The cursor sees a *view*: a contiguous range of token indices inside one
/// line. Navigation never leaves the view. The position one past the last
/// token is the end sentinel; a cursor there is "at end" and has no token.
///
/// Cursors are `Copy`; every navigation returns a new cursor and never
/// mutates the stream.
#[derive(Debug, Clone, Copy)]
pub struct LinkedToken<'a> {
    stream: &'a TokenStream,
    index:  usize,
    start:  usize,
    end:    usize,
    line:   usize,
}

impl PartialEq for LinkedToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.stream, other.stream)
        && self.index == other.index
        && self.start == other.start
        && self.end == other.end
    }
}

impl<'a> LinkedToken<'a> {
    /// The token under the cursor, or `None` at the end sentinel.
    #[must_use]
    pub fn token(&self) -> Option<&'a Token> {
        if self.index < self.end {
            self.stream.tokens.get(self.index)
        } else {
            None
        }
    }

    /// The kind of the token under the cursor.
    #[must_use]
    pub fn kind(&self) -> Option<TokenKind> {
        self.token().map(|token| token.kind)
    }

    /// Returns `true` if the token under the cursor is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    /// The source text of the token under the cursor; empty at the end.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.token().map_or("", |token| self.stream.text(token))
    }

    /// The source text from this token to the last token of the view,
    /// inner whitespace included; empty at the end.
    #[must_use]
    pub fn text_to_end(&self) -> &'a str {
        let (Some(first), Some(last)) = (self.token(), self.skip_to_last_token().and_then(|l| l.token()))
        else {
            return "";
        };
        self.stream.source.get(first.offset..last.end()).unwrap_or_default()
    }

    /// Returns `true` if the cursor is on the end sentinel of its view.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.index >= self.end
    }

    /// Index of the cursor in the token arena.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The 1-based source line of the view.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns `true` when whitespace separates this token from the previous
    /// one. The end sentinel and the first token of a line count as
    /// separated.
    #[must_use]
    pub fn has_leading_whitespace(&self) -> bool {
        self.index == self.start || self.token().is_none_or(|token| token.leading_whitespace > 0)
    }

    /// Moves one token forward, stopping at the end sentinel.
    #[must_use]
    pub const fn advance(self) -> Self {
        if self.index < self.end {
            Self { index: self.index + 1,
                   ..self }
        } else {
            self
        }
    }

    /// The next token of the view, or `None` when this is the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let next = self.advance();
        (!next.is_end()).then_some(next)
    }

    /// The previous token of the view, or `None` on the first one.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        if self.index > self.start {
            Some(Self { index: self.index - 1,
                        ..self })
        } else {
            None
        }
    }

    /// Skips the current token if it is of the `expected` kind and returns
    /// the cursor after it.
    ///
    /// With `skip_word_tokens`, plain [`TokenKind::Word`] tokens in front of
    /// the expected one are skipped first, so filler words such as
    /// `so if ...` are tolerated. Returns `None` when the expected token is
    /// not found.
    #[must_use]
    pub fn skip_token(self, expected: TokenKind, skip_word_tokens: bool) -> Option<Self> {
        let mut current = self;
        if skip_word_tokens && expected != TokenKind::Word {
            while current.is(TokenKind::Word) {
                current = current.advance();
            }
        }
        current.is(expected).then(|| current.advance())
    }

    /// Scans forward from the cursor (inclusive) to the first token of the
    /// given kind in the view.
    #[must_use]
    pub fn jump_to_next_token_of_type(self, kind: TokenKind) -> Option<Self> {
        let mut current = self;
        while !current.is_end() {
            if current.is(kind) {
                return Some(current);
            }
            current = current.advance();
        }
        None
    }

    /// The last token of the view, or `None` if the view is empty.
    #[must_use]
    pub const fn skip_to_last_token(self) -> Option<Self> {
        if self.end > self.start {
            Some(Self { index: self.end - 1,
                        ..self })
        } else {
            None
        }
    }

    /// A cursor on the end sentinel of the view.
    #[must_use]
    pub const fn end_of_view(self) -> Self {
        Self { index: self.end,
               ..self }
    }

    /// Narrows the view so that it ends before the next token of `stop`.
    ///
    /// The view is unchanged when no such token follows the cursor.
    #[must_use]
    pub fn until(self, stop: TokenKind) -> Self {
        match self.jump_to_next_token_of_type(stop) {
            Some(found) => Self { end: found.index,
                                  ..self },
            None => self,
        }
    }

    /// Moves this cursor's view to the position of `from`.
    ///
    /// Used to continue in a wider view after parsing inside a narrowed one.
    #[must_use]
    pub fn resume(self, from: Self) -> Self {
        Self { index: from.index.clamp(self.start, self.end),
               ..self }
    }

    /// The span from this token up to the token before `next`.
    ///
    /// An empty range collapses to this single token.
    #[must_use]
    pub fn span_to(self, next: Self) -> TokenSpan {
        TokenSpan { first: self.index,
                    last:  next.index.saturating_sub(1).max(self.index), }
    }
}
