use logos::Logos;

/// Raw lexemes recognized by the generated lexer.
///
/// Spaces and tabs are skipped here; the tokenizer turns the gaps between
/// lexemes into the `leading_whitespace` of the following [`Token`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[regex(r"[\p{XID_Start}_][\p{XID_Continue}]*")]
    Word,
    #[regex(r#""[^"\r\n]*""#)]
    Text,
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    Comment,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equals,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("#")]
    Hash,
    #[regex(r"\r?\n")]
    NewLine,
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// The lexical kind of a [`Token`].
///
/// Kinds are fine grained so that parsers can stop on, or skip, one specific
/// keyword or symbol. [`TokenKind::category`] gives the coarse classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal such as `42` or `3.14`.
    Number,
    /// `if`
    If,
    /// `then`
    Then,
    /// `else`
    Else,
    /// `true`
    True,
    /// `false`
    False,
    /// Any other run of letters, digits and underscores starting with a
    /// letter or underscore.
    Word,
    /// Double quoted text, quotes included.
    Text,
    /// `// comment` up to the end of the line.
    Comment,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `=`
    Equals,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `#`
    Hash,
    /// Line break, `\n` or `\r\n`.
    NewLine,
    /// A character no other kind accepts.
    Unknown,
}

/// Coarse classification of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Word,
    Number,
    Keyword,
    Text,
    Operator,
    Punctuation,
    Comment,
    EndOfLine,
    Unknown,
}

impl TokenKind {
    /// Returns the coarse category of this kind.
    #[must_use]
    pub const fn category(self) -> TokenCategory {
        match self {
            Self::Word => TokenCategory::Word,
            Self::Number => TokenCategory::Number,
            Self::If | Self::Then | Self::Else | Self::True | Self::False => TokenCategory::Keyword,
            Self::Text => TokenCategory::Text,
            Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Equals
            | Self::EqualEqual
            | Self::BangEqual
            | Self::Less
            | Self::LessEqual
            | Self::Greater
            | Self::GreaterEqual => TokenCategory::Operator,
            Self::LParen
            | Self::RParen
            | Self::Comma
            | Self::Semicolon
            | Self::Colon
            | Self::Hash => TokenCategory::Punctuation,
            Self::Comment => TokenCategory::Comment,
            Self::NewLine => TokenCategory::EndOfLine,
            Self::Unknown => TokenCategory::Unknown,
        }
    }
}

impl From<Lexeme> for TokenKind {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::Number => Self::Number,
            Lexeme::If => Self::If,
            Lexeme::Then => Self::Then,
            Lexeme::Else => Self::Else,
            Lexeme::True => Self::True,
            Lexeme::False => Self::False,
            Lexeme::Word => Self::Word,
            Lexeme::Text => Self::Text,
            Lexeme::Comment => Self::Comment,
            Lexeme::Plus => Self::Plus,
            Lexeme::Minus => Self::Minus,
            Lexeme::Star => Self::Star,
            Lexeme::Slash => Self::Slash,
            Lexeme::Equals => Self::Equals,
            Lexeme::EqualEqual => Self::EqualEqual,
            Lexeme::BangEqual => Self::BangEqual,
            Lexeme::Less => Self::Less,
            Lexeme::LessEqual => Self::LessEqual,
            Lexeme::Greater => Self::Greater,
            Lexeme::GreaterEqual => Self::GreaterEqual,
            Lexeme::LParen => Self::LParen,
            Lexeme::RParen => Self::RParen,
            Lexeme::Comma => Self::Comma,
            Lexeme::Semicolon => Self::Semicolon,
            Lexeme::Colon => Self::Colon,
            Lexeme::Hash => Self::Hash,
            Lexeme::NewLine => Self::NewLine,
            Lexeme::Ignored => Self::Unknown,
        }
    }
}

/// A classified, positioned lexical unit.
///
/// Offsets and lengths are in bytes of the source text. `line` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind:               TokenKind,
    /// Byte offset of the first character.
    pub offset:             usize,
    /// Length in bytes.
    pub length:             usize,
    /// Bytes of whitespace between the previous token (or line start) and
    /// this one.
    pub leading_whitespace: usize,
    /// The source line containing the token.
    pub line:               usize,
}

impl Token {
    /// Byte offset one past the last character.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Tokenizes a whole document.
///
/// Tokenization never fails: characters no rule accepts become
/// [`TokenKind::Unknown`] tokens, which parsers reject later. Line breaks are
/// kept as [`TokenKind::NewLine`] tokens.
///
/// # Example
/// ```
/// use linecalc::interpreter::lexer::{TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("x = 2 +  3").iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Word, TokenKind::Equals, TokenKind::Number, TokenKind::Plus,
///             TokenKind::Number]);
///
/// assert_eq!(tokenize("x = 2 +  3")[4].leading_whitespace, 2);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);
    let mut previous_end = 0;
    let mut line = 1;

    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        let kind = lexeme.map_or(TokenKind::Unknown, TokenKind::from);

        tokens.push(Token { kind,
                            offset: span.start,
                            length: span.len(),
                            leading_whitespace: span.start - previous_end,
                            line });

        previous_end = span.end;
        if kind == TokenKind::NewLine {
            line += 1;
        }
    }

    tokens
}
