use std::fmt;
use std::rc::Rc;

/// Source text together with the name it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            text: text.into(),
        })
    }
}

/// Cursor into a `Source`. Offsets count characters, lines and
/// columns are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub source: Rc<Source>,
}

impl Position {
    /// Position of the first character of `source`.
    #[must_use]
    pub const fn start(source: Rc<Source>) -> Self {
        Self {
            offset: 0,
            line: 0,
            column: 0,
            source,
        }
    }

    /// Move past `current`, wrapping to the next line on `'\n'`.
    pub const fn advance(&mut self, current: char) {
        self.offset += 1;
        if current == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.source.name
    }
}

/// Source range delimited by two positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `position`.
    #[must_use]
    pub fn point(position: Position) -> Self {
        Self {
            end: position.clone(),
            start: position,
        }
    }

    /// Span running from the start of `self` to the end of `other`.
    #[must_use]
    pub fn to(&self, other: &Self) -> Self {
        Self {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    /// Source characters covered by the span.
    #[must_use]
    pub fn text(&self) -> String {
        self.start
            .source
            .text
            .chars()
            .skip(self.start.offset)
            .take(self.end.offset.saturating_sub(self.start.offset))
            .collect()
    }
}

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Var,
    Not,
}

impl Keyword {
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "var" => Some(Self::Var),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Not => "not",
        }
    }
}

/// Token kinds produced by the lexer. Literal and word kinds carry
/// their payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// End of input, always the last token.
    Eof,
    Int(i64),
    Float(f64),
    Identifier(String),
    Keyword(Keyword),
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    /// `=`
    Assign,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    LeftParen,
    RightParen,
}

impl TokenKind {
    /// Upper-case name used when printing token streams.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Int(_) => "INT",
            Self::Float(_) => "FLOAT",
            Self::Identifier(_) => "IDENTIFIER",
            Self::Keyword(_) => "KEYWORD",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Multiply => "MUL",
            Self::Divide => "DIV",
            Self::Power => "POW",
            Self::Assign => "EQ",
            Self::Equal => "EE",
            Self::NotEqual => "NE",
            Self::Greater => "GT",
            Self::GreaterEqual => "GTE",
            Self::Less => "LT",
            Self::LessEqual => "LTE",
            Self::LeftParen => "LPAREN",
            Self::RightParen => "RPAREN",
        }
    }

    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}:{value}", self.name()),
            Self::Float(value) => write!(f, "{}:{value:?}", self.name()),
            Self::Identifier(name) => write!(f, "{}:{name}", self.name()),
            Self::Keyword(keyword) => write!(f, "{}:{}", self.name(), keyword.as_str()),
            _ => f.write_str(self.name()),
        }
    }
}

/// A single token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
