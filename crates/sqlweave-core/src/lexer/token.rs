//! Token types for the SQL lexer.

use super::Span;

/// Reserved SQL keywords.
///
/// Only words that can never be identifiers are reserved here. Words that
/// carry meaning in a single statement position (`LOCK`, `COMMIT`, `MODE`,
/// `NOWAIT`, ...) stay identifiers and are matched by the parser in context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    Distinct,
    All,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    For,
    As,

    // Set operations
    Union,
    Intersect,
    Minus,
    Except,

    // Data manipulation
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,

    // Predicates
    And,
    Or,
    Not,
    Between,
    Like,
    In,
    Is,
    Null,
    Exists,
    Any,
    Some,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "DISTINCT" => Some(Self::Distinct),
            "ALL" => Some(Self::All),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "FOR" => Some(Self::For),
            "AS" => Some(Self::As),
            "UNION" => Some(Self::Union),
            "INTERSECT" => Some(Self::Intersect),
            "MINUS" => Some(Self::Minus),
            "EXCEPT" => Some(Self::Except),
            "INSERT" => Some(Self::Insert),
            "INTO" => Some(Self::Into),
            "VALUES" => Some(Self::Values),
            "UPDATE" => Some(Self::Update),
            "SET" => Some(Self::Set),
            "DELETE" => Some(Self::Delete),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "BETWEEN" => Some(Self::Between),
            "LIKE" => Some(Self::Like),
            "IN" => Some(Self::In),
            "IS" => Some(Self::Is),
            "NULL" => Some(Self::Null),
            "EXISTS" => Some(Self::Exists),
            "ANY" => Some(Self::Any),
            "SOME" => Some(Self::Some),
            _ => None,
        }
    }

    /// Returns the keyword as an uppercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::For => "FOR",
            Self::As => "AS",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Minus => "MINUS",
            Self::Except => "EXCEPT",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::Exists => "EXISTS",
            Self::Any => "ANY",
            Self::Some => "SOME",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept verbatim (e.g. `01`, `200.00`, `1e5`).
    Number(String),
    /// String literal with `''` escapes resolved (e.g. `'it''s'` is `it's`).
    String(String),

    // Identifiers and keywords
    /// Identifier. Quoted identifiers keep their quotes.
    Identifier(String),
    /// Reserved keyword.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// **
    DoubleStar,
    /// /
    Slash,
    /// ||
    Concat,
    /// =
    Eq,
    /// !=
    NotEq,
    /// <>
    LtGt,
    /// #
    Hash,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// `?` parameter placeholder
    Question,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Invalid input, with the lexer's diagnostic.
    Error(String),
}

impl TokenKind {
    /// Returns the source spelling of an operator or delimiter token.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Star => Some("*"),
            Self::DoubleStar => Some("**"),
            Self::Slash => Some("/"),
            Self::Concat => Some("||"),
            Self::Eq => Some("="),
            Self::NotEq => Some("!="),
            Self::LtGt => Some("<>"),
            Self::Hash => Some("#"),
            Self::Lt => Some("<"),
            Self::LtEq => Some("<="),
            Self::Gt => Some(">"),
            Self::GtEq => Some(">="),
            Self::Question => Some("?"),
            Self::LeftParen => Some("("),
            Self::RightParen => Some(")"),
            Self::Comma => Some(","),
            Self::Semicolon => Some(";"),
            Self::Dot => Some("."),
            _ => None,
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this token is the unreserved word `word`
    /// (case-insensitive).
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }
}
