//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input is not valid SQL.
    #[error("{message} at position {span}")]
    Syntax {
        /// The error message.
        message: String,
        /// The location of the error.
        span: Span,
        /// Expected tokens (if applicable).
        expected: Option<String>,
        /// The actual token found.
        found: Option<TokenKind>,
    },

    /// A read was attempted before the parser was given input.
    #[error("parser has no input")]
    Uninitialized,

    /// The input reader failed.
    #[error("failed to read input: {0}")]
    Io(String),
}

impl ParseError {
    /// Creates a syntax error with a free-form message.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error. A lexer error token reports the
    /// lexer's own message.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        let message = match &found {
            TokenKind::Error(message) => message.clone(),
            other => format!(
                "Unexpected token: expected {expected}, found {}",
                describe(other)
            ),
        };
        Self::Syntax {
            message,
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self::Syntax {
            message: format!("Unexpected end of input: expected {expected}"),
            span,
            expected: Some(expected),
            found: Some(TokenKind::Eof),
        }
    }

    /// Returns the location of a syntax error.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { span, .. } => Some(*span),
            Self::Uninitialized | Self::Io(_) => None,
        }
    }
}

/// Describes a token the way it appears in the input.
fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(text) => format!("number {text}"),
        TokenKind::String(value) => format!("string '{value}'"),
        TokenKind::Identifier(name) => format!("identifier {name}"),
        TokenKind::Keyword(keyword) => format!("keyword {}", keyword.as_str()),
        TokenKind::Eof => String::from("end of input"),
        TokenKind::Error(message) => message.clone(),
        other => other
            .symbol()
            .map_or_else(|| format!("{other:?}"), |symbol| format!("`{symbol}`")),
    }
}
