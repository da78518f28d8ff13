//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer that turns SQL text into a stream of [`Token`]s.
//! Only reserved words become [`Keyword`]s; statement-specific words such as
//! `LOCK` or `COMMIT` are left as identifiers for the parser to match in context.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
