//! # sqlweave-core
//!
//! An embeddable SQL front end: parse statements into a typed AST, render
//! the AST back as canonical SQL, and evaluate conditions against a row.
//!
//! This crate provides:
//! - A hand-written recursive descent parser with Pratt expression parsing
//! - A canonical formatter whose output parses back to an equal tree
//! - A function registry shared between parser and formatter
//! - A minimal tuple evaluator for WHERE-style conditions
//!
//! ## Parsing and formatting
//!
//! ```rust
//! use sqlweave_core::{Parser, Statement};
//!
//! let mut parser = Parser::new(
//!     "SELECT SUM(SALARY), AVG(SALARY) FROM EMPLOYEESTATISTICSTABLE;
//!      DELETE FROM ANTIQUES WHERE ITEM = 'Ottoman';",
//! );
//! let statements = parser.read_statements().unwrap();
//!
//! let Statement::Query(query) = &statements[0] else { unreachable!() };
//! assert_eq!(query.items()[0].aggregate(), Some("SUM"));
//! assert_eq!(
//!     statements[1].to_string(),
//!     "delete from ANTIQUES where (ITEM = 'Ottoman')"
//! );
//! ```
//!
//! ## Custom functions
//!
//! `name(...)` parses as a call only when `name` is registered. The built-in
//! aggregates are always registered; anything else is added at runtime:
//!
//! ```rust
//! use sqlweave_core::Parser;
//!
//! let mut parser = Parser::default();
//! parser.add_custom_function("nvl", 2);
//! parser.init("SELECT nvl(BONUS, 0) FROM PAY");
//! let statement = parser.read_statement().unwrap().unwrap();
//! assert_eq!(
//!     parser.formatter().statement(&statement),
//!     "select NVL(BONUS,0) from PAY"
//! );
//! ```
//!
//! ## Evaluating conditions
//!
//! ```rust
//! use sqlweave_core::eval::{Evaluator, Tuple};
//! use sqlweave_core::Parser;
//!
//! let mut row = Tuple::from_header("a,b,c,d,e");
//! row.set_row("1,1,1,1,1");
//! let condition = Parser::new("a = 1 OR e = 1").read_expression().unwrap();
//! assert!(Evaluator::new().eval(&row, &condition).unwrap());
//! ```

pub mod ast;
mod error;
pub mod eval;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod registry;

pub use ast::{Expression, Operation, Query, Statement};
pub use error::{Error, Result};
pub use eval::{Evaluator, Tuple, Value};
pub use format::Formatter;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use registry::{Arity, FunctionSpec, Registry};
