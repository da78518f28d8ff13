//! Abstract Syntax Tree (AST) types for SQL statements.

mod error;
mod expression;
mod name;
pub mod ops;
mod statement;

pub use error::AstError;
pub use expression::{Constant, ConstantKind, Expression, Operation};
pub use name::{AliasedName, NameForm};
pub use statement::{
    Delete, FromItem, GroupBy, Insert, InsertBuilder, InsertValues, LockMode, LockTable, OrderBy,
    Query, QueryBuilder, SelectItem, Statement, TransactionControl, Update, UpdateBuilder,
};
