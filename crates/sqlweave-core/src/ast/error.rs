//! Errors raised while building or inspecting AST nodes.

/// Errors produced by AST constructors, builders and accessors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    /// An operand index past the end of an operation.
    #[error("operand index {index} out of bounds for `{operator}` with {len} operand(s)")]
    OperandOutOfBounds {
        operator: String,
        index: usize,
        len: usize,
    },

    /// A non-call operation was built without operands.
    #[error("operation `{0}` requires at least one operand")]
    NoOperands(String),

    /// A query was built without select items.
    #[error("query has no select items")]
    MissingSelect,

    /// A query was built without from items.
    #[error("query has no from items")]
    MissingFrom,

    /// An update was built without assignments.
    #[error("update of `{0}` has no assignments")]
    EmptyAssignments(String),

    /// An insert was built without values or a source query.
    #[error("insert into `{0}` has no values")]
    MissingValues(String),

    /// A lock statement was built without tables.
    #[error("lock statement has no tables")]
    NoTables,
}
