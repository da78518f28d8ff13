//! Evaluation error types.

/// An error raised while evaluating an expression against a tuple.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An operation that needs operands has none.
    #[error("operator {0} has no operands")]
    MissingArguments(String),

    /// The operator is recognized but cannot be evaluated.
    #[error("operator {0} is not supported")]
    UnsupportedOperator(String),

    /// The operator is not known to the evaluator.
    #[error("unknown operator {0}")]
    UnknownOperator(String),

    /// A comparison or LIKE was given other than two operands.
    #[error("cannot compare {found} value(s), expected 2")]
    ComparisonArity {
        /// Number of operands found.
        found: usize,
    },

    /// A column is missing from the tuple or has no value.
    #[error("unknown column {0}")]
    UnknownColumn(String),

    /// A LIKE operand is not a string.
    #[error("LIKE can only compare strings")]
    LikeOperands,

    /// An arithmetic operand is not a number.
    #[error("expression is not numeric: {0}")]
    NotNumeric(String),

    /// `IS [NOT] NULL` was applied to something other than a constant.
    #[error("IS NULL can only test a constant, found {0}")]
    NullTarget(String),

    /// A condition is not an operation.
    #[error("only operations can be evaluated as conditions, found {0}")]
    NotAPredicate(String),

    /// A value operand cannot be evaluated, such as a subquery.
    #[error("cannot evaluate operand {0}")]
    UnsupportedOperand(String),

    /// An operator was given the wrong number of operands.
    #[error("operator {operator} expects {expected} operand(s), found {found}")]
    OperandCount {
        /// The operator.
        operator: String,
        /// Number of operands expected.
        expected: usize,
        /// Number of operands found.
        found: usize,
    },
}
