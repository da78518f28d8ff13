//! Operator names used in [`Operation`](super::Operation) nodes.
//!
//! Operations carry their operator as text. Every operator the parser can
//! produce is listed here, so the parser, formatter and evaluator agree on
//! spelling.

pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const NOT: &str = "NOT";

pub const EQ: &str = "=";
pub const NOT_EQ: &str = "!=";
pub const LT_GT: &str = "<>";
pub const HASH: &str = "#";
pub const LT: &str = "<";
pub const LT_EQ: &str = "<=";
pub const GT: &str = ">";
pub const GT_EQ: &str = ">=";

pub const BETWEEN: &str = "BETWEEN";
pub const NOT_BETWEEN: &str = "NOT BETWEEN";
pub const LIKE: &str = "LIKE";
pub const NOT_LIKE: &str = "NOT LIKE";
pub const IN: &str = "IN";
pub const NOT_IN: &str = "NOT IN";
pub const IS_NULL: &str = "IS NULL";
pub const IS_NOT_NULL: &str = "IS NOT NULL";

pub const PLUS: &str = "+";
pub const MINUS: &str = "-";
pub const CONCAT: &str = "||";
pub const TIMES: &str = "*";
pub const DIVIDE: &str = "/";
pub const POWER: &str = "**";

pub const EXISTS: &str = "EXISTS";
pub const ANY: &str = "ANY";
pub const ALL: &str = "ALL";
pub const SOME: &str = "SOME";

/// Inline value list, as in `(a, b) = (1, 2)`.
pub const LIST: &str = ",";

pub const UNION: &str = "UNION";
pub const UNION_ALL: &str = "UNION ALL";
pub const INTERSECT: &str = "INTERSECT";
pub const MINUS_SET: &str = "MINUS";
pub const EXCEPT: &str = "EXCEPT";

/// Returns true for the binary comparison operators.
#[must_use]
pub fn is_comparison(op: &str) -> bool {
    matches!(op, EQ | NOT_EQ | LT_GT | HASH | LT | LT_EQ | GT | GT_EQ)
}

/// Returns true for the set operators that join two queries.
#[must_use]
pub fn is_set_operator(op: &str) -> bool {
    matches!(
        op.to_ascii_uppercase().as_str(),
        UNION | UNION_ALL | INTERSECT | MINUS_SET | EXCEPT
    )
}

/// Returns true for the quantifiers that prefix a subquery after a comparison.
#[must_use]
pub fn is_quantifier(op: &str) -> bool {
    matches!(op.to_ascii_uppercase().as_str(), ANY | ALL | SOME)
}

/// Returns true for `IN` and `NOT IN`.
#[must_use]
pub fn is_in(op: &str) -> bool {
    op.eq_ignore_ascii_case(IN) || op.eq_ignore_ascii_case(NOT_IN)
}

/// Returns true for `IS NULL` and `IS NOT NULL`.
#[must_use]
pub fn is_null_test(op: &str) -> bool {
    op.eq_ignore_ascii_case(IS_NULL) || op.eq_ignore_ascii_case(IS_NOT_NULL)
}
