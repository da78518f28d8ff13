//! Expression AST types.

use super::error::AstError;
use super::ops;
use super::statement::Query;

/// The kind of a [`Constant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstantKind {
    /// A column reference such as `PRICE`, `t.PRICE` or `t.*`.
    ColumnName,
    /// The `NULL` literal.
    Null,
    /// A numeric literal, kept as written.
    Number,
    /// A string literal, without its surrounding quotes.
    String,
}

impl ConstantKind {
    /// Returns the name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ColumnName => "COLUMNNAME",
            Self::Null => "NULL",
            Self::Number => "NUMBER",
            Self::String => "STRING",
        }
    }
}

/// A leaf value: column name, `NULL`, number or string.
///
/// Equality compares kind and literal text, so `01` and `1` are different
/// constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constant {
    /// What the literal text denotes.
    pub kind: ConstantKind,
    /// The literal text.
    pub value: String,
}

impl Constant {
    /// Creates a constant of the given kind.
    #[must_use]
    pub fn new(kind: ConstantKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Creates a column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::new(ConstantKind::ColumnName, name)
    }

    /// Creates the `NULL` literal.
    #[must_use]
    pub fn null() -> Self {
        Self::new(ConstantKind::Null, "NULL")
    }

    /// Creates a numeric literal from its text.
    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::new(ConstantKind::Number, text)
    }

    /// Creates a string literal. `value` is the unquoted content.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ConstantKind::String, value)
    }
}

/// An operator applied to an ordered list of operands.
///
/// The operator is kept as text: a symbol (`=`, `+`), a keyword operator
/// (`AND`, `NOT BETWEEN`), a set operator, a function name, or `,` for an
/// inline value list.
///
/// Function calls are marked as such and always render as `NAME(args)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    operator: String,
    operands: Vec<Expression>,
    #[cfg_attr(feature = "serde", serde(default))]
    call: bool,
}

impl Operation {
    /// Creates an operation over `operands`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::NoOperands`] if `operands` is empty. Use
    /// [`Operation::call`] for zero-argument function calls.
    pub fn new(operator: impl Into<String>, operands: Vec<Expression>) -> Result<Self, AstError> {
        let operator = operator.into();
        if operands.is_empty() {
            return Err(AstError::NoOperands(operator));
        }
        Ok(Self {
            operator,
            operands,
            call: false,
        })
    }

    /// Creates a function call. The name is uppercased; `args` may be empty.
    #[must_use]
    pub fn call(name: &str, args: Vec<Expression>) -> Self {
        Self {
            operator: name.to_ascii_uppercase(),
            operands: args,
            call: true,
        }
    }

    /// Creates a single-operand operation such as `NOT x` or `x IS NULL`.
    #[must_use]
    pub fn unary(operator: impl Into<String>, operand: Expression) -> Self {
        Self {
            operator: operator.into(),
            operands: vec![operand],
            call: false,
        }
    }

    /// Creates a two-operand operation.
    #[must_use]
    pub fn binary(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        Self {
            operator: operator.into(),
            operands: vec![left, right],
            call: false,
        }
    }

    /// Returns the operator text.
    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Returns true if this operation is a function call.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        self.call
    }

    /// Returns all operands in order.
    #[must_use]
    pub fn operands(&self) -> &[Expression] {
        &self.operands
    }

    /// Returns the operand at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::OperandOutOfBounds`] if `index` is past the end.
    pub fn operand(&self, index: usize) -> Result<&Expression, AstError> {
        self.operands
            .get(index)
            .ok_or_else(|| AstError::OperandOutOfBounds {
                operator: self.operator.clone(),
                index,
                len: self.operands.len(),
            })
    }

    /// Returns the number of operands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operands.len()
    }

    /// Returns true for a zero-argument call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Consumes the operation, returning its operator and operands.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Expression>) {
        (self.operator, self.operands)
    }

    /// Creates an operation the parser has already checked for operands.
    pub(crate) fn with_operands(operator: &str, operands: Vec<Expression>) -> Self {
        Self {
            operator: String::from(operator),
            operands,
            call: false,
        }
    }

    /// Appends an operand while the parser folds a run of one operator.
    pub(crate) fn push(&mut self, operand: Expression) {
        self.operands.push(operand);
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// A leaf value.
    Constant(Constant),
    /// An operator with its operands.
    Operation(Operation),
    /// A nested query, as in `x IN (SELECT ...)` or `EXISTS (SELECT ...)`.
    Query(Box<Query>),
    /// A `?` parameter of a prepared statement.
    Placeholder,
}

impl Expression {
    /// Creates a column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Constant(Constant::column(name))
    }

    /// Creates a numeric literal from its text.
    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::Constant(Constant::number(text))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Constant(Constant::string(value))
    }

    /// Creates the `NULL` literal.
    #[must_use]
    pub fn null() -> Self {
        Self::Constant(Constant::null())
    }

    /// Wraps a query as an expression operand.
    #[must_use]
    pub fn query(query: Query) -> Self {
        Self::Query(Box::new(query))
    }

    /// Returns true for a `?` parameter.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Returns the constant, if this is one.
    #[must_use]
    pub const fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Constant(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the operation, if this is one.
    #[must_use]
    pub const fn as_operation(&self) -> Option<&Operation> {
        match self {
            Self::Operation(op) => Some(op),
            _ => None,
        }
    }

    /// Returns the nested query, if this is one.
    #[must_use]
    pub fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(q) => Some(q),
            _ => None,
        }
    }

    /// Creates a two-operand operation with `self` on the left.
    #[must_use]
    pub fn binary(self, operator: &str, right: Self) -> Self {
        Self::Operation(Operation::binary(operator, self, right))
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(ops::EQ, right)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: Self) -> Self {
        self.binary(ops::NOT_EQ, right)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: Self) -> Self {
        self.binary(ops::LT, right)
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq(self, right: Self) -> Self {
        self.binary(ops::LT_EQ, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.binary(ops::GT, right)
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq(self, right: Self) -> Self {
        self.binary(ops::GT_EQ, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(ops::AND, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(ops::OR, right)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like(self, pattern: Self) -> Self {
        self.binary(ops::LIKE, pattern)
    }

    /// Creates a NOT expression.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Operation(Operation::unary(ops::NOT, self))
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::Operation(Operation::unary(ops::IS_NULL, self))
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::Operation(Operation::unary(ops::IS_NOT_NULL, self))
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between(self, low: Self, high: Self) -> Self {
        Self::Operation(Operation {
            operator: String::from(ops::BETWEEN),
            operands: vec![self, low, high],
            call: false,
        })
    }

    /// Creates an IN expression over a value list.
    #[must_use]
    pub fn in_list(self, list: Vec<Self>) -> Self {
        let mut operands = Vec::with_capacity(list.len() + 1);
        operands.push(self);
        operands.extend(list);
        Self::Operation(Operation {
            operator: String::from(ops::IN),
            operands,
            call: false,
        })
    }
}

impl From<Constant> for Expression {
    fn from(constant: Constant) -> Self {
        Self::Constant(constant)
    }
}

impl From<Operation> for Expression {
    fn from(operation: Operation) -> Self {
        Self::Operation(operation)
    }
}

impl From<Query> for Expression {
    fn from(query: Query) -> Self {
        Self::query(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_equality_uses_text() {
        assert_eq!(Constant::number("1"), Constant::number("1"));
        assert_ne!(Constant::number("01"), Constant::number("1"));
        assert_ne!(Constant::string("A"), Constant::column("A"));
    }

    #[test]
    fn test_operation_new_rejects_empty() {
        assert_eq!(
            Operation::new("AND", vec![]),
            Err(AstError::NoOperands(String::from("AND")))
        );
        assert!(Operation::new("NOT", vec![Expression::column("a")]).is_ok());
    }

    #[test]
    fn test_call_allows_no_arguments() {
        let call = Operation::call("now", vec![]);
        assert_eq!(call.operator(), "NOW");
        assert!(call.is_empty());
        assert!(call.is_call());
    }

    #[test]
    fn test_call_differs_from_operator() {
        let call = Operation::call("nvl", vec![Expression::column("a"), Expression::number("0")]);
        let infix = Operation::binary("NVL", Expression::column("a"), Expression::number("0"));
        assert!(!infix.is_call());
        assert_ne!(call, infix);
    }

    #[test]
    fn test_operand_bounds() {
        let op = Operation::binary("=", Expression::column("a"), Expression::number("1"));
        assert_eq!(op.operand(1), Ok(&Expression::number("1")));
        assert_eq!(
            op.operand(2),
            Err(AstError::OperandOutOfBounds {
                operator: String::from("="),
                index: 2,
                len: 2,
            })
        );
    }

    #[test]
    fn test_expression_chaining() {
        let expr = Expression::column("age")
            .gt(Expression::number("18"))
            .and(Expression::column("status").eq(Expression::string("active")));

        let op = expr.as_operation().unwrap();
        assert_eq!(op.operator(), "AND");
        assert_eq!(op.len(), 2);
        assert_eq!(op.operand(0).unwrap().as_operation().unwrap().operator(), ">");
    }

    #[test]
    fn test_in_list() {
        let expr = Expression::column("x").in_list(vec![
            Expression::number("1"),
            Expression::number("2"),
        ]);
        let op = expr.as_operation().unwrap();
        assert_eq!(op.operator(), "IN");
        assert_eq!(op.len(), 3);
    }
}
