//! SQL statement AST types.

use super::error::AstError;
use super::expression::{Constant, ConstantKind, Expression, Operation};
use super::name::AliasedName;
use crate::format::Formatter;
use crate::registry::Registry;

/// An item of a select list: `*`, `t.*`, a column, or an expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectItem {
    name: AliasedName,
    expression: Option<Expression>,
    aggregate: Option<String>,
}

impl SelectItem {
    /// Creates the `*` item.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::column("*")
    }

    /// Creates an item for a dotted column name (`a`, `t.a`, `t.*`).
    #[must_use]
    pub fn column(fullname: &str) -> Self {
        let name = AliasedName::column(fullname);
        let expression = if name.is_wildcard() {
            None
        } else {
            Some(Expression::column(fullname))
        };
        Self {
            name,
            expression,
            aggregate: None,
        }
    }

    /// Creates an item for `expr`, naming it by its rendering under the
    /// default registry.
    #[must_use]
    pub fn new(expr: Expression) -> Self {
        Self::with_registry(expr, Registry::seeded())
    }

    /// Creates an item for `expr`, naming it by its rendering under
    /// `registry`. A call to a registered function is recorded as the
    /// item's aggregate.
    ///
    /// Only column references and calls over a single column have name
    /// segments; `SUM(t.a)` has table `t` and column `a`. Other expressions
    /// keep their rendering as an unsplit name.
    #[must_use]
    pub fn with_registry(expr: Expression, registry: &Registry) -> Self {
        if let Expression::Constant(Constant {
            kind: ConstantKind::ColumnName,
            value,
        }) = &expr
        {
            return Self::column(value);
        }
        let text = Formatter::new(registry).expression(&expr);
        let aggregate = registry.aggregate_call(&text);
        let over_column = matches!(
            expr.as_operation().map(Operation::operands),
            Some([Expression::Constant(Constant { kind: ConstantKind::ColumnName, .. })])
        );
        let name = if aggregate.is_some() && over_column {
            AliasedName::column(&text)
        } else {
            AliasedName::opaque(&text)
        };
        Self {
            name,
            expression: Some(expr),
            aggregate,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.name = self.name.with_alias(alias);
        self
    }

    /// Returns the dotted name, split in column form.
    #[must_use]
    pub const fn name(&self) -> &AliasedName {
        &self.name
    }

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.name.alias()
    }

    /// Returns the item's expression; `None` for wildcards.
    #[must_use]
    pub const fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }

    /// Returns true when the item is more than a bare column reference.
    #[must_use]
    pub fn is_expression(&self) -> bool {
        match &self.expression {
            Some(Expression::Constant(c)) => c.kind != ConstantKind::ColumnName,
            Some(_) => true,
            None => false,
        }
    }

    /// Returns the function name if the item is a call to a registered
    /// function, such as `SUM` for `SUM(PRICE)`.
    #[must_use]
    pub fn aggregate(&self) -> Option<&str> {
        self.aggregate.as_deref()
    }

    /// Returns true for `*` and `t.*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.expression.is_none() && self.name.is_wildcard()
    }
}

/// A table in a FROM clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FromItem {
    name: AliasedName,
}

impl FromItem {
    /// Creates a from item for a dotted table name.
    #[must_use]
    pub fn new(fullname: &str) -> Self {
        Self {
            name: AliasedName::table(fullname),
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.name = self.name.with_alias(alias);
        self
    }

    /// Returns the dotted name, split in table form.
    #[must_use]
    pub const fn name(&self) -> &AliasedName {
        &self.name
    }

    /// Returns the table segment.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.name.table_name()
    }

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.name.alias()
    }
}

/// A GROUP BY clause with its optional HAVING condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupBy {
    /// Grouping expressions, in order.
    pub exprs: Vec<Expression>,
    /// HAVING condition.
    pub having: Option<Expression>,
}

impl GroupBy {
    /// Creates a GROUP BY clause without HAVING.
    #[must_use]
    pub const fn new(exprs: Vec<Expression>) -> Self {
        Self {
            exprs,
            having: None,
        }
    }

    /// Sets the HAVING condition.
    #[must_use]
    pub fn with_having(mut self, having: Expression) -> Self {
        self.having = Some(having);
        self
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expression,
    /// True for ASC (the default), false for DESC.
    pub ascending: bool,
}

impl OrderBy {
    /// Creates an ascending entry.
    #[must_use]
    pub const fn new(expr: Expression) -> Self {
        Self {
            expr,
            ascending: true,
        }
    }

    /// Creates a descending entry.
    #[must_use]
    pub const fn desc(expr: Expression) -> Self {
        Self {
            expr,
            ascending: false,
        }
    }

    /// Returns `ASC` or `DESC`.
    #[must_use]
    pub const fn direction(&self) -> &'static str {
        if self.ascending { "ASC" } else { "DESC" }
    }
}

/// A SELECT query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    distinct: bool,
    items: Vec<SelectItem>,
    from: Vec<FromItem>,
    where_clause: Option<Expression>,
    group_by: Option<GroupBy>,
    set_operation: Option<Operation>,
    order_by: Vec<OrderBy>,
    for_update: bool,
}

impl Query {
    /// Starts building a query.
    #[must_use]
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }

    /// Returns true for SELECT DISTINCT.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the select list.
    #[must_use]
    pub fn items(&self) -> &[SelectItem] {
        &self.items
    }

    /// Returns the FROM list.
    #[must_use]
    pub fn from(&self) -> &[FromItem] {
        &self.from
    }

    /// Returns the WHERE condition.
    #[must_use]
    pub const fn where_clause(&self) -> Option<&Expression> {
        self.where_clause.as_ref()
    }

    /// Returns the GROUP BY clause.
    #[must_use]
    pub const fn group_by(&self) -> Option<&GroupBy> {
        self.group_by.as_ref()
    }

    /// Returns the set operation joining another query, such as
    /// `UNION (SELECT ...)`. Its operator is the set operator and its single
    /// operand the other query.
    #[must_use]
    pub const fn set_operation(&self) -> Option<&Operation> {
        self.set_operation.as_ref()
    }

    /// Returns the ORDER BY entries.
    #[must_use]
    pub fn order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    /// Returns true for SELECT ... FOR UPDATE.
    #[must_use]
    pub const fn is_for_update(&self) -> bool {
        self.for_update
    }
}

/// Builder for [`Query`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    distinct: bool,
    items: Vec<SelectItem>,
    from: Vec<FromItem>,
    where_clause: Option<Expression>,
    group_by: Option<GroupBy>,
    set_operation: Option<Operation>,
    order_by: Vec<OrderBy>,
    for_update: bool,
}

impl QueryBuilder {
    /// Sets the DISTINCT flag.
    #[must_use]
    pub const fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Appends a select item.
    #[must_use]
    pub fn item(mut self, item: SelectItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends a from item.
    #[must_use]
    pub fn from(mut self, item: FromItem) -> Self {
        self.from.push(item);
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: Expression) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Sets the GROUP BY clause.
    #[must_use]
    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    /// Joins `other` with a set operator (`UNION`, `UNION ALL`, `INTERSECT`,
    /// `MINUS`, `EXCEPT`).
    #[must_use]
    pub fn set_operation(mut self, operator: &str, other: Query) -> Self {
        self.set_operation = Some(Operation::unary(
            operator.to_ascii_uppercase(),
            Expression::query(other),
        ));
        self
    }

    /// Appends an ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, entry: OrderBy) -> Self {
        self.order_by.push(entry);
        self
    }

    /// Sets the FOR UPDATE flag.
    #[must_use]
    pub const fn for_update(mut self, for_update: bool) -> Self {
        self.for_update = for_update;
        self
    }

    /// Finalizes the query.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::MissingSelect`] without select items and
    /// [`AstError::MissingFrom`] without from items.
    pub fn build(self) -> Result<Query, AstError> {
        if self.items.is_empty() {
            return Err(AstError::MissingSelect);
        }
        if self.from.is_empty() {
            return Err(AstError::MissingFrom);
        }
        Ok(Query {
            distinct: self.distinct,
            items: self.items,
            from: self.from,
            where_clause: self.where_clause,
            group_by: self.group_by,
            set_operation: self.set_operation,
            order_by: self.order_by,
            for_update: self.for_update,
        })
    }
}

/// The rows an INSERT adds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertValues {
    /// `VALUES (a, b, ...)`
    List(Vec<Expression>),
    /// `SELECT ...`
    Query(Box<Query>),
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insert {
    table: String,
    columns: Option<Vec<String>>,
    values: InsertValues,
}

impl Insert {
    /// Starts building an insert into `table`.
    #[must_use]
    pub fn builder(table: impl Into<String>) -> InsertBuilder {
        InsertBuilder {
            table: table.into(),
            columns: None,
            values: None,
        }
    }

    /// Returns the target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the explicit column list, if one was given.
    #[must_use]
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Returns the inserted rows.
    #[must_use]
    pub const fn source(&self) -> &InsertValues {
        &self.values
    }

    /// Returns the VALUES list, if the insert has one.
    #[must_use]
    pub fn values(&self) -> Option<&[Expression]> {
        match &self.values {
            InsertValues::List(values) => Some(values),
            InsertValues::Query(_) => None,
        }
    }

    /// Returns the source query, if the insert has one.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        match &self.values {
            InsertValues::Query(query) => Some(query),
            InsertValues::List(_) => None,
        }
    }
}

/// Builder for [`Insert`].
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    columns: Option<Vec<String>>,
    values: Option<InsertValues>,
}

impl InsertBuilder {
    /// Sets the explicit column list.
    #[must_use]
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Inserts a VALUES list.
    #[must_use]
    pub fn values(mut self, values: Vec<Expression>) -> Self {
        self.values = Some(InsertValues::List(values));
        self
    }

    /// Inserts the rows of a query.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.values = Some(InsertValues::Query(Box::new(query)));
        self
    }

    /// Finalizes the insert.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::MissingValues`] when neither values nor a query
    /// were given, or the values list is empty.
    pub fn build(self) -> Result<Insert, AstError> {
        match self.values {
            Some(InsertValues::List(values)) if values.is_empty() => {
                Err(AstError::MissingValues(self.table))
            }
            Some(values) => Ok(Insert {
                table: self.table,
                columns: self.columns,
                values,
            }),
            None => Err(AstError::MissingValues(self.table)),
        }
    }
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Update {
    table: String,
    alias: Option<String>,
    assignments: Vec<(String, Expression)>,
    where_clause: Option<Expression>,
}

impl Update {
    /// Starts building an update of `table`.
    #[must_use]
    pub fn builder(table: impl Into<String>) -> UpdateBuilder {
        UpdateBuilder {
            table: table.into(),
            alias: None,
            assignments: Vec::new(),
            where_clause: None,
        }
    }

    /// Returns the target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the table alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the `column = expr` assignments in the order written.
    #[must_use]
    pub fn assignments(&self) -> &[(String, Expression)] {
        &self.assignments
    }

    /// Returns the value assigned to `column`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Expression> {
        self.assignments
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, expr)| expr)
    }

    /// Returns the WHERE condition.
    #[must_use]
    pub const fn where_clause(&self) -> Option<&Expression> {
        self.where_clause.as_ref()
    }
}

/// Builder for [`Update`].
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: String,
    alias: Option<String>,
    assignments: Vec<(String, Expression)>,
    where_clause: Option<Expression>,
}

impl UpdateBuilder {
    /// Sets the table alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Assigns `value` to `column`. Assigning a column twice replaces the
    /// earlier value and keeps its position.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: Expression) -> Self {
        let column = column.into();
        match self.assignments.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((column, value)),
        }
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: Expression) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Finalizes the update.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::EmptyAssignments`] when no column was assigned.
    pub fn build(self) -> Result<Update, AstError> {
        if self.assignments.is_empty() {
            return Err(AstError::EmptyAssignments(self.table));
        }
        Ok(Update {
            table: self.table,
            alias: self.alias,
            assignments: self.assignments,
            where_clause: self.where_clause,
        })
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delete {
    table: String,
    where_clause: Option<Expression>,
}

impl Delete {
    /// Creates a delete of every row of `table`.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            where_clause: None,
        }
    }

    /// Restricts the delete to rows matching `condition`.
    #[must_use]
    pub fn with_where(mut self, condition: Expression) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Returns the target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the WHERE condition.
    #[must_use]
    pub const fn where_clause(&self) -> Option<&Expression> {
        self.where_clause.as_ref()
    }
}

/// Lock mode of a LOCK TABLE statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockMode {
    RowShare,
    RowExclusive,
    ShareUpdate,
    Share,
    ShareRowExclusive,
    Exclusive,
}

impl LockMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RowShare => "ROW SHARE",
            Self::RowExclusive => "ROW EXCLUSIVE",
            Self::ShareUpdate => "SHARE UPDATE",
            Self::Share => "SHARE",
            Self::ShareRowExclusive => "SHARE ROW EXCLUSIVE",
            Self::Exclusive => "EXCLUSIVE",
        }
    }
}

/// A LOCK TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockTable {
    tables: Vec<String>,
    mode: LockMode,
    nowait: bool,
}

impl LockTable {
    /// Creates a lock on `tables`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::NoTables`] if `tables` is empty.
    pub fn new(tables: Vec<String>, mode: LockMode) -> Result<Self, AstError> {
        if tables.is_empty() {
            return Err(AstError::NoTables);
        }
        Ok(Self {
            tables,
            mode,
            nowait: false,
        })
    }

    /// Sets the NOWAIT flag.
    #[must_use]
    pub const fn with_nowait(mut self, nowait: bool) -> Self {
        self.nowait = nowait;
        self
    }

    /// Returns the locked tables.
    #[must_use]
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Returns the lock mode.
    #[must_use]
    pub const fn mode(&self) -> LockMode {
        self.mode
    }

    /// Returns true for NOWAIT.
    #[must_use]
    pub const fn is_nowait(&self) -> bool {
        self.nowait
    }
}

/// A transaction-control statement: COMMIT, ROLLBACK or SET TRANSACTION.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransactionControl {
    statement: String,
    comment: Option<String>,
    read_only: bool,
}

impl TransactionControl {
    pub const COMMIT: &'static str = "COMMIT";
    pub const ROLLBACK: &'static str = "ROLLBACK";
    pub const SET_TRANSACTION: &'static str = "SET TRANSACTION";

    /// Creates a statement from its keyword text, uppercased.
    #[must_use]
    pub fn new(statement: &str) -> Self {
        Self {
            statement: statement.to_ascii_uppercase(),
            comment: None,
            read_only: false,
        }
    }

    /// Creates a COMMIT.
    #[must_use]
    pub fn commit() -> Self {
        Self::new(Self::COMMIT)
    }

    /// Creates a ROLLBACK.
    #[must_use]
    pub fn rollback() -> Self {
        Self::new(Self::ROLLBACK)
    }

    /// Creates a SET TRANSACTION READ ONLY / READ WRITE.
    #[must_use]
    pub fn set_transaction(read_only: bool) -> Self {
        Self::new(Self::SET_TRANSACTION).with_read_only(read_only)
    }

    /// Attaches a COMMENT.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the read-only flag.
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Returns the statement keyword text.
    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Returns the comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns true for READ ONLY.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    /// SELECT query.
    Query(Box<Query>),
    /// INSERT statement.
    Insert(Insert),
    /// UPDATE statement.
    Update(Update),
    /// DELETE statement.
    Delete(Delete),
    /// LOCK TABLE statement.
    LockTable(LockTable),
    /// COMMIT, ROLLBACK or SET TRANSACTION.
    Transaction(TransactionControl),
}

impl Statement {
    /// Returns the statement's leading keyword, for diagnostics.
    #[must_use]
    pub fn keyword(&self) -> &str {
        match self {
            Self::Query(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::LockTable(_) => "LOCK TABLE",
            Self::Transaction(t) => t.statement(),
        }
    }

    /// Returns the query, if this is one.
    #[must_use]
    pub fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(q) => Some(q),
            _ => None,
        }
    }
}

impl From<Query> for Statement {
    fn from(query: Query) -> Self {
        Self::Query(Box::new(query))
    }
}
