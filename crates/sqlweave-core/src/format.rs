//! Canonical SQL rendering.
//!
//! [`Formatter`] turns AST nodes back into SQL text. Keywords of statements
//! and clauses are written in lowercase, operators as stored, and every
//! operation is wrapped in parentheses unless it is a function call, a
//! quantifier (`ANY`, `ALL`, `SOME`) or `UNION`. Rendering a parsed statement
//! and parsing the result yields an equal tree.
//!
//! Operations marked as calls render as `NAME(args)` under any registry, so
//! the `Display` implementations of the AST types, which use the built-in
//! registry, render parsed custom function calls correctly. The registry only
//! decides how unmarked operations whose operator names a function render.

use core::fmt;

use crate::ast::ops;
use crate::ast::{
    Constant, ConstantKind, Delete, Expression, FromItem, GroupBy, Insert, InsertValues,
    LockTable, Operation, OrderBy, Query, SelectItem, Statement, TransactionControl, Update,
};
use crate::registry::Registry;

/// Renders AST nodes as SQL text.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'r> {
    registry: &'r Registry,
}

impl<'r> Formatter<'r> {
    /// Creates a formatter that renders calls to functions in `registry`.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Renders a statement.
    #[must_use]
    pub fn statement(&self, statement: &Statement) -> String {
        let mut out = String::new();
        self.write_statement(&mut out, statement);
        out
    }

    /// Renders a query.
    #[must_use]
    pub fn query(&self, query: &Query) -> String {
        let mut out = String::new();
        self.write_query(&mut out, query);
        out
    }

    /// Renders an expression.
    #[must_use]
    pub fn expression(&self, expr: &Expression) -> String {
        let mut out = String::new();
        self.write_expression(&mut out, expr);
        out
    }

    /// Renders an operation.
    #[must_use]
    pub fn operation(&self, operation: &Operation) -> String {
        let mut out = String::new();
        self.write_operation(&mut out, operation);
        out
    }

    /// Renders an expression in prefix form, operator first:
    /// `a > 1 AND b = 2` becomes `(AND (> a 1) (= b 2))`.
    #[must_use]
    pub fn reverse_polish(&self, expr: &Expression) -> String {
        let mut out = String::new();
        self.write_reverse_polish(&mut out, expr);
        out
    }

    fn write_statement(&self, out: &mut String, statement: &Statement) {
        match statement {
            Statement::Query(query) => self.write_query(out, query),
            Statement::Insert(insert) => self.write_insert(out, insert),
            Statement::Update(update) => self.write_update(out, update),
            Statement::Delete(delete) => self.write_delete(out, delete),
            Statement::LockTable(lock) => write_lock_table(out, lock),
            Statement::Transaction(transaction) => write_transaction(out, transaction),
        }
    }

    fn write_query(&self, out: &mut String, query: &Query) {
        out.push_str("select ");
        if query.is_distinct() {
            out.push_str("distinct ");
        }
        self.write_list(out, query.items(), ", ", Self::write_select_item);

        out.push_str(" from ");
        for (i, item) in query.from().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_from_item(out, item);
        }

        if let Some(condition) = query.where_clause() {
            out.push_str(" where ");
            self.write_expression(out, condition);
        }
        if let Some(group_by) = query.group_by() {
            out.push(' ');
            self.write_group_by(out, group_by);
        }
        if let Some(set) = query.set_operation() {
            out.push(' ');
            out.push_str(set.operator());
            for operand in set.operands() {
                out.push(' ');
                self.write_expression(out, operand);
            }
        }
        if !query.order_by().is_empty() {
            out.push_str(" order by ");
            self.write_list(out, query.order_by(), ", ", Self::write_order_by);
        }
        if query.is_for_update() {
            out.push_str(" for update");
        }
    }

    fn write_select_item(&self, out: &mut String, item: &SelectItem) {
        match item.expression() {
            Some(expr) if item.is_expression() => self.write_expression(out, expr),
            _ => out.push_str(item.name().text()),
        }
        if let Some(alias) = item.alias() {
            out.push(' ');
            out.push_str(alias);
        }
    }

    fn write_group_by(&self, out: &mut String, group_by: &GroupBy) {
        out.push_str("group by ");
        self.write_list(out, &group_by.exprs, ", ", Self::write_expression);
        if let Some(having) = &group_by.having {
            out.push_str(" having ");
            self.write_expression(out, having);
        }
    }

    fn write_order_by(&self, out: &mut String, entry: &OrderBy) {
        self.write_expression(out, &entry.expr);
        out.push(' ');
        out.push_str(entry.direction());
    }

    fn write_insert(&self, out: &mut String, insert: &Insert) {
        out.push_str("insert into ");
        out.push_str(insert.table());
        if let Some(columns) = insert.columns() {
            if !columns.is_empty() {
                out.push('(');
                out.push_str(&columns.join(","));
                out.push(')');
            }
        }
        match insert.source() {
            InsertValues::List(values) => {
                out.push_str(" values (");
                self.write_list(out, values, ", ", Self::write_expression);
                out.push(')');
            }
            InsertValues::Query(query) => {
                out.push(' ');
                self.write_query(out, query);
            }
        }
    }

    fn write_update(&self, out: &mut String, update: &Update) {
        out.push_str("update ");
        out.push_str(update.table());
        if let Some(alias) = update.alias() {
            out.push(' ');
            out.push_str(alias);
        }
        out.push_str(" set ");
        for (i, (column, value)) in update.assignments().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(column);
            out.push('=');
            self.write_expression(out, value);
        }
        if let Some(condition) = update.where_clause() {
            out.push_str(" where ");
            self.write_expression(out, condition);
        }
    }

    fn write_delete(&self, out: &mut String, delete: &Delete) {
        out.push_str("delete from ");
        out.push_str(delete.table());
        if let Some(condition) = delete.where_clause() {
            out.push_str(" where ");
            self.write_expression(out, condition);
        }
    }

    fn write_expression(&self, out: &mut String, expr: &Expression) {
        match expr {
            Expression::Constant(constant) => write_constant(out, constant),
            Expression::Operation(operation) => self.write_operation(out, operation),
            Expression::Query(query) => {
                out.push('(');
                self.write_query(out, query);
                out.push(')');
            }
            Expression::Placeholder => out.push('?'),
        }
    }

    fn write_reverse_polish(&self, out: &mut String, expr: &Expression) {
        let Expression::Operation(operation) = expr else {
            self.write_expression(out, expr);
            return;
        };
        out.push('(');
        out.push_str(operation.operator());
        for operand in operation.operands() {
            out.push(' ');
            self.write_reverse_polish(out, operand);
        }
        out.push(')');
    }

    fn write_operation(&self, out: &mut String, operation: &Operation) {
        let operator = operation.operator();
        let operands = operation.operands();

        if operation.is_call() || operands.is_empty() || self.registry.is_function(operator) {
            out.push_str(operator);
            out.push('(');
            self.write_list(out, operands, ",", Self::write_expression);
            out.push(')');
            return;
        }

        let parenthesize =
            !(ops::is_quantifier(operator) || operator.eq_ignore_ascii_case(ops::UNION));
        if parenthesize {
            out.push('(');
        }

        match operands {
            [operand] if ops::is_null_test(operator) => {
                self.write_expression(out, operand);
                out.push(' ');
                out.push_str(operator);
            }
            [operand] if operator == ops::LIST => self.write_expression(out, operand),
            [operand] => {
                out.push_str(operator);
                out.push(' ');
                self.write_expression(out, operand);
            }
            [value, low, high] if operator.to_ascii_uppercase().ends_with(ops::BETWEEN) => {
                self.write_expression(out, value);
                out.push(' ');
                out.push_str(operator);
                out.push(' ');
                self.write_expression(out, low);
                out.push_str(" AND ");
                self.write_expression(out, high);
            }
            [value, list @ ..] if ops::is_in(operator) => {
                self.write_expression(out, value);
                out.push(' ');
                out.push_str(operator);
                out.push_str(" (");
                match list {
                    [Expression::Query(query)] => self.write_query(out, query),
                    _ => self.write_list(out, list, ", ", Self::write_expression),
                }
                out.push(')');
            }
            _ if operator == ops::LIST => {
                self.write_list(out, operands, ", ", Self::write_expression);
            }
            _ => {
                let separator = format!(" {operator} ");
                self.write_list(out, operands, &separator, Self::write_expression);
            }
        }

        if parenthesize {
            out.push(')');
        }
    }

    fn write_list<T>(
        &self,
        out: &mut String,
        items: &[T],
        separator: &str,
        write: impl Fn(&Self, &mut String, &T),
    ) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            write(self, out, item);
        }
    }
}

impl Default for Formatter<'static> {
    fn default() -> Self {
        Self::new(Registry::seeded())
    }
}

fn write_constant(out: &mut String, constant: &Constant) {
    match constant.kind {
        ConstantKind::String => {
            out.push('\'');
            out.push_str(&constant.value.replace('\'', "''"));
            out.push('\'');
        }
        ConstantKind::ColumnName | ConstantKind::Null | ConstantKind::Number => {
            out.push_str(&constant.value);
        }
    }
}

fn write_from_item(out: &mut String, item: &FromItem) {
    out.push_str(item.name().text());
    if let Some(alias) = item.alias() {
        out.push(' ');
        out.push_str(alias);
    }
}

fn write_lock_table(out: &mut String, lock: &LockTable) {
    out.push_str("lock table ");
    out.push_str(&lock.tables().join(", "));
    out.push_str(" in ");
    out.push_str(lock.mode().as_str());
    out.push_str(" mode");
    if lock.is_nowait() {
        out.push_str(" nowait");
    }
}

fn write_transaction(out: &mut String, transaction: &TransactionControl) {
    out.push_str(&transaction.statement().to_ascii_lowercase());
    if transaction.statement() == TransactionControl::SET_TRANSACTION {
        out.push_str(if transaction.is_read_only() {
            " read only"
        } else {
            " read write"
        });
    }
    if let Some(comment) = transaction.comment() {
        out.push_str(" comment ");
        write_constant(out, &Constant::string(comment));
    }
}

macro_rules! display_with_seeded_registry {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let mut out = String::new();
                    Formatter::default().$method(&mut out, self);
                    f.write_str(&out)
                }
            }
        )*
    };
}

display_with_seeded_registry! {
    Statement => write_statement,
    Query => write_query,
    Expression => write_expression,
    Operation => write_operation,
    SelectItem => write_select_item,
    GroupBy => write_group_by,
    OrderBy => write_order_by,
    Insert => write_insert,
    Update => write_update,
    Delete => write_delete,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_constant(&mut out, self);
        f.write_str(&out)
    }
}

impl fmt::Display for FromItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_from_item(&mut out, self);
        f.write_str(&out)
    }
}

impl fmt::Display for LockTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_lock_table(&mut out, self);
        f.write_str(&out)
    }
}

impl fmt::Display for TransactionControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_transaction(&mut out, self);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{LockMode, SelectItem};

    fn col(name: &str) -> Expression {
        Expression::column(name)
    }

    fn num(text: &str) -> Expression {
        Expression::number(text)
    }

    #[test]
    fn test_constants() {
        assert_eq!(Expression::string("it's").to_string(), "'it''s'");
        assert_eq!(num("200.00").to_string(), "200.00");
        assert_eq!(Expression::null().to_string(), "NULL");
    }

    #[test]
    fn test_binary_is_parenthesized() {
        assert_eq!(col("a").gt_eq(num("1")).to_string(), "(a >= 1)");
    }

    #[test]
    fn test_nary_operation() {
        let op = Operation::new(
            "AND",
            vec![
                col("a").eq(num("1")),
                col("b").eq(num("2")),
                col("c").eq(num("3")),
            ],
        )
        .unwrap();
        assert_eq!(op.to_string(), "((a = 1) AND (b = 2) AND (c = 3))");
    }

    #[test]
    fn test_between() {
        assert_eq!(
            col("SALARY").between(num("30000"), num("50000")).to_string(),
            "(SALARY BETWEEN 30000 AND 50000)"
        );
        let not_between = Operation::new("NOT BETWEEN", vec![col("x"), num("1"), num("2")]).unwrap();
        assert_eq!(not_between.to_string(), "(x NOT BETWEEN 1 AND 2)");
    }

    #[test]
    fn test_in_list() {
        let expr = col("POSITION").in_list(vec![
            Expression::string("Manager"),
            Expression::string("Staff"),
        ]);
        assert_eq!(expr.to_string(), "(POSITION IN ('Manager', 'Staff'))");
    }

    #[test]
    fn test_unary_forms() {
        assert_eq!(col("a").is_null().to_string(), "(a IS NULL)");
        assert_eq!(col("a").is_not_null().to_string(), "(a IS NOT NULL)");
        assert_eq!(col("a").negate().to_string(), "(NOT a)");
        assert_eq!(Operation::unary("-", num("3")).to_string(), "(- 3)");
        assert_eq!(Operation::unary(",", num("3")).to_string(), "(3)");
    }

    #[test]
    fn test_function_calls() {
        let sum = Operation::call("sum", vec![col("PRICE")]);
        assert_eq!(sum.to_string(), "SUM(PRICE)");

        let now = Operation::call("now", vec![]);
        assert_eq!(now.to_string(), "NOW()");

        let registry = Registry::new();
        registry.register("fn", 2);
        let call = Operation::call("fn", vec![col("a"), num("1")]);
        assert_eq!(Formatter::new(&registry).operation(&call), "FN(a,1)");
    }

    #[test]
    fn test_marked_calls_render_without_registry_entry() {
        let call = Operation::call("nvl", vec![col("BONUS"), num("0")]);
        assert_eq!(call.to_string(), "NVL(BONUS,0)");
        assert_eq!(Formatter::new(&Registry::new()).operation(&call), "NVL(BONUS,0)");

        let infix = Operation::binary("NVL", col("BONUS"), num("0"));
        assert_eq!(infix.to_string(), "(BONUS NVL 0)");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(Expression::Placeholder.to_string(), "?");
        assert_eq!(col("a").eq(Expression::Placeholder).to_string(), "(a = ?)");
    }

    #[test]
    fn test_reverse_polish() {
        let formatter = Formatter::default();
        let expr = col("a")
            .gt(num("1"))
            .and(col("b").eq(Expression::string("x")));
        assert_eq!(formatter.reverse_polish(&expr), "(AND (> a 1) (= b 'x'))");
        assert_eq!(formatter.reverse_polish(&col("a")), "a");

        let inner = Query::builder()
            .item(SelectItem::column("b"))
            .from(FromItem::new("u"))
            .build()
            .unwrap();
        let exists: Expression = Operation::unary("EXISTS", Expression::query(inner)).into();
        assert_eq!(
            formatter.reverse_polish(&exists),
            "(EXISTS (select b from u))"
        );
        let sum: Expression = Operation::call("sum", vec![col("a")]).into();
        assert_eq!(formatter.reverse_polish(&sum), "(SUM a)");
    }

    #[test]
    fn test_query_rendering() {
        let inner = Query::builder()
            .item(SelectItem::column("PRICE"))
            .from(FromItem::new("ANTIQUES"))
            .build()
            .unwrap();
        let all = Expression::Operation(Operation::unary("ALL", Expression::query(inner)));
        let query = Query::builder()
            .distinct(true)
            .item(SelectItem::column("ITEM").with_alias("i"))
            .from(FromItem::new("ANTIQUES").with_alias("a"))
            .where_clause(col("PRICE").gt_eq(all))
            .order_by(OrderBy::desc(col("ITEM")))
            .for_update(true)
            .build()
            .unwrap();
        assert_eq!(
            query.to_string(),
            "select distinct ITEM i from ANTIQUES a where (PRICE >= ALL (select PRICE from ANTIQUES)) order by ITEM DESC for update"
        );
    }

    #[test]
    fn test_dml_rendering() {
        let insert = Insert::builder("ANTIQUES")
            .columns(["BUYERID", "ITEM"])
            .values(vec![num("01"), Expression::string("Ottoman")])
            .build()
            .unwrap();
        assert_eq!(
            insert.to_string(),
            "insert into ANTIQUES(BUYERID,ITEM) values (01, 'Ottoman')"
        );

        let update = Update::builder("ANTIQUES")
            .set("PRICE", num("500.00"))
            .where_clause(col("ITEM").eq(Expression::string("Chair")))
            .build()
            .unwrap();
        assert_eq!(
            update.to_string(),
            "update ANTIQUES set PRICE=500.00 where (ITEM = 'Chair')"
        );

        let delete = Delete::new("ANTIQUES");
        assert_eq!(delete.to_string(), "delete from ANTIQUES");
    }

    #[test]
    fn test_lock_and_transaction_rendering() {
        let lock = LockTable::new(vec![String::from("a"), String::from("b")], LockMode::RowShare)
            .unwrap()
            .with_nowait(true);
        assert_eq!(lock.to_string(), "lock table a, b in ROW SHARE mode nowait");

        assert_eq!(
            TransactionControl::commit().with_comment("it's done").to_string(),
            "commit comment 'it''s done'"
        );
        assert_eq!(
            TransactionControl::set_transaction(true).to_string(),
            "set transaction read only"
        );
        assert_eq!(
            TransactionControl::set_transaction(false).to_string(),
            "set transaction read write"
        );
    }
}
