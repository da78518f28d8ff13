//! Tests for SELECT parsing.

mod common;
use common::*;

use sqlweave_core::ast::{ConstantKind, Expression, NameForm};

#[test]
fn select_columns_and_tables() {
    let q = parse_query("SELECT EMPLOYEEIDNO, t.NAME FROM EMPLOYEESTATISTICSTABLE, HR.PEOPLE t;");
    assert_eq!(q.items().len(), 2);
    assert_eq!(q.items()[1].name().table_name(), Some("t"));
    assert_eq!(q.items()[1].name().column_name(), Some("NAME"));

    assert_eq!(q.from().len(), 2);
    let people = q.from()[1].name();
    assert_eq!(people.form(), NameForm::Table);
    assert_eq!(people.schema(), Some("HR"));
    assert_eq!(people.table_name(), Some("PEOPLE"));
    assert_eq!(people.alias(), Some("t"));
}

#[test]
fn select_wildcards() {
    let q = parse_query("SELECT *, a.* FROM ANTIQUES a");
    assert!(q.items()[0].is_wildcard());
    assert!(q.items()[1].is_wildcard());
    assert_eq!(q.items()[1].name().table_name(), Some("a"));
    assert!(q.items()[1].expression().is_none());
}

#[test]
fn select_distinct_and_all() {
    assert!(parse_query("SELECT DISTINCT OWNERID FROM ANTIQUES").is_distinct());
    assert!(!parse_query("SELECT ALL OWNERID FROM ANTIQUES").is_distinct());
}

#[test]
fn select_aliases() {
    let q = parse_query("SELECT PRICE AS p, PRICE * 2 doubled FROM ANTIQUES");
    assert_eq!(q.items()[0].alias(), Some("p"));
    assert_eq!(q.items()[1].alias(), Some("doubled"));
    assert!(q.items()[1].is_expression());
    assert!(!q.items()[1].is_wildcard());
    assert_eq!(q.items()[1].name().text(), "(PRICE * 2)");
    assert_eq!(q.items()[1].name().column_name(), None);
}

#[test]
fn select_aggregates_are_tagged() {
    let q = parse_query("SELECT SUM(SALARY), AVG(SALARY) FROM EMPLOYEESTATISTICSTABLE;");
    assert_eq!(q.items()[0].aggregate(), Some("SUM"));
    assert_eq!(q.items()[1].aggregate(), Some("AVG"));
    assert_eq!(
        q.to_string(),
        "select SUM(SALARY), AVG(SALARY) from EMPLOYEESTATISTICSTABLE"
    );
}

#[test]
fn select_count_star() {
    let q = parse_query("SELECT COUNT(*) FROM ANTIQUES");
    assert_eq!(q.items()[0].aggregate(), Some("COUNT"));
    assert!(!q.items()[0].is_wildcard());
    assert_eq!(q.to_string(), "select COUNT(*) from ANTIQUES");
}

#[test]
fn select_expression_is_not_an_aggregate() {
    let q = parse_query("SELECT AVG(PRICE) + 100 FROM ANTIQUES");
    assert_eq!(q.items()[0].aggregate(), None);
}

#[test]
fn select_where_group_having_order() {
    let q = parse_query(
        "SELECT OWNERID, COUNT(ITEM) FROM ANTIQUES WHERE PRICE > 10 \
         GROUP BY OWNERID HAVING COUNT(ITEM) > 1 ORDER BY OWNERID DESC, 2",
    );
    assert!(q.where_clause().is_some());
    let group_by = q.group_by().unwrap();
    assert_eq!(group_by.exprs.len(), 1);
    assert!(group_by.having.is_some());
    assert_eq!(q.order_by().len(), 2);
    assert!(!q.order_by()[0].ascending);
    assert!(q.order_by()[1].ascending);
}

#[test]
fn select_for_update() {
    assert!(parse_query("SELECT a FROM t FOR UPDATE").is_for_update());
}

#[test]
fn select_set_operations() {
    for (sql, op) in [
        ("SELECT a FROM t UNION SELECT a FROM u", "UNION"),
        ("SELECT a FROM t UNION ALL SELECT a FROM u", "UNION ALL"),
        ("SELECT a FROM t INTERSECT (SELECT a FROM u)", "INTERSECT"),
        ("SELECT a FROM t MINUS SELECT a FROM u", "MINUS"),
        ("SELECT a FROM t EXCEPT SELECT a FROM u", "EXCEPT"),
    ] {
        let q = parse_query(sql);
        let set = q.set_operation().unwrap();
        assert_eq!(set.operator(), op, "{sql}");
        assert!(set.operands()[0].as_query().is_some());
    }
}

#[test]
fn select_nested_query_in_where() {
    let q = parse_query("SELECT ITEM FROM ANTIQUES WHERE PRICE > (SELECT AVG(PRICE)+100 FROM ANTIQUES);");
    let cmp = q.where_clause().unwrap().as_operation().unwrap();
    assert_eq!(cmp.operator(), ">");
    let inner = cmp.operands()[1].as_query().unwrap();
    assert_eq!(inner.items().len(), 1);
    assert_eq!(
        q.to_string(),
        "select ITEM from ANTIQUES where (PRICE > (select (AVG(PRICE) + 100) from ANTIQUES))"
    );
}

#[test]
fn select_constants_keep_their_text() {
    let q = parse_query("SELECT 'it''s', 1.50, NULL FROM t");
    let kinds: Vec<_> = q
        .items()
        .iter()
        .map(|item| match item.expression() {
            Some(Expression::Constant(c)) => (c.kind, c.value.clone()),
            other => panic!("expected constant, got {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ConstantKind::String, String::from("it's")),
            (ConstantKind::Number, String::from("1.50")),
            (ConstantKind::Null, String::from("NULL")),
        ]
    );
}

#[test]
fn select_keywords_are_case_insensitive() {
    let q = parse_query("select a from t where b is not null order by a asc");
    assert_eq!(q.to_string(), "select a from t where (b IS NOT NULL) order by a ASC");
}

#[test]
fn select_literal_has_no_name_segments() {
    let q = parse_query("SELECT 1.5, SUM(t.PRICE) FROM t");
    assert_eq!(q.items()[0].name().text(), "1.5");
    assert_eq!(q.items()[0].name().table_name(), None);
    assert_eq!(q.items()[0].name().column_name(), None);
    assert_eq!(q.items()[1].name().table_name(), Some("t"));
    assert_eq!(q.items()[1].name().column_name(), Some("PRICE"));
}
