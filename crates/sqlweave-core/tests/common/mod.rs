#![allow(dead_code)]

use sqlweave_core::ast::{Delete, Insert, Query, Statement, Update};
use sqlweave_core::{ParseError, Parser};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber filtered by `RUST_LOG`, once per test
/// binary. `RUST_LOG=sqlweave_core=trace` shows parser events.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Creates a parser over `sql` with tracing installed.
pub fn parser(sql: &str) -> Parser {
    init_tracing();
    Parser::new(sql)
}

pub fn parse(sql: &str) -> Statement {
    parser(sql)
        .read_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
        .unwrap_or_else(|| panic!("No statement in: {sql}"))
}

pub fn parse_all(sql: &str) -> Vec<Statement> {
    parser(sql)
        .read_statements()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parser(sql)
        .read_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(q) => *q,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> Insert {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> Update {
    match parse(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> Delete {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

/// Renders `sql` and verifies that the rendering parses back to the same
/// tree and renders to the same text. Returns the rendering.
pub fn round_trip(sql: &str) -> String {
    round_trip_with(sql, &[])
}

/// Like [`round_trip`], with `functions` registered as custom functions
/// (name and arity) for both parses.
pub fn round_trip_with(sql: &str, functions: &[(&str, i32)]) -> String {
    let read = |text: &str| {
        let mut p = parser(text);
        for (name, arity) in functions {
            p.add_custom_function(name, *arity);
        }
        p.read_statement()
            .unwrap_or_else(|e| panic!("Failed to parse: {text}\nError: {e:?}"))
            .unwrap_or_else(|| panic!("No statement in: {text}"))
    };
    let ast1 = read(sql);
    let rendered1 = ast1.to_string();
    let ast2 = read(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    rendered1
}
