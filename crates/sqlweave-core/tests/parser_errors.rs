//! Tests for parser error cases.

mod common;
use common::*;

use sqlweave_core::lexer::{Keyword, Span, TokenKind};
use sqlweave_core::{ParseError, Parser};

#[test]
fn error_incomplete_select() {
    let _ = parse_err("SELECT");
}

#[test]
fn error_missing_from() {
    let err = parse_err("SELECT a WHERE b = 1");
    match err {
        ParseError::Syntax {
            expected, found, ..
        } => {
            assert_eq!(expected.as_deref(), Some("FROM"));
            assert_eq!(found, Some(TokenKind::Keyword(Keyword::Where)));
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn error_reports_position() {
    let err = parse_err("SELECT a FROM WHERE");
    assert_eq!(err.span(), Some(Span::new(14, 19)));
    assert!(err.to_string().ends_with("at position 14..19"));
}

#[test]
fn error_unexpected_statement() {
    let err = parse_err("TRUNCATE users");
    assert!(err.to_string().contains("expected SELECT, INSERT"));
}

#[test]
fn error_unclosed_paren() {
    let err = parse_err("SELECT (1 + 2 FROM t");
    assert!(err.to_string().contains("expected `)`"));
}

#[test]
fn error_unexpected_end() {
    let err = parse_err("SELECT a FROM t WHERE a =");
    assert!(err.to_string().contains("Unexpected end of input"));
}

#[test]
fn error_chained_comparison() {
    let _ = parse_err("SELECT a FROM t WHERE a = b = c");
}

#[test]
fn error_unknown_function() {
    let err = parse_err("SELECT UPPER(name) FROM t");
    assert!(err.to_string().contains("unknown function UPPER"));
}

#[test]
fn error_wrong_argument_count() {
    let err = parse_err("SELECT MAX(a, b) FROM t");
    assert!(err.to_string().contains("MAX expects 1 argument(s), found 2"));
}

#[test]
fn error_empty_values() {
    let _ = parse_err("INSERT INTO t VALUES ()");
}

#[test]
fn error_update_without_assignments() {
    let _ = parse_err("UPDATE t SET WHERE a = 1");
}

#[test]
fn error_bad_lock_mode() {
    let err = parse_err("LOCK TABLE t IN ROW MODE");
    assert!(err.to_string().contains("expected EXCLUSIVE"));
}

#[test]
fn error_unterminated_string() {
    let err = parse_err("SELECT a FROM t WHERE b = 'abc");
    assert!(err.to_string().starts_with("Unterminated string literal"));
}

#[test]
fn empty_input_has_no_statement() {
    assert_eq!(Parser::new("").read_statement(), Ok(None));
    assert_eq!(Parser::new(" ;; -- nothing\n").read_statement(), Ok(None));
}

#[test]
fn uninitialized_parser() {
    assert_eq!(
        Parser::default().read_statement(),
        Err(ParseError::Uninitialized)
    );
}

#[test]
fn failing_reader() {
    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk gone"))
        }
    }

    let mut parser = Parser::default();
    let err = parser.init_reader(Broken).unwrap_err();
    assert!(matches!(err, ParseError::Io(message) if message.contains("disk gone")));
}
