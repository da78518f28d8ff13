//! Evaluating parsed conditions against tuples.

use sqlweave_core::eval::{EvalError, Evaluator, Tuple, Value};
use sqlweave_core::{Expression, Operation, Parser};

fn condition(sql: &str) -> Expression {
    Parser::new(sql)
        .read_expression()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

fn employees() -> Vec<Tuple> {
    let header = Tuple::from_header("NAME, POSITION, SALARY");
    ["Lee, Manager, 52000", "Smith, Staff, 31000", "Johnson, Staff, 29000"]
        .iter()
        .map(|row| {
            let mut tuple = header.clone();
            tuple.set_row(row);
            tuple
        })
        .collect()
}

fn matching(sql: &str) -> Vec<String> {
    let condition = condition(sql);
    let evaluator = Evaluator::new();
    employees()
        .into_iter()
        .filter(|t| evaluator.eval(t, &condition).unwrap())
        .filter_map(|t| t.get("NAME").map(ToString::to_string))
        .collect()
}

#[test]
fn filter_rows_by_condition() {
    assert_eq!(matching("SALARY >= 50000"), vec!["Lee"]);
    assert_eq!(matching("SALARY BETWEEN 30000 AND 50000"), vec!["Smith"]);
    assert_eq!(
        matching("POSITION IN ('Manager', 'Staff')"),
        vec!["Lee", "Smith", "Johnson"]
    );
    assert_eq!(matching("NAME LIKE 'L%'"), vec!["Lee"]);
    assert_eq!(matching("NAME LIKE '%son'"), vec!["Johnson"]);
    assert_eq!(
        matching("POSITION = 'Staff' AND NOT SALARY < 30000"),
        vec!["Smith"]
    );
}

#[test]
fn arithmetic_over_tuple() {
    let mut tuple = Tuple::from_header("a,b,c,d,e");
    tuple.set_row("1,1,1,1,1");
    let evaluator = Evaluator::new();

    assert_eq!(
        evaluator.value(&tuple, &condition("a+b")).unwrap(),
        Value::Number(2.0)
    );
    assert!(evaluator.eval(&tuple, &condition("a = 1 OR e = 1")).unwrap());
    assert!(evaluator.eval(&tuple, &condition("a * 10 / 4 = 2.5")).unwrap());
}

#[test]
fn comparison_needs_two_operands() {
    let cmp = Operation::new(
        "=",
        vec![Expression::number("1"), Expression::number("1"), Expression::number("1")],
    )
    .unwrap();
    let err = Evaluator::new()
        .eval(&Tuple::new(), &Expression::Operation(cmp))
        .unwrap_err();
    assert_eq!(err, EvalError::ComparisonArity { found: 3 });
}

#[test]
fn builder_expressions_evaluate() {
    let mut tuple = Tuple::new();
    tuple.set("PRICE", 120.0);
    let expr = Expression::column("PRICE")
        .gt(Expression::number("100"))
        .and(Expression::column("PRICE").lt(Expression::number("200")));
    assert!(Evaluator::new().eval(&tuple, &expr).unwrap());
}

#[test]
fn word_values_are_not_numbers() {
    let header = Tuple::from_header("NAME, SALARY");
    let evaluator = Evaluator::new();
    for name in ["Nan", "Inf", "Infinity"] {
        let mut tuple = header.clone();
        tuple.set_row(&format!("{name}, 100"));
        assert_eq!(tuple.get("NAME"), Some(&Value::from(name)));
        let equal = condition(&format!("NAME = '{name}' AND NAME LIKE '{}%'", &name[..1]));
        assert!(evaluator.eval(&tuple, &equal).unwrap(), "{name}");
    }
}

#[test]
fn empty_fields_stay_in_their_column() {
    let mut tuple = Tuple::from_header("a,b,c");
    tuple.set_row("1,,3");
    let evaluator = Evaluator::new();
    assert!(evaluator.eval(&tuple, &condition("c = 3")).unwrap());
    assert_eq!(tuple.get("b"), None);
    assert_eq!(
        evaluator.eval(&tuple, &condition("b = 3")),
        Err(EvalError::UnknownColumn(String::from("b")))
    );
}
