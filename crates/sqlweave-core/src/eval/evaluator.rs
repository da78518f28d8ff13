//! Tree-walking evaluation of expressions against a tuple.

use tracing::{debug, trace};

use super::error::EvalError;
use super::tuple::{Tuple, Value};
use crate::ast::ops;
use crate::ast::{Constant, ConstantKind, Expression, Operation};

/// Evaluates conditions and arithmetic over the values of a [`Tuple`].
///
/// Column names resolve to tuple attributes. Text that reads as a number is
/// compared numerically; any other text compares only for equality.
///
/// ```
/// use sqlweave_core::eval::{Evaluator, Tuple};
/// use sqlweave_core::Parser;
///
/// let mut tuple = Tuple::from_header("name,salary");
/// tuple.set_row("Lee,42000");
///
/// let condition = Parser::new("salary BETWEEN 30000 AND 50000")
///     .read_expression()
///     .unwrap();
/// assert!(Evaluator::new().eval(&tuple, &condition).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Creates an evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates `expr` as a condition.
    ///
    /// # Errors
    ///
    /// Fails if `expr` is not an operation, uses an unknown or unsupported
    /// operator, references a column the tuple lacks, or mixes operand types
    /// an operator cannot handle.
    pub fn eval(&self, tuple: &Tuple, expr: &Expression) -> Result<bool, EvalError> {
        self.condition(tuple, expr).inspect_err(|e| {
            debug!(error = %e, %tuple, "evaluation failed");
        })
    }

    fn condition(&self, tuple: &Tuple, expr: &Expression) -> Result<bool, EvalError> {
        let Expression::Operation(pred) = expr else {
            return Err(EvalError::NotAPredicate(expr.to_string()));
        };
        let operator = pred.operator().to_ascii_uppercase();
        trace!(operator = %operator, operands = pred.len(), "evaluating predicate");
        let operands = pred.operands();

        match operator.as_str() {
            ops::AND => {
                let mut result = true;
                for operand in operands {
                    result &= self.condition(tuple, operand)?;
                }
                Ok(result)
            }
            ops::OR => {
                let mut result = false;
                for operand in operands {
                    result |= self.condition(tuple, operand)?;
                }
                Ok(result)
            }
            ops::NOT => {
                let operand = operands
                    .first()
                    .ok_or_else(|| EvalError::MissingArguments(operator.clone()))?;
                Ok(!self.condition(tuple, operand)?)
            }
            ops::EQ => Ok(self.compare(tuple, operands)? == 0.0),
            ops::NOT_EQ | ops::LT_GT => Ok(self.compare(tuple, operands)? != 0.0),
            ops::GT => Ok(self.compare(tuple, operands)? > 0.0),
            ops::GT_EQ => Ok(self.compare(tuple, operands)? >= 0.0),
            ops::LT => Ok(self.compare(tuple, operands)? < 0.0),
            ops::LT_EQ => Ok(self.compare(tuple, operands)? <= 0.0),
            ops::HASH => Err(EvalError::UnsupportedOperator(operator)),
            ops::BETWEEN | ops::NOT_BETWEEN => {
                let [value, low, high] = operands else {
                    return Err(EvalError::OperandCount {
                        operator,
                        expected: 3,
                        found: operands.len(),
                    });
                };
                let above = self.compare_pair(tuple, value, low)? >= 0.0;
                let below = self.compare_pair(tuple, value, high)? <= 0.0;
                Ok((above && below) != (operator == ops::NOT_BETWEEN))
            }
            ops::LIKE => self.like(tuple, operands),
            ops::NOT_LIKE => Ok(!self.like(tuple, operands)?),
            ops::IN | ops::NOT_IN => {
                let Some((value, list)) = operands.split_first() else {
                    return Err(EvalError::MissingArguments(operator));
                };
                let mut found = false;
                for candidate in list {
                    found |= self.compare_pair(tuple, value, candidate)? == 0.0;
                }
                Ok(found != (operator == ops::NOT_IN))
            }
            ops::IS_NULL => is_null(operands),
            ops::IS_NOT_NULL => Ok(!is_null(operands)?),
            _ => Err(EvalError::UnknownOperator(operator)),
        }
    }

    /// Evaluates `expr` to a value.
    ///
    /// Columns take the tuple's value, read as a number when possible.
    /// `NULL` evaluates to its literal text. Operations are evaluated as
    /// arithmetic.
    ///
    /// # Errors
    ///
    /// Fails on unknown or unset columns, unparseable numbers, subqueries and
    /// failed arithmetic.
    pub fn value(&self, tuple: &Tuple, expr: &Expression) -> Result<Value, EvalError> {
        match expr {
            Expression::Constant(Constant { kind, value }) => match kind {
                ConstantKind::ColumnName => match tuple.get(value) {
                    Some(Value::Text(text)) => Ok(Value::parse(text)),
                    Some(number) => Ok(number.clone()),
                    None => Err(EvalError::UnknownColumn(value.clone())),
                },
                ConstantKind::Number => value
                    .parse::<f64>()
                    .map(Value::Number)
                    .map_err(|_| EvalError::NotNumeric(value.clone())),
                ConstantKind::String | ConstantKind::Null => Ok(Value::Text(value.clone())),
            },
            Expression::Operation(operation) => self.numeric(tuple, operation).map(Value::Number),
            Expression::Query(_) | Expression::Placeholder => {
                Err(EvalError::UnsupportedOperand(expr.to_string()))
            }
        }
    }

    /// Compares exactly two operands.
    ///
    /// Returns their difference when both are numeric. When either is text,
    /// returns `0.0` if they are equal and `-1.0` otherwise, so text supports
    /// only equality tests.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ComparisonArity`] unless there are two operands,
    /// and any error from evaluating them.
    pub fn compare(&self, tuple: &Tuple, operands: &[Expression]) -> Result<f64, EvalError> {
        match operands {
            [left, right] => self.compare_pair(tuple, left, right),
            _ => Err(EvalError::ComparisonArity {
                found: operands.len(),
            }),
        }
    }

    fn compare_pair(
        &self,
        tuple: &Tuple,
        left: &Expression,
        right: &Expression,
    ) -> Result<f64, EvalError> {
        let left = self.value(tuple, left)?;
        let right = self.value(tuple, right)?;
        match (&left, &right) {
            (Value::Number(l), Value::Number(r)) => Ok(l - r),
            _ if left == right => Ok(0.0),
            _ => Ok(-1.0),
        }
    }

    /// Matches the first of two operands against the pattern in the second.
    ///
    /// A pattern starting with `%` tests for a suffix, one ending with `%`
    /// tests for a prefix, and any other pattern tests case-insensitive
    /// equality.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ComparisonArity`] unless there are two operands
    /// and [`EvalError::LikeOperands`] unless both are text.
    pub fn like(&self, tuple: &Tuple, operands: &[Expression]) -> Result<bool, EvalError> {
        let [subject, pattern] = operands else {
            return Err(EvalError::ComparisonArity {
                found: operands.len(),
            });
        };
        let (Value::Text(subject), Value::Text(pattern)) =
            (self.value(tuple, subject)?, self.value(tuple, pattern)?)
        else {
            return Err(EvalError::LikeOperands);
        };

        if let Some(suffix) = pattern.strip_prefix('%') {
            Ok(subject.ends_with(suffix))
        } else if let Some(prefix) = pattern.strip_suffix('%') {
            Ok(subject.starts_with(prefix))
        } else {
            Ok(subject.to_lowercase() == pattern.to_lowercase())
        }
    }

    /// Evaluates an arithmetic operation as a left fold over its operands.
    /// A single-operand `-` negates.
    ///
    /// # Errors
    ///
    /// Fails if any operand is not numeric or the operator is not one of
    /// `+`, `-`, `*`, `/` or `**`.
    pub fn numeric(&self, tuple: &Tuple, operation: &Operation) -> Result<f64, EvalError> {
        let operator = operation.operator();
        let Some((first, rest)) = operation.operands().split_first() else {
            return Err(EvalError::MissingArguments(String::from(operator)));
        };
        let first = self.number(tuple, first)?;

        let fold: fn(f64, f64) -> f64 = match operator {
            ops::PLUS => |acc, x| acc + x,
            ops::MINUS if rest.is_empty() => return Ok(-first),
            ops::MINUS => |acc, x| acc - x,
            ops::TIMES => |acc, x| acc * x,
            ops::DIVIDE => |acc, x| acc / x,
            ops::POWER => f64::powf,
            _ => return Err(EvalError::UnknownOperator(String::from(operator))),
        };

        let mut result = first;
        for operand in rest {
            result = fold(result, self.number(tuple, operand)?);
        }
        Ok(result)
    }

    fn number(&self, tuple: &Tuple, expr: &Expression) -> Result<f64, EvalError> {
        match self.value(tuple, expr)? {
            Value::Number(n) => Ok(n),
            Value::Text(text) => Err(EvalError::NotNumeric(text)),
        }
    }
}

/// `IS NULL` holds for a `NULL` constant; it holds vacuously with no operand.
fn is_null(operands: &[Expression]) -> Result<bool, EvalError> {
    match operands.first() {
        None => Ok(true),
        Some(Expression::Constant(constant)) => Ok(constant.kind == ConstantKind::Null),
        Some(other) => Err(EvalError::NullTarget(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    fn tuple() -> Tuple {
        let mut tuple = Tuple::from_header("a,b,c,d,e");
        tuple.set_row("1,1,1,1,1");
        tuple
    }

    fn expr(sql: &str) -> Expression {
        Parser::new(sql).read_expression().unwrap()
    }

    fn eval(tuple: &Tuple, sql: &str) -> Result<bool, EvalError> {
        Evaluator::new().eval(tuple, &expr(sql))
    }

    #[test]
    fn test_arithmetic_value() {
        let value = Evaluator::new().value(&tuple(), &expr("a + b")).unwrap();
        assert_eq!(value, Value::Number(2.0));

        let value = Evaluator::new()
            .value(&tuple(), &expr("(a + b) * 3 - -c"))
            .unwrap();
        assert_eq!(value, Value::Number(7.0));
    }

    #[test]
    fn test_power_folds_left() {
        let value = Evaluator::new().value(&tuple(), &expr("2 ** 3 ** 2")).unwrap();
        assert_eq!(value, Value::Number(64.0));
    }

    #[test]
    fn test_boolean_connectives() {
        let t = tuple();
        assert!(eval(&t, "a = 1 OR e = 1").unwrap());
        assert!(eval(&t, "a = 1 AND b = 1 AND c = 1").unwrap());
        assert!(!eval(&t, "a = 1 AND b = 2").unwrap());
        assert!(eval(&t, "NOT a = 2").unwrap());
    }

    #[test]
    fn test_comparisons() {
        let t = tuple();
        assert!(eval(&t, "a >= 1").unwrap());
        assert!(eval(&t, "a < 2").unwrap());
        assert!(eval(&t, "a <> 2").unwrap());
        assert!(eval(&t, "a != 2").unwrap());
        assert!(!eval(&t, "a > 1").unwrap());
    }

    #[test]
    fn test_text_compares_only_for_equality() {
        let mut t = Tuple::from_header("name");
        t.set_row("Lee");
        assert!(eval(&t, "name = 'Lee'").unwrap());
        assert!(!eval(&t, "name = 'Smith'").unwrap());
        // The -1 sentinel makes every unequal text "less than".
        assert!(eval(&t, "name < 'Abc'").unwrap());
        assert_eq!(
            Evaluator::new()
                .compare(&t, &[Expression::column("name"), Expression::number("1")])
                .unwrap(),
            -1.0
        );
    }

    #[test]
    fn test_between_and_in() {
        let t = tuple();
        assert!(eval(&t, "a BETWEEN 1 AND 3").unwrap());
        assert!(!eval(&t, "a NOT BETWEEN 0 AND 1").unwrap());
        assert!(eval(&t, "a IN (3, 2, 1)").unwrap());
        assert!(eval(&t, "a NOT IN (3, 2)").unwrap());
    }

    #[test]
    fn test_like() {
        let mut t = Tuple::from_header("name");
        t.set_row("Lee");
        assert!(eval(&t, "name LIKE 'L%'").unwrap());
        assert!(eval(&t, "name LIKE 'lee'").unwrap());
        t.set_row("Smith");
        assert!(!eval(&t, "name LIKE 'L%'").unwrap());
        assert!(eval(&t, "name NOT LIKE 'L%'").unwrap());
        t.set_row("Johnson");
        assert!(eval(&t, "name LIKE '%son'").unwrap());
    }

    #[test]
    fn test_like_requires_strings() {
        assert_eq!(eval(&tuple(), "a LIKE '1%'"), Err(EvalError::LikeOperands));
    }

    #[test]
    fn test_is_null() {
        let t = tuple();
        assert!(eval(&t, "NULL IS NULL").unwrap());
        assert!(!eval(&t, "1 IS NULL").unwrap());
        assert!(eval(&t, "'x' IS NOT NULL").unwrap());
        assert!(matches!(
            eval(&t, "(a + 1) IS NULL"),
            Err(EvalError::NullTarget(_))
        ));
    }

    #[test]
    fn test_three_operand_comparison_fails() {
        let cmp = Operation::with_operands(
            ops::EQ,
            vec![
                Expression::number("1"),
                Expression::number("1"),
                Expression::number("1"),
            ],
        );
        let err = Evaluator::new().eval(&tuple(), &cmp.into()).unwrap_err();
        assert_eq!(err, EvalError::ComparisonArity { found: 3 });
    }

    #[test]
    fn test_unknown_column() {
        assert_eq!(
            eval(&tuple(), "z = 1"),
            Err(EvalError::UnknownColumn(String::from("z")))
        );
        let unset = Tuple::from_header("z");
        assert!(matches!(
            eval(&unset, "z = 1"),
            Err(EvalError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_operator_errors() {
        let t = tuple();
        assert_eq!(
            eval(&t, "a # 1"),
            Err(EvalError::UnsupportedOperator(String::from("#")))
        );
        assert!(matches!(
            eval(&t, "a || 'x' = 'y'"),
            Err(EvalError::UnknownOperator(op)) if op == "||"
        ));
        assert!(matches!(
            Evaluator::new().eval(&t, &Expression::column("a")),
            Err(EvalError::NotAPredicate(_))
        ));
    }

    #[test]
    fn test_arithmetic_on_text_fails() {
        let mut t = Tuple::from_header("name");
        t.set_row("Lee");
        assert_eq!(
            Evaluator::new().value(&t, &expr("name + 1")),
            Err(EvalError::NotNumeric(String::from("Lee")))
        );
    }

    #[test]
    fn test_nan_and_inf_names_stay_text() {
        let mut t = Tuple::from_header("name");
        t.set_row("Nan");
        assert!(eval(&t, "name = 'Nan'").unwrap());
        assert!(eval(&t, "name LIKE 'N%'").unwrap());
        t.set_row("Inf");
        assert_eq!(t.get("name"), Some(&Value::from("Inf")));
        assert!(eval(&t, "name = 'Inf'").unwrap());
    }

    #[test]
    fn test_placeholder_is_unsupported() {
        assert_eq!(
            eval(&tuple(), "a = ?"),
            Err(EvalError::UnsupportedOperand(String::from("?")))
        );
    }

    #[test]
    fn test_subquery_operand_is_unsupported() {
        assert!(matches!(
            eval(&tuple(), "a IN (SELECT a FROM t)"),
            Err(EvalError::UnsupportedOperand(_))
        ));
    }
}
