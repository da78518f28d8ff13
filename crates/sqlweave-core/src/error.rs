//! Crate-level error type.

use crate::ast::AstError;
use crate::eval::EvalError;
use crate::parser::ParseError;

/// Any error this crate can return.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation failed.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// An AST node could not be built.
    #[error(transparent)]
    Ast(#[from] AstError),
}

/// Result type using the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{Evaluator, Tuple};
    use crate::Parser;

    fn matches_where(sql: &str, tuple: &Tuple) -> Result<bool> {
        let condition = Parser::new(sql).read_expression()?;
        Ok(Evaluator::new().eval(tuple, &condition)?)
    }

    #[test]
    fn test_errors_convert() {
        let mut tuple = Tuple::from_header("a");
        tuple.set_row("1");
        assert_eq!(matches_where("a = 1", &tuple), Ok(true));
        assert!(matches!(matches_where("a = ", &tuple), Err(Error::Parse(_))));
        assert!(matches!(matches_where("b = 1", &tuple), Err(Error::Eval(_))));
    }

    #[test]
    fn test_transparent_display() {
        let err = Error::from(AstError::MissingFrom);
        assert_eq!(err.to_string(), AstError::MissingFrom.to_string());
    }
}
