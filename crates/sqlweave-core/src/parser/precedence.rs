//! Binding powers for Pratt expression parsing.
//!
//! From loosest to tightest: `OR`, `AND`, prefix `NOT`, comparisons,
//! `[NOT] BETWEEN | LIKE | IN`, postfix `IS [NOT] NULL`, additive, multiplicative,
//! prefix `-` / `+`, then `**`.

use crate::ast::ops;
use crate::lexer::{Keyword, TokenKind};

/// Binding power for the operand of prefix `NOT`: it takes in comparisons
/// but stops at `AND` and `OR`.
pub const NOT_OPERAND_BP: u8 = 5;

/// Binding power for the operands of `BETWEEN`, `LIKE` and `IN`.
pub const MULTIFIX_OPERAND_BP: u8 = 10;

/// Binding power for the operand of prefix `-` and `+`.
pub const UNARY_OPERAND_BP: u8 = 17;

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: `left_bp < right_bp`
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::LtGt
        | TokenKind::Hash
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => Some((7, 8)),

        // [NOT] BETWEEN, [NOT] LIKE, [NOT] IN
        TokenKind::Keyword(Keyword::Not | Keyword::Between | Keyword::Like | Keyword::In) => {
            Some((9, MULTIFIX_OPERAND_BP))
        }

        // IS [NOT] NULL (postfix)
        TokenKind::Keyword(Keyword::Is) => Some((11, 12)),

        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((13, 14)),
        TokenKind::Star | TokenKind::Slash => Some((15, 16)),
        TokenKind::DoubleStar => Some((17, 18)),

        _ => None,
    }
}

/// Returns true for the comparison operator tokens.
#[must_use]
pub const fn is_comparison(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::LtGt
            | TokenKind::Hash
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
    )
}

/// Converts a binary operator token to the operator text stored in the AST.
#[must_use]
pub const fn token_to_operator(kind: &TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some(ops::OR),
        TokenKind::Keyword(Keyword::And) => Some(ops::AND),
        TokenKind::Eq => Some(ops::EQ),
        TokenKind::NotEq => Some(ops::NOT_EQ),
        TokenKind::LtGt => Some(ops::LT_GT),
        TokenKind::Hash => Some(ops::HASH),
        TokenKind::Lt => Some(ops::LT),
        TokenKind::LtEq => Some(ops::LT_EQ),
        TokenKind::Gt => Some(ops::GT),
        TokenKind::GtEq => Some(ops::GT_EQ),
        TokenKind::Plus => Some(ops::PLUS),
        TokenKind::Minus => Some(ops::MINUS),
        TokenKind::Concat => Some(ops::CONCAT),
        TokenKind::Star => Some(ops::TIMES),
        TokenKind::Slash => Some(ops::DIVIDE),
        TokenKind::DoubleStar => Some(ops::POWER),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(kind: &TokenKind) -> (u8, u8) {
        infix_binding_power(kind).unwrap()
    }

    #[test]
    fn test_precedence_ordering() {
        let or = bp(&TokenKind::Keyword(Keyword::Or));
        let and = bp(&TokenKind::Keyword(Keyword::And));
        let eq = bp(&TokenKind::Eq);
        let like = bp(&TokenKind::Keyword(Keyword::Like));
        let is = bp(&TokenKind::Keyword(Keyword::Is));
        let add = bp(&TokenKind::Plus);
        let mul = bp(&TokenKind::Star);
        let pow = bp(&TokenKind::DoubleStar);

        assert!(or.0 < and.0);
        assert!(and.0 < NOT_OPERAND_BP);
        assert!(NOT_OPERAND_BP < eq.0);
        assert!(eq.0 < like.0);
        assert!(like.0 < is.0);
        assert!(is.0 < add.0);
        assert!(add.0 < mul.0);
        assert!(mul.0 < pow.0);
        assert!(pow.0 <= UNARY_OPERAND_BP);
    }

    #[test]
    fn test_left_associativity() {
        for kind in [TokenKind::Plus, TokenKind::Star, TokenKind::DoubleStar] {
            let (left, right) = bp(&kind);
            assert!(left < right);
        }
    }

    #[test]
    fn test_token_to_operator() {
        assert_eq!(token_to_operator(&TokenKind::LtGt), Some("<>"));
        assert_eq!(token_to_operator(&TokenKind::Keyword(Keyword::And)), Some("AND"));
        assert_eq!(token_to_operator(&TokenKind::Keyword(Keyword::Like)), None);
        assert_eq!(token_to_operator(&TokenKind::LeftParen), None);
    }

    #[test]
    fn test_is_comparison() {
        assert!(is_comparison(&TokenKind::Hash));
        assert!(!is_comparison(&TokenKind::Plus));
    }
}
