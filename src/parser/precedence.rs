//! Binding powers for binary operators
//!
//! Higher binds tighter. Every operator is left-associative; kinds that are
//! not binary operators map to 0, which the expression parser uses as the
//! "lowest possible" starting bound.

use super::token::TokenKind;

pub const LOWEST: u8 = 0;

pub fn precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Mul | TokenKind::Div | TokenKind::Mod => 6,
        TokenKind::Add | TokenKind::Sub => 5,
        TokenKind::Lt | TokenKind::Gt => 4,
        TokenKind::Eq => 3,
        TokenKind::And => 2,
        TokenKind::Or => 1,
        _ => LOWEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        let ladder = [
            TokenKind::Mul,
            TokenKind::Add,
            TokenKind::Lt,
            TokenKind::Eq,
            TokenKind::And,
            TokenKind::Or,
        ];
        for pair in ladder.windows(2) {
            assert!(precedence(pair[0]) > precedence(pair[1]), "{:?}", pair);
        }
        assert_eq!(precedence(TokenKind::Div), precedence(TokenKind::Mul));
        assert_eq!(precedence(TokenKind::Mod), precedence(TokenKind::Mul));
        assert_eq!(precedence(TokenKind::Sub), precedence(TokenKind::Add));
        assert_eq!(precedence(TokenKind::Gt), precedence(TokenKind::Lt));
    }

    #[test]
    fn test_non_operators_are_lowest() {
        assert_eq!(precedence(TokenKind::Not), LOWEST);
        assert_eq!(precedence(TokenKind::Assign), LOWEST);
        assert_eq!(precedence(TokenKind::Semicolon), LOWEST);
        for kind in TokenKind::BINARY_OPERATORS {
            assert!(precedence(*kind) > LOWEST);
        }
    }
}
