//! Prefix and postfix `++` / `--` on identifiers

use crate::ast::Expression;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use pseudoc_common::ParseError;

fn delta_of(kind: TokenKind) -> Option<i32> {
    match kind {
        TokenKind::PlusPlus => Some(1),
        TokenKind::MinusMinus => Some(-1),
        _ => None,
    }
}

impl Parser {
    pub fn parse_increment_expression(&mut self) -> Result<Expression, ParseError> {
        if let Some(delta) = delta_of(self.peek().kind) {
            self.advance();
            let name = self.expect(TokenKind::Identifier, "increment")?.lexeme;
            return Ok(Expression::PreIncrement { name, delta });
        }

        if self.check(TokenKind::Identifier) {
            if let Some(delta) = delta_of(self.peek_next().kind) {
                let name = self.advance().lexeme;
                self.advance();
                return Ok(Expression::PostIncrement { name, delta });
            }
        }

        self.parse_primary_expression()
    }
}
