//! Assignment expression parsing

use crate::ast::{ArithmeticOp, Expression};
use crate::lexer::TokenKind;
use crate::parser::Parser;
use pseudoc_common::ParseError;

impl Parser {
    /// Parse assignment expression. Only a bare identifier can be assigned
    /// to; compound operators desugar to `id = id OP rhs`.
    pub fn parse_assignment_expression(&mut self) -> Result<Expression, ParseError> {
        if self.check(TokenKind::Identifier) && self.peek_next().kind.is_assignment_operator() {
            let target = self.advance().lexeme;
            let op = self.advance().kind;
            let rhs = self.parse_assignment_expression()?;

            let value = match compound_op(op) {
                Some(op) => Expression::Binary {
                    op,
                    left: Box::new(Expression::VariableRef(target.clone())),
                    right: Box::new(rhs),
                },
                None => rhs,
            };

            return Ok(Expression::Assignment {
                target,
                value: Box::new(value),
            });
        }

        let location = self.current_location();
        let expr = self.parse_conditional_expression()?;

        if self.peek().kind.is_assignment_operator() {
            return Err(ParseError::InvalidAssignmentTarget {
                found: expr.to_string(),
                location,
            });
        }

        Ok(expr)
    }
}

fn compound_op(kind: TokenKind) -> Option<ArithmeticOp> {
    match kind {
        TokenKind::PlusEqual => Some(ArithmeticOp::Add),
        TokenKind::MinusEqual => Some(ArithmeticOp::Sub),
        TokenKind::StarEqual => Some(ArithmeticOp::Mul),
        TokenKind::SlashEqual => Some(ArithmeticOp::Div),
        _ => None,
    }
}
