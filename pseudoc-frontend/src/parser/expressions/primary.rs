//! Primary expression parsing: literals, identifiers, calls and
//! parenthesized expressions

use crate::ast::Expression;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use pseudoc_common::ParseError;

impl Parser {
    pub fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        match self.peek().kind {
            TokenKind::IntLiteral => {
                let token = self.advance();
                let value = token.lexeme.parse::<i32>().map_err(|_| ParseError::InvalidLiteral {
                    lexeme: token.lexeme.clone(),
                    location: token.location,
                })?;
                Ok(Expression::I32Constant(value))
            }
            TokenKind::FloatLiteral => {
                let token = self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| ParseError::InvalidLiteral {
                    lexeme: token.lexeme.clone(),
                    location: token.location,
                })?;
                Ok(Expression::FloatConstant(value))
            }
            TokenKind::Identifier if self.peek_next().is(TokenKind::LeftParen) => self.parse_call(),
            TokenKind::Identifier => Ok(Expression::VariableRef(self.advance().lexeme)),
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "parenthesized expression")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("primary expression")),
        }
    }

    /// `name ( [expr {, expr}] )`
    fn parse_call(&mut self) -> Result<Expression, ParseError> {
        let callee = self.advance().lexeme;
        self.expect(TokenKind::LeftParen, "function call")?;

        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "function call")?;

        Ok(Expression::Call { callee, arguments })
    }
}
