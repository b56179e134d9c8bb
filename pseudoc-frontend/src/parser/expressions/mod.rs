//! Expression parsing for pseudoc
//!
//! One function per precedence tier, tightest first: primary, increment,
//! multiplicative, additive, comparison, logical and, logical or,
//! conditional, assignment. Every binary tier loops over its own operators
//! and then requires the next token to be something a looser tier or an
//! enclosing construct can consume.

mod assignment;
mod binary;
mod increment;
mod primary;

use crate::ast::Expression;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use pseudoc_common::ParseError;

impl Parser {
    /// Parse expression (top level)
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_assignment_expression()
    }

    /// Tokens allowed to follow a complete operand of a binary tier
    pub(crate) fn expect_terminator(&self, context: &str) -> Result<(), ParseError> {
        let kind = self.peek().kind;
        let stops = matches!(
            kind,
            TokenKind::Semicolon
                | TokenKind::RightParen
                | TokenKind::Comma
                | TokenKind::Question
                | TokenKind::Colon
        ) || kind.is_binary_operator()
            || kind.is_assignment_operator();

        if stops {
            Ok(())
        } else {
            Err(self.unexpected(format!("operator or end of expression in {context}")))
        }
    }
}
