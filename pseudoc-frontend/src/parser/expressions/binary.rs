//! Binary expression parsing with operator precedence

use crate::ast::{ArithmeticOp, CompareOp, Expression};
use crate::lexer::TokenKind;
use crate::parser::Parser;
use pseudoc_common::ParseError;

impl Parser {
    /// Parse conditional expression (ternary operator)
    pub fn parse_conditional_expression(&mut self) -> Result<Expression, ParseError> {
        let condition = self.parse_logical_or_expression()?;

        if !self.match_token(TokenKind::Question) {
            return Ok(condition);
        }

        let then_expr = self.parse_expression()?;
        self.expect(TokenKind::Colon, "conditional expression")?;
        let else_expr = self.parse_conditional_expression()?;

        Ok(Expression::Conditional {
            condition: Box::new(condition.into_condition()),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    pub fn parse_logical_or_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_logical_and_expression()?;

        while self.match_token(TokenKind::PipePipe) {
            let right = self.parse_logical_and_expression()?;
            left = Expression::LogicalOr {
                left: Box::new(left.into_condition()),
                right: Box::new(right.into_condition()),
            };
        }

        self.expect_terminator("logical or")?;
        Ok(left)
    }

    pub fn parse_logical_and_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_comparison_expression()?;

        while self.match_token(TokenKind::AmpAmp) {
            let right = self.parse_comparison_expression()?;
            left = Expression::LogicalAnd {
                left: Box::new(left.into_condition()),
                right: Box::new(right.into_condition()),
            };
        }

        self.expect_terminator("logical and")?;
        Ok(left)
    }

    /// Relational and equality operators share one left-associative tier
    pub fn parse_comparison_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_additive_expression()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Less => CompareOp::Less,
                TokenKind::LessEqual => CompareOp::LessEqual,
                TokenKind::Greater => CompareOp::Greater,
                TokenKind::GreaterEqual => CompareOp::GreaterEqual,
                TokenKind::EqualEqual => CompareOp::Equal,
                TokenKind::BangEqual => CompareOp::NotEqual,
                _ => break,
            };
            self.advance();

            let right = self.parse_additive_expression()?;
            left = Expression::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        self.expect_terminator("comparison")?;
        Ok(left)
    }

    pub fn parse_additive_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => ArithmeticOp::Add,
                TokenKind::Minus => ArithmeticOp::Sub,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplicative_expression()?;
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        self.expect_terminator("additive expression")?;
        Ok(left)
    }

    pub fn parse_multiplicative_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_increment_expression()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => ArithmeticOp::Mul,
                TokenKind::Slash => ArithmeticOp::Div,
                TokenKind::Percent => ArithmeticOp::Rem,
                _ => break,
            };
            self.advance();

            let right = self.parse_increment_expression()?;
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        self.expect_terminator("multiplicative expression")?;
        Ok(left)
    }
}
