//! Statement parsing for pseudoc

use crate::ast::Statement;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use pseudoc_common::ParseError;

impl Parser {
    /// Parse `{ statement* }` and return the statements
    pub fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.expect(TokenKind::LeftBrace, "compound statement")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(self.unexpected("'}' in compound statement"));
            }
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RightBrace, "compound statement")?;
        Ok(statements)
    }

    /// Parse statement
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.at_type_keyword() {
            return self.parse_declaration_statement();
        }

        match self.peek().kind {
            TokenKind::LeftBrace => Ok(Statement::Compound(self.parse_block()?)),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                self.advance();
                self.expect(TokenKind::Semicolon, "break statement")?;
                Ok(Statement::Break)
            }
            TokenKind::Continue => {
                self.advance();
                self.expect(TokenKind::Semicolon, "continue statement")?;
                Ok(Statement::Continue)
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "expression statement")?;
        Ok(Statement::Expression(expr))
    }

    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance();
        self.expect(TokenKind::LeftParen, "if statement")?;
        let condition = self.parse_expression()?.into_condition();
        self.expect(TokenKind::RightParen, "if statement")?;

        let then_stmt = Box::new(self.parse_statement()?);
        let else_stmt = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_stmt,
            else_stmt,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance();
        self.expect(TokenKind::LeftParen, "while statement")?;
        let condition = self.parse_expression()?.into_condition();
        self.expect(TokenKind::RightParen, "while statement")?;

        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While { condition, body })
    }

    /// `for ( [init] ; [cond] ; [step] ) body`, where init is a declaration
    /// or an expression statement
    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance();
        self.expect(TokenKind::LeftParen, "for statement")?;

        let init = if self.match_token(TokenKind::Semicolon) {
            None
        } else if self.at_type_keyword() {
            Some(Box::new(self.parse_declaration_statement()?))
        } else {
            Some(Box::new(self.parse_expression_statement()?))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?.into_condition())
        };
        self.expect(TokenKind::Semicolon, "for statement")?;

        let step = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RightParen, "for statement")?;

        let body = Box::new(self.parse_statement()?);
        Ok(Statement::For {
            init,
            condition,
            step,
            body,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance();
        if self.match_token(TokenKind::Semicolon) {
            return Ok(Statement::Return(None));
        }

        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "return statement")?;
        Ok(Statement::Return(Some(expr)))
    }
}
