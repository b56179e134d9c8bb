//! Declaration and function definition parsing

use crate::ast::{FunctionDefinition, FunctionParam, Statement, VariableDeclaration};
use crate::lexer::TokenKind;
use crate::parser::Parser;
use log::debug;
use pseudoc_common::ParseError;

impl Parser {
    /// Parse `type name [= init] {, name [= init]} ;`
    pub fn parse_declaration_statement(&mut self) -> Result<Statement, ParseError> {
        let ty = self.parse_type("declaration")?;
        let mut declarations = Vec::new();

        loop {
            let name = self.parse_variable_name(ty, "declaration")?;
            let initializer = if self.match_token(TokenKind::Equal) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            declarations.push(VariableDeclaration { name, ty, initializer });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::Semicolon, "declaration")?;
        Ok(Statement::Declaration(declarations))
    }

    /// Parse `type name ( params ) { body }`
    pub fn parse_definition(&mut self) -> Result<FunctionDefinition, ParseError> {
        let return_type = self.parse_type("function definition")?;
        let name = self.expect(TokenKind::Identifier, "function definition")?.lexeme;

        self.expect(TokenKind::LeftParen, "parameter list")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let ty = self.parse_type("parameter list")?;
                let name = self.parse_variable_name(ty, "parameter list")?;
                params.push(FunctionParam { name, ty });

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "parameter list")?;

        let body = self.parse_block()?;
        debug!("parsed definition '{name}' with {} parameter(s)", params.len());

        Ok(FunctionDefinition {
            name,
            return_type,
            params,
            body,
        })
    }
}
