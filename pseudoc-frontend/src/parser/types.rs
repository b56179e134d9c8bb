//! Type keyword parsing

use crate::lexer::TokenKind;
use crate::parser::Parser;
use pseudoc_common::{AtomicType, ParseError};

impl Parser {
    /// Whether the current token starts a declaration
    pub(crate) fn at_type_keyword(&self) -> bool {
        self.peek().kind.as_type().is_some()
    }

    /// Consume a type keyword
    pub(crate) fn parse_type(&mut self, context: &str) -> Result<AtomicType, ParseError> {
        match self.peek().kind.as_type() {
            Some(ty) => {
                self.advance();
                Ok(ty)
            }
            None => Err(self.unexpected(format!("type name in {context}"))),
        }
    }

    /// Consume the identifier naming a variable of type `ty`
    pub(crate) fn parse_variable_name(&mut self, ty: AtomicType, context: &str) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::Identifier, context)?;
        if ty.is_void() {
            return Err(ParseError::VoidVariable {
                name: token.lexeme,
                location: token.location,
            });
        }
        Ok(token.lexeme)
    }
}
