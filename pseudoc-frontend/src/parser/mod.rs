//! pseudoc Recursive Descent Parser
//!
//! Parses the token stream into function definitions. The parser pulls
//! tokens straight from the [`Lexer`] and relies on its two-token window
//! to tell calls, assignments and postfix increments apart from plain
//! identifiers.

pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;

use crate::ast::FunctionDefinition;
use crate::lexer::{Lexer, Token, TokenKind};
use pseudoc_common::{ParseError, SourceLocation};

/// pseudoc Parser
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    /// Create a parser over source text
    pub fn new(source: &str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(lexer: Lexer) -> Self {
        Self { lexer }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> &Token {
        self.lexer.peek_current()
    }

    /// Peek one token past the current one
    pub(crate) fn peek_next(&self) -> &Token {
        self.lexer.peek_next()
    }

    /// Get current token and advance
    pub(crate) fn advance(&mut self) -> Token {
        self.lexer.bump()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    /// Consume token if it matches
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect and consume a specific token kind
    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("'{kind}' in {context}")))
        }
    }

    /// Error for the current token not fitting the grammar
    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.peek();
        if token.is(TokenKind::EndOfFile) {
            ParseError::UnexpectedEof {
                expected: expected.into(),
                location: token.location,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: token.lexeme.clone(),
                location: token.location,
            }
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub fn is_at_end(&self) -> bool {
        self.lexer.is_eof()
    }

    /// Parse every definition up to end of file
    pub fn parse_translation_unit(&mut self) -> Result<Vec<FunctionDefinition>, ParseError> {
        let mut definitions = Vec::new();

        while !self.is_at_end() {
            definitions.push(self.parse_definition()?);
        }

        Ok(definitions)
    }
}
