//! pseudoc Lexer
//!
//! Tokenizes source text into a stream of tokens with two tokens of
//! lookahead. The lexer never fails: characters it does not recognize become
//! `TokenKind::Unknown` tokens and are rejected by the parser.

pub mod literals;
pub mod operators;
pub mod token;

pub use token::{Token, TokenKind, KEYWORDS};

use log::trace;
use pseudoc_common::SourceLocation;

/// Streaming lexer with a current and a next token
pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
    current: Token,
    next: Token,
}

impl Lexer {
    /// Create a new lexer and scan the first two tokens
    pub fn new(input: &str) -> Self {
        let placeholder = Token::new(TokenKind::EndOfFile, "", SourceLocation::start());
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            current: placeholder.clone(),
            next: placeholder,
        };

        lexer.current = lexer.scan_token();
        lexer.next = lexer.scan_token();
        lexer
    }

    /// The token the parser is looking at
    pub fn peek_current(&self) -> &Token {
        &self.current
    }

    /// The token after the current one
    pub fn peek_next(&self) -> &Token {
        &self.next
    }

    /// Consume the current token and advance the window by one.
    /// Once the input is exhausted every call yields `EndOfFile`.
    pub fn bump(&mut self) -> Token {
        let scanned = self.scan_token();
        let next = std::mem::replace(&mut self.next, scanned);
        std::mem::replace(&mut self.current, next)
    }

    pub fn is_eof(&self) -> bool {
        self.current.is(TokenKind::EndOfFile)
    }

    /// Drain the remaining tokens, `EndOfFile` included
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.bump();
            let is_eof = token.is(TokenKind::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        tokens
    }

    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Source text between `start` and the current position
    pub(crate) fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Skip blanks, newlines and `//` comments
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_char(1) == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let location = self.current_location();
        let start = self.position;

        let kind = match self.current_char() {
            None => TokenKind::EndOfFile,
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.scan_word(),
            Some(ch) if ch.is_ascii_digit() => self.scan_number(),
            Some(_) => self.scan_operator(),
        };

        let token = Token::new(kind, self.text_from(start), location);
        trace!("token {:?} '{}' at {}", token.kind, token.lexeme, token.location);
        token
    }
}
