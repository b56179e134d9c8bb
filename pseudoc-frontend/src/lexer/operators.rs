//! Operator and comment scanning for the pseudoc lexer

use crate::lexer::{Lexer, TokenKind};

impl Lexer {
    /// Skip a `//` comment up to, not including, the newline
    pub(crate) fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Scan punctuation, using one character of lookahead for the
    /// two-character operators
    pub(crate) fn scan_operator(&mut self) -> TokenKind {
        let Some(ch) = self.advance() else {
            return TokenKind::EndOfFile;
        };

        match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '%' => TokenKind::Percent,
            '+' => self.pick(&[('+', TokenKind::PlusPlus), ('=', TokenKind::PlusEqual)], TokenKind::Plus),
            '-' => self.pick(&[('-', TokenKind::MinusMinus), ('=', TokenKind::MinusEqual)], TokenKind::Minus),
            '*' => self.pick(&[('=', TokenKind::StarEqual)], TokenKind::Star),
            '/' => self.pick(&[('=', TokenKind::SlashEqual)], TokenKind::Slash),
            '=' => self.pick(&[('=', TokenKind::EqualEqual)], TokenKind::Equal),
            '!' => self.pick(&[('=', TokenKind::BangEqual)], TokenKind::Bang),
            '<' => self.pick(&[('=', TokenKind::LessEqual)], TokenKind::Less),
            '>' => self.pick(&[('=', TokenKind::GreaterEqual)], TokenKind::Greater),
            '&' => self.pick(&[('&', TokenKind::AmpAmp)], TokenKind::Unknown('&')),
            '|' => self.pick(&[('|', TokenKind::PipePipe)], TokenKind::Unknown('|')),
            other => TokenKind::Unknown(other),
        }
    }

    /// Consume the second character of a two-character operator if it
    /// matches one of `pairs`, otherwise fall back to `single`
    fn pick(&mut self, pairs: &[(char, TokenKind)], single: TokenKind) -> TokenKind {
        for &(second, kind) in pairs {
            if self.current_char() == Some(second) {
                self.advance();
                return kind;
            }
        }
        single
    }
}
