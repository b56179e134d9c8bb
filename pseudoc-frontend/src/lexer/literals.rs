//! Numeral and word scanning for the pseudoc lexer

use crate::lexer::{Lexer, TokenKind};

impl Lexer {
    /// Digit run, optionally followed by `.` and another digit run
    pub(crate) fn scan_number(&mut self) -> TokenKind {
        self.skip_digits();

        if self.current_char() == Some('.') {
            self.advance();
            self.skip_digits();
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        }
    }

    /// `[A-Za-z_]` followed by `[A-Za-z_]*`. Digits end the word.
    pub(crate) fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphabetic() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::from_word(&self.text_from(start))
    }

    fn skip_digits(&mut self) {
        while self.current_char().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
    }
}
