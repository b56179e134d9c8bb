//! Token definitions for the pseudoc lexer
//!
//! This module defines token kinds, the keyword table and the Token struct.

use pseudoc_common::{AtomicType, SourceLocation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    FloatLiteral,

    Identifier,

    // Keywords
    Void, Char, Int, Float, Double, Long, Short, Enum, Struct,
    If, Else, While, Do, For, Goto, Return, Switch, Case, Break, Continue,

    // Single character punctuation
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    Semicolon,      // ;
    Comma,          // ,
    Question,       // ?
    Colon,          // :
    Equal,          // =
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Less,           // <
    Greater,        // >
    Bang,           // !

    // Multi character operators
    PlusPlus,       // ++
    MinusMinus,     // --
    EqualEqual,     // ==
    BangEqual,      // !=
    LessEqual,      // <=
    GreaterEqual,   // >=
    PlusEqual,      // +=
    MinusEqual,     // -=
    StarEqual,      // *=
    SlashEqual,     // /=
    AmpAmp,         // &&
    PipePipe,       // ||

    EndOfFile,

    /// Any character the lexer does not recognize
    Unknown(char),
}

/// Keyword spellings and their kinds
pub const KEYWORDS: [(&str, TokenKind); 20] = [
    ("void", TokenKind::Void),
    ("char", TokenKind::Char),
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("double", TokenKind::Double),
    ("long", TokenKind::Long),
    ("short", TokenKind::Short),
    ("enum", TokenKind::Enum),
    ("struct", TokenKind::Struct),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("do", TokenKind::Do),
    ("for", TokenKind::For),
    ("goto", TokenKind::Goto),
    ("return", TokenKind::Return),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
];

impl TokenKind {
    /// Classify an identifier-shaped word against the keyword table
    pub fn from_word(word: &str) -> TokenKind {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|(_, kind)| *kind)
            .unwrap_or(TokenKind::Identifier)
    }

    /// The scalar type named by a type keyword
    pub fn as_type(&self) -> Option<AtomicType> {
        match self {
            TokenKind::Void => Some(AtomicType::Void),
            TokenKind::Char => Some(AtomicType::I8),
            TokenKind::Short => Some(AtomicType::I16),
            TokenKind::Int => Some(AtomicType::I32),
            TokenKind::Long => Some(AtomicType::I64),
            TokenKind::Float => Some(AtomicType::Float),
            TokenKind::Double => Some(AtomicType::Double),
            _ => None,
        }
    }

    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::StarEqual
                | TokenKind::SlashEqual
        )
    }

    /// Operators handled by one of the binary precedence tiers
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
                | TokenKind::EqualEqual
                | TokenKind::BangEqual
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((spelling, _)) = KEYWORDS.iter().find(|(_, kind)| kind == self) {
            return write!(f, "{spelling}");
        }
        match self {
            TokenKind::IntLiteral => write!(f, "integer literal"),
            TokenKind::FloatLiteral => write!(f, "float literal"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBrace => write!(f, "{{"),
            TokenKind::RightBrace => write!(f, "}}"),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Question => write!(f, "?"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Equal => write!(f, "="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::PlusPlus => write!(f, "++"),
            TokenKind::MinusMinus => write!(f, "--"),
            TokenKind::EqualEqual => write!(f, "=="),
            TokenKind::BangEqual => write!(f, "!="),
            TokenKind::LessEqual => write!(f, "<="),
            TokenKind::GreaterEqual => write!(f, ">="),
            TokenKind::PlusEqual => write!(f, "+="),
            TokenKind::MinusEqual => write!(f, "-="),
            TokenKind::StarEqual => write!(f, "*="),
            TokenKind::SlashEqual => write!(f, "/="),
            TokenKind::AmpAmp => write!(f, "&&"),
            TokenKind::PipePipe => write!(f, "||"),
            TokenKind::EndOfFile => write!(f, "end of file"),
            TokenKind::Unknown(c) => write!(f, "{c}"),
            // keywords are printed from the table above
            _ => write!(f, "{self:?}"),
        }
    }
}

/// A token with its exact source text and position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::EndOfFile {
            write!(f, "end of file")
        } else {
            write!(f, "{}", self.lexeme)
        }
    }
}
