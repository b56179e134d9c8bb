//! pseudoc Compiler - Frontend
//!
//! This crate turns source text of a small C-like language into an
//! LLVM-style SSA IR:
//! - Lexer: tokenizes source text with two tokens of lookahead
//! - Parser: builds the AST by recursive descent
//! - AST: expression, statement and definition trees
//! - Scope: lexical scopes and the function table
//! - IR: typed instructions grouped into segments
//! - Codegen: lowers each definition into one IR segment

pub mod ast;
pub mod codegen;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod scope;

pub use ast::{Expression, FunctionDefinition, Statement};
pub use codegen::{Compiler, FunctionLowering, LoweringContext};
pub use ir::{Instruction, Label, Segment, Value};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use scope::{FunctionTable, ScopeArena, ScopeId, Signature};

use pseudoc_common::{CompileOptions, CompilerError};

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse source text into function definitions
    pub fn parse_source(source: &str) -> Result<Vec<FunctionDefinition>, CompilerError> {
        let mut parser = Parser::new(source);
        Ok(parser.parse_translation_unit()?)
    }

    /// Compile source text to one IR segment per definition
    pub fn compile_source(source: &str) -> Result<Vec<Segment>, CompilerError> {
        Self::compile_source_with_options(source, CompileOptions::default())
    }

    pub fn compile_source_with_options(
        source: &str,
        options: CompileOptions,
    ) -> Result<Vec<Segment>, CompilerError> {
        Compiler::new(options).compile(source)
    }

    /// Tokenize source code (for debugging/IDE features)
    pub fn tokenize_source(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pseudoc_common::AtomicType;

    #[test]
    fn test_frontend_parse_simple_function() {
        let source = r#"
int main() {
    return 42;
}
"#;

        let definitions = Frontend::parse_source(source).unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "main");
        assert_eq!(definitions[0].return_type, AtomicType::I32);
        assert_eq!(definitions[0].body.len(), 1);
    }

    #[test]
    fn test_frontend_tokenize() {
        let tokens = Frontend::tokenize_source("int x = 42;");

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::EndOfFile,
            ]
        );
        assert_eq!(tokens[3].lexeme, "42");
    }

    #[test]
    fn test_frontend_compile_with_variables() {
        let source = r#"
int add(int a, int b) {
    int result = a + b;
    return result;
}
"#;

        let segments = Frontend::compile_source(source).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(matches!(
            segments[0].instructions.first(),
            Some(Instruction::FunctionBegin { name, .. }) if name == "add"
        ));
        assert_eq!(segments[0].instructions.last(), Some(&Instruction::FunctionEnd));
    }

    #[test]
    fn test_frontend_reports_parse_errors() {
        let err = Frontend::compile_source("int f( { }").unwrap_err();
        assert!(matches!(err, CompilerError::Parse(_)));
    }
}
