//! Error handling for the pseudoc compiler
//!
//! Every error is fatal for the compilation unit it was raised in. The
//! phase-specific enums are folded into [`CompilerError`] so callers can
//! propagate any of them with `?`.

use crate::source_loc::SourceLocation;
use crate::types::AtomicType;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("Lowering error: {0}")]
    Lowering(#[from] LoweringError),

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

/// Unexpected input at some grammar position
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected} at {location}, found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("expected {expected} at {location}, reached end of file")]
    UnexpectedEof {
        expected: String,
        location: SourceLocation,
    },

    #[error("invalid literal '{lexeme}' at {location}")]
    InvalidLiteral {
        lexeme: String,
        location: SourceLocation,
    },

    #[error("only a variable can be assigned to, found '{found}' at {location}")]
    InvalidAssignmentTarget {
        found: String,
        location: SourceLocation,
    },

    #[error("variable '{name}' declared void at {location}")]
    VoidVariable {
        name: String,
        location: SourceLocation,
    },
}

/// Name resolution failures for variables and functions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("variable '{name}' redeclared in the same scope")]
    Redeclared { name: String },

    #[error("reference to undeclared variable '{name}'")]
    UndeclaredVariable { name: String },

    #[error("call to undeclared function '{name}'")]
    UndeclaredFunction { name: String },

    #[error("function '{name}' defined more than once")]
    FunctionRedefined { name: String },
}

/// Failures while building IR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoweringError {
    #[error("break outside a loop")]
    BreakOutsideLoop,

    #[error("continue outside a loop")]
    ContinueOutsideLoop,

    #[error("phi needs at least two incoming branches, got {incoming}")]
    IncompletePhi { incoming: usize },

    #[error("label {label} read before it was fixed")]
    UnfixedLabel { label: u32 },

    #[error("label {label} fixed more than once")]
    LabelRefixed { label: u32 },

    #[error("label {label} does not belong to this function")]
    UnknownLabel { label: u32 },

    #[error("type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        expected: AtomicType,
        found: AtomicType,
        context: String,
    },

    #[error("function '{function}' takes {expected} argument(s), {found} given")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("void value used in {context}")]
    VoidValue { context: String },

    #[error("literal {value} does not fit in {ty}")]
    LiteralOutOfRange { value: i64, ty: AtomicType },

    #[error("type {ty} is not supported in {context}")]
    UnsupportedType { ty: AtomicType, context: String },
}

impl LoweringError {
    pub fn type_mismatch(expected: AtomicType, found: AtomicType, context: &str) -> Self {
        LoweringError::TypeMismatch {
            expected,
            found,
            context: context.to_string(),
        }
    }
}
