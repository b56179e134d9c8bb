//! Abstract Syntax Tree definitions for pseudoc
//!
//! The AST is a strict tree: every node owns its children. Nodes carry no
//! scope data; name resolution happens during lowering.

pub mod expressions;
pub mod ops;
pub mod statements;

pub use expressions::Expression;
pub use ops::{ArithmeticOp, CompareOp};
pub use statements::{FunctionDefinition, FunctionParam, Statement, VariableDeclaration};
