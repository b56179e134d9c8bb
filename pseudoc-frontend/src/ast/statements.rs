//! Statement and definition AST nodes

use crate::ast::expressions::Expression;
use pseudoc_common::AtomicType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One declarator of a declaration statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    pub ty: AtomicType,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Expression(Expression),

    /// `int a = 1, b;` holds one entry per declarator
    Declaration(Vec<VariableDeclaration>),

    Compound(Vec<Statement>),

    If {
        condition: Expression,
        then_stmt: Box<Statement>,
        else_stmt: Option<Box<Statement>>,
    },

    While {
        condition: Expression,
        body: Box<Statement>,
    },

    For {
        init: Option<Box<Statement>>,
        condition: Option<Expression>,
        step: Option<Expression>,
        body: Box<Statement>,
    },

    Return(Option<Expression>),
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParam {
    pub name: String,
    pub ty: AtomicType,
}

/// A top-level function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub return_type: AtomicType,
    pub params: Vec<FunctionParam>,
    pub body: Vec<Statement>,
}

impl FunctionDefinition {
    pub fn param_types(&self) -> Vec<AtomicType> {
        self.params.iter().map(|p| p.ty).collect()
    }
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(init) = &self.initializer {
            write!(f, " = {init}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expression(expr) => write!(f, "{expr};"),
            Statement::Declaration(declarations) => {
                // every declarator of one statement shares the type keyword
                let ty = declarations.first().map(|d| d.ty.source_name()).unwrap_or("int");
                write!(f, "{ty} ")?;
                for (i, declaration) in declarations.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{declaration}")?;
                }
                write!(f, ";")
            }
            Statement::Compound(statements) => write_block(f, statements),
            Statement::If { condition, then_stmt, else_stmt } => {
                write!(f, "if ({condition}) {then_stmt}")?;
                if let Some(else_stmt) = else_stmt {
                    write!(f, " else {else_stmt}")?;
                }
                Ok(())
            }
            Statement::While { condition, body } => write!(f, "while ({condition}) {body}"),
            Statement::For { init, condition, step, body } => {
                write!(f, "for (")?;
                match init {
                    Some(init) => write!(f, "{init}")?,
                    None => write!(f, ";")?,
                }
                if let Some(condition) = condition {
                    write!(f, " {condition}")?;
                }
                write!(f, ";")?;
                if let Some(step) = step {
                    write!(f, " {step}")?;
                }
                write!(f, ") {body}")
            }
            Statement::Return(Some(expr)) => write!(f, "return {expr};"),
            Statement::Return(None) => write!(f, "return;"),
            Statement::Break => write!(f, "break;"),
            Statement::Continue => write!(f, "continue;"),
        }
    }
}

impl fmt::Display for FunctionParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty.source_name(), self.name)
    }
}

impl fmt::Display for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type.source_name(), self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") ")?;
        write_block(f, &self.body)
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    write!(f, "{{")?;
    for statement in statements {
        write!(f, " {statement}")?;
    }
    write!(f, " }}")
}
