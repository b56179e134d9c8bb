//! Expression AST nodes

use crate::ast::ops::{ArithmeticOp, CompareOp};
use pseudoc_common::AtomicType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression node. Every node owns its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    I32Constant(i32),
    FloatConstant(f64),
    VariableRef(String),

    /// `++x` / `--x`, yields the updated value
    PreIncrement { name: String, delta: i32 },

    /// `x++` / `x--`, yields the value before the update
    PostIncrement { name: String, delta: i32 },

    Binary {
        op: ArithmeticOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    Compare {
        op: CompareOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    LogicalAnd {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    LogicalOr {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Compare against zero to get an i1
    BooleanCast(Box<Expression>),

    Conditional {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
    },

    Assignment {
        target: String,
        value: Box<Expression>,
    },

    Call {
        callee: String,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// Type fixed when the node is built. `None` means the type is only
    /// known once the operands have been lowered.
    pub fn static_type(&self) -> Option<AtomicType> {
        match self {
            Expression::I32Constant(_) => Some(AtomicType::I32),
            Expression::FloatConstant(_) => Some(AtomicType::Double),
            Expression::Compare { .. }
            | Expression::LogicalAnd { .. }
            | Expression::LogicalOr { .. }
            | Expression::BooleanCast(_) => Some(AtomicType::Bool),
            _ => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.static_type() == Some(AtomicType::Bool)
    }

    /// Wrap in a boolean cast unless the expression is already an i1
    pub fn into_condition(self) -> Expression {
        if self.is_boolean() {
            self
        } else {
            Expression::BooleanCast(Box::new(self))
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::I32Constant(value) => write!(f, "{value}"),
            Expression::FloatConstant(value) => write!(f, "{value:?}"),
            Expression::VariableRef(name) => write!(f, "{name}"),
            Expression::PreIncrement { name, delta } => {
                write!(f, "{}{name}", if *delta > 0 { "++" } else { "--" })
            }
            Expression::PostIncrement { name, delta } => {
                write!(f, "{name}{}", if *delta > 0 { "++" } else { "--" })
            }
            Expression::Binary { op, left, right } => write!(f, "( {left} {op} {right} )"),
            Expression::Compare { op, left, right } => write!(f, "( {left} {op} {right} )"),
            Expression::LogicalAnd { left, right } => write!(f, "( {left} && {right} )"),
            Expression::LogicalOr { left, right } => write!(f, "( {left} || {right} )"),
            Expression::BooleanCast(inner) => write!(f, "(bool) {inner}"),
            Expression::Conditional { condition, then_expr, else_expr } => {
                write!(f, "( {condition} ? {then_expr} : {else_expr} )")
            }
            Expression::Assignment { target, value } => write!(f, "( {target} = {value} )"),
            Expression::Call { callee, arguments } => {
                write!(f, "{callee}(")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
