//! IR Operations
//!
//! Binary opcodes and integer comparison relations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrBinaryOp {
    Add,
    Sub,
    Mul,
    SDiv,
    SRem,
    And,
    Or,
}

/// Signed integer comparison relations for `icmp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
}

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrBinaryOp::Add => "add",
            IrBinaryOp::Sub => "sub",
            IrBinaryOp::Mul => "mul",
            IrBinaryOp::SDiv => "sdiv",
            IrBinaryOp::SRem => "srem",
            IrBinaryOp::And => "and",
            IrBinaryOp::Or => "or",
        };
        write!(f, "{op_str}")
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Relation::Eq => "eq",
            Relation::Ne => "ne",
            Relation::Slt => "slt",
            Relation::Sle => "sle",
            Relation::Sgt => "sgt",
            Relation::Sge => "sge",
        };
        write!(f, "{code}")
    }
}
