//! IR Value Representations
//!
//! Typed operands: SSA temporaries, stack slot addresses and literals.

use pseudoc_common::AtomicType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR Value - represents operands in IR instructions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SSA register holding a value of `ty`
    Temp { id: u32, ty: AtomicType },

    /// Register holding the address of a stack slot that stores a `ty`
    Slot { id: u32, ty: AtomicType },

    /// Integer literal
    Int { value: i64, ty: AtomicType },

    /// Floating point literal
    Float { value: f64, ty: AtomicType },
}

impl Value {
    /// The value type; for a slot, the type stored in it
    pub fn ty(&self) -> AtomicType {
        match self {
            Value::Temp { ty, .. }
            | Value::Slot { ty, .. }
            | Value::Int { ty, .. }
            | Value::Float { ty, .. } => *ty,
        }
    }

    /// Register number, `None` for literals
    pub fn id(&self) -> Option<u32> {
        match self {
            Value::Temp { id, .. } | Value::Slot { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Value::Int { .. } | Value::Float { .. })
    }

    pub fn int(value: i64, ty: AtomicType) -> Self {
        Value::Int { value, ty }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Temp { id, .. } | Value::Slot { id, .. } => write!(f, "%{id}"),
            Value::Int { value, .. } => write!(f, "{value}"),
            Value::Float { value, .. } => write!(f, "{value:.6e}"),
        }
    }
}
