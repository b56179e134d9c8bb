//! Common types used throughout the compiler
//!
//! pseudoc only knows a handful of scalar types. The same closed set is used
//! for source-level semantic types and for IR operand types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar types supported by the language and the IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomicType {
    Void,
    /// Result of comparisons and boolean casts (i1)
    Bool,
    I8,
    I16,
    I32,
    I64,
    Float,
    Double,
}

impl AtomicType {
    /// Size in bytes, `None` for void
    pub fn size_in_bytes(&self) -> Option<u16> {
        match self {
            AtomicType::Void => None,
            AtomicType::Bool | AtomicType::I8 => Some(1),
            AtomicType::I16 => Some(2),
            AtomicType::I32 | AtomicType::Float => Some(4),
            AtomicType::I64 | AtomicType::Double => Some(8),
        }
    }

    /// Natural alignment of a value of this type
    pub fn natural_alignment(&self) -> u16 {
        self.size_in_bytes().unwrap_or(1)
    }

    /// Integer types, including the 1-bit boolean
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            AtomicType::Bool | AtomicType::I8 | AtomicType::I16 | AtomicType::I32 | AtomicType::I64
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, AtomicType::Float | AtomicType::Double)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, AtomicType::Void)
    }

    /// Bit width of integer types
    pub fn bit_width(&self) -> Option<u32> {
        match self {
            AtomicType::Bool => Some(1),
            AtomicType::I8 => Some(8),
            AtomicType::I16 => Some(16),
            AtomicType::I32 => Some(32),
            AtomicType::I64 => Some(64),
            _ => None,
        }
    }

    /// Whether `value` is representable in this integer type. Integers
    /// are signed; `i1` holds only 0 and 1.
    pub fn fits_integer(&self, value: i64) -> bool {
        match (self, self.bit_width()) {
            (AtomicType::Bool, _) => value == 0 || value == 1,
            (_, Some(64)) => true,
            (_, Some(bits)) => {
                let max = (1i64 << (bits - 1)) - 1;
                (-max - 1..=max).contains(&value)
            }
            (_, None) => false,
        }
    }

    /// The spelling used in source text
    pub fn source_name(&self) -> &'static str {
        match self {
            AtomicType::Void => "void",
            AtomicType::Bool => "bool",
            AtomicType::I8 => "char",
            AtomicType::I16 => "short",
            AtomicType::I32 => "int",
            AtomicType::I64 => "long",
            AtomicType::Float => "float",
            AtomicType::Double => "double",
        }
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomicType::Void => write!(f, "void"),
            AtomicType::Bool => write!(f, "i1"),
            AtomicType::I8 => write!(f, "i8"),
            AtomicType::I16 => write!(f, "i16"),
            AtomicType::I32 => write!(f, "i32"),
            AtomicType::I64 => write!(f, "i64"),
            AtomicType::Float => write!(f, "float"),
            AtomicType::Double => write!(f, "double"),
        }
    }
}
