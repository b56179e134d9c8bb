//! IR Instructions
//!
//! Instruction variants carry public fields so tools can read them
//! directly, but lowering builds them through the checked constructors
//! below, which reject operands whose types disagree.

use crate::ir::{IrBinaryOp, Label, Relation, Value};
use pseudoc_common::{AtomicType, LoweringError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Reserve a stack slot: slot = alloca ty
    Alloca { slot: Value, align: u16 },

    /// Store value into slot
    Store { value: Value, slot: Value, align: u16 },

    /// Load from slot: result = load ty, slot
    Load { result: Value, slot: Value, align: u16 },

    /// result = op lhs, rhs
    Binary {
        result: Value,
        op: IrBinaryOp,
        lhs: Value,
        rhs: Value,
    },

    /// result = icmp relation lhs, rhs
    ICmp {
        result: Value,
        relation: Relation,
        lhs: Value,
        rhs: Value,
    },

    /// Unconditional branch
    Jump { target: Label },

    /// Conditional branch on an i1
    Branch {
        condition: Value,
        on_true: Label,
        on_false: Label,
    },

    /// Start of a basic block
    Label(Label),

    /// Merge one value per predecessor block
    Phi {
        result: Value,
        incoming: Vec<(Value, Label)>,
    },

    /// Zero-extend an integer to a wider integer type
    ZExt { result: Value, value: Value },

    /// result = call callee(arguments); `result` is `None` for void callees
    Call {
        result: Option<Value>,
        callee: String,
        return_type: AtomicType,
        arguments: Vec<Value>,
    },

    /// Function header with its incoming parameter registers
    FunctionBegin {
        name: String,
        return_type: AtomicType,
        params: Vec<Value>,
    },

    FunctionEnd,

    Return { value: Option<Value> },
}

fn expect_type(found: AtomicType, expected: AtomicType, context: &str) -> Result<(), LoweringError> {
    if found == expected {
        Ok(())
    } else {
        Err(LoweringError::type_mismatch(expected, found, context))
    }
}

fn expect_integer(ty: AtomicType, context: &str) -> Result<(), LoweringError> {
    if ty.is_integer() {
        Ok(())
    } else {
        Err(LoweringError::UnsupportedType {
            ty,
            context: context.to_string(),
        })
    }
}

fn expect_slot(slot: &Value, context: &str) -> Result<(), LoweringError> {
    match slot {
        Value::Slot { ty, .. } if ty.size_in_bytes().is_some() => Ok(()),
        other => Err(LoweringError::UnsupportedType {
            ty: other.ty(),
            context: context.to_string(),
        }),
    }
}

impl Instruction {
    pub fn alloca(slot: Value, align: u16) -> Result<Self, LoweringError> {
        expect_slot(&slot, "alloca")?;
        Ok(Instruction::Alloca { slot, align })
    }

    pub fn store(value: Value, slot: Value, align: u16) -> Result<Self, LoweringError> {
        expect_slot(&slot, "store")?;
        expect_type(value.ty(), slot.ty(), "store")?;
        Ok(Instruction::Store { value, slot, align })
    }

    pub fn load(result: Value, slot: Value, align: u16) -> Result<Self, LoweringError> {
        expect_slot(&slot, "load")?;
        expect_type(result.ty(), slot.ty(), "load")?;
        Ok(Instruction::Load { result, slot, align })
    }

    pub fn binary(result: Value, op: IrBinaryOp, lhs: Value, rhs: Value) -> Result<Self, LoweringError> {
        let context = op.to_string();
        expect_integer(result.ty(), &context)?;
        expect_type(lhs.ty(), result.ty(), &context)?;
        expect_type(rhs.ty(), result.ty(), &context)?;
        Ok(Instruction::Binary { result, op, lhs, rhs })
    }

    pub fn icmp(result: Value, relation: Relation, lhs: Value, rhs: Value) -> Result<Self, LoweringError> {
        expect_type(result.ty(), AtomicType::Bool, "icmp")?;
        expect_integer(lhs.ty(), "icmp")?;
        expect_type(rhs.ty(), lhs.ty(), "icmp")?;
        Ok(Instruction::ICmp { result, relation, lhs, rhs })
    }

    pub fn jump(target: Label) -> Self {
        Instruction::Jump { target }
    }

    pub fn branch(condition: Value, on_true: Label, on_false: Label) -> Result<Self, LoweringError> {
        expect_type(condition.ty(), AtomicType::Bool, "branch condition")?;
        Ok(Instruction::Branch { condition, on_true, on_false })
    }

    pub fn phi(result: Value, incoming: Vec<(Value, Label)>) -> Result<Self, LoweringError> {
        if incoming.len() < 2 {
            return Err(LoweringError::IncompletePhi { incoming: incoming.len() });
        }
        for (value, _) in &incoming {
            expect_type(value.ty(), result.ty(), "phi")?;
        }
        Ok(Instruction::Phi { result, incoming })
    }

    pub fn zext(result: Value, value: Value) -> Result<Self, LoweringError> {
        expect_integer(value.ty(), "zext")?;
        expect_integer(result.ty(), "zext")?;
        if value.ty().bit_width() >= result.ty().bit_width() {
            return Err(LoweringError::type_mismatch(result.ty(), value.ty(), "zext"));
        }
        Ok(Instruction::ZExt { result, value })
    }

    pub fn call(
        result: Option<Value>,
        callee: impl Into<String>,
        return_type: AtomicType,
        arguments: Vec<Value>,
    ) -> Result<Self, LoweringError> {
        let found = result.map(|r| r.ty()).unwrap_or(AtomicType::Void);
        expect_type(found, return_type, "call result")?;
        Ok(Instruction::Call {
            result,
            callee: callee.into(),
            return_type,
            arguments,
        })
    }

    pub fn ret(value: Option<Value>) -> Self {
        Instruction::Return { value }
    }

    /// Instructions that end a basic block
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::Return { .. } | Instruction::Jump { .. } | Instruction::Branch { .. }
        )
    }

    /// Every label operand, including the one a `Label` marker defines
    pub fn labels(&self) -> Vec<&Label> {
        match self {
            Instruction::Jump { target } => vec![target],
            Instruction::Branch { on_true, on_false, .. } => vec![on_true, on_false],
            Instruction::Label(label) => vec![label],
            Instruction::Phi { incoming, .. } => incoming.iter().map(|(_, label)| label).collect(),
            _ => Vec::new(),
        }
    }

    pub fn labels_mut(&mut self) -> Vec<&mut Label> {
        match self {
            Instruction::Jump { target } => vec![target],
            Instruction::Branch { on_true, on_false, .. } => vec![on_true, on_false],
            Instruction::Label(label) => vec![label],
            Instruction::Phi { incoming, .. } => incoming.iter_mut().map(|(_, label)| label).collect(),
            _ => Vec::new(),
        }
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {value}", value.ty())?;
    }
    Ok(())
}

/// Unchecked text form; pending label operands print as `<pending N>`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Alloca { slot, align } => {
                write!(f, "{slot} = alloca {}, align {align}", slot.ty())
            }
            Instruction::Store { value, slot, align } => {
                write!(f, "store {} {value}, ptr {slot}, align {align}", value.ty())
            }
            Instruction::Load { result, slot, align } => {
                write!(f, "{result} = load {}, ptr {slot}, align {align}", result.ty())
            }
            Instruction::Binary { result, op, lhs, rhs } => {
                write!(f, "{result} = {op} {} {lhs}, {rhs}", result.ty())
            }
            Instruction::ICmp { result, relation, lhs, rhs } => {
                write!(f, "{result} = icmp {relation} {} {lhs}, {rhs}", lhs.ty())
            }
            Instruction::Jump { target } => write!(f, "br label %{target}"),
            Instruction::Branch { condition, on_true, on_false } => {
                write!(f, "br i1 {condition}, label %{on_true}, label %{on_false}")
            }
            Instruction::Label(label) => write!(f, "{label}:"),
            Instruction::Phi { result, incoming } => {
                write!(f, "{result} = phi {}", result.ty())?;
                for (i, (value, label)) in incoming.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " [ {value}, %{label} ]")?;
                }
                Ok(())
            }
            Instruction::ZExt { result, value } => {
                write!(f, "{result} = zext {} {value} to {}", value.ty(), result.ty())
            }
            Instruction::Call { result, callee, return_type, arguments } => {
                if let Some(result) = result {
                    write!(f, "{result} = ")?;
                }
                write!(f, "call {return_type} @{callee}(")?;
                write_arguments(f, arguments)?;
                write!(f, ")")
            }
            Instruction::FunctionBegin { name, return_type, params } => {
                write!(f, "define {return_type} @{name}(")?;
                write_arguments(f, params)?;
                write!(f, ") {{")
            }
            Instruction::FunctionEnd => write!(f, "}}"),
            Instruction::Return { value: Some(value) } => write!(f, "ret {} {value}", value.ty()),
            Instruction::Return { value: None } => write!(f, "ret void"),
        }
    }
}
