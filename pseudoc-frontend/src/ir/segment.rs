//! IR Segments
//!
//! A segment is an ordered instruction list plus the value, if any, that
//! the lowered construct produced. Lowering a construct lowers each part
//! into its own segment and splices them in evaluation order.

use crate::ir::{Instruction, Value};
use pseudoc_common::LoweringError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub instructions: Vec<Instruction>,
    pub result: Option<Value>,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A segment that only yields a value
    pub fn from_value(value: Value) -> Self {
        Self {
            instructions: Vec::new(),
            result: Some(value),
        }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Splice `other`'s instructions onto this segment and hand back its
    /// result
    pub fn append(&mut self, other: Segment) -> Option<Value> {
        self.instructions.extend(other.instructions);
        other.result
    }

    /// Like [`Segment::append`], for operands that must produce a value
    pub fn append_value(&mut self, other: Segment, context: &str) -> Result<Value, LoweringError> {
        self.append(other).ok_or_else(|| LoweringError::VoidValue {
            context: context.to_string(),
        })
    }

    pub fn ends_with_terminator(&self) -> bool {
        self.instructions.last().is_some_and(Instruction::is_terminator)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Text form, one instruction per line. Fails if any label operand
    /// has not been fixed.
    pub fn render(&self) -> Result<String, LoweringError> {
        let mut lines = Vec::with_capacity(self.instructions.len());

        for instruction in &self.instructions {
            for label in instruction.labels() {
                label.name()?;
            }

            let indent = match instruction {
                Instruction::Label(_) | Instruction::FunctionBegin { .. } | Instruction::FunctionEnd => "",
                _ => "  ",
            };
            lines.push(format!("{indent}{instruction}"));
        }

        Ok(lines.join("\n"))
    }
}
