//! Intermediate Representation for pseudoc
//!
//! A linear, typed, three-address IR in SSA form with explicit labels and
//! branches, shaped after LLVM's textual IR.
//!
//! ## Architecture
//!
//! - `values` - typed operands
//! - `ops` - binary opcodes and comparison relations
//! - `labels` - branch targets and the per-function label table
//! - `instructions` - IR instructions and their checked constructors
//! - `segment` - instruction lists, the unit of lowering

pub use self::instructions::Instruction;
pub use self::labels::{Label, LabelId, LabelTable};
pub use self::ops::{IrBinaryOp, Relation};
pub use self::segment::Segment;
pub use self::values::Value;

mod instructions;
mod labels;
mod ops;
mod segment;
mod values;

#[cfg(test)]
mod tests;
