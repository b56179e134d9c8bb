//! Lowering from AST to IR
//!
//! [`Compiler`] owns the function table and lowers one definition at a
//! time. Each definition gets a fresh [`FunctionLowering`], which owns the
//! function's scope arena and label table. Lowering is bottom-up: every
//! construct returns a [`Segment`] and its parent splices the pieces in
//! evaluation order.

mod definitions;
mod expressions;
mod statements;

pub use definitions::Compiler;

use crate::ir::{Instruction, Label, LabelTable, Segment, Value};
use crate::scope::{FunctionTable, ScopeArena, ScopeId, Signature};
use log::{trace, warn};
use pseudoc_common::{AtomicType, CompileOptions, CompilerError, LoweringError};

/// Where the code being lowered sits: its scope and the targets of
/// `break` and `continue`, which are `None` outside loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoweringContext {
    pub scope: ScopeId,
    pub break_label: Option<Label>,
    pub continue_label: Option<Label>,
}

impl LoweringContext {
    pub fn new(scope: ScopeId) -> Self {
        Self {
            scope,
            break_label: None,
            continue_label: None,
        }
    }

    pub fn in_scope(self, scope: ScopeId) -> Self {
        Self { scope, ..self }
    }

    pub fn in_loop(self, break_label: Label, continue_label: Label) -> Self {
        Self {
            break_label: Some(break_label),
            continue_label: Some(continue_label),
            ..self
        }
    }
}

/// State for lowering a single function
pub struct FunctionLowering<'a> {
    functions: &'a FunctionTable,
    options: &'a CompileOptions,
    scopes: ScopeArena,
    labels: LabelTable,
    return_type: AtomicType,
    /// Incoming parameter registers, numbered from zero
    params: Vec<Value>,
    entry: Label,
    /// Block the next instruction lands in
    current_block: Label,
}

impl<'a> FunctionLowering<'a> {
    /// Number the parameters, then fix the entry label right after them
    pub fn new(
        functions: &'a FunctionTable,
        options: &'a CompileOptions,
        signature: &Signature,
    ) -> Result<Self, LoweringError> {
        let mut scopes = ScopeArena::new();
        let params = signature
            .params
            .iter()
            .map(|&ty| Value::Temp { id: scopes.fresh_name(), ty })
            .collect();

        let mut labels = LabelTable::new();
        let entry = labels.allocate();
        let entry = labels.fix(entry, scopes.fresh_name())?;

        Ok(Self {
            functions,
            options,
            scopes,
            labels,
            return_type: signature.return_type,
            params,
            entry,
            current_block: entry,
        })
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn new_temp(&mut self, ty: AtomicType) -> Value {
        Value::Temp { id: self.scopes.fresh_name(), ty }
    }

    pub fn new_slot(&mut self, ty: AtomicType) -> Value {
        Value::Slot { id: self.scopes.fresh_name(), ty }
    }

    /// Allocate a label to be placed later
    pub fn new_label(&mut self) -> Label {
        self.labels.allocate()
    }

    /// Fix `label` at the end of `segment` and start its block
    pub fn place_label(&mut self, segment: &mut Segment, label: Label) -> Result<(), LoweringError> {
        let fixed = self.labels.fix(label, self.scopes.fresh_name())?;
        segment.push(Instruction::Label(fixed));
        self.current_block = fixed;
        Ok(())
    }

    /// Append a jump unless `segment` already ends in a terminator
    pub fn push_jump(&mut self, segment: &mut Segment, target: Label) {
        if self.options.elide_unreachable_jumps && segment.ends_with_terminator() {
            trace!("dropping unreachable jump to label {}", target.id().0);
            return;
        }
        segment.push(Instruction::jump(target));
    }

    /// Code after a terminator gets a block of its own
    pub fn open_block_if_terminated(&mut self, segment: &mut Segment) -> Result<(), LoweringError> {
        if !segment.ends_with_terminator() {
            return Ok(());
        }
        warn!("unreachable code after a terminator");
        let label = self.new_label();
        self.place_label(segment, label)
    }

    pub fn load(&mut self, segment: &mut Segment, slot: Value) -> Result<Value, LoweringError> {
        let result = self.new_temp(slot.ty());
        segment.push(Instruction::load(result, slot, self.options.alignment_for(slot.ty()))?);
        Ok(result)
    }

    pub fn store(&mut self, segment: &mut Segment, value: Value, slot: Value) -> Result<(), LoweringError> {
        segment.push(Instruction::store(value, slot, self.options.alignment_for(slot.ty()))?);
        Ok(())
    }

    /// Allocate a stack slot for a `ty` and bind it to `name` in `scope`
    pub fn declare_slot(
        &mut self,
        segment: &mut Segment,
        scope: ScopeId,
        name: &str,
        ty: AtomicType,
    ) -> Result<Value, CompilerError> {
        let slot = self.new_slot(ty);
        self.scopes.declare(scope, name, slot)?;
        segment.push(Instruction::alloca(slot, self.options.alignment_for(ty))?);
        Ok(slot)
    }

    /// Convert `value` to `target`. Integer literals take any integer
    /// type they fit in and booleans are zero-extended; anything else is
    /// a mismatch.
    pub fn coerce(
        &mut self,
        segment: &mut Segment,
        value: Value,
        target: AtomicType,
        context: &str,
    ) -> Result<Value, LoweringError> {
        let found = value.ty();
        if found == target {
            return Ok(value);
        }

        if value.is_literal() {
            return retype_literal(value, target, context);
        }

        if found == AtomicType::Bool && target.is_integer() {
            let result = self.new_temp(target);
            segment.push(Instruction::zext(result, value)?);
            return Ok(result);
        }

        Err(LoweringError::type_mismatch(target, found, context))
    }
}

/// Give a literal another type of the same family without emitting code.
/// An integer literal must fit the target type.
pub(crate) fn retype_literal(value: Value, target: AtomicType, context: &str) -> Result<Value, LoweringError> {
    match value {
        _ if value.ty() == target => Ok(value),
        Value::Int { value, .. } if target.is_integer() => {
            if target.fits_integer(value) {
                Ok(Value::Int { value, ty: target })
            } else {
                Err(LoweringError::LiteralOutOfRange { value, ty: target })
            }
        }
        Value::Float { value, .. } if target.is_floating() => Ok(Value::Float { value, ty: target }),
        other => Err(LoweringError::type_mismatch(target, other.ty(), context)),
    }
}
