//! Branch target labels
//!
//! A label is allocated as `Pending` before the code it marks is lowered,
//! so forward branches can refer to it. Fixing it gives it its number in
//! the function's value sequence. The transition happens once; every
//! branch operand still pending when the function is finished is
//! rewritten in place from the [`LabelTable`].

use crate::ir::Segment;
use log::trace;
use pseudoc_common::LoweringError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a label in its function's [`LabelTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Pending(LabelId),
    Fixed { id: LabelId, name: u32 },
}

impl Label {
    pub fn id(&self) -> LabelId {
        match self {
            Label::Pending(id) | Label::Fixed { id, .. } => *id,
        }
    }

    /// The label's number. Reading it before the label is fixed is an error.
    pub fn name(&self) -> Result<u32, LoweringError> {
        match self {
            Label::Fixed { name, .. } => Ok(*name),
            Label::Pending(id) => Err(LoweringError::UnfixedLabel { label: id.0 }),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Label::Fixed { .. })
    }
}

/// Debug text for a label. A pending label prints as `<pending N>`,
/// which is not valid IR; [`Segment::render`](super::Segment::render)
/// is the printer that rejects unfixed labels.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Fixed { name, .. } => write!(f, "{name}"),
            Label::Pending(id) => write!(f, "<pending {}>", id.0),
        }
    }
}

/// Per-function record of which labels have been fixed, and to what
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    states: Vec<Option<u32>>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new pending label
    pub fn allocate(&mut self) -> Label {
        let id = LabelId(self.states.len() as u32);
        self.states.push(None);
        Label::Pending(id)
    }

    /// Fix `label` to `name`
    pub fn fix(&mut self, label: Label, name: u32) -> Result<Label, LoweringError> {
        let id = label.id();
        let state = self
            .states
            .get_mut(id.0 as usize)
            .ok_or(LoweringError::UnknownLabel { label: id.0 })?;

        if state.is_some() || label.is_fixed() {
            return Err(LoweringError::LabelRefixed { label: id.0 });
        }

        *state = Some(name);
        trace!("fixed label {} as %{name}", id.0);
        Ok(Label::Fixed { id, name })
    }

    /// The fixed form of `label`
    pub fn resolve(&self, label: Label) -> Result<Label, LoweringError> {
        let id = label.id();
        match self.states.get(id.0 as usize) {
            None => Err(LoweringError::UnknownLabel { label: id.0 }),
            Some(None) => Err(LoweringError::UnfixedLabel { label: id.0 }),
            Some(Some(name)) => Ok(Label::Fixed { id, name: *name }),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Fails on the first label that was allocated but never fixed
    pub fn check_all_fixed(&self) -> Result<(), LoweringError> {
        match self.states.iter().position(Option::is_none) {
            Some(index) => Err(LoweringError::UnfixedLabel { label: index as u32 }),
            None => Ok(()),
        }
    }

    /// Rewrite every label operand of `segment` to its fixed form
    pub fn resolve_segment(&self, segment: &mut Segment) -> Result<(), LoweringError> {
        for instruction in &mut segment.instructions {
            for label in instruction.labels_mut() {
                *label = self.resolve(*label)?;
            }
        }
        Ok(())
    }
}
