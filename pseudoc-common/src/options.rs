//! Compile options
//!
//! Options can be built in code or loaded from a JSON document; every field
//! is optional in JSON and falls back to its default.

use crate::error::CompilerError;
use crate::types::AtomicType;
use serde::{Deserialize, Serialize};

/// Knobs that change the shape of the emitted IR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Fixed alignment for every stack slot, load and store.
    /// `None` uses each type's natural alignment.
    pub stack_alignment: Option<u16>,

    /// Drop jumps that would directly follow a `ret` or another jump
    pub elide_unreachable_jumps: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            stack_alignment: None,
            elide_unreachable_jumps: true,
        }
    }
}

impl CompileOptions {
    /// Parse options from a JSON document
    pub fn from_json(text: &str) -> Result<Self, CompilerError> {
        serde_json::from_str(text).map_err(|e| CompilerError::Config {
            message: e.to_string(),
        })
    }

    /// Alignment used for memory operations on a value of `ty`
    pub fn alignment_for(&self, ty: AtomicType) -> u16 {
        self.stack_alignment.unwrap_or_else(|| ty.natural_alignment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompileOptions::default();
        assert_eq!(options.stack_alignment, None);
        assert!(options.elide_unreachable_jumps);
        assert_eq!(options.alignment_for(AtomicType::I64), 8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = CompileOptions::from_json(r#"{ "stack_alignment": 4 }"#).unwrap();
        assert_eq!(options.stack_alignment, Some(4));
        assert!(options.elide_unreachable_jumps);
        assert_eq!(options.alignment_for(AtomicType::I8), 4);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = CompileOptions::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CompilerError::Config { .. }));
    }
}
