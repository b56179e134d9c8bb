//! Function table
//!
//! Maps function names to signatures for the whole compilation unit.
//! Definitions register themselves before their body is lowered, so a
//! function can call itself and any function defined above it.

use pseudoc_common::{AtomicType, ScopeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub return_type: AtomicType,
    pub params: Vec<AtomicType>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")->{}", self.return_type)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Signature>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, signature: Signature) -> Result<(), ScopeError> {
        if self.functions.contains_key(name) {
            return Err(ScopeError::FunctionRedefined { name: name.to_string() });
        }
        self.functions.insert(name.to_string(), signature);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Signature, ScopeError> {
        self.functions
            .get(name)
            .ok_or_else(|| ScopeError::UndeclaredFunction { name: name.to_string() })
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_and_lookup() {
        let mut table = FunctionTable::new();
        let signature = Signature {
            return_type: AtomicType::I32,
            params: vec![AtomicType::I32, AtomicType::I8],
        };
        table.register("f", signature.clone()).unwrap();

        assert_eq!(table.lookup("f"), Ok(&signature));
        assert_eq!(signature.to_string(), "(i32, i8)->i32");
        assert_eq!(
            table.lookup("g"),
            Err(ScopeError::UndeclaredFunction { name: "g".to_string() })
        );
    }

    #[test]
    fn test_second_definition_is_rejected() {
        let mut table = FunctionTable::new();
        let signature = Signature { return_type: AtomicType::Void, params: vec![] };
        table.register("main", signature.clone()).unwrap();
        assert_eq!(
            table.register("main", signature),
            Err(ScopeError::FunctionRedefined { name: "main".to_string() })
        );
        assert_eq!(table.len(), 1);
    }
}
