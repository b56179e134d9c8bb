//! Lexical scopes
//!
//! Scopes live in an arena and are addressed by [`ScopeId`]. Each scope
//! maps source names to the stack slot holding the variable and knows its
//! parent, so lookups walk outward until a binding is found. The arena also
//! owns the function's [`NameGenerator`], so every temporary, slot and
//! label of one function draws from the same counter.

pub mod functions;

pub use functions::{FunctionTable, Signature};

use crate::ir::Value;
use pseudoc_common::ScopeError;
use std::collections::HashMap;

/// Handle to a scope in a [`ScopeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Monotonic source of value numbers for one function
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    next: u32,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self) -> u32 {
        let name = self.next;
        self.next += 1;
        name
    }

    /// The number the next call to `next_name` will return
    pub fn peek(&self) -> u32 {
        self.next
    }
}

#[derive(Debug, Clone)]
struct Scope {
    parent: Option<ScopeId>,
    bindings: HashMap<String, Value>,
}

/// All scopes of one function
#[derive(Debug, Clone)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
    names: NameGenerator,
}

impl ScopeArena {
    /// Create an arena holding an empty root scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                parent: None,
                bindings: HashMap::new(),
            }],
            names: NameGenerator::new(),
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Open a new scope nested in `parent`
    pub fn open_child(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            bindings: HashMap::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.0).and_then(|s| s.parent)
    }

    /// Bind `name` in `scope`. Shadowing an outer binding is allowed,
    /// rebinding within the same scope is not.
    pub fn declare(&mut self, scope: ScopeId, name: &str, slot: Value) -> Result<(), ScopeError> {
        let bindings = &mut self.scopes[scope.0].bindings;
        if bindings.contains_key(name) {
            return Err(ScopeError::Redeclared { name: name.to_string() });
        }
        bindings.insert(name.to_string(), slot);
        Ok(())
    }

    /// Resolve `name` from `scope`, innermost binding first
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Result<Value, ScopeError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(slot) = scope.bindings.get(name) {
                return Ok(*slot);
            }
            current = scope.parent;
        }

        Err(ScopeError::UndeclaredVariable { name: name.to_string() })
    }

    /// Draw the next value number
    pub fn fresh_name(&mut self) -> u32 {
        self.names.next_name()
    }

    pub fn names(&self) -> &NameGenerator {
        &self.names
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pseudoc_common::AtomicType;

    fn slot(arena: &mut ScopeArena) -> Value {
        Value::Slot {
            id: arena.fresh_name(),
            ty: AtomicType::I32,
        }
    }

    #[test]
    fn test_inner_binding_shadows_outer() {
        let mut arena = ScopeArena::new();
        let outer = arena.root();
        let outer_x = slot(&mut arena);
        arena.declare(outer, "x", outer_x).unwrap();

        let inner = arena.open_child(outer);
        let inner_x = slot(&mut arena);
        arena.declare(inner, "x", inner_x).unwrap();

        assert_eq!(arena.lookup(inner, "x"), Ok(inner_x));
        assert_eq!(arena.lookup(outer, "x"), Ok(outer_x));
    }

    #[test]
    fn test_sibling_scopes_are_isolated() {
        let mut arena = ScopeArena::new();
        let root = arena.root();
        let first = arena.open_child(root);
        let x = slot(&mut arena);
        arena.declare(first, "x", x).unwrap();

        let second = arena.open_child(root);
        assert_eq!(
            arena.lookup(second, "x"),
            Err(ScopeError::UndeclaredVariable { name: "x".to_string() })
        );

        let other_x = slot(&mut arena);
        assert_eq!(arena.declare(second, "x", other_x), Ok(()));
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        let mut arena = ScopeArena::new();
        let root = arena.root();
        let a = slot(&mut arena);
        let b = slot(&mut arena);
        arena.declare(root, "x", a).unwrap();
        assert_eq!(
            arena.declare(root, "x", b),
            Err(ScopeError::Redeclared { name: "x".to_string() })
        );
    }

    #[test]
    fn test_lookup_walks_every_ancestor() {
        let mut arena = ScopeArena::new();
        let root = arena.root();
        let x = slot(&mut arena);
        arena.declare(root, "x", x).unwrap();

        let mut scope = root;
        for _ in 0..4 {
            scope = arena.open_child(scope);
        }
        assert_eq!(arena.lookup(scope, "x"), Ok(x));
        assert!(arena.parent(scope).is_some());
        assert_eq!(arena.parent(root), None);
    }

    #[test]
    fn test_names_are_shared_and_increasing() {
        let mut arena = ScopeArena::new();
        let root = arena.root();
        let child = arena.open_child(root);

        let a = slot(&mut arena);
        arena.declare(child, "a", a).unwrap();
        let b = slot(&mut arena);
        arena.declare(root, "b", b).unwrap();

        assert_eq!(a.id(), Some(0));
        assert_eq!(b.id(), Some(1));
        assert_eq!(arena.names().peek(), 2);
    }
}
