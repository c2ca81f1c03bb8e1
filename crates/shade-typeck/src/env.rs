//! Type environment with scope stack.
//!
//! Each function body and each nested block pushes a frame; leaving pops it.
//! Lookups search from the innermost frame outward. A `var` declared without
//! an initializer and without an injected type is a pending slot until its
//! first assignment gives it a type.

use rustc_hash::FxHashMap;

use crate::ty::{ConstantValue, SemanticType};

/// What a local name is bound to.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Typed(SemanticType),
    /// A parameter whose value the host fixes at compile time. Assigning to
    /// it demotes it to `Typed`.
    Constant(SemanticType, ConstantValue),
    /// Declared, not yet assigned.
    Pending,
}

impl Binding {
    pub fn ty(&self) -> Option<&SemanticType> {
        match self {
            Binding::Typed(ty) | Binding::Constant(ty, _) => Some(ty),
            Binding::Pending => None,
        }
    }
}

/// One popped scope frame.
pub type Frame = FxHashMap<String, Binding>;

pub struct TypeEnv {
    /// Index 0 is the outermost scope and is never popped.
    scopes: Vec<Frame>,
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the top scope and hand back its bindings so the caller can
    /// settle pending slots.
    ///
    /// # Panics
    ///
    /// Panics if called when only the outermost scope remains.
    pub fn pop_scope(&mut self) -> Frame {
        assert!(self.scopes.len() > 1, "cannot pop the outermost scope");
        self.scopes.pop().unwrap_or_default()
    }

    /// Bind `name` in the innermost scope, replacing any earlier binding in
    /// that scope.
    pub fn insert(&mut self, name: String, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, binding);
        }
    }

    /// Bind `name` in the outermost scope, where it outlives every block.
    /// Used for assigned injections (`scale`, `env.scale`), which are not
    /// declared in any scope.
    pub fn insert_outermost(&mut self, name: String, binding: Binding) {
        if let Some(scope) = self.scopes.first_mut() {
            scope.insert(name, binding);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}
