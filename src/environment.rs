//! Lexical scopes for the evaluator.
//!
//! Each scope owns its bindings and holds a shared handle to its parent,
//! so a parent lives at least as long as any child created from it.

use crate::error::RuntimeError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Shared handle to a scope. Closures and call frames hold these.
pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    parent: Option<EnvRef>,
    values: HashMap<String, Value>,
    constants: HashSet<String>,
}

impl Environment {
    /// Create a root scope with no bindings
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Create a child scope over `parent`
    pub fn with_parent(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self {
            parent: Some(Rc::clone(parent)),
            ..Self::default()
        }))
    }

    pub fn parent(&self) -> Option<&EnvRef> {
        self.parent.as_ref()
    }

    /// Bind `name` in this scope. Shadowing an outer binding is allowed;
    /// rebinding within the same scope is not.
    pub fn declare(
        &mut self,
        name: &str,
        value: Value,
        constant: bool,
    ) -> Result<Value, RuntimeError> {
        if self.values.contains_key(name) {
            return Err(RuntimeError::DuplicateDeclaration(name.to_string()));
        }

        self.values.insert(name.to_string(), value.clone());
        if constant {
            self.constants.insert(name.to_string());
        }
        Ok(value)
    }

    /// Rebind `name` in the nearest scope that declared it.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, RuntimeError> {
        if let Some(slot) = self.values.get_mut(name) {
            if self.constants.contains(name) {
                return Err(RuntimeError::ConstantReassignment(name.to_string()));
            }
            *slot = value.clone();
            Ok(value)
        } else if let Some(parent) = &self.parent {
            parent.borrow_mut().assign(name, value)
        } else {
            Err(RuntimeError::UnknownIdentifier(name.to_string()))
        }
    }

    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(parent) = &self.parent {
            parent.borrow().lookup(name)
        } else {
            Err(RuntimeError::UnknownIdentifier(name.to_string()))
        }
    }

    /// Whether `name` is bound in this scope, ignoring parents.
    pub fn has_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_constant(&self, name: &str) -> bool {
        if self.values.contains_key(name) {
            self.constants.contains(name)
        } else {
            self.parent
                .as_ref()
                .is_some_and(|parent| parent.borrow().is_constant(name))
        }
    }
}
