//! Immutable, name-ordered component registries.
//!
//! Epistemic foundation:
//! - K_i: Names are unique within a registry
//! - K_i: Iteration is always in ascending name order
//! - B_i: Registration input may lack documentation → rejected at startup

use crate::models::{Component, ComponentKind, ComponentSpec, KgexError, Result, documentation_of};
use std::collections::BTreeMap;
use tracing::debug;

/// Read-only snapshot of one kind of component.
#[derive(Debug, Clone)]
pub struct Registry {
    kind: ComponentKind,
    entries: BTreeMap<String, Component>,
}

impl Registry {
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Get a component by registry key.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.entries.get(name)
    }

    /// Components in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.entries.values()
    }

    /// Registry keys in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-shot registration pass producing a [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    kind: ComponentKind,
    entries: BTreeMap<String, Component>,
}

impl RegistryBuilder {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Register a component, resolving its documentation once.
    ///
    /// # Errors
    ///
    /// Returns `KgexError::DuplicateComponent` if the name is taken and
    /// `KgexError::MissingDocumentation` if neither the entry nor its type
    /// is documented.
    pub fn register(&mut self, spec: ComponentSpec) -> Result<&Component> {
        if self.entries.contains_key(&spec.name) {
            return Err(KgexError::DuplicateComponent {
                kind: self.kind.to_string(),
                name: spec.name,
            });
        }

        let documentation =
            documentation_of(&spec).ok_or_else(|| KgexError::MissingDocumentation {
                kind: self.kind.to_string(),
                name: spec.name.clone(),
            })?;

        let component = Component {
            kind: self.kind,
            reference: spec.reference.unwrap_or_else(|| spec.name.clone()),
            name: spec.name,
            documentation,
            parameters: spec.parameters,
            uses: spec.uses,
        };

        debug!(kind = %self.kind, name = %component.name, "Registered component");
        let name = component.name.clone();
        Ok(self.entries.entry(name).or_insert(component))
    }

    /// Freeze into an immutable snapshot.
    pub fn build(self) -> Registry {
        Registry {
            kind: self.kind,
            entries: self.entries,
        }
    }
}
