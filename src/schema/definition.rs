//! Reference shapes and their optional sets

use std::collections::HashSet;
use std::sync::Arc;

use crate::field::{Field, FieldError, FieldId, FieldPtr, FieldResult};

/// A reference field tree plus the reference-side nodes that a candidate
/// may omit.
///
/// The optional set holds identities of nodes inside `reference`. Marking a
/// node that is not reachable from `reference` is accepted but has no effect,
/// since the validator only ever consults reference-side children.
#[derive(Debug, Clone)]
pub struct Definition {
    reference: FieldPtr,
    optional: HashSet<FieldId>,
}

impl Definition {
    /// Creates a definition with an empty optional set
    pub fn new(reference: FieldPtr) -> Self {
        Self {
            reference,
            optional: HashSet::new(),
        }
    }

    /// Returns the reference shape
    pub fn reference(&self) -> &FieldPtr {
        &self.reference
    }

    /// Registers a reference-side node as optional
    pub fn mark_optional(&mut self, node: &Field) -> &mut Self {
        self.optional.insert(node.id());
        self
    }

    /// Registers the reference node at a dotted path as optional.
    ///
    /// Paths are resolved from the reference root, descending through
    /// structures and structure arrays.
    pub fn mark_optional_path(&mut self, path: &str) -> FieldResult<&mut Self> {
        let structure = self
            .reference
            .as_structure()
            .ok_or_else(|| FieldError::NotAStructure(String::new()))?;
        let node = Arc::clone(structure.field_at(path)?);
        Ok(self.mark_optional(&node))
    }

    /// Returns true if the node's identity is in the optional set
    pub fn is_optional(&self, node: &Field) -> bool {
        self.optional.contains(&node.id())
    }

    pub fn optional_count(&self) -> usize {
        self.optional.len()
    }
}
