//! Fluent construction of structures and unions

use std::sync::Arc;

use super::errors::FieldResult;
use super::types::{Field, FieldPtr, ScalarType, Structure, StructureArray, Union, UnionArray};

/// Builds a structure or union one member at a time.
///
/// ```ignore
/// let alarm = FieldBuilder::new()
///     .id("alarm_t")
///     .add("severity", ScalarType::Int)
///     .add("status", ScalarType::Int)
///     .add("message", ScalarType::String)
///     .create_structure()?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct FieldBuilder {
    id: Option<String>,
    members: Vec<(String, FieldPtr)>,
}

impl FieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the members of an existing structure
    pub fn from_structure(structure: &Structure) -> Self {
        Self {
            id: structure.custom_id().map(str::to_string),
            members: structure
                .fields()
                .map(|(name, field)| (name.to_string(), Arc::clone(field)))
                .collect(),
        }
    }

    /// Sets the custom type id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a scalar member
    pub fn add(self, name: impl Into<String>, scalar_type: ScalarType) -> Self {
        self.add_field(name, Field::scalar(scalar_type))
    }

    /// Adds a scalar array member
    pub fn add_array(self, name: impl Into<String>, scalar_type: ScalarType) -> Self {
        self.add_field(name, Field::scalar_array(scalar_type))
    }

    /// Adds an existing node as a member, sharing its identity
    pub fn add_field(mut self, name: impl Into<String>, field: FieldPtr) -> Self {
        self.members.push((name.into(), field));
        self
    }

    /// Adds an array of the given structure
    pub fn add_structure_array(self, name: impl Into<String>, element: &Structure) -> Self {
        let array = Field::StructureArray(StructureArray::new(element.clone()));
        self.add_field(name, Arc::new(array))
    }

    /// Adds an array of the given union
    pub fn add_union_array(self, name: impl Into<String>, element: &Union) -> Self {
        let array = Field::UnionArray(UnionArray::new(element.clone()));
        self.add_field(name, Arc::new(array))
    }

    /// Number of members added so far
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Builds a structure node
    pub fn create_structure(self) -> FieldResult<FieldPtr> {
        Ok(Arc::new(Field::Structure(self.build_structure()?)))
    }

    /// Builds a bare structure (for use as an array element)
    pub fn build_structure(self) -> FieldResult<Structure> {
        Structure::new(self.id, self.members)
    }

    /// Builds a union node
    pub fn create_union(self) -> FieldResult<FieldPtr> {
        Ok(Arc::new(Field::Union(self.build_union()?)))
    }

    /// Builds a bare union (for use as an array element)
    pub fn build_union(self) -> FieldResult<Union> {
        Union::new(self.id, self.members)
    }
}
