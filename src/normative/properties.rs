//! Optional property members shared by several normative types

use std::sync::Arc;

use crate::field::{Field, FieldBuilder, FieldPtr, FieldResult, ScalarType};
use crate::observability::Event;
use crate::schema::Definition;
use crate::standard;

/// Which of the common property members a builder appends
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Properties {
    pub descriptor: bool,
    pub alarm: bool,
    pub time_stamp: bool,
    pub display: bool,
    pub control: bool,
}

impl Properties {
    /// Appends the selected members in their canonical order
    pub fn append(&self, mut builder: FieldBuilder) -> FieldBuilder {
        if self.descriptor {
            builder = builder.add("descriptor", ScalarType::String);
        }
        if self.alarm {
            builder = builder.add_field("alarm", standard::alarm());
        }
        if self.time_stamp {
            builder = builder.add_field("timeStamp", standard::time_stamp());
        }
        if self.display {
            builder = builder.add_field("display", standard::display());
        }
        if self.control {
            builder = builder.add_field("control", standard::control());
        }
        builder
    }
}

/// Appends caller-supplied members after the standard ones
pub(crate) fn append_extra(mut builder: FieldBuilder, extra: &[(String, FieldPtr)]) -> FieldBuilder {
    for (name, field) in extra {
        builder = builder.add_field(name.clone(), Arc::clone(field));
    }
    builder
}

/// Builds a definition whose members at `optional` paths may be omitted
pub(crate) fn optional_definition(reference: FieldPtr, optional: &[&str]) -> FieldResult<Definition> {
    let mut definition = Definition::new(reference);
    for path in optional {
        definition.mark_optional_path(path)?;
    }
    Ok(definition)
}

/// Runs a definition constructor once and logs the outcome.
///
/// The constructors only assemble fixed shapes with distinct member names,
/// so a failure here is a bug in the shape itself.
pub(crate) fn initialize(uri: &str, build: impl FnOnce() -> FieldResult<Definition>) -> Definition {
    let definition = match build() {
        Ok(definition) => definition,
        Err(err) => panic!("{} reference shape is malformed: {}", uri, err),
    };

    tracing::debug!(
        event = %Event::DefinitionInitialized,
        uri,
        optional = definition.optional_count(),
        "definition initialized"
    );

    definition
}

/// Type id of a structure root, if the field is one
pub(crate) fn structure_id(field: &Field) -> Option<&str> {
    field.as_structure().map(|s| s.type_id())
}
