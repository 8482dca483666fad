//! NTAttribute

use std::sync::{Arc, OnceLock};

use crate::field::{Field, FieldBuilder, FieldPtr, FieldResult, ScalarType, Structure};
use crate::schema::Definition;

use super::properties::{self, Properties};
use super::NormativeType;

/// Named value of any type, with optional tags, descriptor, source and
/// alarm/timestamp properties.
#[derive(Debug, Clone, Copy)]
pub struct NtAttribute;

impl NtAttribute {
    pub fn builder() -> NtAttributeBuilder {
        NtAttributeBuilder::default()
    }
}

impl NormativeType for NtAttribute {
    const URI: &'static str = "epics:nt/NTAttribute:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtAttributeBuilder::default()
                    .add_tags()
                    .add_descriptor()
                    .add_source()
                    .add_alarm()
                    .add_time_stamp()
                    .create_structure()?;
                properties::optional_definition(
                    reference,
                    &["tags", "descriptor", "sourceType", "source", "alarm", "timeStamp"],
                )
            })
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NtAttributeBuilder {
    tags: bool,
    source: bool,
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtAttributeBuilder {
    /// Adds `tags`, a string array
    pub fn add_tags(mut self) -> Self {
        self.tags = true;
        self
    }

    pub fn add_descriptor(mut self) -> Self {
        self.properties.descriptor = true;
        self
    }

    /// Adds `sourceType` (int) and `source` (string)
    pub fn add_source(mut self) -> Self {
        self.source = true;
        self
    }

    pub fn add_alarm(mut self) -> Self {
        self.properties.alarm = true;
        self
    }

    pub fn add_time_stamp(mut self) -> Self {
        self.properties.time_stamp = true;
        self
    }

    pub fn add(mut self, name: impl Into<String>, field: FieldPtr) -> Self {
        self.extra.push((name.into(), field));
        self
    }

    /// Builds the bare structure, e.g. as an array element
    pub fn build_structure(&self) -> FieldResult<Structure> {
        let mut builder = FieldBuilder::new()
            .id(NtAttribute::URI)
            .add("name", ScalarType::String)
            .add_field("value", Field::variant_union());

        if self.tags {
            builder = builder.add_array("tags", ScalarType::String);
        }

        // descriptor sits before the source members; alarm and timeStamp after.
        let head = Properties {
            descriptor: self.properties.descriptor,
            ..Properties::default()
        };
        builder = head.append(builder);

        if self.source {
            builder = builder
                .add("sourceType", ScalarType::Int)
                .add("source", ScalarType::String);
        }

        let tail = Properties {
            descriptor: false,
            ..self.properties
        };
        builder = tail.append(builder);

        properties::append_extra(builder, &self.extra).build_structure()
    }

    pub fn create_structure(&self) -> FieldResult<FieldPtr> {
        Ok(Arc::new(Field::Structure(self.build_structure()?)))
    }
}
