//! NTUnion

use std::sync::{Arc, OnceLock};

use crate::field::{Field, FieldBuilder, FieldPtr, FieldResult, Union};
use crate::schema::Definition;

use super::properties::{self, Properties};
use super::NormativeType;

/// Single union value with optional descriptor, alarm and timestamp.
///
/// The reference value is the variant union, so any union is accepted.
#[derive(Debug, Clone, Copy)]
pub struct NtUnion;

impl NtUnion {
    pub fn builder() -> NtUnionBuilder {
        NtUnionBuilder::default()
    }
}

impl NormativeType for NtUnion {
    const URI: &'static str = "epics:nt/NTUnion:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtUnionBuilder::default()
                    .add_descriptor()
                    .add_alarm()
                    .add_time_stamp()
                    .create_structure()?;
                properties::optional_definition(reference, &["descriptor", "alarm", "timeStamp"])
            })
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NtUnionBuilder {
    value: Option<Union>,
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtUnionBuilder {
    /// Restricts `value` to the given union; the default is the variant union
    pub fn value(mut self, value: Union) -> Self {
        self.value = Some(value);
        self
    }

    pub fn add_descriptor(mut self) -> Self {
        self.properties.descriptor = true;
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

    pub fn create_structure(&self) -> FieldResult<FieldPtr> {
        let value = self.value.clone().unwrap_or_else(Union::variant);
        let builder = FieldBuilder::new()
            .id(NtUnion::URI)
            .add_field("value", Arc::new(Field::Union(value)));
        let builder = self.properties.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}
