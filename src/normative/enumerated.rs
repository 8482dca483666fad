//! NTEnum

use std::sync::OnceLock;

use crate::field::{FieldBuilder, FieldPtr, FieldResult};
use crate::schema::Definition;
use crate::standard;

use super::properties::{self, Properties};
use super::NormativeType;

/// Enumerated value (`enum_t`) with optional descriptor, alarm and timestamp
#[derive(Debug, Clone, Copy)]
pub struct NtEnum;

impl NtEnum {
    pub fn builder() -> NtEnumBuilder {
        NtEnumBuilder::default()
    }
}

impl NormativeType for NtEnum {
    const URI: &'static str = "epics:nt/NTEnum:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtEnumBuilder::default()
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
pub struct NtEnumBuilder {
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtEnumBuilder {
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
        let builder = FieldBuilder::new()
            .id(NtEnum::URI)
            .add_field("value", standard::enumerated());
        let builder = self.properties.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}
