//! NTNameValue

use std::sync::OnceLock;

use crate::field::{FieldBuilder, FieldPtr, FieldResult, ScalarType};
use crate::schema::Definition;

use super::properties::{self, Properties};
use super::NormativeType;

/// Parallel `names` and `values` arrays, with optional descriptor, alarm
/// and timestamp.
#[derive(Debug, Clone, Copy)]
pub struct NtNameValue;

impl NtNameValue {
    pub fn builder(value_type: ScalarType) -> NtNameValueBuilder {
        NtNameValueBuilder::new(value_type)
    }
}

impl NormativeType for NtNameValue {
    const URI: &'static str = "epics:nt/NTNameValue:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtNameValueBuilder::new(ScalarType::String)
                    .add_descriptor()
                    .add_alarm()
                    .add_time_stamp()
                    .create_structure()?;
                properties::optional_definition(reference, &["descriptor", "alarm", "timeStamp"])
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct NtNameValueBuilder {
    value_type: ScalarType,
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtNameValueBuilder {
    /// `value_type` is the element type of the `values` array
    pub fn new(value_type: ScalarType) -> Self {
        Self {
            value_type,
            properties: Properties::default(),
            extra: Vec::new(),
        }
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
        let builder = FieldBuilder::new()
            .id(NtNameValue::URI)
            .add_array("names", ScalarType::String)
            .add_array("values", self.value_type);
        let builder = self.properties.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}
