//! NTScalar and NTScalarArray

use std::sync::OnceLock;

use crate::field::{FieldBuilder, FieldPtr, FieldResult, ScalarType};
use crate::schema::Definition;

use super::properties::{self, Properties};
use super::NormativeType;

const PROPERTY_PATHS: [&str; 5] = ["descriptor", "alarm", "timeStamp", "display", "control"];

/// Single scalar value with optional descriptor, alarm, timestamp, display
/// and control properties.
#[derive(Debug, Clone, Copy)]
pub struct NtScalar;

impl NtScalar {
    pub fn builder(value_type: ScalarType) -> NtScalarBuilder {
        NtScalarBuilder::new(value_type)
    }
}

impl NormativeType for NtScalar {
    const URI: &'static str = "epics:nt/NTScalar:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtScalarBuilder::new(ScalarType::Double)
                    .add_descriptor()
                    .add_alarm()
                    .add_time_stamp()
                    .add_display()
                    .add_control()
                    .create_structure()?;
                properties::optional_definition(reference, &PROPERTY_PATHS)
            })
        })
    }
}

/// Builds NTScalar structures
#[derive(Debug, Clone)]
pub struct NtScalarBuilder {
    value_type: ScalarType,
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtScalarBuilder {
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

    pub fn add_display(mut self) -> Self {
        self.properties.display = true;
        self
    }

    pub fn add_control(mut self) -> Self {
        self.properties.control = true;
        self
    }

    /// Appends an extra member after the standard ones
    pub fn add(mut self, name: impl Into<String>, field: FieldPtr) -> Self {
        self.extra.push((name.into(), field));
        self
    }

    pub fn create_structure(&self) -> FieldResult<FieldPtr> {
        let builder = FieldBuilder::new()
            .id(NtScalar::URI)
            .add("value", self.value_type);
        let builder = self.properties.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}

/// Array of scalars with the same optional properties as [`NtScalar`]
#[derive(Debug, Clone, Copy)]
pub struct NtScalarArray;

impl NtScalarArray {
    pub fn builder(element_type: ScalarType) -> NtScalarArrayBuilder {
        NtScalarArrayBuilder::new(element_type)
    }
}

impl NormativeType for NtScalarArray {
    const URI: &'static str = "epics:nt/NTScalarArray:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtScalarArrayBuilder::new(ScalarType::Double)
                    .add_descriptor()
                    .add_alarm()
                    .add_time_stamp()
                    .add_display()
                    .add_control()
                    .create_structure()?;
                properties::optional_definition(reference, &PROPERTY_PATHS)
            })
        })
    }
}

/// Builds NTScalarArray structures
#[derive(Debug, Clone)]
pub struct NtScalarArrayBuilder {
    element_type: ScalarType,
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtScalarArrayBuilder {
    pub fn new(element_type: ScalarType) -> Self {
        Self {
            element_type,
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

    pub fn add_display(mut self) -> Self {
        self.properties.display = true;
        self
    }

    pub fn add_control(mut self) -> Self {
        self.properties.control = true;
        self
    }

    pub fn add(mut self, name: impl Into<String>, field: FieldPtr) -> Self {
        self.extra.push((name.into(), field));
        self
    }

    pub fn create_structure(&self) -> FieldResult<FieldPtr> {
        let builder = FieldBuilder::new()
            .id(NtScalarArray::URI)
            .add_array("value", self.element_type);
        let builder = self.properties.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}
