//! NTNDArray
//!
//! An N-dimensional array: a union of typed arrays holding the (possibly
//! compressed) data, the codec that produced it, its dimensions and a list
//! of NTAttribute elements.

use std::sync::OnceLock;

use crate::field::{Field, FieldBuilder, FieldPtr, FieldResult, ScalarType, Structure};
use crate::schema::Definition;
use crate::standard;

use super::attribute::NtAttributeBuilder;
use super::properties::{self, Properties};
use super::NormativeType;

const OPTIONAL_PATHS: [&str; 7] = [
    "descriptor",
    "alarm",
    "timeStamp",
    "display",
    "attribute.tags",
    "attribute.alarm",
    "attribute.timeStamp",
];

#[derive(Debug, Clone, Copy)]
pub struct NtNdArray;

impl NtNdArray {
    pub fn builder() -> NtNdArrayBuilder {
        NtNdArrayBuilder::default()
    }
}

impl NormativeType for NtNdArray {
    const URI: &'static str = "epics:nt/NTNDArray:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtNdArrayBuilder::default()
                    .add_descriptor()
                    .add_alarm()
                    .add_time_stamp()
                    .add_display()
                    .create_structure()?;
                properties::optional_definition(reference, &OPTIONAL_PATHS)
            })
        })
    }
}

/// `booleanValue`, `byteValue`, ... `doubleValue`: one array alternative per
/// non-string scalar type.
fn value_union() -> FieldResult<FieldPtr> {
    ScalarType::ALL
        .iter()
        .filter(|ty| **ty != ScalarType::String)
        .fold(FieldBuilder::new(), |b, ty| {
            b.add_array(format!("{}Value", ty.name()), *ty)
        })
        .create_union()
}

fn codec() -> FieldResult<FieldPtr> {
    FieldBuilder::new()
        .id("codec_t")
        .add("name", ScalarType::String)
        .add_field("parameters", Field::variant_union())
        .create_structure()
}

fn dimension() -> FieldResult<Structure> {
    FieldBuilder::new()
        .id("dimension_t")
        .add("size", ScalarType::Int)
        .add("offset", ScalarType::Int)
        .add("fullSize", ScalarType::Int)
        .add("binning", ScalarType::Int)
        .add("reverse", ScalarType::Boolean)
        .build_structure()
}

fn attribute() -> FieldResult<Structure> {
    NtAttributeBuilder::default()
        .add_tags()
        .add_descriptor()
        .add_source()
        .add_alarm()
        .add_time_stamp()
        .build_structure()
}

#[derive(Debug, Clone, Default)]
pub struct NtNdArrayBuilder {
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtNdArrayBuilder {
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

    pub fn add(mut self, name: impl Into<String>, field: FieldPtr) -> Self {
        self.extra.push((name.into(), field));
        self
    }

    pub fn create_structure(&self) -> FieldResult<FieldPtr> {
        // dataTimeStamp is required while timeStamp is optional, so it gets
        // its own time_t node rather than the shared one.
        let data_time_stamp = standard::time_stamp_builder().create_structure()?;

        let builder = FieldBuilder::new()
            .id(NtNdArray::URI)
            .add_field("value", value_union()?)
            .add_field("codec", codec()?)
            .add("compressedSize", ScalarType::Long)
            .add("uncompressedSize", ScalarType::Long)
            .add_structure_array("dimension", &dimension()?)
            .add("uniqueId", ScalarType::Int)
            .add_field("dataTimeStamp", data_time_stamp)
            .add_structure_array("attribute", &attribute()?);

        let builder = self.properties.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}
