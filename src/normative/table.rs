//! NTTable

use std::sync::OnceLock;

use crate::field::{FieldBuilder, FieldPtr, FieldResult, ScalarType};
use crate::schema::Definition;

use super::properties::{self, Properties};
use super::NormativeType;

/// Column-oriented table: a `labels` string array plus a `value` structure
/// holding one scalar array per column.
///
/// The reference `value` has no columns, so any set of columns is accepted.
#[derive(Debug, Clone, Copy)]
pub struct NtTable;

impl NtTable {
    pub fn builder() -> NtTableBuilder {
        NtTableBuilder::default()
    }
}

impl NormativeType for NtTable {
    const URI: &'static str = "epics:nt/NTTable:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtTableBuilder::default()
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
pub struct NtTableBuilder {
    columns: Vec<(String, ScalarType)>,
    properties: Properties,
    extra: Vec<(String, FieldPtr)>,
}

impl NtTableBuilder {
    /// Adds a column; its name is also used as the label
    pub fn add_column(mut self, name: impl Into<String>, element_type: ScalarType) -> Self {
        self.columns.push((name.into(), element_type));
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

    /// Column names in insertion order
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn create_structure(&self) -> FieldResult<FieldPtr> {
        let value = self
            .columns
            .iter()
            .fold(FieldBuilder::new(), |b, (name, ty)| b.add_array(name.clone(), *ty))
            .create_structure()?;

        let builder = FieldBuilder::new()
            .id(NtTable::URI)
            .add_array("labels", ScalarType::String)
            .add_field("value", value);
        let builder = self.properties.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldError;
    use crate::schema::ErrorKind;

    #[test]
    fn test_any_columns_accepted() {
        let t = NtTable::builder()
            .add_column("x", ScalarType::Double)
            .add_column("name", ScalarType::String)
            .add_time_stamp()
            .create_structure()
            .unwrap();
        assert!(NtTable::is_a(&t));
        assert!(NtTable::validate(&t).is_valid());

        let empty = NtTable::builder().create_structure().unwrap();
        assert!(NtTable::is_compatible(&empty));
    }

    #[test]
    fn test_labels() {
        let b = NtTable::builder()
            .add_column("a", ScalarType::Int)
            .add_column("b", ScalarType::Int);
        assert_eq!(b.labels(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_column_fails() {
        let result = NtTable::builder()
            .add_column("a", ScalarType::Int)
            .add_column("a", ScalarType::Long)
            .create_structure();
        assert_eq!(result.unwrap_err(), FieldError::DuplicateField("a".into()));
    }

    #[test]
    fn test_labels_must_be_array() {
        let value = FieldBuilder::new().create_structure().unwrap();
        let bad = FieldBuilder::new()
            .id(NtTable::URI)
            .add("labels", ScalarType::String)
            .add_field("value", value)
            .create_structure()
            .unwrap();

        let result = NtTable::validate(&bad);
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].kind, ErrorKind::IncorrectType);
        assert_eq!(result.errors()[0].path, "labels");
    }
}
