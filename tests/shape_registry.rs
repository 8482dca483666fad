//! Shape Registry Tests
//!
//! - Shape files load from a directory
//! - Optional markers in files populate the optional set
//! - Registered names are immutable
//! - Malformed files fail the load (FATAL)
//! - Unknown names are rejected

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use ntshape::field::{FieldBuilder, FieldError, ScalarType};
use ntshape::normative::{NormativeType, NtNdArray, NtScalar};
use ntshape::schema::{
    Definition, ErrorKind, Severity, ShapeErrorCode, ShapeFile, ShapeRegistry, ValidationError,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn record_shape() -> serde_json::Value {
    json!({
        "name": "record",
        "description": "value with optional alarm",
        "shape": {
            "type": "structure",
            "id": "record_t",
            "fields": [
                { "name": "value", "type": "scalar_array", "scalar_type": "double" },
                {
                    "name": "alarm",
                    "type": "structure",
                    "optional": true,
                    "fields": [
                        { "name": "severity", "type": "scalar", "scalar_type": "int" },
                        { "name": "status", "type": "scalar", "scalar_type": "int" },
                        { "name": "message", "type": "scalar", "scalar_type": "string" }
                    ]
                },
                {
                    "name": "choice",
                    "type": "union",
                    "optional": true,
                    "fields": [
                        { "name": "i", "type": "scalar", "scalar_type": "int" },
                        { "name": "s", "type": "scalar", "scalar_type": "string" }
                    ]
                }
            ]
        }
    })
}

fn setup_registry() -> (TempDir, ShapeRegistry) {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("record.json"), record_shape().to_string()).unwrap();

    let mut registry = ShapeRegistry::new(tmp.path());
    registry.load_all().unwrap();
    (tmp, registry)
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_and_validate() {
    let (_tmp, registry) = setup_registry();
    assert!(registry.exists("record"));
    assert_eq!(registry.shape_count(), 1);
    assert_eq!(registry.get("record").unwrap().optional_count(), 2);

    let candidate = FieldBuilder::new()
        .add_array("value", ScalarType::Float)
        .create_structure()
        .unwrap();
    assert!(registry.validate("record", &candidate).unwrap().is_valid());
    assert!(registry.is_compatible("record", &candidate).unwrap());
}

#[test]
fn test_loaded_union_is_order_sensitive() {
    let (_tmp, registry) = setup_registry();

    let choice = FieldBuilder::new()
        .add("s", ScalarType::String)
        .add("i", ScalarType::Int)
        .create_union()
        .unwrap();
    let candidate = FieldBuilder::new()
        .add_array("value", ScalarType::Double)
        .add_field("choice", choice)
        .create_structure()
        .unwrap();

    let result = registry.validate("record", &candidate).unwrap();
    assert_eq!(
        result.errors(),
        &[
            ValidationError::mismatched_name("choice.i", "choice.s"),
            ValidationError::mismatched_name("choice.s", "choice.i"),
            ValidationError::incorrect_type("choice"),
        ]
    );
}

#[test]
fn test_missing_directory_is_created() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("nested").join("shapes");

    let mut registry = ShapeRegistry::new(&dir);
    registry.load_all().unwrap();

    assert!(dir.is_dir());
    assert_eq!(registry.shape_count(), 0);
}

#[test]
fn test_non_json_files_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "not a shape").unwrap();
    fs::write(tmp.path().join("record.json"), record_shape().to_string()).unwrap();

    let mut registry = ShapeRegistry::new(tmp.path());
    registry.load_all().unwrap();
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["record"]);
}

#[test]
fn test_malformed_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), "{ \"name\": ").unwrap();

    let mut registry = ShapeRegistry::new(tmp.path());
    let err = registry.load_all().unwrap_err();

    assert_eq!(err.code(), ShapeErrorCode::MalformedShape);
    assert_eq!(err.severity(), Severity::Fatal);
    assert!(err.is_fatal());
}

#[test]
fn test_duplicate_member_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let shape = json!({
        "name": "dup",
        "shape": {
            "type": "structure",
            "fields": [
                { "name": "a", "type": "scalar", "scalar_type": "int" },
                { "name": "a", "type": "scalar", "scalar_type": "long" }
            ]
        }
    });
    fs::write(tmp.path().join("dup.json"), shape.to_string()).unwrap();

    let mut registry = ShapeRegistry::new(tmp.path());
    let err = registry.load_all().unwrap_err();
    assert_eq!(err.code(), ShapeErrorCode::MalformedShape);
    assert_eq!(err.field_error(), Some(&FieldError::DuplicateField("a".into())));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_structure_array_of_scalar_is_malformed() {
    let file: ShapeFile = serde_json::from_value(json!({
        "name": "rows",
        "shape": {
            "type": "structure_array",
            "element": { "type": "scalar", "scalar_type": "int" }
        }
    }))
    .unwrap();

    let err = file.to_definition().unwrap_err();
    assert_eq!(err.code(), ShapeErrorCode::MalformedShape);
}

// =============================================================================
// Immutability and lookups
// =============================================================================

#[test]
fn test_register_twice_is_rejected() {
    let (_tmp, mut registry) = setup_registry();
    let definition = Definition::new(
        FieldBuilder::new()
            .add("x", ScalarType::Int)
            .create_structure()
            .unwrap(),
    );

    let err = registry.register("record", definition).unwrap_err();
    assert_eq!(err.code(), ShapeErrorCode::ShapeImmutable);
    assert_eq!(err.severity(), Severity::Reject);
}

#[test]
fn test_duplicate_names_across_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.json"), record_shape().to_string()).unwrap();
    fs::write(tmp.path().join("b.json"), record_shape().to_string()).unwrap();

    let mut registry = ShapeRegistry::new(tmp.path());
    let err = registry.load_all().unwrap_err();
    assert_eq!(err.code(), ShapeErrorCode::ShapeImmutable);
}

#[test]
fn test_unknown_shape() {
    let (_tmp, registry) = setup_registry();
    let candidate = FieldBuilder::new().create_structure().unwrap();

    let err = registry.validate("nope", &candidate).unwrap_err();
    assert_eq!(err.code(), ShapeErrorCode::UnknownShape);
    assert_eq!(err.shape(), Some("nope"));
}

// =============================================================================
// Saving
// =============================================================================

/// A saved normative definition reloads with the same behaviour.
#[test]
fn test_save_and_reload_normative_definition() {
    let tmp = TempDir::new().unwrap();
    let writer = ShapeRegistry::new(tmp.path());
    writer.save_shape("ntscalar", NtScalar::definition()).unwrap();
    writer.save_shape("ntndarray", NtNdArray::definition()).unwrap();

    let mut registry = ShapeRegistry::new(tmp.path());
    registry.load_all().unwrap();
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec!["ntndarray", "ntscalar"]
    );
    assert_eq!(registry.get("ntscalar").unwrap().optional_count(), 5);

    let minimal = NtScalar::builder(ScalarType::Int).create_structure().unwrap();
    assert!(registry.validate("ntscalar", &minimal).unwrap().is_valid());

    let nd = NtNdArray::builder().create_structure().unwrap();
    assert!(registry.is_compatible("ntndarray", &nd).unwrap());

    // dataTimeStamp stays required after the round trip.
    let reference = NtNdArray::definition().reference().as_structure().unwrap();
    let mut builder = FieldBuilder::new().id(NtNdArray::URI);
    for (name, field) in reference.fields() {
        if name != "dataTimeStamp" {
            builder = builder.add_field(name, field.clone());
        }
    }
    let result = registry
        .validate("ntndarray", &builder.create_structure().unwrap())
        .unwrap();
    assert_eq!(result.errors(), &[ValidationError::missing_field("dataTimeStamp")]);
    assert!(!result.has_kind(ErrorKind::IncorrectId));
}

#[test]
fn test_save_twice_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let registry = ShapeRegistry::new(tmp.path());
    registry.save_shape("ntscalar", NtScalar::definition()).unwrap();

    let err = registry.save_shape("ntscalar", NtScalar::definition()).unwrap_err();
    assert_eq!(err.code(), ShapeErrorCode::ShapeImmutable);
}

#[test]
fn test_save_rejects_bad_name() {
    let tmp = TempDir::new().unwrap();
    let registry = ShapeRegistry::new(tmp.path());

    let err = registry.save_shape("../escape", NtScalar::definition()).unwrap_err();
    assert_eq!(err.code(), ShapeErrorCode::MalformedShape);
}
