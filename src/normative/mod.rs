//! Normative Types
//!
//! A normative type is a structure with a well-known type id and a
//! reference shape. Each type here exposes a builder for producing
//! conforming structures and a process-wide [`Definition`] against which
//! candidates are checked. The definition always contains every optional
//! member, with those members registered as optional.
//!
//! Compatibility is purely structural. The type id is only consulted by
//! [`NormativeType::is_a`] and by [`NormativeType::validate`], which adds an
//! `IncorrectId` error on top of the structural result.

mod attribute;
mod enumerated;
mod multi_channel;
mod name_value;
mod ndarray;
mod properties;
mod scalar;
mod table;
mod union_value;

pub use attribute::{NtAttribute, NtAttributeBuilder};
pub use enumerated::{NtEnum, NtEnumBuilder};
pub use multi_channel::{NtMultiChannel, NtMultiChannelBuilder};
pub use name_value::{NtNameValue, NtNameValueBuilder};
pub use ndarray::{NtNdArray, NtNdArrayBuilder};
pub use scalar::{NtScalar, NtScalarArray, NtScalarArrayBuilder, NtScalarBuilder};
pub use table::{NtTable, NtTableBuilder};
pub use union_value::{NtUnion, NtUnionBuilder};

use crate::field::Field;
use crate::schema::{self, Definition, ValidationError, ValidationResult};

/// Common surface of every normative type
pub trait NormativeType {
    /// Type id carried by conforming structures, e.g. `epics:nt/NTScalar:1.0`
    const URI: &'static str;

    /// Reference shape and optional set, built on first use
    fn definition() -> &'static Definition;

    /// Returns true if the field is a structure whose type id names this
    /// type with the same major version.
    fn is_a(field: &Field) -> bool {
        properties::structure_id(field).map_or(false, |id| uri_matches(id, Self::URI))
    }

    /// Structural compatibility with the reference shape
    fn is_compatible(field: &Field) -> bool {
        schema::is_compatible(Self::definition(), field)
    }

    /// Structural validation plus a root `IncorrectId` error when the type
    /// id does not match.
    fn validate(field: &Field) -> ValidationResult {
        let mut result = schema::validate(Self::definition(), field);
        if !Self::is_a(field) {
            result.push(ValidationError::incorrect_id(""));
        }
        result
    }
}

/// Compares two type ids by namespace, name and major version.
///
/// `epics:nt/NTScalar:1.3` matches `epics:nt/NTScalar:1.0`; ids without a
/// version must match exactly.
pub fn uri_matches(id: &str, uri: &str) -> bool {
    strip_minor(id) == strip_minor(uri)
}

fn strip_minor(id: &str) -> &str {
    let Some(colon) = id.rfind(':') else {
        return id;
    };
    match id[colon..].find('.') {
        Some(dot) => &id[..colon + dot],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_matches_minor_versions() {
        assert!(uri_matches("epics:nt/NTScalar:1.0", "epics:nt/NTScalar:1.0"));
        assert!(uri_matches("epics:nt/NTScalar:1.3", "epics:nt/NTScalar:1.0"));
        assert!(uri_matches("epics:nt/NTScalar:1", "epics:nt/NTScalar:1.0"));
    }

    #[test]
    fn test_uri_mismatches() {
        assert!(!uri_matches("epics:nt/NTScalar:2.0", "epics:nt/NTScalar:1.0"));
        assert!(!uri_matches("epics:nt/NTScalarArray:1.0", "epics:nt/NTScalar:1.0"));
        assert!(!uri_matches("other:nt/NTScalar:1.0", "epics:nt/NTScalar:1.0"));
        assert!(!uri_matches("structure", "epics:nt/NTScalar:1.0"));
    }

    #[test]
    fn test_strip_minor() {
        assert_eq!(strip_minor("a:b/C:1.2"), "a:b/C:1");
        assert_eq!(strip_minor("structure"), "structure");
        assert_eq!(strip_minor("x.y"), "x.y");
    }
}
