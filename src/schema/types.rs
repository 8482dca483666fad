//! Shape file definitions
//!
//! A shape file names one reference shape and marks which of its members a
//! candidate may omit:
//!
//! ```json
//! {
//!   "name": "scalar_record",
//!   "shape": {
//!     "type": "structure",
//!     "id": "epics:nt/NTScalar:1.0",
//!     "fields": [
//!       { "name": "value", "type": "scalar", "scalar_type": "double" },
//!       { "name": "alarm", "type": "structure", "optional": true, "fields": [] }
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::field::{
    Field, FieldError, FieldPtr, FieldResult, Scalar, ScalarArray, ScalarType, Structure,
    StructureArray, Union, UnionArray,
};

use super::definition::Definition;
use super::errors::{ShapeError, ShapeResult};

/// Serialized form of a field node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldSpec {
    Scalar {
        scalar_type: ScalarType,
    },
    ScalarArray {
        scalar_type: ScalarType,
    },
    Structure {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default)]
        fields: Vec<MemberSpec>,
    },
    StructureArray {
        /// Must describe a `structure`
        element: Box<FieldSpec>,
    },
    Union {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default)]
        fields: Vec<MemberSpec>,
        #[serde(default, skip_serializing_if = "is_false")]
        variant: bool,
    },
    UnionArray {
        /// Must describe a `union`
        element: Box<FieldSpec>,
    },
}

/// A named member of a structure or union
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    /// Whether a candidate may omit this member
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(flatten)]
    pub field: FieldSpec,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FieldSpec {
    /// Builds the field tree. Nodes of members marked optional are appended
    /// to `optional`.
    pub fn build(&self, optional: &mut Vec<FieldPtr>) -> FieldResult<FieldPtr> {
        self.build_at("", optional)
    }

    fn build_at(&self, path: &str, optional: &mut Vec<FieldPtr>) -> FieldResult<FieldPtr> {
        let field = match self {
            FieldSpec::Scalar { scalar_type } => Field::Scalar(Scalar::new(*scalar_type)),
            FieldSpec::ScalarArray { scalar_type } => {
                Field::ScalarArray(ScalarArray::new(*scalar_type))
            }
            FieldSpec::Structure { id, fields } => {
                Field::Structure(build_structure(id, fields, path, optional)?)
            }
            FieldSpec::StructureArray { element } => match element.as_ref() {
                FieldSpec::Structure { id, fields } => Field::StructureArray(StructureArray::new(
                    build_structure(id, fields, path, optional)?,
                )),
                _ => return Err(FieldError::NotAStructure(path.to_string())),
            },
            FieldSpec::Union {
                id,
                fields,
                variant,
            } => Field::Union(build_union(id, fields, *variant, path, optional)?),
            FieldSpec::UnionArray { element } => match element.as_ref() {
                FieldSpec::Union {
                    id,
                    fields,
                    variant,
                } => Field::UnionArray(UnionArray::new(build_union(
                    id, fields, *variant, path, optional,
                )?)),
                _ => return Err(FieldError::NotAUnion(path.to_string())),
            },
        };

        Ok(Arc::new(field))
    }

    /// Describes an existing field tree, taking optional markers from
    /// `definition`.
    pub fn from_field(field: &Field, definition: &Definition) -> Self {
        match field {
            Field::Scalar(s) => FieldSpec::Scalar {
                scalar_type: s.scalar_type(),
            },
            Field::ScalarArray(s) => FieldSpec::ScalarArray {
                scalar_type: s.element_type(),
            },
            Field::Structure(s) => structure_spec(s, definition),
            Field::StructureArray(sa) => FieldSpec::StructureArray {
                element: Box::new(structure_spec(sa.element(), definition)),
            },
            Field::Union(u) => union_spec(u, definition),
            Field::UnionArray(ua) => FieldSpec::UnionArray {
                element: Box::new(union_spec(ua.element(), definition)),
            },
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn build_members(
    members: &[MemberSpec],
    path: &str,
    optional: &mut Vec<FieldPtr>,
) -> FieldResult<Vec<(String, FieldPtr)>> {
    members
        .iter()
        .map(|member| {
            let node = member.field.build_at(&join(path, &member.name), optional)?;
            if member.optional {
                optional.push(Arc::clone(&node));
            }
            Ok((member.name.clone(), node))
        })
        .collect()
}

fn build_structure(
    id: &Option<String>,
    members: &[MemberSpec],
    path: &str,
    optional: &mut Vec<FieldPtr>,
) -> FieldResult<Structure> {
    Structure::new(id.clone(), build_members(members, path, optional)?)
}

fn build_union(
    id: &Option<String>,
    members: &[MemberSpec],
    variant: bool,
    path: &str,
    optional: &mut Vec<FieldPtr>,
) -> FieldResult<Union> {
    if variant {
        if !members.is_empty() {
            return Err(FieldError::VariantWithAlternatives(path.to_string()));
        }
        return Ok(Union::variant());
    }
    Union::new(id.clone(), build_members(members, path, optional)?)
}

fn member_specs<'a>(
    fields: impl Iterator<Item = (&'a str, &'a FieldPtr)>,
    definition: &Definition,
) -> Vec<MemberSpec> {
    fields
        .map(|(name, field)| MemberSpec {
            name: name.to_string(),
            optional: definition.is_optional(field),
            field: FieldSpec::from_field(field, definition),
        })
        .collect()
}

fn structure_spec(s: &Structure, definition: &Definition) -> FieldSpec {
    FieldSpec::Structure {
        id: s.custom_id().map(str::to_string),
        fields: member_specs(s.fields(), definition),
    }
}

fn union_spec(u: &Union, definition: &Definition) -> FieldSpec {
    FieldSpec::Union {
        id: u.custom_id().map(str::to_string),
        fields: member_specs(u.fields(), definition),
        variant: u.is_variant(),
    }
}

/// A named reference shape as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeFile {
    /// Unique shape name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub shape: FieldSpec,
}

impl ShapeFile {
    pub fn new(name: impl Into<String>, shape: FieldSpec) -> Self {
        Self {
            name: name.into(),
            description: None,
            shape,
        }
    }

    /// Describes a definition under the given name
    pub fn from_definition(name: impl Into<String>, definition: &Definition) -> Self {
        Self::new(name, FieldSpec::from_field(definition.reference(), definition))
    }

    /// Checks the file-level rules: the name is non-empty and usable as a
    /// file name component.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Shape name must not be empty".into());
        }

        let valid = self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(format!(
                "Shape name '{}' may only contain ASCII letters, digits, '_', '-' and '.'",
                self.name
            ));
        }

        Ok(())
    }

    /// Builds the definition described by this file
    pub fn to_definition(&self) -> ShapeResult<Definition> {
        self.validate_structure()
            .map_err(|e| ShapeError::malformed_shape(&self.name, e))?;

        let mut optional = Vec::new();
        let reference = self
            .shape
            .build(&mut optional)
            .map_err(|e| ShapeError::invalid_field(&self.name, e))?;

        let mut definition = Definition::new(reference);
        for node in &optional {
            definition.mark_optional(node);
        }
        Ok(definition)
    }
}
