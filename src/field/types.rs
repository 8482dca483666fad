//! Field-tree node types
//!
//! Supported node kinds:
//! - scalar: a single value of a `ScalarType`
//! - scalar_array: an array of one `ScalarType`
//! - structure: named, ordered children
//! - structure_array: homogeneous array of one structure shape
//! - union: named, ordered alternatives, or the variant wildcard
//! - union_array: homogeneous array of one union shape
//!
//! Every node carries a `FieldId`. Ids are handed out once at construction
//! and survive cloning, so two nodes with the same id are the same node.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::errors::{FieldError, FieldResult};

/// Shared pointer to an immutable field node
pub type FieldPtr = Arc<Field>;

/// Element type of scalars and scalar arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    UByte,
    UShort,
    UInt,
    ULong,
    Float,
    Double,
    String,
}

impl ScalarType {
    /// All scalar types in declaration order
    pub const ALL: [ScalarType; 12] = [
        ScalarType::Boolean,
        ScalarType::Byte,
        ScalarType::Short,
        ScalarType::Int,
        ScalarType::Long,
        ScalarType::UByte,
        ScalarType::UShort,
        ScalarType::UInt,
        ScalarType::ULong,
        ScalarType::Float,
        ScalarType::Double,
        ScalarType::String,
    ];

    /// Returns the type name used in type ids
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Byte => "byte",
            ScalarType::Short => "short",
            ScalarType::Int => "int",
            ScalarType::Long => "long",
            ScalarType::UByte => "ubyte",
            ScalarType::UShort => "ushort",
            ScalarType::UInt => "uint",
            ScalarType::ULong => "ulong",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::String => "string",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The closed set of node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Scalar,
    ScalarArray,
    Structure,
    StructureArray,
    Union,
    UnionArray,
}

impl FieldKind {
    /// Returns the kind name for diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::ScalarArray => "scalar_array",
            FieldKind::Structure => "structure",
            FieldKind::StructureArray => "structure_array",
            FieldKind::Union => "union",
            FieldKind::UnionArray => "union_array",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity handle of a field node.
///
/// Same handle means same node, and therefore an identical validation
/// outcome against any definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(u64);

impl FieldId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        FieldId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in a field tree
#[derive(Debug, Clone)]
pub enum Field {
    Scalar(Scalar),
    ScalarArray(ScalarArray),
    Structure(Structure),
    StructureArray(StructureArray),
    Union(Union),
    UnionArray(UnionArray),
}

impl Field {
    /// Creates a scalar node
    pub fn scalar(scalar_type: ScalarType) -> FieldPtr {
        Arc::new(Field::Scalar(Scalar::new(scalar_type)))
    }

    /// Creates a scalar array node
    pub fn scalar_array(scalar_type: ScalarType) -> FieldPtr {
        Arc::new(Field::ScalarArray(ScalarArray::new(scalar_type)))
    }

    /// Creates a variant union node
    pub fn variant_union() -> FieldPtr {
        Arc::new(Field::Union(Union::variant()))
    }

    /// Returns the identity handle of this node
    pub fn id(&self) -> FieldId {
        match self {
            Field::Scalar(s) => s.id,
            Field::ScalarArray(s) => s.id,
            Field::Structure(s) => s.id,
            Field::StructureArray(s) => s.id,
            Field::Union(u) => u.id,
            Field::UnionArray(u) => u.id,
        }
    }

    /// Returns the node kind
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Scalar(_) => FieldKind::Scalar,
            Field::ScalarArray(_) => FieldKind::ScalarArray,
            Field::Structure(_) => FieldKind::Structure,
            Field::StructureArray(_) => FieldKind::StructureArray,
            Field::Union(_) => FieldKind::Union,
            Field::UnionArray(_) => FieldKind::UnionArray,
        }
    }

    /// Returns the type identifier of this node
    pub fn type_id(&self) -> String {
        match self {
            Field::Scalar(s) => s.scalar_type.name().to_string(),
            Field::ScalarArray(s) => format!("{}[]", s.element_type.name()),
            Field::Structure(s) => s.type_id().to_string(),
            Field::StructureArray(s) => format!("{}[]", s.element.type_id()),
            Field::Union(u) => u.type_id().to_string(),
            Field::UnionArray(u) => format!("{}[]", u.element.type_id()),
        }
    }

    /// Returns the structure if this node is one
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Field::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the union if this node is one
    pub fn as_union(&self) -> Option<&Union> {
        match self {
            Field::Union(u) => Some(u),
            _ => None,
        }
    }
}

/// Scalar node
#[derive(Debug, Clone)]
pub struct Scalar {
    id: FieldId,
    scalar_type: ScalarType,
}

impl Scalar {
    pub fn new(scalar_type: ScalarType) -> Self {
        Self {
            id: FieldId::next(),
            scalar_type,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }
}

/// Scalar array node
#[derive(Debug, Clone)]
pub struct ScalarArray {
    id: FieldId,
    element_type: ScalarType,
}

impl ScalarArray {
    pub fn new(element_type: ScalarType) -> Self {
        Self {
            id: FieldId::next(),
            element_type,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn element_type(&self) -> ScalarType {
        self.element_type
    }
}

/// Named, ordered children shared by structures and unions
#[derive(Debug, Clone, Default)]
struct Members {
    names: Vec<String>,
    fields: Vec<FieldPtr>,
}

impl Members {
    fn new(members: Vec<(String, FieldPtr)>) -> FieldResult<Self> {
        let mut seen = HashSet::with_capacity(members.len());
        let mut names = Vec::with_capacity(members.len());
        let mut fields = Vec::with_capacity(members.len());

        for (name, field) in members {
            if name.is_empty() {
                return Err(FieldError::EmptyName);
            }
            if !seen.insert(name.clone()) {
                return Err(FieldError::DuplicateField(name));
            }
            names.push(name);
            fields.push(field);
        }

        Ok(Self { names, fields })
    }

    fn get(&self, name: &str) -> Option<&FieldPtr> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.fields[i])
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &FieldPtr)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.fields.iter())
    }
}

/// Structure node: children are addressed by name
#[derive(Debug, Clone)]
pub struct Structure {
    id: FieldId,
    type_id: Option<String>,
    members: Members,
}

impl Structure {
    /// Default type id of structures without a custom one
    pub const DEFAULT_ID: &'static str = "structure";

    /// Creates a structure from ordered `(name, field)` pairs.
    ///
    /// Names must be unique and non-empty.
    pub fn new(type_id: Option<String>, members: Vec<(String, FieldPtr)>) -> FieldResult<Self> {
        Ok(Self {
            id: FieldId::next(),
            type_id,
            members: Members::new(members)?,
        })
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Returns the custom type id, or `"structure"`
    pub fn type_id(&self) -> &str {
        self.type_id.as_deref().unwrap_or(Self::DEFAULT_ID)
    }

    /// Returns the custom type id if one was set
    pub fn custom_id(&self) -> Option<&str> {
        self.type_id.as_deref()
    }

    /// Looks up a direct child by name
    pub fn field(&self, name: &str) -> Option<&FieldPtr> {
        self.members.get(name)
    }

    /// Returns true if a direct child with this name exists
    pub fn has_field(&self, name: &str) -> bool {
        self.members.get(name).is_some()
    }

    pub fn field_names(&self) -> &[String] {
        &self.members.names
    }

    /// Iterates children in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldPtr)> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.names.is_empty()
    }

    /// Resolves a dotted path such as `attribute.alarm`.
    ///
    /// Structure arrays are traversed through their element structure.
    pub fn field_at(&self, path: &str) -> FieldResult<&FieldPtr> {
        let mut current = self;
        let mut segments = path.split('.').peekable();
        let mut walked = String::new();

        while let Some(segment) = segments.next() {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let child = current
                .field(segment)
                .ok_or_else(|| FieldError::FieldNotFound(walked.clone()))?;

            if segments.peek().is_none() {
                return Ok(child);
            }

            current = match child.as_ref() {
                Field::Structure(s) => s,
                Field::StructureArray(sa) => sa.element(),
                _ => return Err(FieldError::NotAStructure(walked)),
            };
        }

        Err(FieldError::FieldNotFound(path.to_string()))
    }
}

/// Structure array node
#[derive(Debug, Clone)]
pub struct StructureArray {
    id: FieldId,
    element: Structure,
}

impl StructureArray {
    pub fn new(element: Structure) -> Self {
        Self {
            id: FieldId::next(),
            element,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn element(&self) -> &Structure {
        &self.element
    }
}

/// Union node: alternatives are positional
#[derive(Debug, Clone)]
pub struct Union {
    id: FieldId,
    type_id: Option<String>,
    members: Members,
    variant: bool,
}

impl Union {
    /// Default type id of unions without a custom one
    pub const DEFAULT_ID: &'static str = "union";
    /// Type id of the variant union
    pub const ANY_ID: &'static str = "any";

    /// Creates a union from ordered `(name, field)` alternatives
    pub fn new(type_id: Option<String>, members: Vec<(String, FieldPtr)>) -> FieldResult<Self> {
        Ok(Self {
            id: FieldId::next(),
            type_id,
            members: Members::new(members)?,
            variant: false,
        })
    }

    /// Creates the variant union, which accepts any value
    pub fn variant() -> Self {
        Self {
            id: FieldId::next(),
            type_id: None,
            members: Members::default(),
            variant: true,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn is_variant(&self) -> bool {
        self.variant
    }

    pub fn type_id(&self) -> &str {
        match (&self.type_id, self.variant) {
            (Some(id), _) => id,
            (None, true) => Self::ANY_ID,
            (None, false) => Self::DEFAULT_ID,
        }
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.type_id.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&FieldPtr> {
        self.members.get(name)
    }

    pub fn field_names(&self) -> &[String] {
        &self.members.names
    }

    /// Alternative at a position
    pub fn field_at_index(&self, index: usize) -> Option<(&str, &FieldPtr)> {
        self.members
            .names
            .get(index)
            .map(|n| (n.as_str(), &self.members.fields[index]))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldPtr)> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.names.is_empty()
    }
}

/// Union array node
#[derive(Debug, Clone)]
pub struct UnionArray {
    id: FieldId,
    element: Union,
}

impl UnionArray {
    pub fn new(element: Union) -> Self {
        Self {
            id: FieldId::next(),
            element,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn element(&self) -> &Union {
        &self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Structure {
        Structure::new(
            Some("point_t".into()),
            vec![
                ("x".into(), Field::scalar(ScalarType::Double)),
                ("y".into(), Field::scalar(ScalarType::Double)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Field::scalar(ScalarType::Int);
        let b = Field::scalar(ScalarType::Int);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_clone_keeps_identity() {
        let s = point();
        let copy = s.clone();
        assert_eq!(s.id(), copy.id());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Structure::new(
            None,
            vec![
                ("a".into(), Field::scalar(ScalarType::Int)),
                ("a".into(), Field::scalar(ScalarType::Int)),
            ],
        );
        assert_eq!(result.unwrap_err(), FieldError::DuplicateField("a".into()));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Union::new(None, vec![("".into(), Field::scalar(ScalarType::Int))]);
        assert_eq!(result.unwrap_err(), FieldError::EmptyName);
    }

    #[test]
    fn test_type_ids() {
        assert_eq!(Field::scalar(ScalarType::Double).type_id(), "double");
        assert_eq!(Field::scalar_array(ScalarType::String).type_id(), "string[]");
        assert_eq!(Field::variant_union().type_id(), "any");

        let sa = Field::StructureArray(StructureArray::new(point()));
        assert_eq!(sa.type_id(), "point_t[]");

        let plain = Structure::new(None, vec![]).unwrap();
        assert_eq!(plain.type_id(), "structure");
    }

    #[test]
    fn test_field_lookup_preserves_order() {
        let s = point();
        assert_eq!(s.field_names(), &["x".to_string(), "y".to_string()]);
        assert!(s.has_field("y"));
        assert!(s.field("z").is_none());
    }

    #[test]
    fn test_field_at_traverses_arrays() {
        let outer = Structure::new(
            None,
            vec![(
                "points".into(),
                Arc::new(Field::StructureArray(StructureArray::new(point()))),
            )],
        )
        .unwrap();

        let y = outer.field_at("points.y").unwrap();
        assert_eq!(y.kind(), FieldKind::Scalar);

        assert_eq!(
            outer.field_at("points.z").unwrap_err(),
            FieldError::FieldNotFound("points.z".into())
        );
        assert_eq!(
            outer.field_at("points.x.w").unwrap_err(),
            FieldError::NotAStructure("points.x".into())
        );
    }

    #[test]
    fn test_union_positions() {
        let u = Union::new(
            None,
            vec![
                ("a".into(), Field::scalar(ScalarType::Int)),
                ("b".into(), Field::scalar(ScalarType::String)),
            ],
        )
        .unwrap();
        assert_eq!(u.field_at_index(1).map(|(n, _)| n), Some("b"));
        assert!(u.field_at_index(2).is_none());
        assert!(!u.is_variant());
        assert!(Union::variant().is_variant());
    }
}
