//! Field-tree model
//!
//! An immutable, self-describing shape: scalars, scalar arrays, structures,
//! structure arrays, unions and union arrays. Nodes are shared through
//! `FieldPtr` and carry a stable `FieldId` that the validator uses for
//! identity short-circuiting and caching.

mod builder;
mod errors;
mod types;

pub use builder::FieldBuilder;
pub use errors::{FieldError, FieldResult};
pub use types::{
    Field, FieldId, FieldKind, FieldPtr, Scalar, ScalarArray, ScalarType, Structure,
    StructureArray, Union, UnionArray,
};
