//! Structural schema compatibility
//!
//! A `Definition` pairs a reference field tree with the reference-side nodes
//! a candidate may omit. The validator walks a definition and a candidate in
//! lock-step and reports path-qualified errors.
//!
//! # Design Principles
//!
//! - Pure: neither tree is mutated, no state survives a call
//! - Deterministic: equal inputs give equal error lists in equal order
//! - Candidates may be wider (extra structure fields, trailing union alternatives)
//! - Candidates may not be narrower, reordered (unions) or kind-mismatched
//! - Mismatches are data, never panics or `Err`s

mod cache;
mod definition;
mod errors;
mod loader;
mod result;
mod types;
mod validator;

pub(crate) use cache::cached_predicate;

pub use cache::{CacheStats, PredicateCache};
pub use definition::Definition;
pub use errors::{Severity, ShapeError, ShapeErrorCode, ShapeResult};
pub use loader::ShapeRegistry;
pub use result::{ErrorKind, ValidationError, ValidationResult, ROOT_PATH};
pub use types::{FieldSpec, MemberSpec, ShapeFile};
pub use validator::{is_compatible, validate, Validator};
