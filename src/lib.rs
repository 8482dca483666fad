//! ntshape - structural compatibility checks for self-describing field trees
//!
//! A reference shape plus a set of optional members forms a [`schema::Definition`].
//! Candidates are compared against it by structure only: member names,
//! node kinds, array-ness and union alternative order. Candidates may carry
//! extra members. Scalar element types are never compared.
//!
//! - [`field`]: the field-tree model
//! - [`schema`]: validator, predicate cache, shape files and registry
//! - [`standard`]: standard embedded structures (alarm, timestamp, ...)
//! - [`normative`]: normative types built on the above
//! - [`cli`]: the `ntshape` binary

pub mod cli;
pub mod field;
pub mod normative;
pub mod observability;
pub mod schema;
pub mod standard;
