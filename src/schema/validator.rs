//! Structural compatibility validator
//!
//! Validation semantics:
//! - Identical nodes (same `FieldId`) are compatible without further descent
//! - Node kinds must match; array-ness is part of the kind
//! - Scalars match any scalar, scalar arrays any scalar array
//! - Structures are matched by name; extra candidate fields are ignored
//! - Reference fields in the definition's optional set may be absent
//! - Union alternatives are matched by position, then by name
//! - Structure and union arrays are compared through their element shapes
//!
//! The validator never mutates either tree and keeps no state between calls.

use crate::field::{Field, Structure, Union};
use crate::observability::Event;

use super::definition::Definition;
use super::result::{ErrorKind, ValidationError, ValidationResult};

/// Checks candidate shapes against one definition.
pub struct Validator<'a> {
    definition: &'a Definition,
}

impl<'a> Validator<'a> {
    /// Creates a validator for the given definition.
    pub fn new(definition: &'a Definition) -> Self {
        Self { definition }
    }

    /// Validates a candidate and returns every path-qualified error.
    pub fn validate(&self, candidate: &Field) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.validate_into(candidate, &mut result);
        result
    }

    /// Resets `result` and fills it with the errors for `candidate`.
    pub fn validate_into(&self, candidate: &Field, result: &mut ValidationResult) {
        result.reset();

        let reference = self.definition.reference();
        let ok = Walk::new(self.definition, Some(&mut *result)).field(reference, candidate);

        // Node-level mismatches are reported by the containing field. The
        // root has no container, so it is reported here.
        if !ok && result.is_empty() {
            result.push(ValidationError::incorrect_type(""));
        }

        if !result.is_valid() {
            tracing::debug!(
                event = %Event::ValidationFailed,
                reference = %reference.type_id(),
                errors = result.len(),
                "candidate is not compatible with reference shape"
            );
        }
    }

    /// Decides compatibility without collecting diagnostics.
    ///
    /// Always agrees with `validate(candidate).is_valid()`.
    pub fn is_compatible(&self, candidate: &Field) -> bool {
        Walk::new(self.definition, None).field(self.definition.reference(), candidate)
    }
}

/// Validates `candidate` against `definition`.
pub fn validate(definition: &Definition, candidate: &Field) -> ValidationResult {
    Validator::new(definition).validate(candidate)
}

/// Returns true if `candidate` is compatible with `definition`.
pub fn is_compatible(definition: &Definition, candidate: &Field) -> bool {
    Validator::new(definition).is_compatible(candidate)
}

/// One recursive descent over a reference/candidate pair.
///
/// Without a sink the walk stops at the first failure.
struct Walk<'a, 'r> {
    definition: &'a Definition,
    path: Vec<&'a str>,
    sink: Option<&'r mut ValidationResult>,
    visited: usize,
}

impl<'a, 'r> Walk<'a, 'r> {
    fn new(definition: &'a Definition, sink: Option<&'r mut ValidationResult>) -> Self {
        Self {
            definition,
            path: Vec::new(),
            sink,
            visited: 0,
        }
    }

    fn collecting(&self) -> bool {
        self.sink.is_some()
    }

    fn current_path(&self) -> String {
        self.path.join(".")
    }

    fn child_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.current_path(), name)
        }
    }

    /// Records an error at the current path, or at `name` below it.
    fn report(&mut self, kind: ErrorKind, name: Option<&str>) {
        if !self.collecting() {
            return;
        }
        let path = match name {
            Some(name) => self.child_path(name),
            None => self.current_path(),
        };
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.push(ValidationError::new(path, kind));
        }
    }

    fn report_mismatched_name(&mut self, ref_name: &str, name: &str) {
        if !self.collecting() {
            return;
        }
        let error = ValidationError::mismatched_name(self.child_path(ref_name), self.child_path(name));
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.push(error);
        }
    }

    /// Compares two nodes. A kind mismatch returns false without recording
    /// an error; the caller reports it at the node's path.
    fn field(&mut self, reference: &'a Field, candidate: &Field) -> bool {
        self.visited += 1;

        if reference.id() == candidate.id() {
            return true;
        }

        match (reference, candidate) {
            (Field::Scalar(_), Field::Scalar(_)) => true,
            (Field::ScalarArray(_), Field::ScalarArray(_)) => true,
            (Field::Structure(r), Field::Structure(c)) => self.structure(r, c),
            (Field::StructureArray(r), Field::StructureArray(c)) => {
                self.structure(r.element(), c.element())
            }
            (Field::Union(r), Field::Union(c)) => self.union(r, c),
            (Field::UnionArray(r), Field::UnionArray(c)) => self.union(r.element(), c.element()),
            _ => false,
        }
    }

    /// Descends into a named child, re-reporting any failure at its path.
    fn child(&mut self, name: &'a str, reference: &'a Field, candidate: &Field) -> bool {
        self.path.push(name);
        let ok = self.field(reference, candidate);
        if !ok {
            self.report(ErrorKind::IncorrectType, None);
        }
        self.path.pop();
        ok
    }

    fn structure(&mut self, reference: &'a Structure, candidate: &Structure) -> bool {
        if reference.id() == candidate.id() {
            return true;
        }

        let mut ok = true;
        for (name, ref_child) in reference.fields() {
            match candidate.field(name) {
                None if self.definition.is_optional(ref_child) => continue,
                None => {
                    self.report(ErrorKind::MissingField, Some(name));
                    ok = false;
                }
                Some(cand_child) => {
                    if !self.child(name, ref_child, cand_child) {
                        ok = false;
                    }
                }
            }

            if !ok && !self.collecting() {
                return false;
            }
        }

        ok
    }

    fn union(&mut self, reference: &'a Union, candidate: &Union) -> bool {
        if reference.id() == candidate.id() {
            return true;
        }

        // A variant accepts any union content.
        if reference.is_variant() {
            return true;
        }

        // Reported like a kind mismatch, by the container.
        if candidate.is_variant() {
            return false;
        }

        let mut ok = true;
        for ((ref_name, ref_alt), (cand_name, cand_alt)) in reference.fields().zip(candidate.fields()) {
            if ref_name != cand_name {
                self.report_mismatched_name(ref_name, cand_name);
                ok = false;
                if !self.collecting() {
                    return false;
                }
            }

            if !self.child(ref_name, ref_alt, cand_alt) {
                ok = false;
            }

            if !ok && !self.collecting() {
                return false;
            }
        }

        for (name, _) in reference.fields().skip(candidate.len()) {
            self.report(ErrorKind::MissingField, Some(name));
            ok = false;
            if !self.collecting() {
                return false;
            }
        }

        ok
    }
}

/// Validates and also returns the number of node pairs compared.
#[cfg(test)]
pub(crate) fn validate_counting(definition: &Definition, candidate: &Field) -> (ValidationResult, usize) {
    let mut result = ValidationResult::new();
    let mut walk = Walk::new(definition, Some(&mut result));
    walk.field(definition.reference(), candidate);
    let visited = walk.visited;
    (result, visited)
}
