//! Identity-keyed predicate cache
//!
//! Embedded micro-shapes (alarm, timestamp, display, ...) are re-checked on
//! every compatibility check of every composite type that carries them. A
//! `PredicateCache` remembers the outcome for the last node it saw and
//! answers repeated checks of that exact node without walking it again.
//!
//! Only identity is trusted: a structurally equal node with a different
//! `FieldId` is always re-validated.
//!
//! The cache is a single mutable cell and is not `Sync`. Keep one per
//! execution context, normally through `cached_predicate!`, which places it
//! in a `thread_local!`.

use std::cell::RefCell;

use crate::field::{Field, FieldId};
use crate::observability::Event;

use super::definition::Definition;
use super::result::ValidationResult;
use super::validator::Validator;

/// Hit/miss counters of one cache slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Slot {
    /// Reference root and candidate the stored result was computed for
    key: Option<(FieldId, FieldId)>,
    result: ValidationResult,
    stats: CacheStats,
}

/// One `(node identity, result)` slot for a named check.
#[derive(Debug)]
pub struct PredicateCache {
    name: &'static str,
    slot: RefCell<Slot>,
}

impl PredicateCache {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RefCell::new(Slot::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns whether `field` is compatible with `definition`, reusing the
    /// stored outcome when `field` is the node checked last time.
    pub fn check(&self, definition: &Definition, field: &Field) -> bool {
        let key = (definition.reference().id(), field.id());
        let mut guard = self.slot.borrow_mut();
        let slot = &mut *guard;

        if slot.key == Some(key) {
            slot.stats.hits += 1;
            return slot.result.is_valid();
        }

        Validator::new(definition).validate_into(field, &mut slot.result);
        slot.key = Some(key);
        slot.stats.misses += 1;

        tracing::trace!(
            event = %Event::PredicateCacheMiss,
            check = self.name,
            field = %field.id(),
            valid = slot.result.is_valid(),
            "predicate cache miss"
        );

        slot.result.is_valid()
    }

    /// Returns a copy of the stored result, if any
    pub fn last_result(&self) -> Option<ValidationResult> {
        let slot = self.slot.borrow();
        slot.key.map(|_| slot.result.clone())
    }

    pub fn stats(&self) -> CacheStats {
        self.slot.borrow().stats
    }

    /// Forgets the stored node and result
    pub fn clear(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.key = None;
        slot.result.reset();
    }
}

/// Declares a predicate backed by a thread-local `PredicateCache`.
///
/// ```ignore
/// cached_predicate! {
///     /// Is this field an alarm_t?
///     pub fn is_alarm => "alarm", alarm_definition();
/// }
/// ```
macro_rules! cached_predicate {
    ($(#[$meta:meta])* $vis:vis fn $name:ident => $check:literal, $definition:expr;) => {
        $(#[$meta])*
        $vis fn $name(field: &$crate::field::Field) -> bool {
            ::std::thread_local! {
                static CACHE: $crate::schema::PredicateCache =
                    $crate::schema::PredicateCache::new($check);
            }
            CACHE.with(|cache| cache.check($definition, field))
        }
    };
}

pub(crate) use cached_predicate;
