//! Cached shape predicates for the standard structures
//!
//! `is_alarm(field)` is `is_compatible(alarm definition, field)`, answered
//! from a thread-local slot when `field` is the node checked last time on
//! this thread.

use std::sync::OnceLock;

use crate::field::FieldPtr;
use crate::schema::{cached_predicate, Definition};

use super::shapes;

fn definition(cell: &'static OnceLock<Definition>, shape: fn() -> FieldPtr) -> &'static Definition {
    cell.get_or_init(|| Definition::new(shape()))
}

fn enumerated_definition() -> &'static Definition {
    static CELL: OnceLock<Definition> = OnceLock::new();
    definition(&CELL, shapes::enumerated)
}

fn time_stamp_definition() -> &'static Definition {
    static CELL: OnceLock<Definition> = OnceLock::new();
    definition(&CELL, shapes::time_stamp)
}

fn alarm_definition() -> &'static Definition {
    static CELL: OnceLock<Definition> = OnceLock::new();
    definition(&CELL, shapes::alarm)
}

fn display_definition() -> &'static Definition {
    static CELL: OnceLock<Definition> = OnceLock::new();
    definition(&CELL, shapes::display)
}

fn alarm_limit_definition() -> &'static Definition {
    static CELL: OnceLock<Definition> = OnceLock::new();
    definition(&CELL, shapes::alarm_limit)
}

fn control_definition() -> &'static Definition {
    static CELL: OnceLock<Definition> = OnceLock::new();
    definition(&CELL, shapes::control)
}

cached_predicate! {
    /// Is this field an `enum_t` (index plus choices)?
    pub fn is_enumerated => "enumerated", enumerated_definition();
}

cached_predicate! {
    /// Is this field a `time_t`?
    pub fn is_time_stamp => "time_stamp", time_stamp_definition();
}

cached_predicate! {
    /// Is this field an `alarm_t`?
    pub fn is_alarm => "alarm", alarm_definition();
}

cached_predicate! {
    /// Is this field a `display_t`?
    pub fn is_display => "display", display_definition();
}

cached_predicate! {
    /// Is this field a `valueAlarm_t`?
    pub fn is_alarm_limit => "alarm_limit", alarm_limit_definition();
}

cached_predicate! {
    /// Is this field a `control_t`?
    pub fn is_control => "control", control_definition();
}
