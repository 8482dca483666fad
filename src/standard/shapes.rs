//! Standard embedded structures
//!
//! Each shape is built once per process and shared afterwards, so every
//! normative type that embeds e.g. an alarm holds the same alarm node.

use std::sync::{Arc, OnceLock};

use crate::field::{Field, FieldBuilder, FieldPtr, ScalarType, StructureArray};

fn shared(cell: &'static OnceLock<FieldPtr>, build: fn() -> FieldBuilder) -> FieldPtr {
    Arc::clone(cell.get_or_init(|| {
        build()
            .create_structure()
            .expect("standard shapes have unique member names")
    }))
}

fn array_of(cell: &'static OnceLock<FieldPtr>, element: FieldPtr) -> FieldPtr {
    Arc::clone(cell.get_or_init(|| match element.as_ref() {
        Field::Structure(s) => Arc::new(Field::StructureArray(StructureArray::new(s.clone()))),
        _ => unreachable!("standard array elements are structures"),
    }))
}

/// `alarm_t`: severity, status, message
pub fn alarm() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    shared(&CELL, || {
        FieldBuilder::new()
            .id("alarm_t")
            .add("severity", ScalarType::Int)
            .add("status", ScalarType::Int)
            .add("message", ScalarType::String)
    })
}

/// `time_t`: secondsPastEpoch, nanoseconds, userTag
pub fn time_stamp() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    shared(&CELL, time_stamp_builder)
}

/// Members of `time_t`, for places that need a node of their own
pub(crate) fn time_stamp_builder() -> FieldBuilder {
    FieldBuilder::new()
        .id("time_t")
        .add("secondsPastEpoch", ScalarType::Long)
        .add("nanoseconds", ScalarType::Int)
        .add("userTag", ScalarType::Int)
}

/// `display_t`: limits, description, format and units
pub fn display() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    shared(&CELL, || {
        FieldBuilder::new()
            .id("display_t")
            .add("limitLow", ScalarType::Double)
            .add("limitHigh", ScalarType::Double)
            .add("description", ScalarType::String)
            .add("format", ScalarType::String)
            .add("units", ScalarType::String)
    })
}

/// `control_t`: limits and minimum step
pub fn control() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    shared(&CELL, || {
        FieldBuilder::new()
            .id("control_t")
            .add("limitLow", ScalarType::Double)
            .add("limitHigh", ScalarType::Double)
            .add("minStep", ScalarType::Double)
    })
}

/// `enum_t`: selected index and the list of choices
pub fn enumerated() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    shared(&CELL, || {
        FieldBuilder::new()
            .id("enum_t")
            .add("index", ScalarType::Int)
            .add_array("choices", ScalarType::String)
    })
}

/// `valueAlarm_t`: alarm and warning limits with their severities
pub fn alarm_limit() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    shared(&CELL, || {
        FieldBuilder::new()
            .id("valueAlarm_t")
            .add("active", ScalarType::Boolean)
            .add("lowAlarmLimit", ScalarType::Double)
            .add("lowWarningLimit", ScalarType::Double)
            .add("highWarningLimit", ScalarType::Double)
            .add("highAlarmLimit", ScalarType::Double)
            .add("lowAlarmSeverity", ScalarType::Int)
            .add("lowWarningSeverity", ScalarType::Int)
            .add("highWarningSeverity", ScalarType::Int)
            .add("highAlarmSeverity", ScalarType::Int)
            .add("hysteresis", ScalarType::Byte)
    })
}

pub fn alarm_array() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    array_of(&CELL, alarm())
}

pub fn time_stamp_array() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    array_of(&CELL, time_stamp())
}

pub fn enumerated_array() -> FieldPtr {
    static CELL: OnceLock<FieldPtr> = OnceLock::new();
    array_of(&CELL, enumerated())
}
