//! Standard embedded structures and their predicates

mod predicates;
mod shapes;

pub use predicates::{
    is_alarm, is_alarm_limit, is_control, is_display, is_enumerated, is_time_stamp,
};
pub use shapes::{
    alarm, alarm_array, alarm_limit, control, display, enumerated, enumerated_array, time_stamp,
    time_stamp_array,
};

pub(crate) use shapes::time_stamp_builder;
