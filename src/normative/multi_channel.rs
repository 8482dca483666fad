//! NTMultiChannel

use std::sync::OnceLock;

use crate::field::{FieldBuilder, FieldPtr, FieldResult, ScalarType, Union};
use crate::schema::Definition;

use super::properties::{self, Properties};
use super::NormativeType;

const OPTIONAL_PATHS: [&str; 10] = [
    "descriptor",
    "alarm",
    "timeStamp",
    "severity",
    "status",
    "message",
    "secondsPastEpoch",
    "nanoseconds",
    "userTag",
    "isConnected",
];

/// One union value per channel plus the channel names. Per-channel alarm,
/// timestamp and connection arrays are optional, as are descriptor, alarm
/// and timestamp for the aggregate.
#[derive(Debug, Clone, Copy)]
pub struct NtMultiChannel;

impl NtMultiChannel {
    pub fn builder() -> NtMultiChannelBuilder {
        NtMultiChannelBuilder::default()
    }
}

impl NormativeType for NtMultiChannel {
    const URI: &'static str = "epics:nt/NTMultiChannel:1.0";

    fn definition() -> &'static Definition {
        static DEFINITION: OnceLock<Definition> = OnceLock::new();
        DEFINITION.get_or_init(|| {
            properties::initialize(Self::URI, || {
                let reference = NtMultiChannelBuilder::default()
                    .add_descriptor()
                    .add_alarm()
                    .add_time_stamp()
                    .add_severity()
                    .add_status()
                    .add_message()
                    .add_seconds_past_epoch()
                    .add_nanoseconds()
                    .add_user_tag()
                    .add_is_connected()
                    .create_structure()?;
                properties::optional_definition(reference, &OPTIONAL_PATHS)
            })
        })
    }
}

/// Per-channel array members, in structure order
#[derive(Debug, Default, Clone, Copy)]
struct ChannelArrays {
    severity: bool,
    status: bool,
    message: bool,
    seconds_past_epoch: bool,
    nanoseconds: bool,
    user_tag: bool,
    is_connected: bool,
}

impl ChannelArrays {
    fn append(&self, mut builder: FieldBuilder) -> FieldBuilder {
        let members = [
            (self.severity, "severity", ScalarType::Int),
            (self.status, "status", ScalarType::Int),
            (self.message, "message", ScalarType::String),
            (self.seconds_past_epoch, "secondsPastEpoch", ScalarType::Long),
            (self.nanoseconds, "nanoseconds", ScalarType::Int),
            (self.user_tag, "userTag", ScalarType::Int),
            (self.is_connected, "isConnected", ScalarType::Boolean),
        ];
        for (enabled, name, element) in members {
            if enabled {
                builder = builder.add_array(name, element);
            }
        }
        builder
    }
}

#[derive(Debug, Clone, Default)]
pub struct NtMultiChannelBuilder {
    value: Option<Union>,
    properties: Properties,
    channels: ChannelArrays,
    extra: Vec<(String, FieldPtr)>,
}

impl NtMultiChannelBuilder {
    /// Element union of `value`; the default is the variant union
    pub fn value(mut self, value: Union) -> Self {
        self.value = Some(value);
        self
    }

    pub fn add_descriptor(mut self) -> Self {
        self.properties.descriptor = true;
        self
    }

    pub fn add_alarm(mut self) -> Self {
        self.properties.alarm = true;
        self
    }

    pub fn add_time_stamp(mut self) -> Self {
        self.properties.time_stamp = true;
        self
    }

    pub fn add_severity(mut self) -> Self {
        self.channels.severity = true;
        self
    }

    pub fn add_status(mut self) -> Self {
        self.channels.status = true;
        self
    }

    pub fn add_message(mut self) -> Self {
        self.channels.message = true;
        self
    }

    pub fn add_seconds_past_epoch(mut self) -> Self {
        self.channels.seconds_past_epoch = true;
        self
    }

    pub fn add_nanoseconds(mut self) -> Self {
        self.channels.nanoseconds = true;
        self
    }

    pub fn add_user_tag(mut self) -> Self {
        self.channels.user_tag = true;
        self
    }

    pub fn add_is_connected(mut self) -> Self {
        self.channels.is_connected = true;
        self
    }

    pub fn add(mut self, name: impl Into<String>, field: FieldPtr) -> Self {
        self.extra.push((name.into(), field));
        self
    }

    pub fn create_structure(&self) -> FieldResult<FieldPtr> {
        let value = self.value.clone().unwrap_or_else(Union::variant);
        let builder = FieldBuilder::new()
            .id(NtMultiChannel::URI)
            .add_union_array("value", &value)
            .add_array("channelName", ScalarType::String);
        let builder = self.properties.append(builder);
        let builder = self.channels.append(builder);
        properties::append_extra(builder, &self.extra).create_structure()
    }
}
