// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, ValidationError};
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Battery voltage and presence.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryState {
    header: Arc<Header>,
    voltage: f64,
    present: bool,
}

impl BatteryState {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Voltage in volts.
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Whether a battery is connected.
    pub fn present(&self) -> bool {
        self.present
    }
}

impl Message for BatteryState {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("sensors/BatteryState")
                .field(header_field())
                .field(FieldDescriptor::new("voltage", FieldType::Float))
                .field(FieldDescriptor::new("present", FieldType::Bool))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            voltage: fields.take_f64("voltage")?,
            present: fields.take_bool("present")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "voltage" => Some(FieldRef::value(self.voltage)),
            "present" => Some(FieldRef::value(self.present)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawMap;

    #[test]
    fn test_present_must_be_bool() {
        let raw = RawMap::new().with("voltage", 11.1).with("present", 1);
        let err = BatteryState::from_raw(&raw).unwrap_err();
        assert_eq!(err.violations()[0].to_string(), "present: expected bool, found int");
    }
}
