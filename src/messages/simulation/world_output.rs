// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Commands sent from a robot back to the simulator.

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, ValidationError};
use crate::messages::actuators::DifferentialPwm;
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// One simulation step's actuator outputs. Every command is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldOutput {
    header: Arc<Header>,
    differential_pwm: Option<DifferentialPwm>,
    state_reset_flag: Option<bool>,
}

impl WorldOutput {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Wheel command, if the robot sent one.
    pub fn differential_pwm(&self) -> Option<&DifferentialPwm> {
        self.differential_pwm.as_ref()
    }

    /// Request to reset the simulated world.
    pub fn state_reset_flag(&self) -> Option<bool> {
        self.state_reset_flag
    }

    /// Check whether the robot asked for a reset.
    pub fn wants_reset(&self) -> bool {
        self.state_reset_flag.unwrap_or(false)
    }
}

impl Message for WorldOutput {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("simulation/WorldOutput")
                .field(header_field())
                .field(
                    FieldDescriptor::new(
                        "differential_pwm",
                        FieldType::Message(DifferentialPwm::schema),
                    )
                    .optional(),
                )
                .field(
                    FieldDescriptor::new("state_reset_flag", FieldType::Bool)
                        .optional()
                        .describe("Reset the simulated world before the next step"),
                )
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            differential_pwm: fields.take_opt_message("differential_pwm")?,
            state_reset_flag: fields.take_opt_bool("state_reset_flag")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "differential_pwm" => Some(FieldRef::optional(self.differential_pwm.as_ref())),
            "state_reset_flag" => Some(FieldRef::value(self.state_reset_flag)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RawMap, RawValue};
    use crate::defaults::DefaultCache;

    #[test]
    fn test_empty_output() {
        let cache = DefaultCache::new();
        let output = WorldOutput::from_raw_in(&RawMap::new(), &cache).unwrap();
        assert!(output.differential_pwm().is_none());
        assert!(!output.wants_reset());

        let raw = output.to_raw();
        assert_eq!(raw.get("differential_pwm"), Some(&RawValue::Null));
        assert_eq!(raw.get("state_reset_flag"), Some(&RawValue::Null));
    }

    #[test]
    fn test_nested_command_paths() {
        let cache = DefaultCache::new();
        let raw = RawMap::new()
            .with("differential_pwm", RawMap::new().with("right", 3.0))
            .with("state_reset_flag", 1);
        let err = WorldOutput::from_raw_in(&raw, &cache).unwrap_err();
        assert_eq!(err.paths(), vec!["differential_pwm.right", "state_reset_flag"]);
    }

    #[test]
    fn test_command_shares_default_header() {
        let cache = DefaultCache::new();
        let raw = RawMap::new()
            .with("differential_pwm", RawMap::new().with("left", 0.5))
            .with("state_reset_flag", false);
        let output = WorldOutput::from_raw_in(&raw, &cache).unwrap();
        let pwm = output.differential_pwm().unwrap();
        assert_eq!(pwm.left(), 0.5);
        assert!(Arc::ptr_eq(pwm.header(), output.header()));
        assert_eq!(output.state_reset_flag(), Some(false));
    }
}
