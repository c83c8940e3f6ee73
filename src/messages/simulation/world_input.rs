// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sensor bundle fed from a simulator to a robot.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, ValidationError};
use crate::messages::sensors::{Image, Imu};
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// One simulation step's sensor inputs. Every sensor is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldInput {
    header: Arc<Header>,
    image: Option<Image>,
    imus: Option<BTreeMap<String, Imu>>,
    left_encoder_ticks: Option<i64>,
    right_encoder_ticks: Option<i64>,
}

impl WorldInput {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Camera frame, if one was rendered.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// IMU readings keyed by sensor name.
    pub fn imus(&self) -> Option<&BTreeMap<String, Imu>> {
        self.imus.as_ref()
    }

    /// IMU reading for one sensor.
    pub fn imu(&self, name: &str) -> Option<&Imu> {
        self.imus.as_ref()?.get(name)
    }

    /// Cumulative ticks of the left wheel encoder.
    pub fn left_encoder_ticks(&self) -> Option<i64> {
        self.left_encoder_ticks
    }

    /// Cumulative ticks of the right wheel encoder.
    pub fn right_encoder_ticks(&self) -> Option<i64> {
        self.right_encoder_ticks
    }
}

impl Message for WorldInput {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("simulation/WorldInput")
                .field(header_field())
                .field(FieldDescriptor::new("image", FieldType::Message(Image::schema)).optional())
                .field(
                    FieldDescriptor::new("imus", FieldType::map(FieldType::Message(Imu::schema)))
                        .optional()
                        .describe("IMU readings keyed by sensor name"),
                )
                .field(FieldDescriptor::new("left_encoder_ticks", FieldType::Int).optional())
                .field(FieldDescriptor::new("right_encoder_ticks", FieldType::Int).optional())
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            image: fields.take_opt_message("image")?,
            imus: fields.take_opt_message_map("imus")?,
            left_encoder_ticks: fields.take_opt_i64("left_encoder_ticks")?,
            right_encoder_ticks: fields.take_opt_i64("right_encoder_ticks")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "image" => Some(FieldRef::optional(self.image.as_ref())),
            "imus" => Some(FieldRef::map_of(self.imus.as_ref())),
            "left_encoder_ticks" => Some(FieldRef::value(self.left_encoder_ticks)),
            "right_encoder_ticks" => Some(FieldRef::value(self.right_encoder_ticks)),
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
    fn test_empty_input() {
        let cache = DefaultCache::new();
        let input = WorldInput::from_raw_in(&RawMap::new(), &cache).unwrap();
        assert!(input.image().is_none());
        assert!(input.imus().is_none());

        let raw = input.to_raw();
        assert_eq!(raw.get("image"), Some(&RawValue::Null));
        assert_eq!(raw.get("imus"), Some(&RawValue::Null));
    }

    #[test]
    fn test_imu_map_paths() {
        let cache = DefaultCache::new();
        let imus = RawMap::new()
            .with("front", RawMap::new())
            .with("left", RawMap::new().with("orientation", RawMap::new().with("w", -2.0)));
        let raw = RawMap::new().with("imus", imus).with("left_encoder_ticks", 1.0);
        let err = WorldInput::from_raw_in(&raw, &cache).unwrap_err();
        assert_eq!(err.paths(), vec!["imus.left.orientation.w", "left_encoder_ticks"]);
    }

    #[test]
    fn test_nested_headers_share_default() {
        let cache = DefaultCache::new();
        let imus = RawMap::new().with("a", RawMap::new()).with("b", RawMap::new());
        let input = WorldInput::from_raw_in(&RawMap::new().with("imus", imus), &cache).unwrap();
        let a = input.imu("a").unwrap();
        let b = input.imu("b").unwrap();
        assert!(Arc::ptr_eq(a.header(), b.header()));
        assert!(Arc::ptr_eq(a.header(), input.header()));
        assert_eq!(cache.builds(), 1);
    }
}
