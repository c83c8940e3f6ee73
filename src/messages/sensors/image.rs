// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::sync::{Arc, OnceLock};

use crate::core::{FieldRef, Message, ValidationError};
use crate::encoding::ImageArray;
use crate::messages::standard::{header_field, Header};
use crate::schema::{FieldDescriptor, FieldType, MessageSchema};
use crate::validate::ValidatedFields;

/// Uncompressed camera frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    header: Arc<Header>,
    image: ImageArray,
}

impl Image {
    /// Message metadata.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Pixel payload.
    pub fn image(&self) -> &ImageArray {
        &self.image
    }
}

impl Message for Image {
    fn schema() -> &'static MessageSchema {
        static SCHEMA: OnceLock<MessageSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            MessageSchema::new("sensors/Image")
                .field(header_field())
                .field(FieldDescriptor::new("image", FieldType::Image).describe("Pixel data"))
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            header: fields.take_shared("header")?,
            image: fields.take_image("image")?,
        })
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "header" => Some(FieldRef::Message(self.header.as_ref())),
            "image" => Some(FieldRef::value(self.image.to_raw())),
            _ => None,
        }
    }
}
