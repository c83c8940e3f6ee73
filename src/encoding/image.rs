// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dense image-like array payloads.
//!
//! An [`ImageArray`] is a `height x width x channels` grid of fixed-width
//! unsigned samples stored row-major in one little-endian byte buffer. Its raw
//! form is a mapping:
//!
//! ```text
//! { height: int, width: int, channels: int, dtype: "uint8" | "uint16", data: bytes }
//! ```
//!
//! Every constructor checks that the buffer length matches the shape, so a
//! decoded array always has the same shape and samples as the encoded one.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{RawMap, RawValue, ValidationError, Violation, ViolationKind};

/// Sample type of an [`ImageArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 8-bit unsigned (color images)
    UInt8,
    /// 16-bit unsigned, little-endian (depth images)
    UInt16,
}

impl ElementType {
    /// Size of one sample in bytes.
    pub fn size(&self) -> usize {
        match self {
            ElementType::UInt8 => 1,
            ElementType::UInt16 => 2,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::UInt8 => "uint8",
            ElementType::UInt16 => "uint16",
        }
    }

    /// Parse a dtype name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "uint8" => Some(ElementType::UInt8),
            "uint16" => Some(ElementType::UInt16),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape-checked dense image payload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageArray {
    height: usize,
    width: usize,
    channels: usize,
    element: ElementType,
    data: Vec<u8>,
}

const TYPE_NAME: &str = "ImageArray";

impl ImageArray {
    /// Create an array from its raw little-endian buffer.
    ///
    /// # Errors
    ///
    /// Fails if any dimension is zero or the buffer length is not
    /// `height * width * channels * element.size()`.
    pub fn from_bytes(
        height: usize,
        width: usize,
        channels: usize,
        element: ElementType,
        data: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        check_shape(height, width, channels, element, data.len(), &mut violations);
        if !violations.is_empty() {
            return Err(ValidationError::new(TYPE_NAME, violations));
        }
        Ok(Self {
            height,
            width,
            channels,
            element,
            data,
        })
    }

    /// Create an 8-bit array.
    pub fn from_u8(height: usize, width: usize, channels: usize, data: Vec<u8>) -> Result<Self, ValidationError> {
        Self::from_bytes(height, width, channels, ElementType::UInt8, data)
    }

    /// Create a 16-bit array from native samples.
    pub fn from_u16(
        height: usize,
        width: usize,
        channels: usize,
        samples: &[u16],
    ) -> Result<Self, ValidationError> {
        let mut data = vec![0u8; samples.len() * 2];
        LittleEndian::write_u16_into(samples, &mut data);
        Self::from_bytes(height, width, channels, ElementType::UInt16, data)
    }

    /// Create an array with every sample set to zero.
    pub fn zeros(height: usize, width: usize, channels: usize, element: ElementType) -> Result<Self, ValidationError> {
        // Unrepresentable shapes get an empty buffer and fail the shape check.
        let data = match byte_len(height, width, channels, element) {
            Some(len) => vec![0u8; len],
            None => Vec::new(),
        };
        Self::from_bytes(height, width, channels, element, data)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample type.
    pub fn element(&self) -> ElementType {
        self.element
    }

    /// `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    /// Number of samples.
    pub fn sample_count(&self) -> usize {
        self.height * self.width * self.channels
    }

    /// Raw little-endian buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Decode the buffer as 16-bit samples. `None` for 8-bit arrays.
    pub fn samples_u16(&self) -> Option<Vec<u16>> {
        match self.element {
            ElementType::UInt16 => {
                let mut samples = vec![0u16; self.sample_count()];
                LittleEndian::read_u16_into(&self.data, &mut samples);
                Some(samples)
            }
            ElementType::UInt8 => None,
        }
    }

    /// Read one sample, widened to `u16`.
    pub fn sample(&self, row: usize, col: usize, channel: usize) -> Option<u16> {
        if row >= self.height || col >= self.width || channel >= self.channels {
            return None;
        }
        let index = (row * self.width + col) * self.channels + channel;
        match self.element {
            ElementType::UInt8 => self.data.get(index).map(|&b| u16::from(b)),
            ElementType::UInt16 => {
                let start = index * 2;
                self.data.get(start..start + 2).map(LittleEndian::read_u16)
            }
        }
    }

    /// Encode to the raw mapping form.
    pub fn to_raw(&self) -> RawValue {
        RawValue::Map(
            RawMap::with_capacity(5)
                .with("height", self.height as i64)
                .with("width", self.width as i64)
                .with("channels", self.channels as i64)
                .with("dtype", self.element.as_str())
                .with("data", self.data.clone()),
        )
    }

    /// Decode from the raw mapping form.
    ///
    /// Violation paths are relative to the image value (`height`, `data`, or
    /// empty for the value itself); the validator roots them at the field.
    pub fn from_raw(value: &RawValue) -> Result<Self, Vec<Violation>> {
        let Some(map) = value.as_map() else {
            return Err(vec![Violation::type_mismatch("", "image", value.type_name())]);
        };

        let mut violations = Vec::new();
        let height = dimension(map, "height", &mut violations);
        let width = dimension(map, "width", &mut violations);
        let channels = dimension(map, "channels", &mut violations);

        let element = match map.get("dtype") {
            Some(RawValue::String(name)) => match ElementType::parse(name) {
                Some(element) => Some(element),
                None => {
                    violations.push(Violation::new(
                        "dtype",
                        ViolationKind::InvalidShape(format!("unknown dtype '{name}'")),
                    ));
                    None
                }
            },
            Some(other) => {
                violations.push(Violation::type_mismatch("dtype", "string", other.type_name()));
                None
            }
            None => {
                violations.push(Violation::missing("dtype"));
                None
            }
        };

        let data = match map.get("data") {
            Some(RawValue::Bytes(data)) => Some(data),
            Some(other) => {
                violations.push(Violation::type_mismatch("data", "bytes", other.type_name()));
                None
            }
            None => {
                violations.push(Violation::missing("data"));
                None
            }
        };

        match (height, width, channels, element, data) {
            (Some(h), Some(w), Some(c), Some(e), Some(data)) if violations.is_empty() => {
                check_shape(h, w, c, e, data.len(), &mut violations);
                if violations.is_empty() {
                    return Ok(Self {
                        height: h,
                        width: w,
                        channels: c,
                        element: e,
                        data: data.clone(),
                    });
                }
                Err(violations)
            }
            _ => Err(violations),
        }
    }
}

impl fmt::Debug for ImageArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageArray")
            .field("shape", &self.shape())
            .field("element", &self.element)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn dimension(map: &RawMap, key: &str, violations: &mut Vec<Violation>) -> Option<usize> {
    match map.get(key) {
        Some(RawValue::Int(n)) if *n > 0 => usize::try_from(*n).ok(),
        Some(RawValue::Int(n)) => {
            violations.push(Violation::new(
                key,
                ViolationKind::InvalidShape(format!("{key} must be positive, got {n}")),
            ));
            None
        }
        Some(other) => {
            violations.push(Violation::type_mismatch(key, "int", other.type_name()));
            None
        }
        None => {
            violations.push(Violation::missing(key));
            None
        }
    }
}

/// Buffer size for a shape, or `None` if no allocation can hold it.
fn byte_len(height: usize, width: usize, channels: usize, element: ElementType) -> Option<usize> {
    height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(channels))
        .and_then(|n| n.checked_mul(element.size()))
        .filter(|&n| n <= isize::MAX as usize)
}

fn check_shape(
    height: usize,
    width: usize,
    channels: usize,
    element: ElementType,
    len: usize,
    violations: &mut Vec<Violation>,
) {
    for (name, value) in [("height", height), ("width", width), ("channels", channels)] {
        if value == 0 {
            violations.push(Violation::new(
                name,
                ViolationKind::InvalidShape(format!("{name} must be positive, got 0")),
            ));
        }
    }
    if !violations.is_empty() {
        return;
    }

    match byte_len(height, width, channels, element) {
        Some(expected) if expected == len => {}
        Some(expected) => violations.push(Violation::new(
            "data",
            ViolationKind::InvalidShape(format!(
                "expected {expected} bytes for {height}x{width}x{channels} {element}, found {len}"
            )),
        )),
        None => violations.push(Violation::new(
            "data",
            ViolationKind::InvalidShape("shape overflows the address space".to_string()),
        )),
    }
}
