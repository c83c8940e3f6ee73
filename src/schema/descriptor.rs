// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field descriptors and message schemas.
//!
//! A [`MessageSchema`] is the ordered descriptor table of one message type.
//! Message types build theirs once and hand out a `&'static` reference, so
//! the validator and the codec never discover structure at runtime: nesting
//! is driven entirely by [`FieldType::Message`] entries.

use std::fmt;

use super::constraint::{Constraint, PredicateFn};
use crate::core::RawValue;
use crate::defaults::DefaultKind;

/// Accessor for a nested message type's schema.
pub type SchemaFn = fn() -> &'static MessageSchema;

/// Semantic type of a field value.
pub enum FieldType {
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float (integers are widened)
    Float,
    /// UTF-8 string
    String,
    /// Opaque byte buffer
    Bytes,
    /// Any raw value, unchecked
    Any,
    /// Array whose elements all have the given type
    List(Box<FieldType>),
    /// String-keyed mapping whose values all have the given type
    Map(Box<FieldType>),
    /// Nested message
    Message(SchemaFn),
    /// Dense image-like array payload
    Image,
}

impl FieldType {
    /// Array of `elem`.
    pub fn list(elem: FieldType) -> Self {
        FieldType::List(Box::new(elem))
    }

    /// Mapping with `value` entries.
    pub fn map(value: FieldType) -> Self {
        FieldType::Map(Box::new(value))
    }

    /// Human-readable type name used in violations and schema listings.
    pub fn name(&self) -> String {
        match self {
            FieldType::Bool => "bool".to_string(),
            FieldType::Int => "int".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::String => "string".to_string(),
            FieldType::Bytes => "bytes".to_string(),
            FieldType::Any => "any".to_string(),
            FieldType::List(elem) => format!("list[{}]", elem.name()),
            FieldType::Map(value) => format!("mapping[{}]", value.name()),
            FieldType::Message(schema) => schema().name().to_string(),
            FieldType::Image => "image".to_string(),
        }
    }

    /// Nested schema, if this is a message type.
    pub fn nested_schema(&self) -> Option<&'static MessageSchema> {
        match self {
            FieldType::Message(schema) => Some(schema()),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldType({})", self.name())
    }
}

/// Value used when a field is absent from the input.
pub enum FieldDefault {
    /// A fixed value.
    Literal(RawValue),
    /// A value produced on every use.
    Factory(fn() -> RawValue),
    /// A shared instance from the default value cache.
    Shared(DefaultKind),
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Literal(value) => write!(f, "Literal({value})"),
            FieldDefault::Factory(_) => write!(f, "Factory"),
            FieldDefault::Shared(kind) => write!(f, "Shared({})", kind.as_str()),
        }
    }
}

/// Declaration of one message field.
#[derive(Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    field_type: FieldType,
    optional: bool,
    default: Option<FieldDefault>,
    constraints: Vec<Constraint>,
    description: Option<&'static str>,
}

impl FieldDescriptor {
    /// Declare a mandatory field with no default and no constraints.
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            optional: false,
            default: None,
            constraints: Vec::new(),
            description: None,
        }
    }

    /// Accept `null` and absence.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Use a fixed default value.
    pub fn default_value(mut self, value: impl Into<RawValue>) -> Self {
        self.default = Some(FieldDefault::Literal(value.into()));
        self
    }

    /// Use a default produced by `factory` each time it is needed.
    pub fn default_with(mut self, factory: fn() -> RawValue) -> Self {
        self.default = Some(FieldDefault::Factory(factory));
        self
    }

    /// Use the cached shared instance of `kind` as the default.
    pub fn shared_default(mut self, kind: DefaultKind) -> Self {
        self.default = Some(FieldDefault::Shared(kind));
        self
    }

    /// Attach a constraint.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Attach a pattern constraint.
    pub fn pattern(self, source: &'static str) -> Self {
        self.constraint(Constraint::pattern(source))
    }

    /// Attach a closed-interval range constraint.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.constraint(Constraint::range(min, max))
    }

    /// Attach a custom predicate.
    pub fn predicate(self, name: &'static str, check: PredicateFn) -> Self {
        self.constraint(Constraint::predicate(name, check))
    }

    /// Attach a description.
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn field_default(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    /// A field must be supplied when it has neither a default nor optionality.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }
}

/// Ordered descriptor table of one message type.
#[derive(Debug)]
pub struct MessageSchema {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    deny_unknown_fields: bool,
}

impl MessageSchema {
    /// Create an empty schema.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            deny_unknown_fields: false,
        }
    }

    /// Append a field. Field names must be unique within the schema.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        debug_assert!(
            self.get_field(descriptor.name()).is_none(),
            "duplicate field '{}' in {}",
            descriptor.name(),
            self.name
        );
        self.fields.push(descriptor);
        self
    }

    /// Report input keys the schema does not declare.
    pub fn deny_unknown_fields(mut self) -> Self {
        self.deny_unknown_fields = true;
        self
    }

    /// Type name of this schema.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn denies_unknown_fields(&self) -> bool {
        self.deny_unknown_fields
    }

    /// Resolve a dotted path through nested message fields.
    ///
    /// # Example
    ///
    /// ```
    /// use robomsg::messages::sensors::Imu;
    /// use robomsg::Message;
    ///
    /// let schema = Imu::schema();
    /// assert!(schema.resolve_path(&["header", "version"]).is_some());
    /// assert!(schema.resolve_path(&["header", "missing"]).is_none());
    /// ```
    pub fn resolve_path(&self, path: &[&str]) -> Option<&FieldDescriptor> {
        let (first, rest) = path.split_first()?;
        let field = self.get_field(first)?;
        if rest.is_empty() {
            return Some(field);
        }
        field.field_type().nested_schema()?.resolve_path(rest)
    }
}
