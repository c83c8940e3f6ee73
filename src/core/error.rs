// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robomsg.
//!
//! Provides two layers:
//! - [`ValidationError`] - every field violation found while building a message
//! - [`MessageError`] - interchange, configuration and I/O failures, wrapping
//!   validation failures

use std::fmt;

use thiserror::Error;

/// Reason a single field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// A mandatory field with no default was not supplied.
    Missing,

    /// The value has the wrong type.
    TypeMismatch {
        /// Declared type
        expected: String,
        /// Type of the supplied value
        found: String,
    },

    /// A string did not match the declared pattern.
    PatternMismatch {
        /// Pattern source text
        pattern: String,
    },

    /// A number fell outside the declared closed interval.
    OutOfRange {
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
        /// Offending value
        value: f64,
    },

    /// A float is NaN or infinite.
    NonFinite,

    /// A custom predicate rejected the value.
    Predicate(String),

    /// An array payload has an inconsistent shape.
    InvalidShape(String),

    /// The input carries a key the schema does not declare.
    UnknownField,

    /// The declared pattern itself does not compile.
    InvalidPattern(String),
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Missing => write!(f, "field required"),
            ViolationKind::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ViolationKind::PatternMismatch { pattern } => {
                write!(f, "string does not match pattern '{pattern}'")
            }
            ViolationKind::OutOfRange { min, max, value } => {
                write!(f, "value {value} outside of [{min}, {max}]")
            }
            ViolationKind::NonFinite => write!(f, "float must be finite"),
            ViolationKind::Predicate(reason) => write!(f, "{reason}"),
            ViolationKind::InvalidShape(reason) => write!(f, "invalid shape: {reason}"),
            ViolationKind::UnknownField => write!(f, "unexpected field"),
            ViolationKind::InvalidPattern(reason) => write!(f, "invalid pattern: {reason}"),
        }
    }
}

/// One rejected field, addressed by its dotted path.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Dotted field path (e.g., "lvl2.lvl3.some_dict")
    pub path: String,
    /// What went wrong
    pub kind: ViolationKind,
}

impl Violation {
    /// Create a violation at `path`.
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Create a type mismatch violation.
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            ViolationKind::TypeMismatch {
                expected: expected.into(),
                found: found.into(),
            },
        )
    }

    /// Create a missing field violation.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, ViolationKind::Missing)
    }

    /// Re-root this violation under an outer field name.
    pub fn nested_under(mut self, outer: &str) -> Self {
        self.path = join_path(outer, &self.path);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Join an outer path and an inner segment with a dot.
pub fn join_path(outer: &str, inner: &str) -> String {
    match (outer.is_empty(), inner.is_empty()) {
        (true, _) => inner.to_string(),
        (_, true) => outer.to_string(),
        _ => format!("{outer}.{inner}"),
    }
}

/// Every violation found while validating one message.
///
/// Never empty: a validation pass that finds nothing wrong produces a message,
/// not an error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation error(s) for {type_name}: {}", .violations.len(), summary(.violations))]
pub struct ValidationError {
    type_name: String,
    violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Create an error for `type_name` from a non-empty violation list.
    pub fn new(type_name: impl Into<String>, violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty(), "validation error without violations");
        Self {
            type_name: type_name.into(),
            violations,
        }
    }

    /// Create an error with a single violation.
    pub fn single(type_name: impl Into<String>, violation: Violation) -> Self {
        Self::new(type_name, vec![violation])
    }

    /// Name of the message type that failed to build.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// All violations in field declaration order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the error, returning its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Check whether any violation is reported at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    /// All reported paths, in order.
    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("type", self.type_name.clone()),
            ("count", self.violations.len().to_string()),
        ];
        fields.extend(
            self.violations
                .iter()
                .map(|v| ("violation", v.to_string())),
        );
        fields
    }
}

/// Errors outside field validation: interchange text, configuration, I/O.
#[derive(Debug, Error)]
pub enum MessageError {
    /// A message failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Interchange text could not be parsed or produced.
    #[error("Parse error in {context}: {message}")]
    Parse {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// A message type name is not registered.
    #[error("Type not found: '{type_name}'")]
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error while reading documents or configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl MessageError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        MessageError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        MessageError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        MessageError::Config(message.into())
    }

    /// Get the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            MessageError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            MessageError::Validation(err) => err.log_fields(),
            MessageError::Parse { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            MessageError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            MessageError::Config(msg) => vec![("config", msg.clone())],
            MessageError::Io(err) => vec![("io", err.to_string())],
            MessageError::Other(msg) => vec![("error", msg.clone())],
        }
    }
}

/// Result type for robomsg operations outside the validation pass.
pub type Result<T> = std::result::Result<T, MessageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = Violation::type_mismatch("lvl2.lvl3.some_dict", "mapping", "int");
        assert_eq!(v.to_string(), "lvl2.lvl3.some_dict: expected mapping, found int");
    }

    #[test]
    fn test_nested_under() {
        let v = Violation::missing("some_dict").nested_under("lvl3").nested_under("lvl2");
        assert_eq!(v.path, "lvl2.lvl3.some_dict");
    }

    #[test]
    fn test_join_path_empty_segments() {
        assert_eq!(join_path("", "version"), "version");
        assert_eq!(join_path("header", ""), "header");
        assert_eq!(join_path("header", "version"), "header.version");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(
            "Header",
            vec![
                Violation::missing("version"),
                Violation::type_mismatch("frame", "string", "int"),
            ],
        );
        assert_eq!(
            err.to_string(),
            "2 validation error(s) for Header: version: field required; frame: expected string, found int"
        );
        assert_eq!(err.paths(), vec!["version", "frame"]);
        assert!(err.has_path("frame"));
        assert!(!err.has_path("txt"));
    }

    #[test]
    fn test_out_of_range_display() {
        let kind = ViolationKind::OutOfRange {
            min: -1.0,
            max: 1.0,
            value: 1.5,
        };
        assert_eq!(kind.to_string(), "value 1.5 outside of [-1, 1]");
    }

    #[test]
    fn test_validation_log_fields() {
        let err = ValidationError::single("Header", Violation::missing("version"));
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("type", "Header".to_string()));
        assert_eq!(fields[1], ("count", "1".to_string()));
        assert_eq!(fields[2], ("violation", "version: field required".to_string()));
    }

    #[test]
    fn test_message_error_parse() {
        let err = MessageError::parse("json", "unexpected end of input");
        assert!(matches!(err, MessageError::Parse { .. }));
        assert_eq!(err.to_string(), "Parse error in json: unexpected end of input");
        assert!(err.as_validation().is_none());
    }

    #[test]
    fn test_message_error_from_validation() {
        let inner = ValidationError::single("Header", Violation::missing("version"));
        let err: MessageError = inner.clone().into();
        assert_eq!(err.as_validation(), Some(&inner));
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_type_not_found() {
        let err = MessageError::type_not_found("Unknown");
        assert_eq!(err.to_string(), "Type not found: 'Unknown'");
        assert_eq!(err.log_fields(), vec![("type", "Unknown".to_string())]);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MessageError = io_err.into();
        assert!(matches!(err, MessageError::Io(_)));
        assert_eq!(err.to_string(), "IO error: file not found");
    }
}
