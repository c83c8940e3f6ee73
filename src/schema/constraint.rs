// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative field constraints.
//!
//! A constraint is checked after the value has passed its type check, so each
//! variant only inspects the value kinds it applies to and ignores the rest.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::{RawValue, Violation, ViolationKind};

/// Custom validation function: `Err(reason)` rejects the value.
pub type PredicateFn = fn(&RawValue) -> Result<(), String>;

/// Regex pattern compiled on first use and reused afterwards.
pub struct Pattern {
    source: &'static str,
    compiled: OnceLock<Result<Regex, String>>,
}

impl Pattern {
    /// Create a pattern from its source text.
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    /// Pattern source text.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Match `text` against the pattern.
    ///
    /// Returns `Err` with the compile error if the pattern is not a valid regex.
    pub fn is_match(&self, text: &str) -> Result<bool, String> {
        let compiled = self
            .compiled
            .get_or_init(|| Regex::new(self.source).map_err(|e| e.to_string()));
        match compiled {
            Ok(re) => Ok(re.is_match(text)),
            Err(e) => Err(e.clone()),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// A constraint attached to a field descriptor.
pub enum Constraint {
    /// String must match the pattern.
    Pattern(Pattern),

    /// Number must lie in the closed interval `[min, max]`.
    Range {
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Custom check on the value.
    Predicate {
        /// Short name shown in schema listings
        name: &'static str,
        /// The check itself
        check: PredicateFn,
    },
}

impl Constraint {
    /// Create a pattern constraint.
    pub const fn pattern(source: &'static str) -> Self {
        Constraint::Pattern(Pattern::new(source))
    }

    /// Create a closed-interval range constraint.
    pub const fn range(min: f64, max: f64) -> Self {
        Constraint::Range { min, max }
    }

    /// Create a custom predicate constraint.
    pub const fn predicate(name: &'static str, check: PredicateFn) -> Self {
        Constraint::Predicate { name, check }
    }

    /// Check `value`, returning a violation at `path` if it is rejected.
    ///
    /// `Null` values are never checked: absence is governed by the field's
    /// optionality, not by its constraints.
    pub fn check(&self, path: &str, value: &RawValue) -> Option<Violation> {
        if value.is_null() {
            return None;
        }
        match self {
            Constraint::Pattern(pattern) => {
                let text = value.as_str()?;
                match pattern.is_match(text) {
                    Ok(true) => None,
                    Ok(false) => Some(Violation::new(
                        path,
                        ViolationKind::PatternMismatch {
                            pattern: pattern.source().to_string(),
                        },
                    )),
                    Err(reason) => {
                        Some(Violation::new(path, ViolationKind::InvalidPattern(reason)))
                    }
                }
            }
            Constraint::Range { min, max } => {
                let number = value.as_f64()?;
                if number >= *min && number <= *max {
                    None
                } else {
                    Some(Violation::new(
                        path,
                        ViolationKind::OutOfRange {
                            min: *min,
                            max: *max,
                            value: number,
                        },
                    ))
                }
            }
            Constraint::Predicate { check, .. } => check(value)
                .err()
                .map(|reason| Violation::new(path, ViolationKind::Predicate(reason))),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Pattern(pattern) => write!(f, "pattern '{}'", pattern.source()),
            Constraint::Range { min, max } => write!(f, "range [{min}, {max}]"),
            Constraint::Predicate { name, .. } => write!(f, "predicate {name}"),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_empty(value: &RawValue) -> Result<(), String> {
        match value.as_str() {
            Some("") => Err("must not be empty".to_string()),
            _ => Ok(()),
        }
    }

    #[test]
    fn test_pattern_match() {
        let c = Constraint::pattern(r"^[0-9]+\.[0-9]+$");
        assert!(c.check("version", &RawValue::from("1.0")).is_none());
        let v = c.check("version", &RawValue::from("1")).unwrap();
        assert_eq!(v.path, "version");
        assert!(matches!(v.kind, ViolationKind::PatternMismatch { .. }));
    }

    #[test]
    fn test_pattern_ignores_non_strings() {
        let c = Constraint::pattern("^a$");
        assert!(c.check("f", &RawValue::Int(3)).is_none());
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let c = Constraint::pattern("([unclosed");
        let v = c.check("f", &RawValue::from("x")).unwrap();
        assert!(matches!(v.kind, ViolationKind::InvalidPattern(_)));
    }

    #[test]
    fn test_range_is_closed() {
        let c = Constraint::range(-1.0, 1.0);
        assert!(c.check("w", &RawValue::Float(-1.0)).is_none());
        assert!(c.check("w", &RawValue::Float(1.0)).is_none());
        assert!(c.check("w", &RawValue::Int(0)).is_none());
        assert!(c.check("w", &RawValue::Float(1.5)).is_some());
        assert!(c.check("w", &RawValue::Float(-1.5)).is_some());
    }

    #[test]
    fn test_range_rejects_nan() {
        let c = Constraint::range(-1.0, 1.0);
        assert!(c.check("w", &RawValue::Float(f64::NAN)).is_some());
    }

    #[test]
    fn test_null_is_never_checked() {
        let c = Constraint::range(0.0, 1.0);
        assert!(c.check("x", &RawValue::Null).is_none());
    }

    #[test]
    fn test_predicate() {
        let c = Constraint::predicate("non_empty", non_empty);
        assert!(c.check("data", &RawValue::from("x")).is_none());
        let v = c.check("data", &RawValue::from("")).unwrap();
        assert_eq!(v.kind, ViolationKind::Predicate("must not be empty".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Constraint::range(0.0, 1.5).to_string(), "range [0, 1.5]");
        assert_eq!(Constraint::pattern("^a$").to_string(), "pattern '^a$'");
        assert_eq!(
            Constraint::predicate("non_empty", non_empty).to_string(),
            "predicate non_empty"
        );
    }
}
