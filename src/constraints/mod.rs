//! Schema constraints
//!
//! A constraint is compiled once from its declaration and then validates any
//! number of candidate values, appending [`Violation`]s to a caller-supplied
//! [`Violations`] collector. Compiled constraints are immutable and can be
//! shared across threads.

pub mod annotations;
pub mod ordered;
pub mod unordered;

use std::fmt;
use std::sync::Arc;

use ion_rs::element::Element;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

pub use annotations::{Annotation, Annotations, AnnotationsMatcher};
pub use ordered::OrderedAnnotations;
pub use unordered::UnorderedAnnotations;

/// A compiled schema constraint
pub trait Constraint: fmt::Debug + Send + Sync {
    /// Name of the constraint, as written in the schema
    fn name(&self) -> &str;

    /// Validate a value, appending any violations
    fn validate(&self, value: &Element, violations: &mut Violations);
}

/// Compile the constraint declared as `name: declaration`
///
/// Only constraints implemented in this crate are recognised; anything else
/// is reported as a schema error so the caller can dispatch it elsewhere.
pub fn compile(name: &str, declaration: &Element) -> Result<Box<dyn Constraint>> {
    match name {
        annotations::NAME => Ok(Box::new(Annotations::new(declaration)?)),
        _ => Err(Error::invalid_schema(format!("unknown constraint '{}'", name))),
    }
}

/// A value failed a constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Name of the constraint that was violated
    pub name: String,
    /// Declaration of the constraint that was violated, serialized as Ion text
    #[serde(serialize_with = "serialize_as_text")]
    pub constraint: Arc<Element>,
    /// Machine-readable kind, e.g. `missing_annotation`
    pub code: String,
    /// Human-readable explanation
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(
        name: impl Into<String>,
        constraint: Arc<Element>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            constraint,
            code: code.into(),
            message: message.into(),
        }
    }
}

fn serialize_as_text<S: Serializer>(
    value: &Arc<Element>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value.as_ref())
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (constraint {}: {})",
            self.code, self.message, self.name, self.constraint
        )
    }
}

/// Collector for the violations found while validating one value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if no violations were recorded
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Check if the collector is empty
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterate over the violations in the order they were recorded
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Take the violations out of the collector
    pub fn into_vec(self) -> Vec<Violation> {
        self.violations
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("valid");
        }

        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}
