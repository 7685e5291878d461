//! Order-insensitive annotation matching
//!
//! Only presence of the required annotations is checked. Optional and
//! undeclared annotations never produce a violation.

use std::sync::Arc;

use ion_rs::element::Element;

use super::annotations::{Annotation, NAME};
use super::{Constraint, Violation, Violations};

/// Violation code for absent required annotations
pub const MISSING_CODE: &str = "missing_annotation";

/// Annotations that must be present in any order
#[derive(Debug)]
pub struct UnorderedAnnotations {
    declaration: Arc<Element>,
    annotations: Vec<Annotation>,
}

impl UnorderedAnnotations {
    /// Build the matcher for annotations already resolved from `declaration`
    pub fn new(declaration: Arc<Element>, annotations: Vec<Annotation>) -> Self {
        Self {
            declaration,
            annotations,
        }
    }

    /// Declared annotations, in declaration order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Declared annotations that must be present
    pub fn required(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.annotations.iter().filter(|a| a.is_required())
    }

    /// Required annotations absent from the value, in declaration order
    pub fn missing<'a>(&'a self, value: &Element) -> Vec<&'a str> {
        self.required()
            .filter(|a| !value.annotations().contains(a.text()))
            .map(Annotation::text)
            .collect()
    }

    /// The declaration this matcher was compiled from
    pub fn declaration(&self) -> &Element {
        &self.declaration
    }
}

impl Constraint for UnorderedAnnotations {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, value: &Element, violations: &mut Violations) {
        let missing = self.missing(value);
        if !missing.is_empty() {
            violations.add(Violation::new(
                NAME,
                Arc::clone(&self.declaration),
                MISSING_CODE,
                format!("missing annotation(s): {}", missing.join(", ")),
            ));
        }
    }
}
