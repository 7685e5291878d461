//! The `annotations` constraint
//!
//! ```text
//! annotations: [a, b]                      // a and b must both be present
//! annotations: [a, optional::b]            // only a is required
//! annotations: optional::[a, required::b]  // list default is optional
//! annotations: ordered::[a, optional::b]   // a, then b if present
//! ```
//!
//! Without `ordered`, annotations are checked for presence only and in any
//! order. With `ordered`, the value's annotations must contain the declared
//! ones in order, with any other annotations allowed around and between them.

use std::sync::Arc;

use ion_rs::element::Element;
use ion_rs::IonType;
use tracing::debug;

use crate::error::{Error, Result};
use crate::limits::Limits;

use super::ordered::OrderedAnnotations;
use super::unordered::UnorderedAnnotations;
use super::{Constraint, Violations};

/// Constraint name as written in a schema
pub const NAME: &str = "annotations";

/// Marker selecting required-by-default (on the list) or required (on an element)
pub const REQUIRED: &str = "required";

/// Marker making an element optional
pub const OPTIONAL: &str = "optional";

/// Marker selecting order-sensitive matching
pub const ORDERED: &str = "ordered";

/// One declared annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    text: String,
    is_required: bool,
}

impl Annotation {
    /// Resolve a declared list element against the list's default
    ///
    /// An element's own `required` marker wins over `optional`, and either
    /// wins over the default.
    pub fn new(element: &Element, required_by_default: bool) -> Result<Self> {
        let text = match element.as_symbol().and_then(|symbol| symbol.text()) {
            Some(text) => text.to_string(),
            None => {
                return Err(Error::invalid_schema(format!(
                    "Expected annotation as a symbol, found: {}",
                    element
                )))
            }
        };

        let is_required = if element.annotations().contains(REQUIRED) {
            true
        } else if element.annotations().contains(OPTIONAL) {
            false
        } else {
            required_by_default
        };

        Ok(Self { text, is_required })
    }

    /// The annotation symbol
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the annotation must be present
    pub fn is_required(&self) -> bool {
        self.is_required
    }
}

/// Matching strategy selected by the declaration
#[derive(Debug)]
pub enum AnnotationsMatcher {
    /// Declared with `ordered`
    Ordered(OrderedAnnotations),
    /// Declared without `ordered`
    Unordered(UnorderedAnnotations),
}

/// Compiled `annotations` constraint
#[derive(Debug)]
pub struct Annotations {
    matcher: AnnotationsMatcher,
}

impl Annotations {
    /// Compile a declaration with default limits
    pub fn new(declaration: &Element) -> Result<Self> {
        Self::with_limits(declaration, &Limits::default())
    }

    /// Compile a declaration
    pub fn with_limits(declaration: &Element, limits: &Limits) -> Result<Self> {
        // `as_sequence` also accepts s-expressions; null lists yield `None`
        let elements = match declaration.as_sequence() {
            Some(elements) if declaration.ion_type() == IonType::List => elements,
            _ => {
                return Err(Error::invalid_schema(format!(
                    "Expected annotations as a list, found: {}",
                    declaration
                )))
            }
        };
        limits.check_declared_annotations(elements.len())?;

        let required_by_default = declaration.annotations().contains(REQUIRED);
        let annotations = elements
            .elements()
            .map(|element| Annotation::new(element, required_by_default))
            .collect::<Result<Vec<_>>>()?;

        let declaration = Arc::new(declaration.clone());
        let matcher = if declaration.annotations().contains(ORDERED) {
            let ordered = OrderedAnnotations::new(declaration, annotations)?;
            debug!(
                annotations = ordered.annotations().len(),
                states = ordered.automaton().state_count(),
                transitions = ordered.automaton().transition_count(),
                "compiled ordered annotations constraint"
            );
            AnnotationsMatcher::Ordered(ordered)
        } else {
            let unordered = UnorderedAnnotations::new(declaration, annotations);
            debug!(
                annotations = unordered.annotations().len(),
                required = unordered.required().count(),
                "compiled unordered annotations constraint"
            );
            AnnotationsMatcher::Unordered(unordered)
        };

        Ok(Self { matcher })
    }

    /// The selected strategy
    pub fn matcher(&self) -> &AnnotationsMatcher {
        &self.matcher
    }

    /// Check if the constraint is order-sensitive
    pub fn is_ordered(&self) -> bool {
        matches!(self.matcher, AnnotationsMatcher::Ordered(_))
    }

    /// Declared annotations, in declaration order
    pub fn annotations(&self) -> &[Annotation] {
        match &self.matcher {
            AnnotationsMatcher::Ordered(m) => m.annotations(),
            AnnotationsMatcher::Unordered(m) => m.annotations(),
        }
    }

    /// The declaration this constraint was compiled from
    pub fn declaration(&self) -> &Element {
        match &self.matcher {
            AnnotationsMatcher::Ordered(m) => m.declaration(),
            AnnotationsMatcher::Unordered(m) => m.declaration(),
        }
    }
}

impl Constraint for Annotations {
    fn name(&self) -> &str {
        match &self.matcher {
            AnnotationsMatcher::Ordered(m) => m.name(),
            AnnotationsMatcher::Unordered(m) => m.name(),
        }
    }

    fn validate(&self, value: &Element, violations: &mut Violations) {
        match &self.matcher {
            AnnotationsMatcher::Ordered(m) => m.validate(value, violations),
            AnnotationsMatcher::Unordered(m) => m.validate(value, violations),
        }
    }
}
