//! Order-sensitive annotation matching
//!
//! The declared annotations compile into an [`Automaton`] over annotation
//! symbols. Every state loops on a wildcard, so undeclared annotations may
//! appear before, between and after the declared ones. Optional annotations
//! add an epsilon edge alongside their exact edge.

use std::sync::Arc;

use ion_rs::element::Element;
use ion_rs::Symbol;

use crate::automaton::{Automaton, AutomatonBuilder, Event};
use crate::error::Result;

use super::annotations::{Annotation, NAME};
use super::{Constraint, Violation, Violations};

/// Violation code for a sequence the automaton rejects
pub const MISMATCH_CODE: &str = "annotations_mismatch";

/// Annotations that must appear in declaration order
#[derive(Debug)]
pub struct OrderedAnnotations {
    declaration: Arc<Element>,
    annotations: Vec<Annotation>,
    automaton: Automaton<Symbol>,
}

impl OrderedAnnotations {
    /// Build the matcher for annotations already resolved from `declaration`
    pub fn new(declaration: Arc<Element>, annotations: Vec<Annotation>) -> Result<Self> {
        let automaton = Self::build_automaton(&annotations)?;
        Ok(Self {
            declaration,
            annotations,
            automaton,
        })
    }

    fn build_automaton(annotations: &[Annotation]) -> Result<Automaton<Symbol>> {
        let mut builder = AutomatonBuilder::new();
        let mut state = builder.initial_state();
        builder.add_transition(state, Event::Wildcard, state)?;

        if annotations.is_empty() {
            builder.set_final(state, true)?;
        }

        for (i, annotation) in annotations.iter().enumerate() {
            let next = builder.add_state(i == annotations.len() - 1);
            builder.add_transition(state, Event::Exact(Symbol::from(annotation.text())), next)?;
            if !annotation.is_required() {
                builder.add_transition(state, Event::Epsilon, next)?;
            }
            builder.add_transition(next, Event::Wildcard, next)?;
            state = next;
        }

        Ok(builder.build())
    }

    /// Declared annotations, in declaration order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The compiled automaton
    pub fn automaton(&self) -> &Automaton<Symbol> {
        &self.automaton
    }

    /// The declaration this matcher was compiled from
    pub fn declaration(&self) -> &Element {
        &self.declaration
    }
}

impl Constraint for OrderedAnnotations {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, value: &Element, violations: &mut Violations) {
        if !self.automaton.matches(value.annotations().iter()) {
            violations.add(Violation::new(
                NAME,
                Arc::clone(&self.declaration),
                MISMATCH_CODE,
                "annotations don't match expectations",
            ));
        }
    }
}
