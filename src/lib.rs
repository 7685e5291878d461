//! # ionschema
//!
//! The Ion Schema `annotations` constraint, and the automaton it is built on.
//!
//! ## Features
//!
//! - Generic NFA with exact, wildcard and epsilon transitions
//! - Unordered matching: required annotations must be present
//! - Ordered matching: declared annotations must appear in order, with open
//!   content allowed anywhere and optional annotations skippable
//! - Declarations and values read as `ion-rs` [`Element`]s, with input limits
//!
//! ## Example
//!
//! ```rust
//! use ionschema::constraints::{Annotations, Constraint, Violations};
//! use ionschema::documents::read_value;
//!
//! let declaration = read_value("required::ordered::[a, optional::b, c]")?;
//! let constraint = Annotations::new(&declaration)?;
//!
//! let mut violations = Violations::new();
//! constraint.validate(&read_value("x::a::c::5")?, &mut violations);
//! assert!(violations.is_valid());
//!
//! constraint.validate(&read_value("c::a::5")?, &mut violations);
//! assert_eq!(violations.len(), 1);
//! # Ok::<(), ionschema::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Input
pub mod documents;

// Matching
pub mod automaton;
pub mod constraints;

// Re-exports for convenience
pub use constraints::{Annotations, Constraint, Violation, Violations};
pub use error::{Error, Result};
pub use ion_rs::element::Element;
pub use ion_rs::IonType;

/// Version of the ionschema library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
