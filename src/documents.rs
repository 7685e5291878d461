//! Ion document reading
//!
//! Constraint declarations and candidate values are read into
//! [`Element`]s by `ion-rs`, text or binary. These helpers add the input-size
//! limit before handing the data over.

use ion_rs::element::Element;

use crate::error::Result;
use crate::limits::Limits;

/// Read exactly one Ion value
pub fn read_value(data: &str) -> Result<Element> {
    read_value_with_limits(data, &Limits::default())
}

/// Read exactly one Ion value, with explicit limits
pub fn read_value_with_limits(data: &str, limits: &Limits) -> Result<Element> {
    limits.check_text_size(data.len())?;
    Ok(Element::read_one(data)?)
}

/// Read a stream of top-level Ion values
pub fn read_values(data: &str) -> Result<Vec<Element>> {
    read_values_with_limits(data, &Limits::default())
}

/// Read a stream of top-level Ion values, with explicit limits
pub fn read_values_with_limits(data: &str, limits: &Limits) -> Result<Vec<Element>> {
    limits.check_text_size(data.len())?;
    Ok(Element::read_all(data)?.into_iter().collect())
}
