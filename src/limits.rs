//! Limits for constraint compilation and Ion reading
//!
//! Constraint declarations come from schema authors, so reading and
//! automaton construction both bound how much work one declaration can cost.

use crate::error::{Error, Result};

/// Global limits configuration
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum Ion input size in bytes
    pub max_text_size: usize,

    /// Maximum number of annotations in one `annotations` declaration
    pub max_declared_annotations: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_text_size: 10 * 1024 * 1024, // 10 MB
            max_declared_annotations: 1000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_text_size: 1024 * 1024, // 1 MB
            max_declared_annotations: 100,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_text_size: 1024 * 1024 * 1024, // 1 GB
            max_declared_annotations: 100_000,
        }
    }

    /// Check if Ion input size is within limits
    pub fn check_text_size(&self, size: usize) -> Result<()> {
        if size > self.max_text_size {
            Err(Error::LimitExceeded(format!(
                "text size {} bytes exceeds maximum {} bytes",
                size, self.max_text_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of declared annotations is within limits
    pub fn check_declared_annotations(&self, count: usize) -> Result<()> {
        if count > self.max_declared_annotations {
            Err(Error::LimitExceeded(format!(
                "declared annotation count {} exceeds maximum {}",
                count, self.max_declared_annotations
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_declared_annotations, 1000);
        assert!(limits.check_declared_annotations(500).is_ok());
        assert!(limits.check_declared_annotations(1500).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_text_size < Limits::default().max_text_size);
        assert!(limits.check_declared_annotations(101).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.max_text_size > Limits::default().max_text_size);
        assert!(limits.check_declared_annotations(5000).is_ok());
    }

    #[test]
    fn test_check_text_size() {
        let limits = Limits::default();
        assert!(limits.check_text_size(1024).is_ok());
        assert!(matches!(
            limits.check_text_size(20 * 1024 * 1024),
            Err(Error::LimitExceeded(_))
        ));
    }
}
