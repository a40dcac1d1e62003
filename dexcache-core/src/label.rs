//! Label type for identifying stores and transports.
//!
//! `StoreLabel` is a newtype wrapper around `SmolStr` used in tracing fields
//! and metric labels so that several caches in one process can be told
//! apart.

use smol_str::SmolStr;
use std::fmt;

/// A label identifying a store or transport.
///
/// # Example
/// ```
/// use dexcache_core::StoreLabel;
///
/// let label = StoreLabel::new("moka");
/// assert_eq!(label.to_string(), "moka");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StoreLabel(SmolStr);

impl StoreLabel {
    /// Creates a new label.
    #[inline]
    pub fn new(s: impl Into<SmolStr>) -> Self {
        Self(s.into())
    }

    /// Creates a label from a static string (no allocation).
    #[inline]
    pub const fn new_static(s: &'static str) -> Self {
        Self(SmolStr::new_static(s))
    }

    /// Returns the label as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for StoreLabel {
    fn from(s: &'static str) -> Self {
        Self::new_static(s)
    }
}

impl From<String> for StoreLabel {
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let label = StoreLabel::new("moka");
        assert_eq!(label.as_str(), "moka");
    }

    #[test]
    fn test_new_static() {
        let label = StoreLabel::new_static("reqwest");
        assert_eq!(label.as_str(), "reqwest");
    }

    #[test]
    fn test_from_string() {
        let label: StoreLabel = format!("moka-{}", 2).into();
        assert_eq!(label, StoreLabel::new("moka-2"));
    }

    #[test]
    fn test_display() {
        let label: StoreLabel = "mock".into();
        assert_eq!(format!("{label}"), "mock");
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(StoreLabel::default().as_str(), "");
    }
}
