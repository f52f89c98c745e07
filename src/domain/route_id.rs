//! Type-safe route identifier.
//!
//! [`RouteId`] is a newtype wrapper around [`uuid::Uuid`] (v4). A fresh id is
//! generated for every created route so that a pending settle timer from an
//! earlier route context can never be attributed to a newer one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a multi-stop route context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(uuid::Uuid);

impl RouteId {
    /// Creates a new random `RouteId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(RouteId::new(), RouteId::new());
    }

    #[test]
    fn display_is_uuid_format() {
        let id = RouteId::new();
        let s = format!("{id}");
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }
}
