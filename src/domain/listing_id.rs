//! Type-safe listing identifier.
//!
//! [`ListingId`] is a newtype wrapper around the backend-assigned stable
//! identifier string, providing type safety so listing identifiers cannot be
//! confused with other strings (user ids, categories, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of one shipment listing.
///
/// Assigned by the backend (never generated locally) and immutable for the
/// lifetime of the record. Identity and cache-diff equality of listings is
/// identifier equality, not full-record equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty (unassigned).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
