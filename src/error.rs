//! Engine error types.
//!
//! [`EngineError`] is the central error type for the listing engine. Every
//! failure class in the engine maps to one variant; nothing here is fatal to
//! the process; callers degrade to last-known-good state and log.

use crate::domain::ListingId;

/// Central error enum for the listing engine.
///
/// # Failure classes
///
/// | Variant                | Class                 | Recovery                 |
/// |------------------------|-----------------------|--------------------------|
/// | `Transport`            | network fetch/geocode | keep previous state, log |
/// | `SchemaResolution`     | lookup columns absent | abort enrichment run     |
/// | `UnsupportedOperation` | write on tabular feed | surfaced synchronously   |
/// | `Cache`                | local persistence     | treat as empty state     |
/// | `ListingNotFound`      | remote unknown id     | surfaced synchronously   |
/// | `EngineGone`           | owner task ended      | surfaced synchronously   |
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Network failure while talking to a backend or the geocoder.
    #[error("transport error: {0}")]
    Transport(String),

    /// The enrichment lookup table's columns could not be resolved.
    #[error("schema resolution failed: {0}")]
    SchemaResolution(String),

    /// A write operation was attempted while the read-only tabular
    /// backend is configured.
    #[error("operation not supported by the configured backend: {0}")]
    UnsupportedOperation(&'static str),

    /// Local durable cache read or write failure.
    #[error("cache error: {0}")]
    Cache(String),

    /// The remote service has no listing with the given identifier.
    #[error("listing not found: {0}")]
    ListingNotFound(ListingId),

    /// The engine's owner task has shut down and can no longer accept
    /// commands.
    #[error("engine is no longer running")]
    EngineGone,
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        Self::Cache(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_operation_names_the_operation() {
        let err = EngineError::UnsupportedOperation("create_listing");
        assert!(err.to_string().contains("create_listing"));
    }

    #[test]
    fn listing_not_found_carries_id() {
        let err = EngineError::ListingNotFound(ListingId::from("s1"));
        assert!(err.to_string().contains("s1"));
    }
}
