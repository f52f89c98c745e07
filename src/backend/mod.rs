//! Pluggable listing backends.
//!
//! Exactly one backend is chosen at composition time and kept for the
//! process lifetime: the read-only tabular feed ([`TabularFeedBackend`]) or
//! the structured remote service ([`RemoteServiceBackend`]). The engine only
//! sees the [`ListingBackend`] trait.

pub mod remote;
pub mod tabular;

use async_trait::async_trait;

use crate::domain::{Listing, ListingId};
use crate::error::EngineError;

pub use remote::RemoteServiceBackend;
pub use tabular::TabularFeedBackend;

/// A listing data source.
///
/// Write operations are optional: the tabular feed rejects them with
/// [`EngineError::UnsupportedOperation`] immediately and deterministically.
#[async_trait]
pub trait ListingBackend: Send + Sync + std::fmt::Debug {
    /// Fetches the backend's current listing collection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transport`] on network failure or unusable
    /// response content.
    async fn fetch_listings(&self) -> Result<Vec<Listing>, EngineError>;

    /// Creates a listing, returning the canonical (possibly
    /// server-assigned) record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedOperation`] on read-only backends,
    /// [`EngineError::Transport`] on network failure.
    async fn create_listing(&self, listing: &Listing) -> Result<Listing, EngineError>;

    /// Updates a listing, returning the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedOperation`] on read-only backends,
    /// [`EngineError::ListingNotFound`] for unknown ids,
    /// [`EngineError::Transport`] on network failure.
    async fn update_listing(&self, listing: &Listing) -> Result<Listing, EngineError>;

    /// Deletes a listing by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedOperation`] on read-only backends,
    /// [`EngineError::ListingNotFound`] for unknown ids,
    /// [`EngineError::Transport`] on network failure.
    async fn delete_listing(&self, id: &ListingId) -> Result<(), EngineError>;
}

/// Content-sniffs a response body for markup markers.
///
/// An authentication wall or a wrong export URL answers with an HTML page
/// instead of delimited text; that body must never reach the row parser.
#[must_use]
pub fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start().get(..256).unwrap_or(body.trim_start());
    let head = head.to_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html") || head.contains("<html")
}

/// Fetches delimited text, retrying once on an alternate URL when the
/// primary answers with HTML.
///
/// # Errors
///
/// Returns [`EngineError::Transport`] on network failure or when both URLs
/// answer with HTML.
pub async fn fetch_tabular_text(
    client: &reqwest::Client,
    primary_url: &str,
    alternate_url: &str,
) -> Result<String, EngineError> {
    let body = client
        .get(primary_url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    if !looks_like_html(&body) {
        return Ok(body);
    }

    tracing::warn!(url = primary_url, "tabular fetch returned HTML, trying alternate URL");
    let body = client
        .get(alternate_url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    if looks_like_html(&body) {
        return Err(EngineError::Transport(
            "both export URLs returned HTML instead of delimited text".to_string(),
        ));
    }
    Ok(body)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_doctype() {
        assert!(looks_like_html("<!DOCTYPE html><html><body>login</body>"));
    }

    #[test]
    fn sniffs_bare_html_tag() {
        assert!(looks_like_html("  \n<html lang=\"en\">"));
    }

    #[test]
    fn delimited_text_is_not_html() {
        assert!(!looks_like_html("s1,u1,123 Main,456 Oak\ns2,u2,a,b"));
    }

    #[test]
    fn empty_body_is_not_html() {
        assert!(!looks_like_html(""));
    }
}
