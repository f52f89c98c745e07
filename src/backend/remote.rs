//! Backend B: the structured remote listing service.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{Listing, ListingId};
use crate::error::EngineError;

use super::ListingBackend;

/// Authenticated JSON backend supporting the full listing lifecycle.
///
/// The service is the source of truth when selected: every mutation is a
/// single remote round-trip and the response body is the canonical record.
#[derive(Debug, Clone)]
pub struct RemoteServiceBackend {
    client: reqwest::Client,
    base_url: String,
    auth_token: String,
}

impl RemoteServiceBackend {
    /// Creates a remote backend against `base_url` with a bearer token.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            auth_token: auth_token.into(),
        }
    }

    fn listings_url(&self) -> String {
        format!("{}/listings", self.base_url)
    }

    fn listing_url(&self, id: &ListingId) -> String {
        format!("{}/listings/{id}", self.base_url)
    }
}

#[async_trait]
impl ListingBackend for RemoteServiceBackend {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, EngineError> {
        let response = self
            .client
            .get(self.listings_url())
            .bearer_auth(&self.auth_token)
            .send()
            .await?
            .error_for_status()?;
        let listings = response.json().await?;
        Ok(listings)
    }

    async fn create_listing(&self, listing: &Listing) -> Result<Listing, EngineError> {
        let response = self
            .client
            .post(self.listings_url())
            .bearer_auth(&self.auth_token)
            .json(listing)
            .send()
            .await?
            .error_for_status()?;
        let created = response.json().await?;
        tracing::info!(id = %listing.id, "listing created remotely");
        Ok(created)
    }

    async fn update_listing(&self, listing: &Listing) -> Result<Listing, EngineError> {
        let response = self
            .client
            .put(self.listing_url(&listing.id))
            .bearer_auth(&self.auth_token)
            .json(listing)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(EngineError::ListingNotFound(listing.id.clone()));
        }
        let updated = response.error_for_status()?.json().await?;
        tracing::info!(id = %listing.id, "listing updated remotely");
        Ok(updated)
    }

    async fn delete_listing(&self, id: &ListingId) -> Result<(), EngineError> {
        let response = self
            .client
            .delete(self.listing_url(id))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(EngineError::ListingNotFound(id.clone()));
        }
        response.error_for_status()?;
        tracing::info!(%id, "listing deleted remotely");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn url_construction_trims_trailing_slash() {
        let backend = RemoteServiceBackend::new(
            reqwest::Client::new(),
            "https://api.example.test/v1/",
            "token",
        );
        assert_eq!(
            backend.listings_url(),
            "https://api.example.test/v1/listings"
        );
        assert_eq!(
            backend.listing_url(&ListingId::from("s1")),
            "https://api.example.test/v1/listings/s1"
        );
    }
}
