//! Geocoding collaborator: free-text address → coordinate.
//!
//! Geocoding is an external capability the engine consumes through the
//! [`Geocoder`] trait. The engine queues a geocode for every listing whose
//! pickup coordinate is unresolved and re-evaluates visibility as each
//! request completes, one listing at a time.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::GeoPoint;
use crate::error::EngineError;

/// Resolves a free-text address to a coordinate, or fails.
#[async_trait]
pub trait Geocoder: Send + Sync + std::fmt::Debug {
    /// Resolves `address` to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transport`] on network failure or when the
    /// service cannot resolve the address.
    async fn geocode(&self, address: &str) -> Result<GeoPoint, EngineError>;
}

/// First result of a geocoding service response.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: f64,
    lon: f64,
}

/// HTTP geocoder hitting a JSON endpoint.
///
/// The endpoint is expected to answer `GET {base_url}?q={address}` with a
/// JSON array of `{lat, lon}` objects; the first hit wins.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeocoder {
    /// Creates a geocoder against the given endpoint.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, EngineError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", address)])
            .send()
            .await?
            .error_for_status()?;

        let hits: Vec<GeocodeHit> = response.json().await?;
        let hit = hits
            .first()
            .ok_or_else(|| EngineError::Transport(format!("no geocode result for {address:?}")))?;

        Ok(GeoPoint::new(hit.lat, hit.lon))
    }
}
