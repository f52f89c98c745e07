//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometres, as used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 latitude/longitude pair.
///
/// Used for the visibility reference point (device position or a resolved
/// place), resolved listing pickup coordinates, and route geometry vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point from decimal-degree latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in kilometres (haversine formula).
    #[must_use]
    pub fn haversine_km(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

/// A derived polyline drawn for a Selected or Bookmarked listing.
///
/// Render-only data: recomputed from the route context and the listing's
/// resolved pickup coordinate, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Polyline vertices in draw order.
    pub points: Vec<GeoPoint>,
    /// Display color of the polyline (the route's distinguishing color).
    pub color: String,
}

impl RouteGeometry {
    /// Creates a geometry from vertices and a display color.
    #[must_use]
    pub fn new(points: Vec<GeoPoint>, color: impl Into<String>) -> Self {
        Self {
            points,
            color: color.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(41.0, 29.0);
        assert!(p.haversine_km(&p) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(41.0082, 28.9784);
        let b = GeoPoint::new(39.9334, 32.8597);
        let d1 = a.haversine_km(&b);
        let d2 = b.haversine_km(&a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn istanbul_to_ankara_is_about_350_km() {
        // Istanbul and Ankara city centers; straight-line distance ~351 km.
        let istanbul = GeoPoint::new(41.0082, 28.9784);
        let ankara = GeoPoint::new(39.9334, 32.8597);
        let d = istanbul.haversine_km(&ankara);
        assert!(d > 340.0 && d < 360.0, "got {d}");
    }

    #[test]
    fn one_degree_longitude_at_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let d = a.haversine_km(&b);
        assert!(d > 110.0 && d < 112.0, "got {d}");
    }
}
