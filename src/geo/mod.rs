//! Geo-range visibility: scope, fail-closed filtering, and geocoding.

pub mod geocoder;
pub mod scope;
pub mod visibility;

pub use geocoder::{Geocoder, HttpGeocoder};
pub use scope::{ScopeMode, VisibilityScope};
pub use visibility::is_visible;
