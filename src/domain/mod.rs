//! Domain layer: core record types, geometry, and the event system.
//!
//! This module contains the engine's data model: listing identity and
//! records, geographic coordinates with great-circle distance, the events
//! the renderer consumes, and the broadcast bus carrying them.

pub mod coordinate;
pub mod engine_event;
pub mod event_bus;
pub mod listing;
pub mod listing_id;
pub mod route_id;

pub use coordinate::{GeoPoint, RouteGeometry};
pub use engine_event::{EngineEvent, PoiMarker, TierSnapshot};
pub use event_bus::EventBus;
pub use listing::Listing;
pub use listing_id::ListingId;
pub use route_id::RouteId;
