//! Engine events consumed by the renderer.
//!
//! Every state mutation that affects what the map should draw emits an
//! [`EngineEvent`] through the [`super::EventBus`]. The renderer subscribes
//! once and redraws from [`TierSnapshot`] payloads; it never reads engine
//! state directly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::coordinate::RouteGeometry;
use super::{ListingId, RouteId};

/// One render-ready map marker.
#[derive(Debug, Clone, Serialize)]
pub struct PoiMarker {
    /// Listing identifier.
    pub id: ListingId,
    /// Derived display color (from enrichment).
    pub color: String,
    /// Derived display icon (from enrichment).
    pub icon: String,
    /// Route polyline for Bookmarked/Selected markers; `None` for Preview.
    pub geometry: Option<RouteGeometry>,
}

/// The complete render classification at one instant.
///
/// Tiers are mutually exclusive: a listing appears in at most one of the
/// three sets, with Selected taking priority over Bookmarked over Preview.
/// Listings in none of the sets are not rendered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TierSnapshot {
    /// In-scope, unselected, unbookmarked listings.
    pub preview: Vec<PoiMarker>,
    /// Bookmarked listings (always rendered regardless of range).
    pub bookmarked: Vec<PoiMarker>,
    /// Tap-selected listings, in selection insertion order.
    pub selected: Vec<PoiMarker>,
}

impl TierSnapshot {
    /// Returns `true` if no tier contains the given listing.
    #[must_use]
    pub fn is_hidden(&self, id: &ListingId) -> bool {
        self.tier_of(id).is_none()
    }

    /// Returns the tier name of the given listing, if rendered at all.
    #[must_use]
    pub fn tier_of(&self, id: &ListingId) -> Option<&'static str> {
        if self.selected.iter().any(|m| &m.id == id) {
            Some("selected")
        } else if self.bookmarked.iter().any(|m| &m.id == id) {
            Some("bookmarked")
        } else if self.preview.iter().any(|m| &m.id == id) {
            Some("preview")
        } else {
            None
        }
    }
}

/// Domain event emitted after every render-relevant state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The listing collection was replaced by a backend fetch or cache load.
    ListingsReplaced {
        /// Number of listings in the new collection.
        count: usize,
        /// When the replacement happened.
        timestamp: DateTime<Utc>,
    },

    /// An enrichment pass updated derived display attributes.
    EnrichmentApplied {
        /// Number of listings whose color or icon changed.
        changed: usize,
        /// When the pass completed.
        timestamp: DateTime<Utc>,
    },

    /// Tier membership was recomputed; the renderer should redraw.
    TiersRecomputed {
        /// The new render classification.
        snapshot: TierSnapshot,
        /// When the recomputation happened.
        timestamp: DateTime<Utc>,
    },

    /// A route context became active.
    RouteCreated {
        /// Route identifier.
        route_id: RouteId,
        /// The route's distinguishing color.
        color: String,
        /// When the route was created.
        timestamp: DateTime<Utc>,
    },

    /// The active route context was deleted.
    RouteDeleted {
        /// Route identifier.
        route_id: RouteId,
        /// When the route was deleted.
        timestamp: DateTime<Utc>,
    },
}

impl EngineEvent {
    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ListingsReplaced { .. } => "listings_replaced",
            Self::EnrichmentApplied { .. } => "enrichment_applied",
            Self::TiersRecomputed { .. } => "tiers_recomputed",
            Self::RouteCreated { .. } => "route_created",
            Self::RouteDeleted { .. } => "route_deleted",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn marker(id: &str) -> PoiMarker {
        PoiMarker {
            id: ListingId::from(id),
            color: "#FF0000".to_string(),
            icon: "package".to_string(),
            geometry: None,
        }
    }

    #[test]
    fn tier_of_prefers_selected() {
        let snapshot = TierSnapshot {
            preview: vec![marker("a")],
            bookmarked: vec![marker("a")],
            selected: vec![marker("a")],
        };
        assert_eq!(snapshot.tier_of(&ListingId::from("a")), Some("selected"));
    }

    #[test]
    fn unknown_listing_is_hidden() {
        let snapshot = TierSnapshot::default();
        assert!(snapshot.is_hidden(&ListingId::from("nope")));
    }

    #[test]
    fn event_type_strings() {
        let event = EngineEvent::ListingsReplaced {
            count: 3,
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type_str(), "listings_replaced");
    }

    #[test]
    fn tiers_recomputed_serializes() {
        let event = EngineEvent::TiersRecomputed {
            snapshot: TierSnapshot {
                preview: vec![marker("a")],
                ..TierSnapshot::default()
            },
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("tiers_recomputed"));
        assert!(json.contains("#FF0000"));
    }
}
