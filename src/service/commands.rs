//! Commands accepted by the engine's owner task.

use tokio::sync::oneshot;

use crate::domain::{GeoPoint, Listing, ListingId, RouteId};
use crate::error::EngineError;
use crate::geo::ScopeMode;

use super::engine::EngineSnapshot;

/// A mutation or query serialized onto the engine's owner task.
///
/// Commands with a `respond_to` channel are request/response; the rest are
/// fire-and-forget. The `*Completed`/`*Resolved` variants are sent by the
/// engine's own spawned network tasks to marshal results back onto the
/// owner context.
#[derive(Debug)]
pub enum EngineCommand {
    /// Start a backend load; no-op when one is already in flight.
    LoadData {
        /// Resolves when the load completes (or immediately for a no-op).
        respond_to: oneshot::Sender<Result<(), EngineError>>,
    },

    /// A spawned backend fetch finished.
    LoadCompleted {
        /// The fetched collection, or the transport error.
        result: Result<Vec<Listing>, EngineError>,
    },

    /// Re-fetch the enrichment lookup dataset.
    RefreshLookup,

    /// A spawned lookup fetch finished.
    LookupFetched {
        /// The raw delimited text, or the transport error.
        result: Result<String, EngineError>,
    },

    /// A spawned geocode request finished.
    GeocodeResolved {
        /// The listing whose pickup address was resolved.
        id: ListingId,
        /// The coordinate, or the failure.
        result: Result<GeoPoint, EngineError>,
    },

    /// Set the visibility reference point.
    SetReferencePoint {
        /// The resolved coordinate.
        point: GeoPoint,
        /// Device-reported or place-resolved.
        mode: ScopeMode,
    },

    /// Clear the reference point; visibility fails closed.
    ClearReferencePoint,

    /// Adjust the visibility radius (clamped and snapped by the engine).
    SetRadius {
        /// Requested radius in kilometres.
        radius_km: f64,
    },

    /// Toggle a listing's tap-selection.
    ToggleSelect {
        /// The listing to toggle.
        id: ListingId,
    },

    /// Toggle a listing's bookmark.
    ToggleBookmark {
        /// The listing to toggle.
        id: ListingId,
    },

    /// Create a route, replacing any active one.
    CreateRoute {
        /// Route origin.
        origin: GeoPoint,
        /// Route destination.
        destination: GeoPoint,
        /// The route's distinguishing color.
        color: String,
        /// Receives the new route's identifier.
        respond_to: oneshot::Sender<RouteId>,
    },

    /// Delete the active route.
    DeleteRoute {
        /// Receives the deleted route's identifier, if one was active.
        respond_to: oneshot::Sender<Option<RouteId>>,
    },

    /// The post-transition settle timer fired.
    SettleElapsed {
        /// Generation the timer was armed for; stale generations are
        /// ignored.
        generation: u64,
    },

    /// Create a listing through the structured backend.
    CreateListing {
        /// The record to create.
        listing: Box<Listing>,
        /// Receives the canonical (possibly server-assigned) record.
        respond_to: oneshot::Sender<Result<Listing, EngineError>>,
    },

    /// Update a listing through the structured backend.
    UpdateListing {
        /// The record to update.
        listing: Box<Listing>,
        /// Receives the canonical record.
        respond_to: oneshot::Sender<Result<Listing, EngineError>>,
    },

    /// Delete a listing through the structured backend.
    DeleteListing {
        /// The listing to delete.
        id: ListingId,
        /// Receives the confirmation.
        respond_to: oneshot::Sender<Result<(), EngineError>>,
    },

    /// A spawned backend write finished; merge the canonical record.
    WriteCompleted {
        /// The canonical record to merge, or `None` for a deletion.
        merged: Option<Box<Listing>>,
        /// Identifier to remove for deletions.
        removed: Option<ListingId>,
    },

    /// Read-only state snapshot.
    Snapshot {
        /// Receives the snapshot.
        respond_to: oneshot::Sender<EngineSnapshot>,
    },
}
