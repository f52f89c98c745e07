//! The listing engine: a single owner task over all mutable state.
//!
//! [`ListingEngine`] owns the listing collection, enrichment maps,
//! visibility scope, route context, and tier state. It consumes
//! [`EngineCommand`]s from an mpsc channel; backend fetches, lookup fetches,
//! and geocoding run as spawned tasks that marshal their results back as
//! commands, so no state is ever mutated off the owner context.
//!
//! [`EngineHandle`] is the cloneable client side of the channel.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};

use crate::backend::{ListingBackend, fetch_tabular_text};
use crate::config::EngineConfig;
use crate::domain::{
    EngineEvent, EventBus, GeoPoint, Listing, ListingId, RouteGeometry, RouteId, TierSnapshot,
};
use crate::enrich::EnrichmentTable;
use crate::error::EngineError;
use crate::geo::{Geocoder, ScopeMode, VisibilityScope};
use crate::persistence::ListingCache;
use crate::tiers::{ActiveRoute, BookmarkSet, ClassifierInput, RouteContext, SelectionSet, classify};

use super::EngineCommand;

/// Capacity of the engine command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 256;

/// Read-only view of the engine state at one instant.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    /// The current listing collection.
    pub listings: Vec<Listing>,
    /// The active visibility scope.
    pub scope: VisibilityScope,
    /// The current route context.
    pub route: RouteContext,
    /// Render classification computed from this same state.
    pub tiers: TierSnapshot,
    /// When the collection was last replaced by a backend fetch.
    pub last_updated: Option<DateTime<Utc>>,
}

/// All state owned by the engine task.
#[derive(Debug, Default)]
struct EngineState {
    listings: Vec<Listing>,
    coords: HashMap<ListingId, GeoPoint>,
    enrichment: EnrichmentTable,
    scope: VisibilityScope,
    route: RouteContext,
    selection: SelectionSet,
    bookmarks: BookmarkSet,
    last_updated: Option<DateTime<Utc>>,
    load_in_flight: bool,
    pending_load: Option<oneshot::Sender<Result<(), EngineError>>>,
    settle_generation: u64,
}

/// Cloneable client handle to the engine's command channel.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Triggers a backend load. A load already in flight makes this call a
    /// no-op resolving `Ok(())` immediately.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`EngineError::Transport`] on fetch failure
    /// (previous state is retained), or [`EngineError::EngineGone`].
    pub async fn load_data(&self) -> Result<(), EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::LoadData { respond_to: tx }).await?;
        rx.await.map_err(|_| EngineError::EngineGone)?
    }

    /// Re-fetches the enrichment lookup dataset in the background.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn refresh_lookup(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::RefreshLookup).await
    }

    /// Creates a listing through the structured backend.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedOperation`] under the tabular
    /// backend, [`EngineError::Transport`] on network failure, or
    /// [`EngineError::EngineGone`].
    pub async fn create_listing(&self, listing: Listing) -> Result<Listing, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::CreateListing {
            listing: Box::new(listing),
            respond_to: tx,
        })
        .await?;
        rx.await.map_err(|_| EngineError::EngineGone)?
    }

    /// Updates a listing through the structured backend.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`EngineHandle::create_listing`], plus
    /// [`EngineError::ListingNotFound`].
    pub async fn update_listing(&self, listing: Listing) -> Result<Listing, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::UpdateListing {
            listing: Box::new(listing),
            respond_to: tx,
        })
        .await?;
        rx.await.map_err(|_| EngineError::EngineGone)?
    }

    /// Deletes a listing through the structured backend.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`EngineHandle::update_listing`].
    pub async fn delete_listing(&self, id: ListingId) -> Result<(), EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::DeleteListing { id, respond_to: tx })
            .await?;
        rx.await.map_err(|_| EngineError::EngineGone)?
    }

    /// Sets the visibility reference point.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn set_reference_point(
        &self,
        point: GeoPoint,
        mode: ScopeMode,
    ) -> Result<(), EngineError> {
        self.send(EngineCommand::SetReferencePoint { point, mode })
            .await
    }

    /// Clears the reference point; visibility fails closed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn clear_reference_point(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::ClearReferencePoint).await
    }

    /// Adjusts the visibility radius.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn set_radius(&self, radius_km: f64) -> Result<(), EngineError> {
        self.send(EngineCommand::SetRadius { radius_km }).await
    }

    /// Toggles a listing's tap-selection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn toggle_select(&self, id: ListingId) -> Result<(), EngineError> {
        self.send(EngineCommand::ToggleSelect { id }).await
    }

    /// Toggles a listing's bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn toggle_bookmark(&self, id: ListingId) -> Result<(), EngineError> {
        self.send(EngineCommand::ToggleBookmark { id }).await
    }

    /// Creates a route (replacing any active one) and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn create_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        color: impl Into<String> + Send,
    ) -> Result<RouteId, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::CreateRoute {
            origin,
            destination,
            color: color.into(),
            respond_to: tx,
        })
        .await?;
        rx.await.map_err(|_| EngineError::EngineGone)
    }

    /// Deletes the active route, returning its id when one was active.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn delete_route(&self) -> Result<Option<RouteId>, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::DeleteRoute { respond_to: tx })
            .await?;
        rx.await.map_err(|_| EngineError::EngineGone)
    }

    /// Returns a read-only snapshot of the engine state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EngineGone`] when the engine task has ended.
    pub async fn snapshot(&self) -> Result<EngineSnapshot, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::Snapshot { respond_to: tx }).await?;
        rx.await.map_err(|_| EngineError::EngineGone)
    }

    async fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| EngineError::EngineGone)
    }
}

/// The engine's owner task.
pub struct ListingEngine {
    state: EngineState,
    backend: Arc<dyn ListingBackend>,
    geocoder: Arc<dyn Geocoder>,
    cache: ListingCache,
    bus: EventBus,
    config: EngineConfig,
    http: reqwest::Client,
    tx: mpsc::Sender<EngineCommand>,
    rx: mpsc::Receiver<EngineCommand>,
}

impl std::fmt::Debug for ListingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingEngine")
            .field("listings", &self.state.listings.len())
            .field("load_in_flight", &self.state.load_in_flight)
            .finish_non_exhaustive()
    }
}

impl ListingEngine {
    /// Creates the engine and its client handle.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        backend: Arc<dyn ListingBackend>,
        geocoder: Arc<dyn Geocoder>,
        cache: ListingCache,
        bus: EventBus,
    ) -> (Self, EngineHandle) {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let engine = Self {
            state: EngineState {
                scope: VisibilityScope::new(config.default_radius_km),
                ..EngineState::default()
            },
            backend,
            geocoder,
            cache,
            bus,
            config,
            http: reqwest::Client::new(),
            tx: tx.clone(),
            rx,
        };
        (engine, EngineHandle { tx })
    }

    /// Spawns the owner task onto the current tokio runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs the owner task: cache warm-up, then the command loop.
    pub async fn run(mut self) {
        self.warm_up_from_cache().await;

        while let Some(command) = self.rx.recv().await {
            self.handle(command).await;
        }
        tracing::debug!("engine command channel closed, shutting down");
    }

    /// Loads cached listings and enrichment maps before the first fetch so
    /// consumers have data to show immediately. Failures degrade to empty
    /// state.
    async fn warm_up_from_cache(&mut self) {
        if let Err(e) = self.cache.init().await {
            tracing::warn!(error = %e, "cache init failed, running without warm start");
            return;
        }

        let color_map = self.cache.load_color_map().await.unwrap_or_default();
        let icon_map = self.cache.load_icon_map().await.unwrap_or_default();
        self.state.enrichment = EnrichmentTable::from_maps(color_map, icon_map);

        match self.cache.load_listings().await {
            Ok(Some((listings, updated_at))) => {
                tracing::info!(count = listings.len(), "warm start from cached listings");
                self.state.listings = listings;
                self.state.last_updated = updated_at;

                let changed = self.state.enrichment.apply(&mut self.state.listings);
                if changed > 0 {
                    self.persist_listings().await;
                }
                self.queue_geocoding();
                self.publish_listings_replaced();
                self.recompute_tiers();
            }
            Ok(None) => tracing::debug!("no cached listings"),
            Err(e) => tracing::warn!(error = %e, "cache read failed, starting empty"),
        }
    }

    async fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::LoadData { respond_to } => self.on_load_data(respond_to),
            EngineCommand::LoadCompleted { result } => self.on_load_completed(result).await,
            EngineCommand::RefreshLookup => self.on_refresh_lookup(),
            EngineCommand::LookupFetched { result } => self.on_lookup_fetched(result).await,
            EngineCommand::GeocodeResolved { id, result } => self.on_geocode_resolved(id, result),
            EngineCommand::SetReferencePoint { point, mode } => {
                self.state.scope.set_reference(point, mode);
                self.recompute_tiers();
            }
            EngineCommand::ClearReferencePoint => {
                self.state.scope.clear_reference();
                self.recompute_tiers();
            }
            EngineCommand::SetRadius { radius_km } => {
                self.state.scope.set_radius(
                    radius_km,
                    self.config.max_radius_km,
                    self.config.radius_step_km,
                );
                self.recompute_tiers();
            }
            EngineCommand::ToggleSelect { id } => self.on_toggle_select(&id),
            EngineCommand::ToggleBookmark { id } => self.on_toggle_bookmark(&id),
            EngineCommand::CreateRoute {
                origin,
                destination,
                color,
                respond_to,
            } => {
                let id = self.on_create_route(origin, destination, color);
                let _ = respond_to.send(id);
            }
            EngineCommand::DeleteRoute { respond_to } => {
                let id = self.on_delete_route();
                let _ = respond_to.send(id);
            }
            EngineCommand::SettleElapsed { generation } => {
                if generation == self.state.settle_generation {
                    tracing::debug!(generation, "settle timer elapsed, recomputing tiers");
                    self.recompute_tiers();
                } else {
                    tracing::debug!(generation, "stale settle timer superseded, ignoring");
                }
            }
            EngineCommand::CreateListing {
                listing,
                respond_to,
            } => self.spawn_write(WriteOp::Create(listing), respond_to),
            EngineCommand::UpdateListing {
                listing,
                respond_to,
            } => self.spawn_write(WriteOp::Update(listing), respond_to),
            EngineCommand::DeleteListing { id, respond_to } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.delete_listing(&id).await;
                    if result.is_ok() {
                        let _ = tx
                            .send(EngineCommand::WriteCompleted {
                                merged: None,
                                removed: Some(id),
                            })
                            .await;
                    }
                    let _ = respond_to.send(result);
                });
            }
            EngineCommand::WriteCompleted { merged, removed } => {
                self.on_write_completed(merged, removed).await;
            }
            EngineCommand::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
        }
    }

    /// Starts a backend load unless one is already in flight.
    fn on_load_data(&mut self, respond_to: oneshot::Sender<Result<(), EngineError>>) {
        if self.state.load_in_flight {
            tracing::debug!("load already in flight, no-op");
            let _ = respond_to.send(Ok(()));
            return;
        }
        self.state.load_in_flight = true;
        self.state.pending_load = Some(respond_to);

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.fetch_listings().await;
            let _ = tx.send(EngineCommand::LoadCompleted { result }).await;
        });
    }

    /// Applies a finished load: replace, persist, enrich, geocode, retier.
    async fn on_load_completed(&mut self, result: Result<Vec<Listing>, EngineError>) {
        self.state.load_in_flight = false;
        let responder = self.state.pending_load.take();

        match result {
            Ok(listings) => {
                tracing::info!(count = listings.len(), "listing collection replaced");
                self.state.listings = listings;
                self.state.last_updated = Some(Utc::now());
                self.prune_stale_ids();

                let changed = self.state.enrichment.apply(&mut self.state.listings);
                if changed > 0 {
                    tracing::debug!(changed, "enrichment reapplied after load");
                }
                self.persist_listings().await;
                self.publish_listings_replaced();
                self.queue_geocoding();
                self.recompute_tiers();
                self.on_refresh_lookup();

                if let Some(responder) = responder {
                    let _ = responder.send(Ok(()));
                }
            }
            Err(e) => {
                // Previous (possibly cached) collection stays untouched.
                tracing::warn!(error = %e, "load failed, keeping previous collection");
                if let Some(responder) = responder {
                    let _ = responder.send(Err(e));
                }
            }
        }
    }

    /// Spawns a lookup-dataset fetch.
    fn on_refresh_lookup(&self) {
        let http = self.http.clone();
        let primary = self.config.lookup_url.clone();
        let alternate = self.config.lookup_alt_url.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetch_tabular_text(&http, &primary, &alternate).await;
            let _ = tx.send(EngineCommand::LookupFetched { result }).await;
        });
    }

    /// Rebuilds the enrichment maps from fetched lookup text and reapplies
    /// them. Any failure leaves the existing maps untouched.
    async fn on_lookup_fetched(&mut self, result: Result<String, EngineError>) {
        let text = match result {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "lookup fetch failed, keeping existing maps");
                return;
            }
        };
        let table = match EnrichmentTable::from_text(&text) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "lookup schema unresolved, aborting enrichment run");
                return;
            }
        };

        if let Err(e) = self.cache.save_color_map(table.color_map()).await {
            tracing::warn!(error = %e, "failed to persist color map");
        }
        if let Err(e) = self.cache.save_icon_map(table.icon_map()).await {
            tracing::warn!(error = %e, "failed to persist icon map");
        }
        self.state.enrichment = table;

        let changed = self.state.enrichment.apply(&mut self.state.listings);
        tracing::info!(changed, "enrichment maps refreshed");
        if changed > 0 {
            self.persist_listings().await;
        }
        self.bus.publish(EngineEvent::EnrichmentApplied {
            changed,
            timestamp: Utc::now(),
        });
        self.recompute_tiers();
    }

    /// Records one resolved coordinate and reveals the listing
    /// progressively. Last write wins for redundant resolutions.
    fn on_geocode_resolved(&mut self, id: ListingId, result: Result<GeoPoint, EngineError>) {
        match result {
            Ok(point) => {
                self.state.coords.insert(id.clone(), point);
                self.refresh_geometries(&id);
                self.recompute_tiers();
            }
            Err(e) => tracing::debug!(%id, error = %e, "geocode failed"),
        }
    }

    fn on_toggle_select(&mut self, id: &ListingId) {
        let now_selected = self.state.selection.toggle(id);
        if now_selected && let Some(route) = self.state.route.active().cloned() {
            if let Some(pickup) = self.state.coords.get(id).copied() {
                self.state
                    .selection
                    .set_geometry(id, selection_geometry(&route, pickup));
            }
        }
        tracing::debug!(%id, selected = now_selected, "selection toggled");
        self.recompute_tiers();
    }

    fn on_toggle_bookmark(&mut self, id: &ListingId) {
        let now_bookmarked = self.state.bookmarks.toggle(id);
        if now_bookmarked {
            self.refresh_bookmark_geometry(id);
        }
        tracing::debug!(%id, bookmarked = now_bookmarked, "bookmark toggled");
        self.recompute_tiers();
    }

    /// Route creation: synchronous selection clear in the same state
    /// update, then a superseding settle timer for the tier recompute.
    fn on_create_route(
        &mut self,
        origin: GeoPoint,
        destination: GeoPoint,
        color: String,
    ) -> RouteId {
        let id = self.state.route.create(origin, destination, color.clone());
        self.state.selection.clear();
        self.bus.publish(EngineEvent::RouteCreated {
            route_id: id,
            color,
            timestamp: Utc::now(),
        });
        tracing::info!(route_id = %id, "route created");
        self.arm_settle_timer();
        id
    }

    /// Route deletion: same synchronous clear + deferred recompute rule.
    fn on_delete_route(&mut self) -> Option<RouteId> {
        let id = self.state.route.delete()?;
        self.state.selection.clear();
        self.bus.publish(EngineEvent::RouteDeleted {
            route_id: id,
            timestamp: Utc::now(),
        });
        tracing::info!(route_id = %id, "route deleted");
        self.arm_settle_timer();
        Some(id)
    }

    /// Arms the single-shot settle timer for the current transition. A new
    /// transition bumps the generation, so an older pending timer is
    /// ignored when it fires instead of applying a stale scope snapshot.
    fn arm_settle_timer(&mut self) {
        self.state.settle_generation = self.state.settle_generation.wrapping_add(1);
        let generation = self.state.settle_generation;
        let delay = Duration::from_millis(self.config.settle_delay_ms);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(EngineCommand::SettleElapsed { generation }).await;
        });
    }

    fn spawn_write(
        &self,
        op: WriteOp,
        respond_to: oneshot::Sender<Result<Listing, EngineError>>,
    ) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match &op {
                WriteOp::Create(listing) => backend.create_listing(listing).await,
                WriteOp::Update(listing) => backend.update_listing(listing).await,
            };
            if let Ok(canonical) = &result {
                let _ = tx
                    .send(EngineCommand::WriteCompleted {
                        merged: Some(Box::new(canonical.clone())),
                        removed: None,
                    })
                    .await;
            }
            let _ = respond_to.send(result);
        });
    }

    /// Merges a canonical record (or removes a deleted one) and persists.
    async fn on_write_completed(&mut self, merged: Option<Box<Listing>>, removed: Option<ListingId>) {
        if let Some(listing) = merged {
            let mut listing = *listing;
            let _ = self.state.enrichment.apply(std::slice::from_mut(&mut listing));
            match self
                .state
                .listings
                .iter_mut()
                .find(|existing| existing.id == listing.id)
            {
                Some(existing) => *existing = listing,
                None => self.state.listings.push(listing),
            }
        }
        if let Some(id) = removed {
            self.state.listings.retain(|listing| listing.id != id);
            self.state.coords.remove(&id);
            if self.state.selection.contains(&id) {
                let _ = self.state.selection.toggle(&id);
            }
            if self.state.bookmarks.contains(&id) {
                let _ = self.state.bookmarks.toggle(&id);
            }
        }
        self.persist_listings().await;
        self.publish_listings_replaced();
        self.queue_geocoding();
        self.recompute_tiers();
    }

    /// Queues a geocode for every listing without a resolved pickup
    /// coordinate. Requests are not deduplicated; redundant resolutions
    /// are idempotent (last write wins).
    fn queue_geocoding(&self) {
        for listing in &self.state.listings {
            if self.state.coords.contains_key(&listing.id) {
                continue;
            }
            let address = if listing.pickup_location.is_empty() {
                listing.pickup_city.clone()
            } else {
                listing.pickup_location.clone()
            };
            if address.is_empty() {
                continue;
            }
            let id = listing.id.clone();
            let geocoder = Arc::clone(&self.geocoder);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = geocoder.geocode(&address).await;
                let _ = tx.send(EngineCommand::GeocodeResolved { id, result }).await;
            });
        }
    }

    /// Drops resolved coordinates for ids no longer in the collection.
    fn prune_stale_ids(&mut self) {
        let ids: std::collections::HashSet<_> =
            self.state.listings.iter().map(|l| l.id.clone()).collect();
        self.state.coords.retain(|id, _| ids.contains(id));
    }

    /// Refreshes derived geometries for one listing whose coordinate just
    /// resolved.
    fn refresh_geometries(&mut self, id: &ListingId) {
        let Some(pickup) = self.state.coords.get(id).copied() else {
            return;
        };
        if self.state.selection.contains(id)
            && let Some(route) = self.state.route.active().cloned()
        {
            self.state
                .selection
                .set_geometry(id, selection_geometry(&route, pickup));
        }
        if self.state.bookmarks.contains(id) {
            self.refresh_bookmark_geometry(id);
        }
    }

    /// Rebuilds the dedicated bookmark geometry for one listing. Bookmark
    /// geometries survive route transitions untouched.
    fn refresh_bookmark_geometry(&mut self, id: &ListingId) {
        let Some(pickup) = self.state.coords.get(id).copied() else {
            return;
        };
        let color = self
            .state
            .listings
            .iter()
            .find(|l| &l.id == id)
            .map(|l| l.trip_color.clone())
            .unwrap_or_default();
        let points = match self.state.scope.reference {
            Some(reference) => vec![reference, pickup],
            None => vec![pickup],
        };
        self.state
            .bookmarks
            .set_geometry(id, RouteGeometry::new(points, color));
    }

    async fn persist_listings(&self) {
        let stamp = self.state.last_updated.unwrap_or_else(Utc::now);
        if let Err(e) = self.cache.save_listings(&self.state.listings, stamp).await {
            tracing::warn!(error = %e, "failed to persist listing cache");
        }
    }

    fn publish_listings_replaced(&self) {
        self.bus.publish(EngineEvent::ListingsReplaced {
            count: self.state.listings.len(),
            timestamp: Utc::now(),
        });
    }

    fn recompute_tiers(&self) {
        let snapshot = self.classify();
        self.bus.publish(EngineEvent::TiersRecomputed {
            snapshot,
            timestamp: Utc::now(),
        });
    }

    fn classify(&self) -> TierSnapshot {
        classify(&ClassifierInput {
            listings: &self.state.listings,
            coords: &self.state.coords,
            scope: &self.state.scope,
            selection: &self.state.selection,
            bookmarks: &self.state.bookmarks,
        })
    }

    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            listings: self.state.listings.clone(),
            scope: self.state.scope,
            route: self.state.route.clone(),
            tiers: self.classify(),
            last_updated: self.state.last_updated,
        }
    }
}

/// A pending structured-backend write.
#[derive(Debug)]
enum WriteOp {
    Create(Box<Listing>),
    Update(Box<Listing>),
}

/// Derives the polyline drawn for a selected listing: route origin →
/// pickup, in the route's distinguishing color.
fn selection_geometry(route: &ActiveRoute, pickup: GeoPoint) -> RouteGeometry {
    RouteGeometry::new(vec![route.origin, pickup], route.color.clone())
}
