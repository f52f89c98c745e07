//! Tap-selection and bookmark state.
//!
//! [`SelectionSet`] tracks the listings tap-selected for the current route,
//! in insertion order (used for multi-stop ordering). It is cleared
//! synchronously on every route-context transition.
//!
//! [`BookmarkSet`] is independent of the route context: bookmarks and their
//! geometry cache survive route transitions untouched.

use std::collections::{HashMap, HashSet};

use crate::domain::{ListingId, RouteGeometry};

/// Insertion-ordered set of tap-selected listings.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<ListingId>,
    geometries: HashMap<ListingId, RouteGeometry>,
    last_selected: Option<ListingId>,
}

impl SelectionSet {
    /// Toggles a listing's membership. Returns `true` when the listing is
    /// selected after the call.
    ///
    /// Deselection removes the listing's derived geometry and recomputes
    /// order for the remaining members (their relative order is preserved).
    pub fn toggle(&mut self, id: &ListingId) -> bool {
        if let Some(pos) = self.order.iter().position(|member| member == id) {
            self.order.remove(pos);
            self.geometries.remove(id);
            if self.last_selected.as_ref() == Some(id) {
                self.last_selected = self.order.last().cloned();
            }
            false
        } else {
            self.order.push(id.clone());
            self.last_selected = Some(id.clone());
            true
        }
    }

    /// Records the derived route geometry for a selected listing.
    ///
    /// Ignored for listings that are not currently selected.
    pub fn set_geometry(&mut self, id: &ListingId, geometry: RouteGeometry) {
        if self.contains(id) {
            self.geometries.insert(id.clone(), geometry);
        }
    }

    /// Returns the geometry derived for a selected listing, if recorded.
    #[must_use]
    pub fn geometry(&self, id: &ListingId) -> Option<&RouteGeometry> {
        self.geometries.get(id)
    }

    /// Returns `true` when the listing is selected.
    #[must_use]
    pub fn contains(&self, id: &ListingId) -> bool {
        self.order.iter().any(|member| member == id)
    }

    /// Selected listings in insertion order.
    #[must_use]
    pub fn ordered(&self) -> &[ListingId] {
        &self.order
    }

    /// The most recently selected listing still in the set.
    #[must_use]
    pub fn last_selected(&self) -> Option<&ListingId> {
        self.last_selected.as_ref()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Clears members, geometries, and the last-selected pointer.
    ///
    /// Called synchronously in the same state update as every route-context
    /// transition.
    pub fn clear(&mut self) {
        self.order.clear();
        self.geometries.clear();
        self.last_selected = None;
    }
}

/// Bookmarked listings with their dedicated geometry cache.
#[derive(Debug, Clone, Default)]
pub struct BookmarkSet {
    ids: HashSet<ListingId>,
    geometries: HashMap<ListingId, RouteGeometry>,
}

impl BookmarkSet {
    /// Toggles a bookmark. Returns `true` when the listing is bookmarked
    /// after the call. Removing a bookmark drops its cached geometry.
    pub fn toggle(&mut self, id: &ListingId) -> bool {
        if self.ids.remove(id) {
            self.geometries.remove(id);
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Returns `true` when the listing is bookmarked.
    #[must_use]
    pub fn contains(&self, id: &ListingId) -> bool {
        self.ids.contains(id)
    }

    /// Caches the refreshed geometry for a bookmarked listing.
    pub fn set_geometry(&mut self, id: &ListingId, geometry: RouteGeometry) {
        if self.ids.contains(id) {
            self.geometries.insert(id.clone(), geometry);
        }
    }

    /// Returns the cached geometry for a bookmarked listing, if any.
    #[must_use]
    pub fn geometry(&self, id: &ListingId) -> Option<&RouteGeometry> {
        self.geometries.get(id)
    }

    /// Bookmarked listing identifiers (unordered).
    pub fn ids(&self) -> impl Iterator<Item = &ListingId> {
        self.ids.iter()
    }
}
