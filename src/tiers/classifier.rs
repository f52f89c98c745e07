//! Tier classification: render-ready membership sets.

use std::collections::HashMap;

use crate::domain::{GeoPoint, Listing, ListingId, PoiMarker, TierSnapshot};
use crate::geo::{VisibilityScope, is_visible};

use super::selection::{BookmarkSet, SelectionSet};

/// A listing's render classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// In scope, unselected, unbookmarked.
    Preview,
    /// Bookmarked; rendered regardless of range.
    Bookmarked,
    /// Tap-selected for the current route; overrides everything.
    Selected,
}

/// Borrowed inputs of one classification pass.
#[derive(Debug)]
pub struct ClassifierInput<'a> {
    /// The current listing collection.
    pub listings: &'a [Listing],
    /// Resolved pickup coordinates by listing id.
    pub coords: &'a HashMap<ListingId, GeoPoint>,
    /// The active visibility scope.
    pub scope: &'a VisibilityScope,
    /// Current selection state.
    pub selection: &'a SelectionSet,
    /// Current bookmark state.
    pub bookmarks: &'a BookmarkSet,
}

/// Classifies one listing, or `None` when it is not rendered at all.
///
/// Priority: Selected over Bookmarked over Preview. A listing outside scope
/// that is neither bookmarked nor selected is hidden.
#[must_use]
pub fn tier_of(input: &ClassifierInput<'_>, listing: &Listing) -> Option<Tier> {
    if input.selection.contains(&listing.id) {
        return Some(Tier::Selected);
    }
    if input.bookmarks.contains(&listing.id) {
        return Some(Tier::Bookmarked);
    }
    let pickup = input.coords.get(&listing.id);
    is_visible(input.scope, pickup).then_some(Tier::Preview)
}

/// Computes the full render classification.
///
/// Selected markers come out in selection insertion order; they carry the
/// selection's derived geometry. Bookmarked markers carry their dedicated
/// geometry cache entry. Preview markers carry no geometry.
#[must_use]
pub fn classify(input: &ClassifierInput<'_>) -> TierSnapshot {
    let mut snapshot = TierSnapshot::default();

    for listing in input.listings {
        match tier_of(input, listing) {
            Some(Tier::Selected) => {}
            Some(Tier::Bookmarked) => snapshot.bookmarked.push(PoiMarker {
                id: listing.id.clone(),
                color: listing.trip_color.clone(),
                icon: listing.icon.clone(),
                geometry: input.bookmarks.geometry(&listing.id).cloned(),
            }),
            Some(Tier::Preview) => snapshot.preview.push(PoiMarker {
                id: listing.id.clone(),
                color: listing.trip_color.clone(),
                icon: listing.icon.clone(),
                geometry: None,
            }),
            None => {}
        }
    }

    // Selected markers keep selection insertion order, not collection order.
    for id in input.selection.ordered() {
        if let Some(listing) = input.listings.iter().find(|l| &l.id == id) {
            snapshot.selected.push(PoiMarker {
                id: id.clone(),
                color: listing.trip_color.clone(),
                icon: listing.icon.clone(),
                geometry: input.selection.geometry(id).cloned(),
            });
        }
    }

    snapshot
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::RouteGeometry;
    use crate::geo::ScopeMode;

    fn listing(id: &str) -> Listing {
        let mut l = Listing::from_row(&[id.to_string()]);
        l.trip_color = "#AAAAAA".to_string();
        l
    }

    fn scoped() -> VisibilityScope {
        let mut scope = VisibilityScope::new(200.0);
        scope.set_reference(GeoPoint::new(41.0, 29.0), ScopeMode::Device);
        scope
    }

    struct Fixture {
        listings: Vec<Listing>,
        coords: HashMap<ListingId, GeoPoint>,
        scope: VisibilityScope,
        selection: SelectionSet,
        bookmarks: BookmarkSet,
    }

    impl Fixture {
        fn new(ids: &[&str]) -> Self {
            let listings: Vec<_> = ids.iter().map(|id| listing(id)).collect();
            let coords = listings
                .iter()
                .map(|l| (l.id.clone(), GeoPoint::new(41.01, 29.01)))
                .collect();
            Self {
                listings,
                coords,
                scope: scoped(),
                selection: SelectionSet::default(),
                bookmarks: BookmarkSet::default(),
            }
        }

        fn input(&self) -> ClassifierInput<'_> {
            ClassifierInput {
                listings: &self.listings,
                coords: &self.coords,
                scope: &self.scope,
                selection: &self.selection,
                bookmarks: &self.bookmarks,
            }
        }
    }

    #[test]
    fn in_scope_listings_are_preview() {
        let fx = Fixture::new(&["a", "b"]);
        let snapshot = classify(&fx.input());
        assert_eq!(snapshot.preview.len(), 2);
        assert!(snapshot.bookmarked.is_empty());
        assert!(snapshot.selected.is_empty());
    }

    #[test]
    fn selected_overrides_bookmarked_overrides_preview() {
        let mut fx = Fixture::new(&["a"]);
        fx.bookmarks.toggle(&ListingId::from("a"));
        assert_eq!(
            tier_of(&fx.input(), &listing("a")),
            Some(Tier::Bookmarked)
        );

        fx.selection.toggle(&ListingId::from("a"));
        assert_eq!(tier_of(&fx.input(), &listing("a")), Some(Tier::Selected));
    }

    #[test]
    fn out_of_scope_unmarked_listing_is_hidden() {
        let mut fx = Fixture::new(&["a"]);
        fx.coords
            .insert(ListingId::from("a"), GeoPoint::new(0.0, 0.0));
        assert_eq!(tier_of(&fx.input(), &listing("a")), None);
        let snapshot = classify(&fx.input());
        assert!(snapshot.is_hidden(&ListingId::from("a")));
    }

    #[test]
    fn bookmarked_is_rendered_regardless_of_range() {
        let mut fx = Fixture::new(&["a"]);
        fx.coords
            .insert(ListingId::from("a"), GeoPoint::new(0.0, 0.0));
        fx.bookmarks.toggle(&ListingId::from("a"));
        assert_eq!(
            tier_of(&fx.input(), &listing("a")),
            Some(Tier::Bookmarked)
        );
    }

    #[test]
    fn unresolved_coordinate_fails_closed() {
        let mut fx = Fixture::new(&["a"]);
        fx.coords.remove(&ListingId::from("a"));
        assert_eq!(tier_of(&fx.input(), &listing("a")), None);
    }

    #[test]
    fn selected_markers_keep_insertion_order() {
        let mut fx = Fixture::new(&["a", "b", "c"]);
        fx.selection.toggle(&ListingId::from("c"));
        fx.selection.toggle(&ListingId::from("a"));

        let snapshot = classify(&fx.input());
        let ids: Vec<_> = snapshot.selected.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec![ListingId::from("c"), ListingId::from("a")]);
    }

    #[test]
    fn selected_markers_carry_selection_geometry() {
        let mut fx = Fixture::new(&["a"]);
        let id = ListingId::from("a");
        fx.selection.toggle(&id);
        fx.selection.set_geometry(
            &id,
            RouteGeometry::new(vec![GeoPoint::new(1.0, 1.0)], "#00AAFF"),
        );

        let snapshot = classify(&fx.input());
        let Some(marker) = snapshot.selected.first() else {
            panic!("expected selected marker");
        };
        let Some(geometry) = marker.geometry.as_ref() else {
            panic!("expected geometry");
        };
        assert_eq!(geometry.color, "#00AAFF");
    }

    #[test]
    fn markers_carry_derived_display_attributes() {
        let fx = Fixture::new(&["a"]);
        let snapshot = classify(&fx.input());
        let Some(marker) = snapshot.preview.first() else {
            panic!("expected preview marker");
        };
        assert_eq!(marker.color, "#AAAAAA");
    }
}
