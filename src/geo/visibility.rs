//! Fail-closed geo-range visibility evaluation.
//!
//! A listing is visible only when every precondition is affirmatively met,
//! evaluated in strict order: reference point resolved, pickup coordinate
//! resolved, distance within radius. Any unresolved precondition means
//! "not visible", never "visible".

use crate::domain::GeoPoint;

use super::VisibilityScope;

/// Evaluates the visibility law for one listing.
///
/// `pickup` is the listing's resolved pickup coordinate, or `None` while
/// geocoding is still pending. Unresolved inputs fail closed; the listing
/// must not flicker visible before its coordinate is ready.
#[must_use]
pub fn is_visible(scope: &VisibilityScope, pickup: Option<&GeoPoint>) -> bool {
    let Some(reference) = scope.reference.as_ref() else {
        return false;
    };
    let Some(pickup) = pickup else {
        return false;
    };
    reference.haversine_km(pickup) <= scope.radius_km
}
