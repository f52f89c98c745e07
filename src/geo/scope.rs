//! The currently active visibility scope.

use crate::domain::GeoPoint;

/// How the reference point was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    /// Device-reported position.
    Device,
    /// A user-chosen place whose coordinate was resolved by geocoding.
    Place,
}

/// Reference point + radius used to filter listings geographically.
///
/// Derived state, never persisted. Recomputed whenever the reference point,
/// the radius, or listing coordinates change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityScope {
    /// The point distances are measured from, when one is resolved.
    pub reference: Option<GeoPoint>,
    /// Current radius in kilometres.
    pub radius_km: f64,
    /// How the reference point was obtained.
    pub mode: ScopeMode,
}

impl VisibilityScope {
    /// Default radius in kilometres.
    pub const DEFAULT_RADIUS_KM: f64 = 200.0;

    /// Creates a scope with no reference point and the given radius.
    #[must_use]
    pub const fn new(radius_km: f64) -> Self {
        Self {
            reference: None,
            radius_km,
            mode: ScopeMode::Device,
        }
    }

    /// Sets the reference point and its resolution mode.
    pub fn set_reference(&mut self, point: GeoPoint, mode: ScopeMode) {
        self.reference = Some(point);
        self.mode = mode;
    }

    /// Clears the reference point; visibility fails closed until a new one
    /// is resolved.
    pub fn clear_reference(&mut self) {
        self.reference = None;
    }

    /// Sets the radius, clamped to `[0, max_km]` and snapped to the given
    /// step granularity.
    pub fn set_radius(&mut self, radius_km: f64, max_km: f64, step_km: f64) {
        let clamped = radius_km.clamp(0.0, max_km);
        self.radius_km = if step_km > 0.0 {
            (clamped / step_km).round() * step_km
        } else {
            clamped
        };
    }
}

impl Default for VisibilityScope {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS_KM)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_radius_is_200() {
        let scope = VisibilityScope::default();
        assert!((scope.radius_km - 200.0).abs() < f64::EPSILON);
        assert!(scope.reference.is_none());
    }

    #[test]
    fn radius_is_clamped_to_bounds() {
        let mut scope = VisibilityScope::default();
        scope.set_radius(5_000.0, 1_000.0, 10.0);
        assert!((scope.radius_km - 1_000.0).abs() < f64::EPSILON);

        scope.set_radius(-50.0, 1_000.0, 10.0);
        assert!(scope.radius_km.abs() < f64::EPSILON);
    }

    #[test]
    fn radius_snaps_to_step() {
        let mut scope = VisibilityScope::default();
        scope.set_radius(123.0, 1_000.0, 10.0);
        assert!((scope.radius_km - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reference_can_be_set_and_cleared() {
        let mut scope = VisibilityScope::default();
        scope.set_reference(GeoPoint::new(41.0, 29.0), ScopeMode::Place);
        assert!(scope.reference.is_some());
        assert_eq!(scope.mode, ScopeMode::Place);

        scope.clear_reference();
        assert!(scope.reference.is_none());
    }
}
