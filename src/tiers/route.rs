//! Route-context state machine.
//!
//! The route context is either `NoRoute` or `Active`. Creating a route while
//! one is already active replaces it directly; there is no intermediate
//! `NoRoute` state. Every transition must be accompanied by a synchronous
//! clear of the selection set (enforced by the engine, see
//! `service::engine`).

use crate::domain::{GeoPoint, RouteId};

/// An active multi-stop route.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRoute {
    /// Route identifier, fresh per creation.
    pub id: RouteId,
    /// The route's distinguishing display color.
    pub color: String,
    /// Route origin coordinate.
    pub origin: GeoPoint,
    /// Route destination coordinate.
    pub destination: GeoPoint,
}

/// The current route context.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RouteContext {
    /// No route is active.
    #[default]
    NoRoute,
    /// A route is active.
    Active(ActiveRoute),
}

impl RouteContext {
    /// Transitions to a new active route, replacing any current one.
    ///
    /// Returns the new route's identifier.
    pub fn create(
        &mut self,
        origin: GeoPoint,
        destination: GeoPoint,
        color: impl Into<String>,
    ) -> RouteId {
        let id = RouteId::new();
        *self = Self::Active(ActiveRoute {
            id,
            color: color.into(),
            origin,
            destination,
        });
        id
    }

    /// Transitions to `NoRoute`, returning the deleted route's identifier
    /// when one was active.
    pub fn delete(&mut self) -> Option<RouteId> {
        match std::mem::take(self) {
            Self::NoRoute => None,
            Self::Active(route) => Some(route.id),
        }
    }

    /// Returns the active route, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveRoute> {
        match self {
            Self::NoRoute => None,
            Self::Active(route) => Some(route),
        }
    }
}
