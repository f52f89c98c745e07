//! POI tiers and route selection state.
//!
//! Classifies in-scope listings into the render tiers (Preview, Bookmarked,
//! Selected) and governs the route-context transitions that must never let
//! the renderer observe a stale Selected tier alongside a new route context.

pub mod classifier;
pub mod route;
pub mod selection;

pub use classifier::{ClassifierInput, Tier, classify, tier_of};
pub use route::{ActiveRoute, RouteContext};
pub use selection::{BookmarkSet, SelectionSet};
