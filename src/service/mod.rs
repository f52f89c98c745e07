//! Service layer: the single-owner listing engine.
//!
//! All shared mutable state (listings, enrichment maps, scope, tiers) lives
//! inside one owner task; every mutation is an [`EngineCommand`] on its mpsc
//! channel, and spawned network tasks report back the same way.

pub mod commands;
pub mod engine;

pub use commands::EngineCommand;
pub use engine::{EngineHandle, EngineSnapshot, ListingEngine};
