//! Enrichment lookup: cargo category → display color and icon.
//!
//! A secondary sparse dataset maps each cargo category to a display color
//! and an icon identifier. Column positions in that dataset are inferred
//! from the header row by an ordered list of resolver strategies; the
//! resulting maps are applied to every listing whenever either the listing
//! set or the lookup table changes.

pub mod columns;
pub mod table;

pub use columns::{ResolvedColumns, resolve_columns};
pub use table::EnrichmentTable;
