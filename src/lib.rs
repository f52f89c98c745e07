//! # loadboard-engine
//!
//! Client-side listing engine for a freight-matching load board.
//!
//! This crate ingests listing data from interchangeable backends (a
//! read-only tabular feed export or a structured remote service), enriches
//! it from a color/icon lookup dataset, caches it durably in SQLite, and
//! maintains the geographic visibility and point-of-interest tier state a
//! map renderer consumes. It holds no pricing or matching logic; this is a
//! data and state coordination layer.
//!
//! ## Architecture
//!
//! ```text
//! Consumers (renderer, CLI)
//!     │
//!     ├── EngineHandle (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── ListingEngine owner task (service/)
//!     │       ├── ListingBackend (backend/: tabular | remote)
//!     │       ├── EnrichmentTable (enrich/)
//!     │       ├── Geocoder + VisibilityScope (geo/)
//!     │       ├── Tier classifier (tiers/)
//!     │       └── ListingCache (persistence/, SQLite)
//!     │
//!     └── DelimitedRows parser (ingest/)
//! ```

pub mod backend;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod geo;
pub mod ingest;
pub mod persistence;
pub mod service;
pub mod tiers;
