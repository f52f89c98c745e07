//! Persistence layer: the durable local listing cache.
//!
//! A single SQLite key-value table holds the serialized listing collection,
//! its last-update timestamp, and the two enrichment maps under independent
//! keys, so a partial enrichment failure never discards cached listings.

pub mod cache;

pub use cache::ListingCache;
