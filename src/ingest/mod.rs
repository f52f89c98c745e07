//! Tabular ingestion: quote-aware delimited-text parsing.
//!
//! Both the listing feed (Backend A) and the enrichment lookup dataset are
//! delimited text; this module turns raw text into ordered rows of fields.

pub mod delimited;

pub use delimited::DelimitedRows;
