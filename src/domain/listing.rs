//! The shipment listing record.
//!
//! [`Listing`] is the canonical record owned by the listing store. The
//! `trip_color` and `icon` fields are derived display attributes: they are
//! always recomputed from `cargo_type` via the enrichment lookup table and
//! never treated as authoritative data.

use serde::{Deserialize, Serialize};

use super::ListingId;

/// One shipment offer.
///
/// Timestamps (`created_at`, `pickup_date`, `delivery_date`) are carried as
/// ISO-8601 text exactly as the backend delivers them; the engine never
/// interprets them. Numeric fields parse leniently from the tabular feed
/// (invalid or missing values become zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Stable identifier (backend-assigned).
    pub id: ListingId,
    /// Identifier of the owning user.
    pub user_id: String,
    /// Free-text pickup location.
    pub pickup_location: String,
    /// Free-text delivery location.
    pub delivery_location: String,
    /// Pickup city.
    pub pickup_city: String,
    /// Delivery city.
    pub delivery_city: String,
    /// Numeric trip distance.
    pub trip_distance: f64,
    /// Unit of `trip_distance` (e.g. `"km"`).
    pub distance_unit: String,
    /// Cargo category; the enrichment lookup key.
    pub cargo_type: String,
    /// Listing title.
    pub title: String,
    /// Item quantity.
    pub quantity: u32,
    /// Cargo weight.
    pub weight: f64,
    /// Unit of `weight` (e.g. `"kg"`).
    pub weight_unit: String,
    /// Dimension summary (free text, e.g. `"1x1x1"`).
    pub dimensions: String,
    /// Number of offers received.
    pub offer_count: u32,
    /// Lowest offer received.
    pub min_offer: f64,
    /// Highest offer received.
    pub max_offer: f64,
    /// Offer currency code.
    pub currency: String,
    /// Creation timestamp (ISO-8601 text).
    pub created_at: String,
    /// Requested pickup date (ISO-8601 text).
    pub pickup_date: String,
    /// Requested delivery date (ISO-8601 text).
    pub delivery_date: String,
    /// Derived display color. Not authoritative; overwritten by enrichment.
    #[serde(default)]
    pub trip_color: String,
    /// Derived display icon. Not authoritative; overwritten by enrichment.
    #[serde(default)]
    pub icon: String,
    /// Counterpart party first name.
    pub contact_name: String,
    /// Counterpart party surname.
    pub contact_surname: String,
    /// Counterpart party rating.
    pub contact_rating: f64,
    /// Counterpart party language code.
    pub contact_language: String,
}

impl Listing {
    /// Maps one tabular-feed row into a listing by fixed column order.
    ///
    /// Out-of-range columns default to the empty string; numeric columns
    /// parse leniently (unparseable → 0). `trip_color` and `icon` are left
    /// empty pending enrichment.
    #[must_use]
    pub fn from_row(row: &[String]) -> Self {
        Self {
            id: ListingId::from(col(row, 0)),
            user_id: col(row, 1).to_string(),
            pickup_location: col(row, 2).to_string(),
            delivery_location: col(row, 3).to_string(),
            pickup_city: col(row, 4).to_string(),
            delivery_city: col(row, 5).to_string(),
            trip_distance: num(row, 6),
            distance_unit: col(row, 7).to_string(),
            cargo_type: col(row, 8).to_string(),
            title: col(row, 9).to_string(),
            quantity: int(row, 10),
            weight: num(row, 11),
            weight_unit: col(row, 12).to_string(),
            dimensions: col(row, 13).to_string(),
            offer_count: int(row, 14),
            min_offer: num(row, 15),
            max_offer: num(row, 16),
            currency: col(row, 17).to_string(),
            created_at: col(row, 18).to_string(),
            pickup_date: col(row, 19).to_string(),
            delivery_date: col(row, 20).to_string(),
            trip_color: String::new(),
            icon: String::new(),
            contact_name: col(row, 21).to_string(),
            contact_surname: col(row, 22).to_string(),
            contact_rating: num(row, 23),
            contact_language: col(row, 24).to_string(),
        }
    }
}

/// Returns column `idx` of `row`, or `""` when out of range.
fn col(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

/// Lenient float parse of column `idx`; unparseable values become `0.0`.
fn num(row: &[String], idx: usize) -> f64 {
    col(row, idx).trim().parse().unwrap_or(0.0)
}

/// Lenient integer parse of column `idx`; unparseable values become `0`.
fn int(row: &[String], idx: usize) -> u32 {
    col(row, idx).trim().parse().unwrap_or(0)
}
