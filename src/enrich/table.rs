//! The enrichment lookup table and its application to listings.

use std::collections::HashMap;

use crate::domain::Listing;
use crate::error::EngineError;
use crate::ingest::DelimitedRows;

use super::columns::resolve_columns;

/// Prefix stripped from icon values before they are recorded.
const ICON_PREFIX: &str = "lucide/";

/// Category → display attribute maps built from the lookup dataset.
///
/// The color and icon maps are independent: a missing or malformed icon
/// column never affects color resolution, and the two are persisted under
/// separate cache keys so a partial failure cannot corrupt the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentTable {
    color_map: HashMap<String, String>,
    icon_map: HashMap<String, String>,
}

impl EnrichmentTable {
    /// Creates a table from previously persisted maps.
    #[must_use]
    pub fn from_maps(
        color_map: HashMap<String, String>,
        icon_map: HashMap<String, String>,
    ) -> Self {
        Self {
            color_map,
            icon_map,
        }
    }

    /// Builds a fresh table from raw delimited lookup text.
    ///
    /// The first non-empty row is the header; columns are resolved per
    /// [`resolve_columns`]. Data rows contribute a color entry when both
    /// category and color cells are non-empty, and independently an icon
    /// entry when both category and icon cells are non-empty (with the
    /// `lucide/` prefix stripped).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchemaResolution`] when the mandatory columns
    /// cannot be located; the caller keeps its existing maps in that case.
    pub fn from_text(text: &str) -> Result<Self, EngineError> {
        let view = DelimitedRows::new(text);
        let mut rows = view.rows().skip_while(|row| is_blank(row));

        let header = rows
            .next()
            .ok_or_else(|| EngineError::SchemaResolution("empty lookup dataset".to_string()))?;
        let cols = resolve_columns(&header)?;

        let mut table = Self::default();
        for row in rows {
            if is_blank(&row) {
                continue;
            }
            let category = cell(&row, cols.category);
            if category.is_empty() {
                continue;
            }

            let color = cell(&row, cols.color);
            if !color.is_empty() {
                table
                    .color_map
                    .insert(category.to_string(), color.to_string());
            }

            if let Some(icon_idx) = cols.icon {
                let icon = cell(&row, icon_idx);
                let icon = icon.strip_prefix(ICON_PREFIX).unwrap_or(icon);
                if !icon.is_empty() {
                    table
                        .icon_map
                        .insert(category.to_string(), icon.to_string());
                }
            }
        }
        Ok(table)
    }

    /// Returns `true` when both maps are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color_map.is_empty() && self.icon_map.is_empty()
    }

    /// Returns the color map (persisted under its own cache key).
    #[must_use]
    pub fn color_map(&self) -> &HashMap<String, String> {
        &self.color_map
    }

    /// Returns the icon map (persisted under its own cache key).
    #[must_use]
    pub fn icon_map(&self) -> &HashMap<String, String> {
        &self.icon_map
    }

    /// Looks up the color for a category: exact match first, then a
    /// case-insensitive scan.
    #[must_use]
    pub fn color_for(&self, category: &str) -> Option<&str> {
        lookup(&self.color_map, category)
    }

    /// Looks up the icon for a category: exact match first, then a
    /// case-insensitive scan.
    #[must_use]
    pub fn icon_for(&self, category: &str) -> Option<&str> {
        lookup(&self.icon_map, category)
    }

    /// Applies the table to every listing, overwriting derived display
    /// attributes that differ from the current mapping.
    ///
    /// Listings without a match keep their prior values; they are never
    /// dropped. Returns the number of listings changed so the caller knows
    /// whether the collection needs to be re-persisted.
    pub fn apply(&self, listings: &mut [Listing]) -> usize {
        let mut changed = 0;
        for listing in listings {
            let mut touched = false;
            if let Some(color) = self.color_for(&listing.cargo_type)
                && listing.trip_color != color
            {
                listing.trip_color = color.to_string();
                touched = true;
            }
            if let Some(icon) = self.icon_for(&listing.cargo_type)
                && listing.icon != icon
            {
                listing.icon = icon.to_string();
                touched = true;
            }
            if touched {
                changed += 1;
            }
        }
        changed
    }
}

/// Exact lookup, then a linear case-insensitive scan of the whole map.
fn lookup<'a>(map: &'a HashMap<String, String>, category: &str) -> Option<&'a str> {
    if let Some(value) = map.get(category) {
        return Some(value);
    }
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(category))
        .map(|(_, value)| value.as_str())
}

/// A row with no non-empty cell.
fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Returns cell `idx` trimmed, or `""` when out of range.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", |c| c.trim())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ListingId;

    const LOOKUP: &str = "\
id,cargo_type,trip_color,icon
1,Electronics,#FF0000,lucide/package
2,Furniture,#00FF00,sofa
3,,#0000FF,ghost
4,Food,,
";

    fn table() -> EnrichmentTable {
        match EnrichmentTable::from_text(LOOKUP) {
            Ok(t) => t,
            Err(e) => panic!("build failed: {e}"),
        }
    }

    fn listing(cargo_type: &str) -> Listing {
        let mut l = Listing::from_row(&["x1".to_string()]);
        l.id = ListingId::from("x1");
        l.cargo_type = cargo_type.to_string();
        l
    }

    #[test]
    fn builds_both_maps_independently() {
        let t = table();
        assert_eq!(t.color_for("Electronics"), Some("#FF0000"));
        assert_eq!(t.icon_for("Electronics"), Some("package"));
        assert_eq!(t.color_for("Furniture"), Some("#00FF00"));
        assert_eq!(t.icon_for("Furniture"), Some("sofa"));
    }

    #[test]
    fn strips_lucide_prefix() {
        let t = table();
        assert_eq!(t.icon_for("Electronics"), Some("package"));
    }

    #[test]
    fn rejects_empty_category_and_empty_values() {
        let t = table();
        // Row 3 has an empty category, row 4 empty color and icon.
        assert_eq!(t.color_map().len(), 2);
        assert_eq!(t.icon_map().len(), 2);
        assert_eq!(t.color_for("Food"), None);
    }

    #[test]
    fn lookup_is_exact_then_case_insensitive() {
        let t = table();
        assert_eq!(t.color_for("electronics"), Some("#FF0000"));
        assert_eq!(t.color_for("ELECTRONICS"), Some("#FF0000"));
        assert_eq!(t.color_for("Gadgets"), None);
    }

    #[test]
    fn apply_overwrites_derived_attributes() {
        let t = table();
        let mut listings = vec![listing("Electronics"), listing("Unknown")];
        let changed = t.apply(&mut listings);
        assert_eq!(changed, 1);

        let Some(first) = listings.first() else {
            panic!("missing listing");
        };
        assert_eq!(first.trip_color, "#FF0000");
        assert_eq!(first.icon, "package");

        // No match: prior (empty) values are kept, listing not dropped.
        let Some(second) = listings.get(1) else {
            panic!("missing listing");
        };
        assert!(second.trip_color.is_empty());
    }

    #[test]
    fn apply_is_idempotent() {
        let t = table();
        let mut listings = vec![listing("Electronics")];
        assert_eq!(t.apply(&mut listings), 1);
        assert_eq!(t.apply(&mut listings), 0);
    }

    #[test]
    fn missing_mandatory_columns_abort() {
        let result = EnrichmentTable::from_text("a,b\n1,2\n");
        assert!(matches!(result, Err(EngineError::SchemaResolution(_))));
    }

    #[test]
    fn empty_input_aborts() {
        let result = EnrichmentTable::from_text("");
        assert!(matches!(result, Err(EngineError::SchemaResolution(_))));
    }
}
