//! Header column resolution for the enrichment lookup dataset.
//!
//! The lookup dataset is semi-structured: column positions drift between
//! exports. Resolution is an ordered list of [`Strategy`] values per column,
//! evaluated first-match-wins. The strategies are data, not branching code,
//! so each list can be tested on its own.

use crate::error::EngineError;

/// Case-insensitive substring synonyms for the category column.
const CATEGORY_SYNONYMS: &[&str] = &["cargotype", "cargo type", "cargo_type"];

/// Case-insensitive substring synonyms for the color column.
const COLOR_SYNONYMS: &[&str] = &["tripcolor", "trip color", "color"];

/// Case-insensitive substring synonyms for the icon column.
const ICON_SYNONYMS: &[&str] = &["icon"];

/// One way of locating a column in the header row.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    /// Case-insensitive substring match of header cells against synonyms.
    ByName(&'static [&'static str]),
    /// Fixed position, valid only when the header row reaches it.
    ByPosition(usize),
    /// The position immediately following the resolved color column.
    AfterColor,
    /// First in-range position from a candidate list.
    FirstInRange(&'static [usize]),
}

/// Ordered strategies for the category column.
const CATEGORY_STRATEGIES: &[Strategy] = &[
    Strategy::ByName(CATEGORY_SYNONYMS),
    Strategy::ByPosition(9),
];

/// Ordered strategies for the color column.
const COLOR_STRATEGIES: &[Strategy] = &[
    Strategy::ByName(COLOR_SYNONYMS),
    Strategy::ByPosition(26),
];

/// Ordered strategies for the icon column.
const ICON_STRATEGIES: &[Strategy] = &[
    Strategy::ByName(ICON_SYNONYMS),
    Strategy::AfterColor,
    Strategy::FirstInRange(&[1, 2, 27]),
];

/// Resolved column indices for one enrichment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Index of the cargo category column.
    pub category: usize,
    /// Index of the display color column.
    pub color: usize,
    /// Index of the icon column, when one could be located.
    pub icon: Option<usize>,
}

/// Resolves the category, color, and icon columns from a header row.
///
/// Category and color are mandatory; when neither name matching nor the
/// positional fallback locates one of them, the enrichment run for this
/// dataset must be aborted. The icon column is optional.
///
/// # Errors
///
/// Returns [`EngineError::SchemaResolution`] when the category or color
/// column cannot be located.
pub fn resolve_columns(header: &[String]) -> Result<ResolvedColumns, EngineError> {
    let category = run_strategies(CATEGORY_STRATEGIES, header, None)
        .ok_or_else(|| EngineError::SchemaResolution("category column not found".to_string()))?;
    let color = run_strategies(COLOR_STRATEGIES, header, None)
        .ok_or_else(|| EngineError::SchemaResolution("color column not found".to_string()))?;
    let icon = run_strategies(ICON_STRATEGIES, header, Some(color));

    Ok(ResolvedColumns {
        category,
        color,
        icon,
    })
}

/// Evaluates an ordered strategy list against the header, first match wins.
fn run_strategies(
    strategies: &[Strategy],
    header: &[String],
    color_column: Option<usize>,
) -> Option<usize> {
    strategies.iter().find_map(|strategy| match strategy {
        Strategy::ByName(synonyms) => find_by_name(header, synonyms),
        Strategy::ByPosition(idx) => (*idx < header.len()).then_some(*idx),
        Strategy::AfterColor => {
            let next = color_column?.checked_add(1)?;
            (next < header.len()).then_some(next)
        }
        Strategy::FirstInRange(candidates) => candidates
            .iter()
            .copied()
            .find(|idx| *idx < header.len()),
    })
}

/// Case-insensitive substring scan of header cells against a synonym set.
fn find_by_name(header: &[String], synonyms: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let cell = cell.to_lowercase();
        synonyms.iter().any(|syn| cell.contains(syn))
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_all_columns_by_name() {
        let h = header(&["id", "Cargo Type", "Trip Color", "Map Icon"]);
        let Ok(cols) = resolve_columns(&h) else {
            panic!("resolution failed");
        };
        assert_eq!(cols.category, 1);
        assert_eq!(cols.color, 2);
        assert_eq!(cols.icon, Some(3));
    }

    #[test]
    fn name_matching_is_case_insensitive_substring() {
        let h = header(&["x", "THE_CARGO_TYPE_COL", "background-color"]);
        let Ok(cols) = resolve_columns(&h) else {
            panic!("resolution failed");
        };
        assert_eq!(cols.category, 1);
        assert_eq!(cols.color, 2);
    }

    #[test]
    fn falls_back_to_fixed_positions() {
        // 28 anonymous columns: category lands at 9, color at 26.
        let h = header(&["c"; 28]);
        let Ok(cols) = resolve_columns(&h) else {
            panic!("resolution failed");
        };
        assert_eq!(cols.category, 9);
        assert_eq!(cols.color, 26);
    }

    #[test]
    fn short_header_without_names_aborts() {
        let h = header(&["a", "b", "c"]);
        let result = resolve_columns(&h);
        assert!(matches!(result, Err(EngineError::SchemaResolution(_))));
    }

    #[test]
    fn icon_defaults_to_position_after_color() {
        let h = header(&["cargo_type", "tripcolor", "something"]);
        let Ok(cols) = resolve_columns(&h) else {
            panic!("resolution failed");
        };
        assert_eq!(cols.color, 1);
        assert_eq!(cols.icon, Some(2));
    }

    #[test]
    fn icon_candidate_positions_when_after_color_is_out_of_range() {
        // Color resolves to the last column, so color+1 is out of range;
        // candidate position 1 is in range and wins.
        let h = header(&["cargo_type", "x", "tripcolor"]);
        let Ok(cols) = resolve_columns(&h) else {
            panic!("resolution failed");
        };
        assert_eq!(cols.color, 2);
        assert_eq!(cols.icon, Some(1));
    }

    #[test]
    fn icon_by_name_wins_over_fallbacks() {
        let h = header(&["icon_id", "cargo_type", "tripcolor", "extra"]);
        let Ok(cols) = resolve_columns(&h) else {
            panic!("resolution failed");
        };
        assert_eq!(cols.icon, Some(0));
    }
}
