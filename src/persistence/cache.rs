//! SQLite implementation of the durable local cache.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::Listing;
use crate::error::EngineError;

/// Cache key for the serialized listing collection.
const KEY_LISTINGS: &str = "listings";
/// Cache key for the collection's last-update timestamp.
const KEY_UPDATED_AT: &str = "listings_updated_at";
/// Cache key for the enrichment color map.
const KEY_COLOR_MAP: &str = "color_map";
/// Cache key for the enrichment icon map.
const KEY_ICON_MAP: &str = "icon_map";

/// SQLite-backed key-value cache using `sqlx::SqlitePool`.
///
/// Reads treat corruption and absence as empty state; a broken cache never
/// fails startup, it only logs. Writes that span multiple keys run in one
/// transaction so overlapping loads can never produce a torn cache.
#[derive(Debug, Clone)]
pub struct ListingCache {
    pool: SqlitePool,
}

impl ListingCache {
    /// Creates a cache over the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the cache table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] on database failure.
    pub async fn init(&self) -> Result<(), EngineError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS engine_cache (\
             key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Persists the listing collection and its last-update timestamp in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] on serialization or database failure.
    pub async fn save_listings(
        &self,
        listings: &[Listing],
        updated_at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let json =
            serde_json::to_string(listings).map_err(|e| EngineError::Cache(e.to_string()))?;

        let mut tx = self.pool.begin().await?;
        upsert(&mut tx, KEY_LISTINGS, &json).await?;
        upsert(&mut tx, KEY_UPDATED_AT, &updated_at.to_rfc3339()).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Loads the cached listing collection and its timestamp.
    ///
    /// Absence or corruption reads as `None` (logged, never fatal).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] only on database failure.
    pub async fn load_listings(
        &self,
    ) -> Result<Option<(Vec<Listing>, Option<DateTime<Utc>>)>, EngineError> {
        let Some(json) = self.get(KEY_LISTINGS).await? else {
            return Ok(None);
        };
        let listings: Vec<Listing> = match serde_json::from_str(&json) {
            Ok(listings) => listings,
            Err(e) => {
                tracing::warn!(error = %e, "corrupt listing cache, treating as empty");
                return Ok(None);
            }
        };

        let updated_at = self
            .get(KEY_UPDATED_AT)
            .await?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(Some((listings, updated_at)))
    }

    /// Persists the enrichment color map under its own key.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] on serialization or database failure.
    pub async fn save_color_map(
        &self,
        map: &HashMap<String, String>,
    ) -> Result<(), EngineError> {
        self.save_map(KEY_COLOR_MAP, map).await
    }

    /// Persists the enrichment icon map under its own key.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] on serialization or database failure.
    pub async fn save_icon_map(&self, map: &HashMap<String, String>) -> Result<(), EngineError> {
        self.save_map(KEY_ICON_MAP, map).await
    }

    /// Loads the enrichment color map; absence or corruption reads empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] only on database failure.
    pub async fn load_color_map(&self) -> Result<HashMap<String, String>, EngineError> {
        self.load_map(KEY_COLOR_MAP).await
    }

    /// Loads the enrichment icon map; absence or corruption reads empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] only on database failure.
    pub async fn load_icon_map(&self) -> Result<HashMap<String, String>, EngineError> {
        self.load_map(KEY_ICON_MAP).await
    }

    /// Full cache invalidation: removes every stored key.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cache`] on database failure.
    pub async fn clear(&self) -> Result<(), EngineError> {
        sqlx::query("DELETE FROM engine_cache")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn save_map(&self, key: &str, map: &HashMap<String, String>) -> Result<(), EngineError> {
        let json = serde_json::to_string(map).map_err(|e| EngineError::Cache(e.to_string()))?;
        let mut tx = self.pool.begin().await?;
        upsert(&mut tx, key, &json).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn load_map(&self, key: &str) -> Result<HashMap<String, String>, EngineError> {
        let Some(json) = self.get(key).await? else {
            return Ok(HashMap::new());
        };
        match serde_json::from_str(&json) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt cached map, treating as empty");
                Ok(HashMap::new())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM engine_cache WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }
}

/// Upserts one key inside an open transaction.
async fn upsert(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    key: &str,
    value: &str,
) -> Result<(), EngineError> {
    sqlx::query(
        "INSERT INTO engine_cache (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ListingId;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn make_cache() -> ListingCache {
        // One connection: every connection to `sqlite::memory:` would
        // otherwise see its own database.
        let Ok(pool) = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
        else {
            panic!("in-memory pool failed");
        };
        let cache = ListingCache::new(pool);
        let Ok(()) = cache.init().await else {
            panic!("init failed");
        };
        cache
    }

    fn listings() -> Vec<Listing> {
        ["s1", "s2"]
            .iter()
            .map(|id| {
                let mut l = Listing::from_row(&[(*id).to_string()]);
                l.cargo_type = "Electronics".to_string();
                l.trip_color = "#FF0000".to_string();
                l
            })
            .collect()
    }

    #[tokio::test]
    async fn listings_round_trip() {
        let cache = make_cache().await;
        let stamp = Utc::now();

        let Ok(()) = cache.save_listings(&listings(), stamp).await else {
            panic!("save failed");
        };
        let Ok(Some((loaded, updated_at))) = cache.load_listings().await else {
            panic!("load failed");
        };

        assert_eq!(loaded, listings());
        let Some(updated_at) = updated_at else {
            panic!("missing timestamp");
        };
        assert_eq!(updated_at.timestamp(), stamp.timestamp());
    }

    #[tokio::test]
    async fn empty_cache_reads_as_none() {
        let cache = make_cache().await;
        let Ok(result) = cache.load_listings().await else {
            panic!("load failed");
        };
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn corrupt_listings_read_as_none() {
        let cache = make_cache().await;
        let Ok(_) = sqlx::query(
            "INSERT INTO engine_cache (key, value) VALUES ('listings', 'not json')",
        )
        .execute(&cache.pool)
        .await
        else {
            panic!("insert failed");
        };

        let Ok(result) = cache.load_listings().await else {
            panic!("load failed");
        };
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn maps_are_stored_independently() {
        let cache = make_cache().await;
        let mut colors = HashMap::new();
        colors.insert("Electronics".to_string(), "#FF0000".to_string());

        let Ok(()) = cache.save_color_map(&colors).await else {
            panic!("save failed");
        };

        let Ok(loaded_colors) = cache.load_color_map().await else {
            panic!("load failed");
        };
        let Ok(loaded_icons) = cache.load_icon_map().await else {
            panic!("load failed");
        };

        assert_eq!(loaded_colors, colors);
        assert!(loaded_icons.is_empty());
    }

    #[tokio::test]
    async fn saving_maps_does_not_touch_listings() {
        let cache = make_cache().await;
        let Ok(()) = cache.save_listings(&listings(), Utc::now()).await else {
            panic!("save failed");
        };
        let Ok(()) = cache.save_color_map(&HashMap::new()).await else {
            panic!("save failed");
        };

        let Ok(Some((loaded, _))) = cache.load_listings().await else {
            panic!("load failed");
        };
        assert_eq!(loaded.len(), 2);
        let Some(first) = loaded.first() else {
            panic!("missing listing");
        };
        assert_eq!(first.id, ListingId::from("s1"));
    }

    #[tokio::test]
    async fn clear_invalidates_everything() {
        let cache = make_cache().await;
        let Ok(()) = cache.save_listings(&listings(), Utc::now()).await else {
            panic!("save failed");
        };
        let Ok(()) = cache.clear().await else {
            panic!("clear failed");
        };

        let Ok(result) = cache.load_listings().await else {
            panic!("load failed");
        };
        assert!(result.is_none());
    }
}
