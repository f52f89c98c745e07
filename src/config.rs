//! Engine configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`) and every one of them has a default, so
//! the engine always starts.

/// Which listing backend to select at composition time.
///
/// The choice is fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Backend A: the read-only tabular feed.
    Tabular,
    /// Backend B: the structured remote service.
    Remote,
}

/// Top-level engine configuration.
///
/// Loaded once at startup via [`EngineConfig::from_env`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Which backend to construct.
    pub backend: BackendKind,

    /// Primary tabular feed export URL.
    pub feed_url: String,

    /// Alternate feed export URL, tried when the primary returns HTML.
    pub feed_alt_url: String,

    /// Primary enrichment lookup dataset URL.
    pub lookup_url: String,

    /// Alternate lookup URL, tried when the primary returns HTML.
    pub lookup_alt_url: String,

    /// Base URL of the structured remote service.
    pub remote_base_url: String,

    /// Bearer token for the remote service.
    pub remote_auth_token: String,

    /// SQLite connection string for the durable local cache.
    pub cache_url: String,

    /// Geocoding endpoint URL.
    pub geocoder_url: String,

    /// Default visibility radius in kilometres.
    pub default_radius_km: f64,

    /// Upper bound for the user-adjustable radius.
    pub max_radius_km: f64,

    /// Step granularity the radius snaps to.
    pub radius_step_km: f64,

    /// Settle delay after a route transition before tiers are recomputed,
    /// in milliseconds.
    pub settle_delay_ms: u64,

    /// Capacity of the engine event broadcast channel.
    pub event_bus_capacity: usize,

    /// HTTP client timeout in seconds.
    pub http_timeout_secs: u64,
}

impl EngineConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set or unparseable.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let backend = match std::env::var("BACKEND").ok().as_deref() {
            Some("remote") | Some("REMOTE") => BackendKind::Remote,
            _ => BackendKind::Tabular,
        };

        Self {
            backend,
            feed_url: parse_env_string("FEED_URL", "http://localhost:8080/export.csv"),
            feed_alt_url: parse_env_string("FEED_ALT_URL", "http://localhost:8080/export2.csv"),
            lookup_url: parse_env_string("LOOKUP_URL", "http://localhost:8080/lookup.csv"),
            lookup_alt_url: parse_env_string(
                "LOOKUP_ALT_URL",
                "http://localhost:8080/lookup2.csv",
            ),
            remote_base_url: parse_env_string("REMOTE_BASE_URL", "http://localhost:8081/api"),
            remote_auth_token: parse_env_string("REMOTE_AUTH_TOKEN", ""),
            cache_url: parse_env_string("CACHE_URL", "sqlite://loadboard-cache.db?mode=rwc"),
            geocoder_url: parse_env_string("GEOCODER_URL", "http://localhost:8082/geocode"),
            default_radius_km: parse_env("DEFAULT_RADIUS_KM", 200.0),
            max_radius_km: parse_env("MAX_RADIUS_KM", 1_000.0),
            radius_step_km: parse_env("RADIUS_STEP_KM", 10.0),
            settle_delay_ms: parse_env("SETTLE_DELAY_MS", 300),
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", 1_024),
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", 30),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads an environment variable as a string with a default.
fn parse_env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
