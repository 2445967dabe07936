// Stormwatch - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Stormwatch";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Stormwatch";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Provider endpoints
// =============================================================================

/// Open-Meteo forecast API base URL (no API key required).
pub const DEFAULT_OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Open-Meteo geocoding API base URL.
pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1";

/// OpenWeather API base URL (requires an API key).
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// ReliefWeb disasters feed base URL.
pub const DEFAULT_RELIEFWEB_BASE_URL: &str = "https://api.reliefweb.int/v1/disasters";

/// Flood-prediction service endpoint (companion service, local by default).
pub const DEFAULT_PREDICTION_ENDPOINT: &str = "http://127.0.0.1:5000/api/predict";

/// Environment variable consulted for the OpenWeather API key before config.
pub const OPENWEATHER_API_KEY_ENV: &str = "STORMWATCH_OPENWEATHER_API_KEY";

// =============================================================================
// Provider defaults
// =============================================================================

/// Default ISO-3166 alpha-2 country code used to scope geocoding.
/// Empty string = worldwide.
pub const DEFAULT_COUNTRY_CODE: &str = "IN";

/// Default country name used to filter the ReliefWeb feed.
pub const DEFAULT_ALERT_COUNTRY: &str = "India";

/// Application name reported to the ReliefWeb API (required query parameter).
pub const DEFAULT_ALERT_APP_NAME: &str = "stormwatch-dashboard";

/// Default number of items requested from the alert feed.
pub const DEFAULT_ALERT_LIMIT: usize = 5;

/// Bounds for the configurable alert feed limit.
pub const MIN_ALERT_LIMIT: usize = 1;
pub const MAX_ALERT_LIMIT: usize = 50;

/// Number of candidate places requested from the geocoding endpoint.
/// The first candidate in the configured country wins.
pub const GEOCODE_RESULT_LIMIT: usize = 5;

// =============================================================================
// Report shaping
// =============================================================================

/// Maximum number of daily forecast cards shown.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Number of feed alerts shown when none match the queried location.
pub const FALLBACK_ALERT_COUNT: usize = 3;

/// Feels-like offset (degrees C subtracted from air temperature) used for
/// providers that expose no apparent-temperature field.
pub const FEELS_LIKE_OFFSET_C: f64 = 2.0;

/// Wind speed above which the current-conditions card shows a gusty hint (km/h).
pub const GUSTY_WIND_KMH: i32 = 25;

/// Indoor-comfort humidity band shown on the current-conditions card (%).
pub const HUMIDITY_COMFORT_MIN: i32 = 35;
pub const HUMIDITY_COMFORT_MAX: i32 = 55;

// =============================================================================
// Network limits
// =============================================================================

/// Default per-request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Bounds for the configurable request timeout.
pub const MIN_HTTP_TIMEOUT_SECS: u64 = 1;
pub const MAX_HTTP_TIMEOUT_SECS: u64 = 120;

/// Retry limits for transient network errors (timeout / connect).
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAYS_MS: [u64; 3] = [200, 500, 1000];

// =============================================================================
// Session persistence
// =============================================================================

/// Maximum number of recent queries kept in the session file.
pub const MAX_RECENT_QUERIES: usize = 8;

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Maximum number of fetch-progress messages processed by the UI update loop
/// per frame. Any remaining messages are left in the channel and processed
/// on subsequent frames.
pub const MAX_FETCH_MESSAGES_PER_FRAME: usize = 50;

/// Maximum number of non-fatal warnings accumulated per fetch.
pub const MAX_WARNINGS: usize = 50;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
