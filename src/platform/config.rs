// Stormwatch - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Stormwatch data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/stormwatch/ or %APPDATA%\Stormwatch\)
    pub config_dir: PathBuf,

    /// Data directory for the session file.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[network]` section.
    pub network: NetworkSection,
    /// `[providers]` section.
    pub providers: ProvidersSection,
    /// `[alerts]` section.
    pub alerts: AlertsSection,
    /// `[prediction]` section.
    pub prediction: PredictionSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[network]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// User-Agent header override.
    pub user_agent: Option<String>,
}

/// `[providers]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ProvidersSection {
    /// Open-Meteo forecast base URL.
    pub open_meteo_base_url: Option<String>,
    /// Open-Meteo geocoding base URL.
    pub geocoding_base_url: Option<String>,
    /// OpenWeather base URL.
    pub openweather_base_url: Option<String>,
    /// OpenWeather API key (the env var takes precedence).
    pub openweather_api_key: Option<String>,
    /// ISO-3166 alpha-2 country scope for geocoding. Empty = worldwide.
    pub country_code: Option<String>,
}

/// `[alerts]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AlertsSection {
    /// Disaster feed base URL.
    pub base_url: Option<String>,
    /// Application name reported to the feed.
    pub app_name: Option<String>,
    /// Country name filter for the feed.
    pub country: Option<String>,
    /// Number of items requested.
    pub limit: Option<usize>,
}

/// `[prediction]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PredictionSection {
    /// Flood-prediction service endpoint.
    pub endpoint: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Network --
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header.
    pub user_agent: String,

    // -- Providers --
    pub open_meteo_base_url: String,
    pub geocoding_base_url: String,
    pub openweather_base_url: String,
    /// Resolved OpenWeather key (env var first, then config). Empty = unset.
    pub openweather_api_key: String,
    /// ISO-3166 alpha-2 country scope. Empty = worldwide.
    pub country_code: String,

    // -- Alerts --
    pub alert_base_url: String,
    pub alert_app_name: String,
    pub alert_country: String,
    pub alert_limit: usize,

    // -- Prediction --
    pub prediction_endpoint: String,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: format!("{}/{}", constants::APP_NAME, constants::APP_VERSION),
            open_meteo_base_url: constants::DEFAULT_OPEN_METEO_BASE_URL.to_string(),
            geocoding_base_url: constants::DEFAULT_GEOCODING_BASE_URL.to_string(),
            openweather_base_url: constants::DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            openweather_api_key: String::new(),
            country_code: constants::DEFAULT_COUNTRY_CODE.to_string(),
            alert_base_url: constants::DEFAULT_RELIEFWEB_BASE_URL.to_string(),
            alert_app_name: constants::DEFAULT_ALERT_APP_NAME.to_string(),
            alert_country: constants::DEFAULT_ALERT_COUNTRY.to_string(),
            alert_limit: constants::DEFAULT_ALERT_LIMIT,
            prediction_endpoint: constants::DEFAULT_PREDICTION_ENDPOINT.to_string(),
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning --
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    let raw = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => {
                    tracing::info!(path = %config_path.display(), "Loaded config.toml");
                    raw
                }
                Err(e) => {
                    let msg = format!(
                        "Failed to parse config file '{}': {e}. Using defaults. \
                         See config.example.toml for the expected format.",
                        config_path.display()
                    );
                    tracing::warn!("{}", msg);
                    warnings.push(msg);
                    RawConfig::default()
                }
            },
            Err(e) => {
                let msg = format!(
                    "Could not read config file '{}': {e}. Using defaults.",
                    config_path.display()
                );
                tracing::warn!("{}", msg);
                warnings.push(msg);
                RawConfig::default()
            }
        }
    } else {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        RawConfig::default()
    };

    // Validate each field against named constants, accumulating all warnings.

    // -- Network: timeout_secs --
    if let Some(secs) = raw.network.timeout_secs {
        if (constants::MIN_HTTP_TIMEOUT_SECS..=constants::MAX_HTTP_TIMEOUT_SECS).contains(&secs) {
            config.timeout_secs = secs;
        } else {
            warnings.push(format!(
                "[network] timeout_secs = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_HTTP_TIMEOUT_SECS,
                constants::MAX_HTTP_TIMEOUT_SECS,
                constants::DEFAULT_HTTP_TIMEOUT_SECS,
            ));
        }
    }

    // -- Network: user_agent --
    if let Some(ua) = raw.network.user_agent {
        let ua = ua.trim().to_string();
        if !ua.is_empty() {
            config.user_agent = ua;
        }
    }

    // -- Providers: base URLs --
    apply_url(
        &mut config.open_meteo_base_url,
        raw.providers.open_meteo_base_url,
        "[providers] open_meteo_base_url",
        &mut warnings,
    );
    apply_url(
        &mut config.geocoding_base_url,
        raw.providers.geocoding_base_url,
        "[providers] geocoding_base_url",
        &mut warnings,
    );
    apply_url(
        &mut config.openweather_base_url,
        raw.providers.openweather_base_url,
        "[providers] openweather_base_url",
        &mut warnings,
    );

    // -- Providers: API key (env var takes precedence over config) --
    let env_key = std::env::var(constants::OPENWEATHER_API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    config.openweather_api_key = env_key
        .or_else(|| raw.providers.openweather_api_key.map(|k| k.trim().to_string()))
        .unwrap_or_default();

    // -- Providers: country_code --
    if let Some(cc) = raw.providers.country_code {
        let cc = cc.trim().to_uppercase();
        if cc.is_empty() || (cc.len() == 2 && cc.chars().all(|c| c.is_ascii_alphabetic())) {
            config.country_code = cc;
        } else {
            warnings.push(format!(
                "[providers] country_code = \"{cc}\" is not a two-letter ISO code \
                 (or empty for worldwide). Using default ({}).",
                constants::DEFAULT_COUNTRY_CODE,
            ));
        }
    }

    // -- Alerts --
    apply_url(
        &mut config.alert_base_url,
        raw.alerts.base_url,
        "[alerts] base_url",
        &mut warnings,
    );
    if let Some(name) = raw.alerts.app_name {
        let name = name.trim().to_string();
        if !name.is_empty() {
            config.alert_app_name = name;
        }
    }
    if let Some(country) = raw.alerts.country {
        let country = country.trim().to_string();
        if !country.is_empty() {
            config.alert_country = country;
        }
    }
    if let Some(limit) = raw.alerts.limit {
        if (constants::MIN_ALERT_LIMIT..=constants::MAX_ALERT_LIMIT).contains(&limit) {
            config.alert_limit = limit;
        } else {
            warnings.push(format!(
                "[alerts] limit = {limit} is out of range ({}-{}). Using default ({}).",
                constants::MIN_ALERT_LIMIT,
                constants::MAX_ALERT_LIMIT,
                constants::DEFAULT_ALERT_LIMIT,
            ));
        }
    }

    // -- Prediction --
    apply_url(
        &mut config.prediction_endpoint,
        raw.prediction.endpoint,
        "[prediction] endpoint",
        &mut warnings,
    );

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

/// Accept a URL-ish override: non-empty and http(s). Anything else warns
/// and keeps the current value.
fn apply_url(target: &mut String, value: Option<String>, field: &str, warnings: &mut Vec<String>) {
    if let Some(url) = value {
        let url = url.trim().trim_end_matches('/').to_string();
        if url.starts_with("http://") || url.starts_with("https://") {
            *target = url;
        } else {
            warnings.push(format!(
                "{field} = \"{url}\" does not look like an http(s) URL. Keeping '{target}'.",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_file_returns_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.timeout_secs, constants::DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.country_code, "IN");
        assert_eq!(config.alert_limit, constants::DEFAULT_ALERT_LIMIT);
    }

    #[test]
    fn test_valid_values_are_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [network]
            timeout_secs = 30

            [providers]
            country_code = "np"

            [alerts]
            limit = 10
            country = "Nepal"

            [prediction]
            endpoint = "http://10.0.0.2:5000/api/predict"

            [ui]
            theme = "light"
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.country_code, "NP");
        assert_eq!(config.alert_limit, 10);
        assert_eq!(config.alert_country, "Nepal");
        assert_eq!(config.prediction_endpoint, "http://10.0.0.2:5000/api/predict");
        assert!(!config.dark_mode);
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [network]
            timeout_secs = 0

            [alerts]
            limit = 500

            [ui]
            font_size = 72.0
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.timeout_secs, constants::DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.alert_limit, constants::DEFAULT_ALERT_LIMIT);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_malformed_toml_warns_and_uses_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "this is {{{ not toml");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.timeout_secs, constants::DEFAULT_HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_bad_country_code_warns() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [providers]
            country_code = "IND"
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.country_code, constants::DEFAULT_COUNTRY_CODE);
    }

    #[test]
    fn test_non_http_url_warns_and_keeps_default() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [providers]
            open_meteo_base_url = "ftp://example.com"
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            config.open_meteo_base_url,
            constants::DEFAULT_OPEN_METEO_BASE_URL
        );
    }
}
