// Stormwatch - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Stormwatch operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum StormwatchError {
    /// Resolving a place name to coordinates failed.
    Geocode(GeocodeError),

    /// Fetching or decoding weather data failed.
    Weather(WeatherError),

    /// Fetching the disaster-alert feed failed.
    Alerts(AlertError),

    /// The flood-prediction service call failed.
    Predict(PredictError),

    /// Export operation failed.
    Export(ExportError),
}

impl fmt::Display for StormwatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocode(e) => write!(f, "Geocoding error: {e}"),
            Self::Weather(e) => write!(f, "Weather error: {e}"),
            Self::Alerts(e) => write!(f, "Alert feed error: {e}"),
            Self::Predict(e) => write!(f, "Prediction error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for StormwatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geocode(e) => Some(e),
            Self::Weather(e) => Some(e),
            Self::Alerts(e) => Some(e),
            Self::Predict(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Geocoding errors
// ---------------------------------------------------------------------------

/// Errors from the place-name lookup.
#[derive(Debug)]
pub enum GeocodeError {
    /// The geocoding service returned no candidates at all.
    NoMatch { query: String },

    /// Candidates were returned, but none in the configured country.
    NoMatchInCountry { query: String, country: String },

    /// The request itself failed (connect, timeout, decode).
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch { query } => {
                write!(f, "No place found matching '{query}'")
            }
            Self::NoMatchInCountry { query, country } => write!(
                f,
                "No place matching '{query}' in country '{country}'. \
                 Try another city or state, or clear country_code in config.toml."
            ),
            Self::Http { url, source } => {
                write!(f, "Geocoding request to '{url}' failed: {source}")
            }
            Self::BadStatus { url, status } => {
                write!(f, "Geocoding service '{url}' returned HTTP {status}")
            }
        }
    }
}

impl std::error::Error for GeocodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<GeocodeError> for StormwatchError {
    fn from(e: GeocodeError) -> Self {
        Self::Geocode(e)
    }
}

// ---------------------------------------------------------------------------
// Weather provider errors
// ---------------------------------------------------------------------------

/// Errors from the weather providers.
#[derive(Debug)]
pub enum WeatherError {
    /// The selected provider needs an API key and none is configured.
    MissingApiKey { provider: &'static str },

    /// The request itself failed (connect, timeout, decode).
    Http {
        provider: &'static str,
        url: String,
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    BadStatus {
        provider: &'static str,
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response decoded but a required field was empty or absent.
    MissingField {
        provider: &'static str,
        field: &'static str,
    },
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey { provider } => write!(
                f,
                "{provider} requires an API key. Set {} or \
                 [providers] openweather_api_key in config.toml.",
                crate::util::constants::OPENWEATHER_API_KEY_ENV
            ),
            Self::Http {
                provider,
                url,
                source,
            } => write!(f, "{provider} request to '{url}' failed: {source}"),
            Self::BadStatus {
                provider,
                url,
                status,
            } => write!(f, "{provider} '{url}' returned HTTP {status}"),
            Self::MissingField { provider, field } => {
                write!(f, "{provider} response is missing '{field}'")
            }
        }
    }
}

impl std::error::Error for WeatherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<WeatherError> for StormwatchError {
    fn from(e: WeatherError) -> Self {
        Self::Weather(e)
    }
}

// ---------------------------------------------------------------------------
// Alert feed errors
// ---------------------------------------------------------------------------

/// Errors from the disaster-alert feed. Always non-fatal to a fetch:
/// the caller degrades to fixture alerts or a synthetic advisory.
#[derive(Debug)]
pub enum AlertError {
    /// The request itself failed (connect, timeout, decode).
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The feed answered with a non-success status.
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl fmt::Display for AlertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { url, source } => {
                write!(f, "Alert feed request to '{url}' failed: {source}")
            }
            Self::BadStatus { url, status } => {
                write!(f, "Alert feed '{url}' returned HTTP {status}")
            }
        }
    }
}

impl std::error::Error for AlertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<AlertError> for StormwatchError {
    fn from(e: AlertError) -> Self {
        Self::Alerts(e)
    }
}

// ---------------------------------------------------------------------------
// Prediction errors
// ---------------------------------------------------------------------------

/// Errors from the flood-prediction service.
#[derive(Debug)]
pub enum PredictError {
    /// The request itself failed (connect, timeout, decode).
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The service rejected the request; body text is preserved because the
    /// service returns a JSON error message for invalid inputs.
    Rejected {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { url, source } => write!(
                f,
                "Prediction request to '{url}' failed: {source}. \
                 Is the prediction service running?"
            ),
            Self::Rejected { url, status, body } => {
                write!(f, "Prediction service '{url}' returned HTTP {status}: {body}")
            }
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PredictError> for StormwatchError {
    fn from(e: PredictError) -> Self {
        Self::Predict(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for StormwatchError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for Stormwatch results.
pub type Result<T> = std::result::Result<T, StormwatchError>;
