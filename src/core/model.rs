// Stormwatch - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no provider dependencies (Core depends on std + serde only).
//
// These types are the shared vocabulary across all layers. Every
// provider response is mapped into a `WeatherReport` regardless of the
// source's native structure.

use serde::{Deserialize, Serialize};

// =============================================================================
// Weather report (normalised output of the data-access layer)
// =============================================================================

/// A complete dashboard payload for one queried location.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    /// Current conditions at the resolved place.
    pub current: CurrentConditions,

    /// Daily forecast cards, at most `MAX_FORECAST_DAYS` entries.
    pub forecast: Vec<ForecastDay>,

    /// Disaster alerts overlaid on the weather data. Never empty: the
    /// alert pipeline synthesises an "all clear" advisory as a last resort.
    pub alerts: Vec<DisasterAlert>,
}

/// Current conditions, rounded for display.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    /// Resolved display name, e.g. "Mumbai, India".
    pub location: String,

    /// Air temperature in degrees Celsius.
    pub temperature_c: i32,

    /// Apparent temperature in degrees Celsius.
    pub feels_like_c: i32,

    /// Relative humidity, 0-100.
    pub humidity_pct: i32,

    /// Wind speed in km/h.
    pub wind_kmh: i32,

    /// Short display condition, e.g. "Partly Cloudy".
    pub condition: String,

    /// Which data source produced this report.
    pub source: DataSource,

    /// Resolved coordinates (None for fixture data).
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One daily forecast card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    /// Short weekday name, e.g. "Mon".
    pub day: String,

    /// Daily maximum temperature in degrees Celsius.
    pub high_c: i32,

    /// Daily minimum temperature in degrees Celsius.
    pub low_c: i32,

    /// Short display condition.
    pub condition: String,
}

// =============================================================================
// Disaster alerts
// =============================================================================

/// Normalised alert severity, ordered from most to least severe.
///
/// The feed's status strings (alert, current, ongoing, past, ...) are
/// mapped to one of these variants by the alert pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum AlertSeverity {
    Warning,
    Watch,
    #[default]
    Advisory,
}

impl AlertSeverity {
    /// Returns all variants in display order (most severe first).
    pub fn all() -> &'static [AlertSeverity] {
        &[
            AlertSeverity::Warning,
            AlertSeverity::Watch,
            AlertSeverity::Advisory,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Warning => "Warning",
            AlertSeverity::Watch => "Watch",
            AlertSeverity::Advisory => "Advisory",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A structured disaster-alert record shown alongside weather data.
#[derive(Debug, Clone, Serialize)]
pub struct DisasterAlert {
    /// Stable identifier ("RW-<feed id>" for feed items).
    pub id: String,

    /// Disaster kind, e.g. "Flood", "Earthquake", "Info".
    pub kind: String,

    /// Normalised severity.
    pub severity: AlertSeverity,

    /// Headline.
    pub title: String,

    /// Longer description text.
    pub description: String,

    /// Affected area display name.
    pub area: String,
}

// =============================================================================
// Data source toggle
// =============================================================================

/// Which backend answers a weather query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    /// Built-in demo dataset; works offline and always succeeds.
    Fixtures,

    /// Open-Meteo geocoding + forecast. No API key needed.
    #[default]
    OpenMeteo,

    /// OpenWeather current + 5-day forecast. Requires an API key.
    OpenWeather,
}

impl DataSource {
    /// Returns all variants in selector display order.
    pub fn all() -> &'static [DataSource] {
        &[
            DataSource::Fixtures,
            DataSource::OpenMeteo,
            DataSource::OpenWeather,
        ]
    }

    /// Human-readable label for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Fixtures => "Demo data",
            DataSource::OpenMeteo => "Open-Meteo (Live)",
            DataSource::OpenWeather => "OpenWeather (Live)",
        }
    }

    /// CLI/config identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            DataSource::Fixtures => "fixtures",
            DataSource::OpenMeteo => "open-meteo",
            DataSource::OpenWeather => "openweather",
        }
    }

    /// Parse a CLI/config identifier. Accepts the slug plus a few
    /// common spellings.
    pub fn parse(s: &str) -> Option<DataSource> {
        match s.trim().to_lowercase().as_str() {
            "fixtures" | "mock" | "demo" => Some(DataSource::Fixtures),
            "open-meteo" | "openmeteo" => Some(DataSource::OpenMeteo),
            "openweather" | "open-weather" => Some(DataSource::OpenWeather),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Flood prediction exchange types
// =============================================================================

/// Manually entered hydrological readings sent to the prediction service.
///
/// Field names are the service's wire contract; do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodIndicators {
    /// Rain over the last 24 hours, mm.
    pub rain_mm: f64,

    /// Accumulated rain over the last 3 days, mm.
    pub rain3d_mm: f64,

    /// Current river gauge level, metres.
    pub river_level_m: f64,

    /// The river's official danger level, metres.
    pub danger_level_m: f64,

    /// Soil moisture saturation, 0-100 %.
    pub soil_moist_pct: f64,

    /// Rain in the upstream catchment, mm.
    pub upstream_rain_mm: f64,
}

/// Assessment returned by the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodAssessment {
    /// 0 = Low, 1 = Moderate, 2 = High.
    pub severity_index: u8,

    /// Display label matching `severity_index`.
    pub severity_label: String,

    /// 1 when the service's rule-based threshold alert fired.
    pub tba_alert: u8,

    /// Held-out test accuracy of the service's model, 0-1.
    pub model_accuracy: f64,
}

// =============================================================================
// Fetch progress (for UI updates)
// =============================================================================

/// Progress messages sent from the fetch worker to the UI thread.
#[derive(Debug, Clone)]
pub enum FetchProgress {
    /// The worker has started handling the query.
    Started { query: String, source: DataSource },

    /// The place name resolved to coordinates (live sources only).
    Geocoded {
        place: String,
        latitude: f64,
        longitude: f64,
    },

    /// The full report is ready.
    Completed { report: Box<WeatherReport> },

    /// A non-fatal problem occurred (e.g. the alert feed was down).
    Warning { message: String },

    /// The fetch failed with a user-facing message.
    Failed { error: String },

    /// The fetch was cancelled before completion.
    Cancelled,
}

/// Progress messages sent from the prediction worker to the UI thread.
#[derive(Debug, Clone)]
pub enum PredictProgress {
    /// The service returned an assessment.
    Completed { assessment: FloodAssessment },

    /// The request failed with a user-facing message.
    Failed { error: String },
}
