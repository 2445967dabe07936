// Stormwatch - net/openweather.rs
//
// OpenWeather current conditions + 5-day/3-hour forecast. Requires an
// API key; the key is never logged.

use crate::core::forecast::{group_by_day, ForecastSample};
use crate::core::model::{CurrentConditions, DataSource, WeatherReport};
use crate::net::send_with_retry;
use crate::util::error::WeatherError;
use serde::Deserialize;

const PROVIDER: &str = "OpenWeather";

/// m/s to km/h.
const MS_TO_KMH: f64 = 3.6;

// =============================================================================
// Raw response shapes
// =============================================================================

/// Raw response of `GET /weather`.
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub main: MainBlock,
    #[serde(default)]
    pub weather: Vec<WeatherBlock>,
    pub wind: WindBlock,
    pub name: String,
    #[serde(default)]
    pub sys: SysBlock,
    #[serde(default)]
    pub coord: Option<CoordBlock>,
}

#[derive(Debug, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherBlock {
    pub main: String,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    pub speed: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SysBlock {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoordBlock {
    pub lat: f64,
    pub lon: f64,
}

/// Raw response of `GET /forecast` (3-hourly samples, 5 days).
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (UTC seconds).
    pub dt: i64,
    pub main: EntryMain,
    #[serde(default)]
    pub weather: Vec<WeatherBlock>,
}

#[derive(Debug, Deserialize)]
pub struct EntryMain {
    pub temp_max: f64,
    pub temp_min: f64,
}

// =============================================================================
// Fetch + map
// =============================================================================

/// Fetch current conditions and the 5-day forecast for a place name.
///
/// `place` is queried as `<place>,<country_code>` when a country code
/// is configured. Fails fast when no API key is available.
pub fn fetch_report(
    client: &reqwest::blocking::Client,
    base_url: &str,
    api_key: &str,
    place: &str,
    country_code: &str,
) -> Result<WeatherReport, WeatherError> {
    if api_key.is_empty() {
        return Err(WeatherError::MissingApiKey { provider: PROVIDER });
    }

    let q = if country_code.is_empty() {
        place.to_string()
    } else {
        format!("{place},{country_code}")
    };

    let current: CurrentResponse = get_json(client, &format!("{base_url}/weather"), &q, api_key)?;
    let forecast: ForecastResponse = get_json(client, &format!("{base_url}/forecast"), &q, api_key)?;

    map_report(current, forecast)
}

fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: &str,
    q: &str,
    api_key: &str,
) -> Result<T, WeatherError> {
    let request = client
        .get(url)
        .query(&[("q", q), ("units", "metric"), ("appid", api_key)]);

    let response = send_with_retry(request).map_err(|e| WeatherError::Http {
        provider: PROVIDER,
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(WeatherError::BadStatus {
            provider: PROVIDER,
            url: url.to_string(),
            status,
        });
    }

    response.json().map_err(|e| WeatherError::Http {
        provider: PROVIDER,
        url: url.to_string(),
        source: e,
    })
}

/// Reshape the two raw responses into the core model.
pub fn map_report(
    current: CurrentResponse,
    forecast: ForecastResponse,
) -> Result<WeatherReport, WeatherError> {
    let condition = current
        .weather
        .first()
        .map(|w| w.main.clone())
        .ok_or(WeatherError::MissingField {
            provider: PROVIDER,
            field: "weather[0]",
        })?;

    let location = match current.sys.country.as_deref() {
        Some(country) if !country.is_empty() => format!("{}, {}", current.name, country),
        _ => current.name.clone(),
    };

    let samples: Vec<ForecastSample> = forecast
        .list
        .iter()
        .map(|entry| ForecastSample {
            timestamp_utc: entry.dt,
            high_c: entry.main.temp_max,
            low_c: entry.main.temp_min,
            condition: entry
                .weather
                .first()
                .map(|w| w.main.clone())
                .unwrap_or_else(|| "Cloudy".to_string()),
        })
        .collect();

    Ok(WeatherReport {
        current: CurrentConditions {
            location,
            temperature_c: current.main.temp.round() as i32,
            feels_like_c: current.main.feels_like.round() as i32,
            humidity_pct: current.main.humidity.round() as i32,
            wind_kmh: (current.wind.speed * MS_TO_KMH).round() as i32,
            condition,
            source: DataSource::OpenWeather,
            latitude: current.coord.as_ref().map(|c| c.lat),
            longitude: current.coord.as_ref().map(|c| c.lon),
        },
        forecast: group_by_day(&samples),
        alerts: Vec::new(),
    })
}
