// Stormwatch - net/open_meteo.rs
//
// Open-Meteo forecast fetch and response mapping. No API key required,
// which is why this is the default live source.

use crate::core::conditions::condition_for_wmo_code;
use crate::core::forecast::short_weekday;
use crate::core::model::{CurrentConditions, DataSource, ForecastDay, WeatherReport};
use crate::net::geocoding::GeocodedPlace;
use crate::net::send_with_retry;
use crate::util::constants::{FEELS_LIKE_OFFSET_C, MAX_FORECAST_DAYS};
use crate::util::error::WeatherError;
use serde::Deserialize;

const PROVIDER: &str = "Open-Meteo";

// =============================================================================
// Raw response shapes
// =============================================================================

/// Raw response of `GET /v1/forecast`.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: CurrentWeatherBlock,
    #[serde(default)]
    pub hourly: HourlyBlock,
    pub daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherBlock {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: u8,
}

#[derive(Debug, Default, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub relativehumidity_2m: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub weathercode: Vec<u8>,
}

// =============================================================================
// Fetch + map
// =============================================================================

/// Fetch and map the forecast for an already-geocoded place.
///
/// The returned report has no alerts; the alert overlay is a separate
/// pipeline stage.
pub fn fetch_report(
    client: &reqwest::blocking::Client,
    base_url: &str,
    place: &GeocodedPlace,
) -> Result<WeatherReport, WeatherError> {
    let url = format!("{base_url}/forecast");
    let latitude = place.latitude.to_string();
    let longitude = place.longitude.to_string();

    let request = client.get(&url).query(&[
        ("latitude", latitude.as_str()),
        ("longitude", longitude.as_str()),
        ("current_weather", "true"),
        ("hourly", "relativehumidity_2m"),
        ("daily", "temperature_2m_max,temperature_2m_min,weathercode"),
        ("timezone", "auto"),
    ]);

    let response = send_with_retry(request).map_err(|e| WeatherError::Http {
        provider: PROVIDER,
        url: url.clone(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(WeatherError::BadStatus {
            provider: PROVIDER,
            url,
            status,
        });
    }

    let decoded: ForecastResponse = response.json().map_err(|e| WeatherError::Http {
        provider: PROVIDER,
        url: url.clone(),
        source: e,
    })?;

    Ok(map_report(decoded, place))
}

/// Reshape the raw response into the core model.
///
/// Current humidity comes from the first hourly sample; the provider's
/// current block has no humidity field in this shape. Feels-like is an
/// approximation, as there is no apparent-temperature field either.
pub fn map_report(response: ForecastResponse, place: &GeocodedPlace) -> WeatherReport {
    let current = &response.current_weather;

    let humidity_pct = response
        .hourly
        .relativehumidity_2m
        .first()
        .map(|h| h.round() as i32)
        .unwrap_or(0);

    let daily = &response.daily;
    let days = daily
        .time
        .len()
        .min(daily.temperature_2m_max.len())
        .min(daily.temperature_2m_min.len())
        .min(daily.weathercode.len())
        .min(MAX_FORECAST_DAYS);

    let forecast = (0..days)
        .map(|i| ForecastDay {
            day: short_weekday(&daily.time[i]),
            high_c: daily.temperature_2m_max[i].round() as i32,
            low_c: daily.temperature_2m_min[i].round() as i32,
            condition: condition_for_wmo_code(daily.weathercode[i]).to_string(),
        })
        .collect();

    WeatherReport {
        current: CurrentConditions {
            location: place.display_name(),
            temperature_c: current.temperature.round() as i32,
            feels_like_c: (current.temperature - FEELS_LIKE_OFFSET_C).round() as i32,
            humidity_pct,
            wind_kmh: current.windspeed.round() as i32,
            condition: condition_for_wmo_code(current.weathercode).to_string(),
            source: DataSource::OpenMeteo,
            latitude: Some(place.latitude),
            longitude: Some(place.longitude),
        },
        forecast,
        alerts: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place() -> GeocodedPlace {
        GeocodedPlace {
            name: "Mumbai".to_string(),
            country: "India".to_string(),
            latitude: 19.07,
            longitude: 72.88,
        }
    }

    fn response() -> ForecastResponse {
        ForecastResponse {
            current_weather: CurrentWeatherBlock {
                temperature: 30.6,
                windspeed: 13.7,
                weathercode: 61,
            },
            hourly: HourlyBlock {
                relativehumidity_2m: vec![81.4, 79.0],
            },
            daily: DailyBlock {
                time: vec![
                    "2026-08-03".to_string(),
                    "2026-08-04".to_string(),
                    "2026-08-05".to_string(),
                ],
                temperature_2m_max: vec![31.8, 30.9, 32.2],
                temperature_2m_min: vec![26.1, 25.4, 26.0],
                weathercode: vec![61, 3, 95],
            },
        }
    }

    #[test]
    fn test_map_current_conditions() {
        let report = map_report(response(), &place());
        let current = &report.current;
        assert_eq!(current.location, "Mumbai, India");
        assert_eq!(current.temperature_c, 31);
        assert_eq!(current.feels_like_c, 29); // 30.6 - 2.0 rounded
        assert_eq!(current.humidity_pct, 81);
        assert_eq!(current.wind_kmh, 14);
        assert_eq!(current.condition, "Rainy");
        assert_eq!(current.source, DataSource::OpenMeteo);
        assert_eq!(current.latitude, Some(19.07));
    }

    #[test]
    fn test_map_daily_forecast() {
        let report = map_report(response(), &place());
        assert_eq!(report.forecast.len(), 3);
        assert_eq!(report.forecast[0].day, "Mon");
        assert_eq!(report.forecast[0].high_c, 32);
        assert_eq!(report.forecast[0].low_c, 26);
        assert_eq!(report.forecast[1].condition, "Partly Cloudy");
        assert_eq!(report.forecast[2].condition, "Thunderstorm");
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_map_tolerates_missing_hourly_humidity() {
        let mut resp = response();
        resp.hourly.relativehumidity_2m.clear();
        let report = map_report(resp, &place());
        assert_eq!(report.current.humidity_pct, 0);
    }

    #[test]
    fn test_map_truncates_ragged_daily_arrays() {
        let mut resp = response();
        resp.daily.weathercode.truncate(1);
        let report = map_report(resp, &place());
        assert_eq!(report.forecast.len(), 1);
    }
}
