// Stormwatch - core/forecast.rs
//
// Forecast shaping: collapse a provider's sample list into at most
// MAX_FORECAST_DAYS daily cards. Core layer: pure logic; providers map
// their JSON into `ForecastSample` before calling in here.

use crate::core::model::ForecastDay;
use crate::util::constants::MAX_FORECAST_DAYS;
use chrono::{DateTime, NaiveDate};

/// One provider-neutral forecast sample.
///
/// For 3-hourly feeds (OpenWeather) there are many samples per day; for
/// daily feeds (Open-Meteo) exactly one.
#[derive(Debug, Clone)]
pub struct ForecastSample {
    /// Unix timestamp (UTC seconds) of the sample.
    pub timestamp_utc: i64,

    /// Sampled maximum temperature, degrees Celsius.
    pub high_c: f64,

    /// Sampled minimum temperature, degrees Celsius.
    pub low_c: f64,

    /// Short display condition.
    pub condition: String,
}

/// Group samples into daily cards keyed by short weekday name.
///
/// The first sample seen for a given weekday defines that day's card;
/// later samples for the same day are ignored. Samples with timestamps
/// outside chrono's representable range are skipped.
pub fn group_by_day(samples: &[ForecastSample]) -> Vec<ForecastDay> {
    let mut days: Vec<ForecastDay> = Vec::with_capacity(MAX_FORECAST_DAYS);

    for sample in samples {
        if days.len() >= MAX_FORECAST_DAYS {
            break;
        }

        let day = match DateTime::from_timestamp(sample.timestamp_utc, 0) {
            Some(ts) => ts.format("%a").to_string(),
            None => continue,
        };

        if days.iter().any(|d| d.day == day) {
            continue;
        }

        days.push(ForecastDay {
            day,
            high_c: sample.high_c.round() as i32,
            low_c: sample.low_c.round() as i32,
            condition: sample.condition.clone(),
        });
    }

    days
}

/// Short weekday name ("Mon") for an ISO calendar date ("2026-08-03").
///
/// Returns the raw input unchanged when it does not parse, so a
/// provider quirk degrades to an odd label rather than a dropped card.
pub fn short_weekday(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        Ok(date) => date.format("%a").to_string(),
        Err(_) => iso_date.to_string(),
    }
}
