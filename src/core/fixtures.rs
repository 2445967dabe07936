// Stormwatch - core/fixtures.rs
//
// Built-in demo dataset: hand-authored reports for a set of monsoon-belt
// locations, used by the Fixtures data source and as the alert fallback
// for live sources. Always answers; unknown places get a generic report
// labelled with the user's own query text.
// Core layer: pure data, no I/O.

use crate::core::alerts::normalise_place;
use crate::core::model::{
    AlertSeverity, CurrentConditions, DataSource, DisasterAlert, ForecastDay, WeatherReport,
};

/// Canonical names of the built-in demo locations, in menu order.
pub const FIXTURE_NAMES: &[&str] = &[
    "Mumbai",
    "Kerala",
    "Assam",
    "Bihar",
    "Punjab",
    "Uttarakhand",
    "Kashmir",
    "Jaipur",
    "Himachal Pradesh",
];

/// Resolve a query to a canonical fixture name.
///
/// Exact match on the normalised name first, then a substring match so
/// variants like "north kashmir" still hit the Kashmir entry.
pub fn resolve_canonical(query: &str) -> Option<&'static str> {
    let key = normalise_place(query);
    if key.is_empty() {
        return None;
    }

    FIXTURE_NAMES
        .iter()
        .find(|name| normalise_place(name) == key)
        .or_else(|| {
            FIXTURE_NAMES
                .iter()
                .find(|name| key.contains(&normalise_place(name)))
        })
        .copied()
}

/// Demo report for a query. Known locations get their authored data;
/// anything else gets the generic base report.
pub fn report_for(query: &str) -> WeatherReport {
    match resolve_canonical(query) {
        Some("Mumbai") => mumbai(),
        Some("Kerala") => kerala(),
        Some("Assam") => assam(),
        Some("Bihar") => bihar(),
        Some("Punjab") => punjab(),
        Some("Uttarakhand") => uttarakhand(),
        Some("Kashmir") => kashmir(),
        Some("Jaipur") => jaipur(),
        Some("Himachal Pradesh") => himachal(),
        _ => base_report(query.trim()),
    }
}

/// Authored alerts for a known location, used by live sources when the
/// feed yields nothing. Empty for unknown places.
pub fn alerts_for(query: &str) -> Vec<DisasterAlert> {
    match resolve_canonical(query) {
        Some(name) => report_for(name).alerts,
        None => Vec::new(),
    }
}

// =============================================================================
// Builders
// =============================================================================

fn current(location: &str, temp: i32, feels: i32, humidity: i32, wind: i32, condition: &str) -> CurrentConditions {
    CurrentConditions {
        location: location.to_string(),
        temperature_c: temp,
        feels_like_c: feels,
        humidity_pct: humidity,
        wind_kmh: wind,
        condition: condition.to_string(),
        source: DataSource::Fixtures,
        latitude: None,
        longitude: None,
    }
}

fn day(name: &str, high: i32, low: i32, condition: &str) -> ForecastDay {
    ForecastDay {
        day: name.to_string(),
        high_c: high,
        low_c: low,
        condition: condition.to_string(),
    }
}

fn alert(
    id: &str,
    kind: &str,
    severity: AlertSeverity,
    title: &str,
    description: &str,
    area: &str,
) -> DisasterAlert {
    DisasterAlert {
        id: id.to_string(),
        kind: kind.to_string(),
        severity,
        title: title.to_string(),
        description: description.to_string(),
        area: area.to_string(),
    }
}

/// Generic humid-subtropical report used for locations outside the demo set.
fn base_report(location: &str) -> WeatherReport {
    WeatherReport {
        current: current(location, 30, 34, 80, 12, "Humid"),
        forecast: vec![
            day("Mon", 32, 27, "Humid"),
            day("Tue", 31, 26, "Cloudy"),
            day("Wed", 30, 25, "Clear"),
            day("Thu", 32, 26, "Humid"),
            day("Fri", 33, 27, "Humid"),
        ],
        alerts: Vec::new(),
    }
}

fn mumbai() -> WeatherReport {
    WeatherReport {
        current: current("Mumbai, IN", 31, 36, 82, 14, "Humid & Cloudy"),
        forecast: vec![
            day("Mon", 32, 27, "Rainy"),
            day("Tue", 31, 26, "Humid"),
            day("Wed", 30, 25, "Cloudy"),
            day("Thu", 31, 26, "Rainy"),
            day("Fri", 32, 27, "Humid"),
        ],
        alerts: vec![alert(
            "MUM-FLOOD-WATCH",
            "Flood",
            AlertSeverity::Warning,
            "Monsoon Flood Watch",
            "Heavy rainfall expected. Possible waterlogging in low-lying areas.",
            "Mumbai Metropolitan Region",
        )],
    }
}

fn kerala() -> WeatherReport {
    WeatherReport {
        current: current("Kerala, IN", 29, 33, 88, 16, "Rainy"),
        forecast: vec![
            day("Mon", 30, 25, "Rainy"),
            day("Tue", 29, 24, "Thunderstorm"),
            day("Wed", 30, 25, "Rainy"),
            day("Thu", 31, 25, "Cloudy"),
            day("Fri", 30, 24, "Rainy"),
        ],
        alerts: vec![alert(
            "KER-RIVER-WATCH",
            "Flood",
            AlertSeverity::Watch,
            "River Level Watch",
            "Periyar and Pamba running above normal after sustained rain.",
            "Central Kerala",
        )],
    }
}

fn assam() -> WeatherReport {
    WeatherReport {
        current: current("Assam, IN", 28, 32, 90, 10, "Rainy"),
        forecast: vec![
            day("Mon", 29, 24, "Rainy"),
            day("Tue", 30, 25, "Rainy"),
            day("Wed", 29, 24, "Thunderstorm"),
            day("Thu", 28, 23, "Rainy"),
            day("Fri", 29, 24, "Cloudy"),
        ],
        alerts: vec![alert(
            "ASM-FLOOD-WARN",
            "Flood",
            AlertSeverity::Warning,
            "Brahmaputra Flood Warning",
            "River above danger level at several gauges; embankment patrols active.",
            "Upper Assam Districts",
        )],
    }
}

fn bihar() -> WeatherReport {
    WeatherReport {
        current: current("Bihar, IN", 33, 38, 75, 9, "Humid"),
        forecast: vec![
            day("Mon", 34, 27, "Humid"),
            day("Tue", 33, 27, "Cloudy"),
            day("Wed", 32, 26, "Rainy"),
            day("Thu", 33, 26, "Rainy"),
            day("Fri", 34, 27, "Humid"),
        ],
        alerts: vec![alert(
            "BIH-KOSI-WATCH",
            "Flood",
            AlertSeverity::Watch,
            "Kosi Barrage Discharge Watch",
            "Upstream releases raising levels in the Kosi basin.",
            "North Bihar",
        )],
    }
}

fn punjab() -> WeatherReport {
    WeatherReport {
        current: current("Punjab, IN", 35, 38, 55, 13, "Clear"),
        forecast: vec![
            day("Mon", 36, 27, "Clear"),
            day("Tue", 37, 28, "Clear"),
            day("Wed", 36, 27, "Partly Cloudy"),
            day("Thu", 35, 26, "Cloudy"),
            day("Fri", 34, 26, "Rainy"),
        ],
        alerts: Vec::new(),
    }
}

fn uttarakhand() -> WeatherReport {
    WeatherReport {
        current: current("Uttarakhand, IN", 22, 21, 70, 8, "Partly Cloudy"),
        forecast: vec![
            day("Mon", 23, 15, "Partly Cloudy"),
            day("Tue", 22, 14, "Rainy"),
            day("Wed", 21, 13, "Rainy"),
            day("Thu", 22, 14, "Thunderstorm"),
            day("Fri", 23, 15, "Cloudy"),
        ],
        alerts: vec![alert(
            "UTK-LANDSLIDE",
            "Landslide",
            AlertSeverity::Watch,
            "Landslide Risk on Hill Routes",
            "Saturated slopes after continuous rain; avoid night travel on valley roads.",
            "Garhwal Himalaya",
        )],
    }
}

fn kashmir() -> WeatherReport {
    WeatherReport {
        current: current("Kashmir, IN", 18, 16, 60, 11, "Partly Cloudy"),
        forecast: vec![
            day("Mon", 19, 10, "Clear"),
            day("Tue", 18, 9, "Partly Cloudy"),
            day("Wed", 17, 9, "Rainy"),
            day("Thu", 16, 8, "Rainy"),
            day("Fri", 17, 9, "Cloudy"),
        ],
        alerts: vec![alert(
            "KAS-JHELUM-ADV",
            "Flood",
            AlertSeverity::Advisory,
            "Jhelum Level Advisory",
            "Levels elevated but below flood declaration mark.",
            "Kashmir Valley",
        )],
    }
}

fn jaipur() -> WeatherReport {
    WeatherReport {
        current: current("Jaipur, IN", 38, 41, 35, 18, "Clear"),
        forecast: vec![
            day("Mon", 39, 28, "Clear"),
            day("Tue", 40, 29, "Clear"),
            day("Wed", 39, 28, "Partly Cloudy"),
            day("Thu", 38, 27, "Clear"),
            day("Fri", 37, 27, "Cloudy"),
        ],
        alerts: Vec::new(),
    }
}

fn himachal() -> WeatherReport {
    WeatherReport {
        current: current("Himachal Pradesh, IN", 20, 19, 72, 7, "Rainy"),
        forecast: vec![
            day("Mon", 21, 13, "Rainy"),
            day("Tue", 20, 12, "Thunderstorm"),
            day("Wed", 19, 12, "Rainy"),
            day("Thu", 20, 13, "Cloudy"),
            day("Fri", 21, 14, "Partly Cloudy"),
        ],
        alerts: vec![alert(
            "HIM-FLASH-FLOOD",
            "Flood",
            AlertSeverity::Warning,
            "Flash Flood Warning",
            "Cloudburst risk in higher reaches; streams may rise without notice.",
            "Kullu & Mandi Districts",
        )],
    }
}
