// Stormwatch - tests/e2e_dashboard.rs
//
// End-to-end tests for the dashboard data path.
//
// Two groups:
//   1. Decode-and-map: captured provider payloads on disk are decoded
//      with the real serde shapes and pushed through the real mapping
//      code. No mocks, no hand-built structs.
//   2. Fetch pipeline: the fixture data source runs through the real
//      FetchManager (worker thread + progress channel), which exercises
//      the full path from a query string to a delivered WeatherReport
//      without touching the network.

use std::path::PathBuf;
use std::time::Duration;

use stormwatch::app::fetch::FetchManager;
use stormwatch::core::alerts::select_alerts;
use stormwatch::core::model::{AlertSeverity, DataSource, FetchProgress, FloodAssessment};
use stormwatch::net::geocoding::{select_candidate, GeocodeResponse, GeocodedPlace};
use stormwatch::net::open_meteo;
use stormwatch::net::openweather;
use stormwatch::net::reliefweb;
use stormwatch::platform::config::AppConfig;

// =============================================================================
// Helpers
// =============================================================================

/// Load an on-disk fixture payload.
fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture '{}': {e}", path.display()))
}

/// Drain a fetch until it terminates, collecting every progress message.
fn run_fetch_to_end(query: &str, source: DataSource) -> Vec<FetchProgress> {
    let mut manager = FetchManager::new();
    manager.start_fetch(query.to_string(), source, AppConfig::default());

    let rx = manager
        .progress_rx
        .take()
        .expect("start_fetch should install a receiver");

    let mut messages = Vec::new();
    loop {
        let msg = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("fetch worker should report progress within 5s");
        let terminal = matches!(
            msg,
            FetchProgress::Completed { .. } | FetchProgress::Failed { .. } | FetchProgress::Cancelled
        );
        messages.push(msg);
        if terminal {
            return messages;
        }
    }
}

// =============================================================================
// Decode-and-map: Open-Meteo geocoding
// =============================================================================

/// The captured geocoding payload decodes and the in-country candidate wins.
#[test]
fn e2e_geocode_payload_selects_in_country_candidate() {
    let response: GeocodeResponse =
        serde_json::from_str(&fixture("open_meteo_geocode.json")).expect("decode geocode payload");

    let place = select_candidate(response, "mumbai", "IN").expect("should resolve");
    assert_eq!(place.name, "Mumbai");
    assert_eq!(place.country, "India");
    assert_eq!(place.display_name(), "Mumbai, India");
    assert!((place.latitude - 19.07283).abs() < 1e-6);
    assert!((place.longitude - 72.88261).abs() < 1e-6);
}

/// The same payload resolves to the US homonym when scoped to the US.
#[test]
fn e2e_geocode_payload_respects_country_scope() {
    let response: GeocodeResponse =
        serde_json::from_str(&fixture("open_meteo_geocode.json")).expect("decode geocode payload");

    let place = select_candidate(response, "mumbai", "US").expect("should resolve");
    assert_eq!(place.country, "United States");
}

// =============================================================================
// Decode-and-map: Open-Meteo forecast
// =============================================================================

#[test]
fn e2e_open_meteo_payload_maps_to_report() {
    let response: open_meteo::ForecastResponse =
        serde_json::from_str(&fixture("open_meteo_forecast.json")).expect("decode forecast payload");

    let place = GeocodedPlace {
        name: "Mumbai".to_string(),
        country: "India".to_string(),
        latitude: 19.07283,
        longitude: 72.88261,
    };

    let report = open_meteo::map_report(response, &place);

    // Current block: 29.8 degC, code 80 (rain showers), wind 16.6 km/h,
    // humidity from the first hourly sample.
    assert_eq!(report.current.location, "Mumbai, India");
    assert_eq!(report.current.temperature_c, 30);
    assert_eq!(report.current.feels_like_c, 28);
    assert_eq!(report.current.humidity_pct, 84);
    assert_eq!(report.current.wind_kmh, 17);
    assert_eq!(report.current.condition, "Rainy");
    assert_eq!(report.current.source, DataSource::OpenMeteo);

    // Seven daily entries in the payload, capped at five cards.
    assert_eq!(report.forecast.len(), 5);
    assert_eq!(report.forecast[0].day, "Mon");
    assert_eq!(report.forecast[0].high_c, 31);
    assert_eq!(report.forecast[0].low_c, 26);
    let conditions: Vec<_> = report
        .forecast
        .iter()
        .map(|d| d.condition.as_str())
        .collect();
    assert_eq!(
        conditions,
        vec!["Rainy", "Thunderstorm", "Rainy", "Partly Cloudy", "Rainy"]
    );

    // Alerts are a separate pipeline stage.
    assert!(report.alerts.is_empty());
}

// =============================================================================
// Decode-and-map: OpenWeather
// =============================================================================

#[test]
fn e2e_openweather_payloads_map_to_report() {
    let current: openweather::CurrentResponse =
        serde_json::from_str(&fixture("openweather_current.json")).expect("decode current payload");
    let forecast: openweather::ForecastResponse = serde_json::from_str(&fixture(
        "openweather_forecast.json",
    ))
    .expect("decode forecast payload");

    let report = openweather::map_report(current, forecast).expect("mapping should succeed");

    assert_eq!(report.current.location, "Mumbai, IN");
    assert_eq!(report.current.temperature_c, 29);
    assert_eq!(report.current.feels_like_c, 34);
    assert_eq!(report.current.humidity_pct, 79);
    assert_eq!(report.current.wind_kmh, 17); // 4.63 m/s -> 16.67 km/h
    assert_eq!(report.current.condition, "Rain");
    assert_eq!(report.current.source, DataSource::OpenWeather);
    assert_eq!(report.current.latitude, Some(19.0144));

    // Six 3-hourly samples spanning Mon..Fri collapse into five cards;
    // the first Monday sample defines the Monday card.
    assert_eq!(report.forecast.len(), 5);
    let days: Vec<_> = report.forecast.iter().map(|d| d.day.as_str()).collect();
    assert_eq!(days, vec!["Mon", "Tue", "Wed", "Thu", "Fri"]);
    assert_eq!(report.forecast[0].high_c, 30);
    assert_eq!(report.forecast[0].low_c, 29);
    assert_eq!(report.forecast[0].condition, "Rain");
    assert_eq!(report.forecast[3].condition, "Thunderstorm");
}

// =============================================================================
// Decode-and-map: ReliefWeb feed + alert overlay
// =============================================================================

#[test]
fn e2e_reliefweb_payload_maps_to_alerts() {
    let response: reliefweb::FeedResponse =
        serde_json::from_str(&fixture("reliefweb_disasters.json")).expect("decode feed payload");

    let alerts = reliefweb::map_alerts(response, "India");
    assert_eq!(alerts.len(), 3);

    assert_eq!(alerts[0].id, "RW-52560");
    assert_eq!(alerts[0].kind, "Flood");
    assert_eq!(alerts[0].severity, AlertSeverity::Warning); // status "alert"
    assert_eq!(alerts[0].title, "India: Assam Floods - Jul 2026");
    assert_eq!(alerts[0].area, "India");
    // The list payload carries no description for this item.
    assert_eq!(alerts[0].description, "ReliefWeb reported event");

    assert_eq!(alerts[1].severity, AlertSeverity::Watch); // status "ongoing"
    assert!(alerts[1].description.contains("waterlogging"));
    assert_eq!(alerts[2].severity, AlertSeverity::Advisory); // status "past"
    assert_eq!(alerts[2].kind, "Tropical Cyclone");
}

/// The overlay keeps only feed items mentioning the queried location.
#[test]
fn e2e_alert_overlay_filters_feed_by_location() {
    let response: reliefweb::FeedResponse =
        serde_json::from_str(&fixture("reliefweb_disasters.json")).expect("decode feed payload");
    let feed = reliefweb::map_alerts(response, "India");

    let selected = select_alerts(&feed, &["mumbai".to_string()], &[], "Mumbai");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, "RW-52497");
}

// =============================================================================
// Decode: flood prediction response
// =============================================================================

#[test]
fn e2e_flood_prediction_payload_decodes() {
    let assessment: FloodAssessment =
        serde_json::from_str(&fixture("flood_prediction.json")).expect("decode prediction payload");
    assert_eq!(assessment.severity_index, 1);
    assert_eq!(assessment.severity_label, "Moderate");
    assert_eq!(assessment.tba_alert, 1);
    assert!(assessment.model_accuracy > 0.9);
}

// =============================================================================
// Fetch pipeline E2E (fixture source, no network)
// =============================================================================

/// A fixture-mode fetch delivers Started then Completed with a full report.
#[test]
fn e2e_fixture_fetch_pipeline_completes() {
    let messages = run_fetch_to_end("mumbai", DataSource::Fixtures);

    assert!(
        matches!(messages.first(), Some(FetchProgress::Started { .. })),
        "first message should be Started, got {:?}",
        messages.first()
    );

    let report = match messages.last() {
        Some(FetchProgress::Completed { report }) => report,
        other => panic!("expected Completed, got {other:?}"),
    };

    assert_eq!(report.current.location, "Mumbai, IN");
    assert_eq!(report.current.source, DataSource::Fixtures);
    assert_eq!(report.forecast.len(), 5);
    assert!(!report.alerts.is_empty());
    assert_eq!(report.alerts[0].severity, AlertSeverity::Warning);
}

/// A blank query fails with an actionable message instead of fetching.
#[test]
fn e2e_blank_query_fails_fast() {
    let messages = run_fetch_to_end("   ", DataSource::Fixtures);

    let error = match messages.last() {
        Some(FetchProgress::Failed { error }) => error,
        other => panic!("expected Failed, got {other:?}"),
    };
    assert!(error.contains("Enter a city or state"));
}

/// Locations with no authored alerts still get a synthetic advisory.
#[test]
fn e2e_quiet_fixture_location_gets_synthetic_advisory() {
    let messages = run_fetch_to_end("Jaipur", DataSource::Fixtures);

    let report = match messages.last() {
        Some(FetchProgress::Completed { report }) => report,
        other => panic!("expected Completed, got {other:?}"),
    };

    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].id, "NO-ALERT");
    assert_eq!(report.alerts[0].severity, AlertSeverity::Advisory);
    assert!(report.alerts[0].title.contains("Jaipur"));
}

/// Unknown places fall back to the generic fixture report labelled with
/// the user's own query text.
#[test]
fn e2e_unknown_fixture_location_uses_base_report() {
    let messages = run_fetch_to_end("Springfield", DataSource::Fixtures);

    let report = match messages.last() {
        Some(FetchProgress::Completed { report }) => report,
        other => panic!("expected Completed, got {other:?}"),
    };

    assert_eq!(report.current.location, "Springfield");
    assert_eq!(report.forecast.len(), 5);
    assert_eq!(report.alerts[0].id, "NO-ALERT");
}
