// Stormwatch - core/alerts.rs
//
// Alert selection: overlay the disaster feed onto a queried location.
// All active steps degrade rather than fail; the caller always gets at
// least one alert record back.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{AlertSeverity, DisasterAlert};
use crate::util::constants::FALLBACK_ALERT_COUNT;

/// Canonical form of a place name for lookups and keyword matching.
pub fn normalise_place(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Map a ReliefWeb disaster status string to a normalised severity.
///
/// "alert" is the feed's active-emergency state; "current"/"ongoing"
/// are monitored situations; "past" and anything unrecognised are
/// informational.
pub fn severity_for_status(status: Option<&str>) -> AlertSeverity {
    match status.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("alert") => AlertSeverity::Warning,
        Some("current") | Some("ongoing") => AlertSeverity::Watch,
        Some("past") => AlertSeverity::Advisory,
        _ => AlertSeverity::Advisory,
    }
}

/// Keep the alerts whose text mentions any of the given keywords
/// (case-insensitive substring over title + description + area).
pub fn filter_for_location(alerts: &[DisasterAlert], keywords: &[String]) -> Vec<DisasterAlert> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| normalise_place(k))
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        return Vec::new();
    }

    alerts
        .iter()
        .filter(|alert| {
            let haystack = format!("{} {} {}", alert.title, alert.description, alert.area)
                .to_lowercase();
            keywords.iter().any(|k| haystack.contains(k.as_str()))
        })
        .cloned()
        .collect()
}

/// The synthetic record shown when every other source came up empty.
pub fn no_alerts_advisory(place: &str) -> DisasterAlert {
    DisasterAlert {
        id: "NO-ALERT".to_string(),
        kind: "Info".to_string(),
        severity: AlertSeverity::Advisory,
        title: format!("No Active Alerts for {place}"),
        description: "No major disasters reported in this region right now.".to_string(),
        area: place.to_string(),
    }
}

/// Choose what the alert panel shows for one query.
///
/// Fallback chain: location-matched feed items, else the first few feed
/// items, else the fixture alerts for known demo locations, else a
/// single synthetic advisory. `feed` should be empty when the feed
/// fetch failed (the caller surfaces that as a warning, not an error).
pub fn select_alerts(
    feed: &[DisasterAlert],
    keywords: &[String],
    fixture_alerts: &[DisasterAlert],
    display_place: &str,
) -> Vec<DisasterAlert> {
    let location_specific = filter_for_location(feed, keywords);
    if !location_specific.is_empty() {
        return location_specific;
    }

    if !feed.is_empty() {
        return feed[..feed.len().min(FALLBACK_ALERT_COUNT)].to_vec();
    }

    if !fixture_alerts.is_empty() {
        return fixture_alerts.to_vec();
    }

    vec![no_alerts_advisory(display_place)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str, title: &str, area: &str) -> DisasterAlert {
        DisasterAlert {
            id: id.to_string(),
            kind: "Flood".to_string(),
            severity: AlertSeverity::Watch,
            title: title.to_string(),
            description: "Heavy rainfall reported.".to_string(),
            area: area.to_string(),
        }
    }

    #[test]
    fn test_severity_for_status() {
        assert_eq!(severity_for_status(Some("alert")), AlertSeverity::Warning);
        assert_eq!(severity_for_status(Some("Current")), AlertSeverity::Watch);
        assert_eq!(severity_for_status(Some("ongoing")), AlertSeverity::Watch);
        assert_eq!(severity_for_status(Some("past")), AlertSeverity::Advisory);
        assert_eq!(severity_for_status(Some("??")), AlertSeverity::Advisory);
        assert_eq!(severity_for_status(None), AlertSeverity::Advisory);
    }

    #[test]
    fn test_filter_matches_any_field_case_insensitive() {
        let alerts = vec![
            alert("1", "Monsoon Flood Watch", "Mumbai Metropolitan Region"),
            alert("2", "Cyclone Update", "Odisha Coast"),
        ];
        let found = filter_for_location(&alerts, &["mumbai".to_string()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_filter_with_no_keywords_matches_nothing() {
        let alerts = vec![alert("1", "Flood", "Assam")];
        assert!(filter_for_location(&alerts, &[]).is_empty());
        assert!(filter_for_location(&alerts, &["  ".to_string()]).is_empty());
    }

    #[test]
    fn test_select_prefers_location_matches() {
        let feed = vec![
            alert("1", "Flood in Kerala", "Kerala"),
            alert("2", "Earthquake", "Gujarat"),
        ];
        let chosen = select_alerts(&feed, &["kerala".to_string()], &[], "Kerala");
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].id, "1");
    }

    #[test]
    fn test_select_falls_back_to_feed_head() {
        let feed: Vec<_> = (0..5)
            .map(|i| alert(&i.to_string(), "Somewhere else", "Elsewhere"))
            .collect();
        let chosen = select_alerts(&feed, &["kerala".to_string()], &[], "Kerala");
        assert_eq!(chosen.len(), FALLBACK_ALERT_COUNT);
        assert_eq!(chosen[0].id, "0");
    }

    #[test]
    fn test_select_falls_back_to_fixtures_then_synthetic() {
        let fixture = vec![alert("fx", "Monsoon Flood Watch", "Mumbai")];
        let chosen = select_alerts(&[], &["mumbai".to_string()], &fixture, "Mumbai");
        assert_eq!(chosen[0].id, "fx");

        let chosen = select_alerts(&[], &["mumbai".to_string()], &[], "Mumbai");
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].id, "NO-ALERT");
        assert_eq!(chosen[0].severity, AlertSeverity::Advisory);
        assert!(chosen[0].title.contains("Mumbai"));
    }
}
