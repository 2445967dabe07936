// Stormwatch - net/geocoding.rs
//
// Place-name resolution via the Open-Meteo geocoding API.
// Candidate selection is pure so it can be tested from captured payloads.

use crate::net::send_with_retry;
use crate::util::constants::GEOCODE_RESULT_LIMIT;
use crate::util::error::GeocodeError;
use serde::Deserialize;

/// Raw response shape of `GET /v1/search`.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Absent entirely when nothing matched.
    #[serde(default)]
    pub results: Option<Vec<GeocodeCandidate>>,
}

/// One candidate place from the geocoder.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeCandidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// A resolved place, ready for a forecast request.
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodedPlace {
    /// "Mumbai, India" style display name.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Resolve a free-text place name to coordinates.
///
/// `country_code` scopes the result to one ISO-3166 alpha-2 country;
/// pass an empty string for a worldwide search.
pub fn resolve(
    client: &reqwest::blocking::Client,
    base_url: &str,
    query: &str,
    country_code: &str,
) -> Result<GeocodedPlace, GeocodeError> {
    let url = format!("{base_url}/search");
    let count = GEOCODE_RESULT_LIMIT.to_string();

    let request = client.get(&url).query(&[
        ("name", query),
        ("count", count.as_str()),
        ("language", "en"),
        ("format", "json"),
    ]);

    let response = send_with_retry(request).map_err(|e| GeocodeError::Http {
        url: url.clone(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeocodeError::BadStatus { url, status });
    }

    let decoded: GeocodeResponse = response.json().map_err(|e| GeocodeError::Http {
        url: url.clone(),
        source: e,
    })?;

    let place = select_candidate(decoded, query, country_code)?;
    tracing::debug!(
        query,
        place = %place.display_name(),
        latitude = place.latitude,
        longitude = place.longitude,
        "Geocoded"
    );
    Ok(place)
}

/// Pick the best candidate: the first result inside the configured
/// country, or the first result overall when no country filter is set.
pub fn select_candidate(
    response: GeocodeResponse,
    query: &str,
    country_code: &str,
) -> Result<GeocodedPlace, GeocodeError> {
    let candidates = response.results.unwrap_or_default();
    if candidates.is_empty() {
        return Err(GeocodeError::NoMatch {
            query: query.to_string(),
        });
    }

    let best = if country_code.is_empty() {
        candidates.into_iter().next()
    } else {
        candidates.into_iter().find(|c| {
            c.country_code
                .as_deref()
                .is_some_and(|cc| cc.eq_ignore_ascii_case(country_code))
        })
    };

    match best {
        Some(c) => Ok(GeocodedPlace {
            name: c.name,
            country: c.country.unwrap_or_default(),
            latitude: c.latitude,
            longitude: c.longitude,
        }),
        None => Err(GeocodeError::NoMatchInCountry {
            query: query.to_string(),
            country: country_code.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, cc: &str) -> GeocodeCandidate {
        let country = match cc {
            "IN" => "India",
            "US" => "United States",
            other => other,
        };
        GeocodeCandidate {
            name: name.to_string(),
            latitude: 19.07,
            longitude: 72.88,
            country: Some(country.to_string()),
            country_code: Some(cc.to_string()),
        }
    }

    #[test]
    fn test_select_first_in_country() {
        let response = GeocodeResponse {
            results: Some(vec![candidate("Mumbai", "US"), candidate("Mumbai", "IN")]),
        };
        let place = select_candidate(response, "mumbai", "IN").unwrap();
        assert_eq!(place.country, "India");
        assert_eq!(place.display_name(), "Mumbai, India");
    }

    #[test]
    fn test_select_no_results_is_no_match() {
        let response = GeocodeResponse { results: None };
        let err = select_candidate(response, "zzz", "IN").unwrap_err();
        assert!(matches!(err, GeocodeError::NoMatch { .. }));
    }

    #[test]
    fn test_select_wrong_country_is_distinct_error() {
        let response = GeocodeResponse {
            results: Some(vec![candidate("Mumbai", "US")]),
        };
        let err = select_candidate(response, "mumbai", "IN").unwrap_err();
        assert!(matches!(err, GeocodeError::NoMatchInCountry { .. }));
    }

    #[test]
    fn test_empty_country_code_takes_first() {
        let response = GeocodeResponse {
            results: Some(vec![candidate("Springfield", "US"), candidate("Springfield", "CA")]),
        };
        let place = select_candidate(response, "springfield", "").unwrap();
        assert_eq!(place.name, "Springfield");
    }
}
