// Stormwatch - net/reliefweb.rs
//
// Disaster-alert feed: latest disasters from the ReliefWeb API,
// filtered to one country, newest first.

use crate::core::alerts::severity_for_status;
use crate::core::model::DisasterAlert;
use crate::net::send_with_retry;
use crate::util::error::AlertError;
use serde::Deserialize;

// =============================================================================
// Raw response shapes
// =============================================================================

/// Raw response of `GET /v1/disasters`.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub data: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
pub struct FeedItem {
    pub id: FeedId,
    #[serde(default)]
    pub fields: FeedFields,
}

/// The feed serialises ids as strings in some endpoints and numbers in
/// others; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for FeedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub primary_country: Option<NamedField>,
    #[serde(default)]
    pub primary_type: Option<NamedField>,
    #[serde(rename = "type", default)]
    pub kinds: Vec<NamedField>,
}

#[derive(Debug, Deserialize)]
pub struct NamedField {
    pub name: String,
}

// =============================================================================
// Fetch + map
// =============================================================================

/// Configuration for the alert feed request.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub base_url: String,
    pub app_name: String,
    pub country: String,
    pub limit: usize,
}

/// Fetch the latest disasters for the configured country.
pub fn fetch_alerts(
    client: &reqwest::blocking::Client,
    query: &FeedQuery,
) -> Result<Vec<DisasterAlert>, AlertError> {
    let limit = query.limit.to_string();

    let request = client.get(&query.base_url).query(&[
        ("appname", query.app_name.as_str()),
        ("limit", limit.as_str()),
        ("sort[]", "date:desc"),
        ("filter[field]", "country"),
        ("filter[value]", query.country.as_str()),
    ]);

    let response = send_with_retry(request).map_err(|e| AlertError::Http {
        url: query.base_url.clone(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AlertError::BadStatus {
            url: query.base_url.clone(),
            status,
        });
    }

    let decoded: FeedResponse = response.json().map_err(|e| AlertError::Http {
        url: query.base_url.clone(),
        source: e,
    })?;

    let alerts = map_alerts(decoded, &query.country);
    tracing::debug!(count = alerts.len(), country = %query.country, "Alert feed fetched");
    Ok(alerts)
}

/// Reshape feed items into alert records.
///
/// The list endpoint returns a sparse field set; every field therefore
/// has a fallback so a thin item still renders as a useful card.
pub fn map_alerts(response: FeedResponse, default_country: &str) -> Vec<DisasterAlert> {
    response
        .data
        .into_iter()
        .map(|item| {
            let fields = item.fields;

            let kind = fields
                .primary_type
                .map(|t| t.name)
                .or_else(|| fields.kinds.into_iter().next().map(|t| t.name))
                .unwrap_or_else(|| "Info".to_string());

            let area = fields
                .primary_country
                .map(|c| c.name)
                .unwrap_or_else(|| default_country.to_string());

            DisasterAlert {
                id: format!("RW-{}", item.id),
                kind,
                severity: severity_for_status(fields.status.as_deref()),
                title: fields
                    .name
                    .unwrap_or_else(|| "ReliefWeb Alert".to_string()),
                description: fields
                    .description
                    .unwrap_or_else(|| "ReliefWeb reported event".to_string()),
                area,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::AlertSeverity;

    #[test]
    fn test_map_full_item() {
        let response = FeedResponse {
            data: vec![FeedItem {
                id: FeedId::Number(52431),
                fields: FeedFields {
                    name: Some("India: Assam Floods - Jul 2026".to_string()),
                    status: Some("alert".to_string()),
                    description: Some("Flooding across several districts.".to_string()),
                    primary_country: Some(NamedField {
                        name: "India".to_string(),
                    }),
                    primary_type: Some(NamedField {
                        name: "Flood".to_string(),
                    }),
                    kinds: vec![],
                },
            }],
        };

        let alerts = map_alerts(response, "India");
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.id, "RW-52431");
        assert_eq!(alert.kind, "Flood");
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.title, "India: Assam Floods - Jul 2026");
        assert_eq!(alert.area, "India");
    }

    #[test]
    fn test_map_sparse_item_uses_fallbacks() {
        let response = FeedResponse {
            data: vec![FeedItem {
                id: FeedId::Text("9".to_string()),
                fields: FeedFields::default(),
            }],
        };

        let alerts = map_alerts(response, "India");
        let alert = &alerts[0];
        assert_eq!(alert.id, "RW-9");
        assert_eq!(alert.kind, "Info");
        assert_eq!(alert.severity, AlertSeverity::Advisory);
        assert_eq!(alert.title, "ReliefWeb Alert");
        assert_eq!(alert.area, "India");
    }

    #[test]
    fn test_map_kind_falls_back_to_type_list() {
        let response = FeedResponse {
            data: vec![FeedItem {
                id: FeedId::Number(1),
                fields: FeedFields {
                    kinds: vec![NamedField {
                        name: "Tropical Cyclone".to_string(),
                    }],
                    ..Default::default()
                },
            }],
        };
        assert_eq!(map_alerts(response, "India")[0].kind, "Tropical Cyclone");
    }
}
