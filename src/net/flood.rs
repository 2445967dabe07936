// Stormwatch - net/flood.rs
//
// Flood-severity prediction: one POST to the companion service. The
// model lives entirely on the service side; this module only moves the
// readings over and the assessment back.

use crate::core::model::{FloodAssessment, FloodIndicators};
use crate::net::send_with_retry;
use crate::util::error::PredictError;

/// Request an assessment for the given readings.
pub fn predict(
    client: &reqwest::blocking::Client,
    endpoint: &str,
    indicators: &FloodIndicators,
) -> Result<FloodAssessment, PredictError> {
    let request = client.post(endpoint).json(indicators);

    let response = send_with_retry(request).map_err(|e| PredictError::Http {
        url: endpoint.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        // The service answers invalid inputs with a JSON error message;
        // preserve the body for the user.
        let body = response
            .text()
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(PredictError::Rejected {
            url: endpoint.to_string(),
            status,
            body,
        });
    }

    let assessment: FloodAssessment = response.json().map_err(|e| PredictError::Http {
        url: endpoint.to_string(),
        source: e,
    })?;

    tracing::debug!(
        severity = %assessment.severity_label,
        tba_alert = assessment.tba_alert,
        "Flood assessment received"
    );

    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use crate::core::model::{FloodAssessment, FloodIndicators};

    /// The wire contract with the service: field names must serialise
    /// exactly as its API expects.
    #[test]
    fn test_indicators_wire_shape() {
        let indicators = FloodIndicators {
            rain_mm: 120.0,
            rain3d_mm: 260.0,
            river_level_m: 51.2,
            danger_level_m: 50.0,
            soil_moist_pct: 70.0,
            upstream_rain_mm: 180.0,
        };

        let json = serde_json::to_value(&indicators).unwrap();
        assert_eq!(json["rain_mm"], 120.0);
        assert_eq!(json["rain3d_mm"], 260.0);
        assert_eq!(json["river_level_m"], 51.2);
        assert_eq!(json["danger_level_m"], 50.0);
        assert_eq!(json["soil_moist_pct"], 70.0);
        assert_eq!(json["upstream_rain_mm"], 180.0);
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_assessment_decodes_service_response() {
        let body = r#"{
            "severity_index": 2,
            "severity_label": "High",
            "tba_alert": 1,
            "model_accuracy": 0.914
        }"#;
        let assessment: FloodAssessment = serde_json::from_str(body).unwrap();
        assert_eq!(assessment.severity_index, 2);
        assert_eq!(assessment.severity_label, "High");
        assert_eq!(assessment.tba_alert, 1);
        assert!((assessment.model_accuracy - 0.914).abs() < f64::EPSILON);
    }
}
