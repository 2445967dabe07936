// Stormwatch - app/predict.rs
//
// Flood-prediction lifecycle. Same worker/channel shape as the fetch
// manager, but a prediction is a single POST with no intermediate
// stages, so there is no cancel flag; a stale result is simply
// dropped when the receiver goes away.

use crate::core::model::{FloodIndicators, PredictProgress};
use crate::net;
use crate::platform::config::AppConfig;
use crate::util::error::StormwatchError;
use std::sync::mpsc;

/// Manages one in-flight prediction request on a background thread.
pub struct PredictManager {
    /// Channel receiver for the UI to poll progress messages.
    pub progress_rx: Option<mpsc::Receiver<PredictProgress>>,
}

impl PredictManager {
    pub fn new() -> Self {
        Self { progress_rx: None }
    }

    /// Send the readings to the prediction service.
    ///
    /// Starting a new request abandons the previous channel; a result
    /// from a superseded request is discarded when its send fails.
    pub fn start_predict(&mut self, indicators: FloodIndicators, config: AppConfig) {
        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        std::thread::spawn(move || {
            run_predict(indicators, config, tx);
        });

        tracing::info!("Prediction requested");
    }

    /// Poll for progress messages without blocking.
    pub fn poll_progress(&self) -> Vec<PredictProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for PredictManager {
    fn default() -> Self {
        Self::new()
    }
}

fn run_predict(
    indicators: FloodIndicators,
    config: AppConfig,
    tx: mpsc::Sender<PredictProgress>,
) {
    let client = match net::build_client(config.timeout_secs, &config.user_agent) {
        Ok(c) => c,
        Err(e) => {
            let _ = tx.send(PredictProgress::Failed {
                error: format!("Could not initialise HTTP client: {e}"),
            });
            return;
        }
    };

    let message = match net::flood::predict(&client, &config.prediction_endpoint, &indicators) {
        Ok(assessment) => PredictProgress::Completed { assessment },
        Err(e) => PredictProgress::Failed {
            error: StormwatchError::from(e).to_string(),
        },
    };

    // Receiver dropped (UI closed or request superseded); nothing to do.
    let _ = tx.send(message);
}
