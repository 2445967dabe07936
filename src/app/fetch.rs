// Stormwatch - app/fetch.rs
//
// Fetch lifecycle management. Orchestrates geocoding, forecast retrieval,
// and the alert overlay on a background thread, sending progress messages
// to the UI thread via an mpsc channel.
//
// Architecture:
//   - `FetchManager` lives on the UI thread; `run_fetch` runs on a background thread.
//   - An `Arc<AtomicBool>` cancel flag allows the UI to stop the fetch cooperatively.
//   - All cross-thread communication is via `FetchProgress` channel messages.
//   - Alert-feed failures are non-fatal; the report degrades to fixture
//     alerts or a synthetic advisory instead.

use crate::core::alerts;
use crate::core::fixtures;
use crate::core::model::{DataSource, FetchProgress, WeatherReport};
use crate::net;
use crate::net::reliefweb::FeedQuery;
use crate::platform::config::AppConfig;
use crate::util::constants::MAX_FETCH_MESSAGES_PER_FRAME;
use crate::util::error::StormwatchError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

// =============================================================================
// FetchManager
// =============================================================================

/// Manages a weather fetch on a background thread.
pub struct FetchManager {
    /// Channel receiver for the UI to poll progress messages.
    pub progress_rx: Option<mpsc::Receiver<FetchProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl FetchManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start fetching `query` from `source`.
    ///
    /// Spawns a background thread immediately; progress is sent over the
    /// channel. If a fetch is already running it is cancelled first.
    pub fn start_fetch(&mut self, query: String, source: DataSource, config: AppConfig) {
        // Cancel any existing fetch.
        self.cancel_fetch();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        std::thread::spawn(move || {
            run_fetch(query, source, config, tx, cancel);
        });

        tracing::info!("Fetch started");
    }

    /// Request cancellation of the running fetch.
    /// The background thread will send `FetchProgress::Cancelled` and exit.
    pub fn cancel_fetch(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking.
    ///
    /// Returns at most MAX_FETCH_MESSAGES_PER_FRAME messages; the rest stay
    /// queued for the next frame.
    pub fn poll_progress(&self) -> Vec<FetchProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < MAX_FETCH_MESSAGES_PER_FRAME {
                match rx.try_recv() {
                    Ok(msg) => messages.push(msg),
                    Err(_) => break,
                }
            }
        }
        messages
    }
}

impl Default for FetchManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background fetch pipeline
// =============================================================================

/// Full fetch pipeline: validate → dispatch on source → alert overlay →
/// delivery.
///
/// Runs on a background thread. Sends `FetchProgress` messages to `tx`.
/// Checks `cancel` between the network stages.
fn run_fetch(
    query: String,
    source: DataSource,
    config: AppConfig,
    tx: mpsc::Sender<FetchProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (UI closed); exit quietly.
            }
        };
    }

    macro_rules! check_cancel {
        () => {
            if cancel.load(Ordering::SeqCst) {
                send!(FetchProgress::Cancelled);
                return;
            }
        };
    }

    send!(FetchProgress::Started {
        query: query.clone(),
        source,
    });

    let trimmed = query.trim().to_string();
    if trimmed.is_empty() {
        send!(FetchProgress::Failed {
            error: "Enter a city or state to search.".to_string(),
        });
        return;
    }

    // Known fixture names resolve to their canonical form so "mumbai"
    // geocodes (and filters alerts) as "Mumbai".
    let fixture_name: Option<&str> = fixtures::resolve_canonical(&trimmed);
    let display_place = fixture_name.unwrap_or(trimmed.as_str()).to_string();

    tracing::info!(query = %trimmed, source = %source.slug(), "Fetching weather");

    // -------------------------------------------------------------------------
    // Fixture mode: no network at all.
    // -------------------------------------------------------------------------
    if source == DataSource::Fixtures {
        let mut report = fixtures::report_for(&trimmed);
        let fixture_alerts = std::mem::take(&mut report.alerts);
        report.alerts = alerts::select_alerts(&[], &[], &fixture_alerts, &display_place);
        send!(FetchProgress::Completed {
            report: Box::new(report),
        });
        return;
    }

    // -------------------------------------------------------------------------
    // Live sources.
    // -------------------------------------------------------------------------
    let client = match net::build_client(config.timeout_secs, &config.user_agent) {
        Ok(c) => c,
        Err(e) => {
            send!(FetchProgress::Failed {
                error: format!("Could not initialise HTTP client: {e}"),
            });
            return;
        }
    };

    check_cancel!();

    let mut report: WeatherReport = match source {
        DataSource::OpenMeteo => {
            // Phase 1: geocode.
            let place = match net::geocoding::resolve(
                &client,
                &config.geocoding_base_url,
                &display_place,
                &config.country_code,
            ) {
                Ok(p) => p,
                Err(e) => {
                    send!(FetchProgress::Failed {
                        error: StormwatchError::from(e).to_string(),
                    });
                    return;
                }
            };

            send!(FetchProgress::Geocoded {
                place: place.display_name(),
                latitude: place.latitude,
                longitude: place.longitude,
            });

            check_cancel!();

            // Phase 2: forecast.
            match net::open_meteo::fetch_report(&client, &config.open_meteo_base_url, &place) {
                Ok(r) => r,
                Err(e) => {
                    send!(FetchProgress::Failed {
                        error: StormwatchError::from(e).to_string(),
                    });
                    return;
                }
            }
        }

        DataSource::OpenWeather => {
            match net::openweather::fetch_report(
                &client,
                &config.openweather_base_url,
                &config.openweather_api_key,
                &display_place,
                &config.country_code,
            ) {
                Ok(r) => r,
                Err(e) => {
                    send!(FetchProgress::Failed {
                        error: StormwatchError::from(e).to_string(),
                    });
                    return;
                }
            }
        }

        // Handled above.
        DataSource::Fixtures => return,
    };

    check_cancel!();

    // -------------------------------------------------------------------------
    // Phase 3: alert overlay (non-fatal).
    // -------------------------------------------------------------------------
    let feed_query = FeedQuery {
        base_url: config.alert_base_url.clone(),
        app_name: config.alert_app_name.clone(),
        country: config.alert_country.clone(),
        limit: config.alert_limit,
    };

    let feed = match net::reliefweb::fetch_alerts(&client, &feed_query) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!(error = %e, "Alert feed unavailable");
            send!(FetchProgress::Warning {
                message: format!("Disaster alerts unavailable: {e}"),
            });
            Vec::new()
        }
    };

    let mut keywords = vec![trimmed.clone()];
    if let Some(name) = fixture_name {
        keywords.push(name.to_string());
    }

    report.alerts = alerts::select_alerts(
        &feed,
        &keywords,
        &fixtures::alerts_for(&trimmed),
        &display_place,
    );

    check_cancel!();

    tracing::info!(
        place = %report.current.location,
        forecast_days = report.forecast.len(),
        alerts = report.alerts.len(),
        "Fetch complete"
    );

    send!(FetchProgress::Completed {
        report: Box::new(report),
    });
}
