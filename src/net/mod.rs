// Stormwatch - net/mod.rs
//
// Data-access layer: blocking HTTP requests to the third-party
// geocoding / weather / alert / prediction services, each mapped into
// the core model. Runs only on background worker threads.
//
// Response mapping is kept separate from transport in every module so
// the JSON reshaping can be unit-tested from captured payloads.

pub mod flood;
pub mod geocoding;
pub mod open_meteo;
pub mod openweather;
pub mod reliefweb;

use crate::util::constants::{MAX_RETRIES, RETRY_DELAYS_MS};
use std::time::Duration;

/// Build the shared blocking client.
///
/// One client per fetch worker; connection pooling across the two or
/// three requests of a single fetch is all we need.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent.to_string())
        .build()
}

/// Send a request, retrying transient failures with capped backoff.
///
/// Timeouts and connect errors are retried up to MAX_RETRIES attempts;
/// anything else (including HTTP error statuses, which arrive as `Ok`)
/// is returned immediately.
pub fn send_with_retry(
    builder: reqwest::blocking::RequestBuilder,
) -> reqwest::Result<reqwest::blocking::Response> {
    for attempt in 0..MAX_RETRIES {
        let request = match builder.try_clone() {
            Some(r) => r,
            // Non-cloneable body; fall through to the single attempt below.
            None => break,
        };

        match request.send() {
            Ok(resp) => return Ok(resp),
            Err(e) if is_transient_error(&e) && attempt + 1 < MAX_RETRIES => {
                tracing::debug!(
                    attempt = attempt + 1,
                    error = %e,
                    "Transient network error, retrying"
                );
                std::thread::sleep(Duration::from_millis(RETRY_DELAYS_MS[attempt as usize]));
            }
            Err(e) => return Err(e),
        }
    }

    builder.send()
}

/// Returns true for network errors that are worth retrying.
fn is_transient_error(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect()
}
