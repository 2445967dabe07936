// Stormwatch - app/state.rs
//
// Application state management. Holds the current query, fetched report,
// prediction form, and UI flags. Owned by the eframe::App implementation.

use crate::core::model::{DataSource, FloodAssessment, FloodIndicators, WeatherReport};
use crate::platform::config::{AppConfig, PlatformPaths};
use crate::util::constants::{MAX_RECENT_QUERIES, MAX_WARNINGS};

/// A place resolved during the current fetch, for the status readout.
#[derive(Debug, Clone)]
pub struct ResolvedPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Validated configuration.
    pub config: AppConfig,

    /// Resolved platform paths (session file location).
    pub paths: PlatformPaths,

    /// Search box contents.
    pub query: String,

    /// Selected data source.
    pub data_source: DataSource,

    /// Whether a fetch is currently in progress.
    pub fetch_in_progress: bool,

    /// The last completed report (None until the first search).
    pub report: Option<WeatherReport>,

    /// User-facing error from the last fetch, if it failed.
    pub fetch_error: Option<String>,

    /// Non-fatal warnings accumulated during the current fetch.
    pub warnings: Vec<String>,

    /// Place resolved by the geocoder during the current fetch.
    pub resolved_place: Option<ResolvedPlace>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Most recent successful queries, newest first.
    pub recent_queries: Vec<String>,

    /// Flood form contents.
    pub flood_form: FloodIndicators,

    /// Whether a prediction request is in flight.
    pub predict_in_progress: bool,

    /// The last assessment returned by the prediction service.
    pub flood_assessment: Option<FloodAssessment>,

    /// User-facing error from the last prediction, if it failed.
    pub flood_error: Option<String>,

    /// Whether the About dialog is open.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    // ---- Flags set by panels, handled by the gui update loop ----
    /// A panel requested a fetch for this query.
    pub pending_fetch: Option<String>,

    /// Set at startup when restoring a previous session; fetched once
    /// without clearing the restored state.
    pub initial_fetch: Option<String>,

    /// A panel requested the current fetch be cancelled.
    pub request_cancel: bool,

    /// A panel requested a flood prediction for the current form values.
    pub pending_predict: bool,
}

impl AppState {
    /// Create initial state from validated config.
    pub fn new(config: AppConfig, paths: PlatformPaths, debug_mode: bool) -> Self {
        Self {
            config,
            paths,
            query: String::new(),
            data_source: DataSource::default(),
            fetch_in_progress: false,
            report: None,
            fetch_error: None,
            warnings: Vec::new(),
            resolved_place: None,
            status_message: "Ready. Enter a city or state to begin.".to_string(),
            recent_queries: Vec::new(),
            flood_form: FloodIndicators::default(),
            predict_in_progress: false,
            flood_assessment: None,
            flood_error: None,
            show_about: false,
            debug_mode,
            pending_fetch: None,
            initial_fetch: None,
            request_cancel: false,
            pending_predict: false,
        }
    }

    /// Record a successful query at the head of the recents list,
    /// deduplicated case-insensitively and capped.
    pub fn remember_query(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.recent_queries
            .retain(|q| !q.eq_ignore_ascii_case(query));
        self.recent_queries.insert(0, query.to_string());
        self.recent_queries.truncate(MAX_RECENT_QUERIES);
    }

    /// Append a non-fatal warning, bounded.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() < MAX_WARNINGS {
            self.warnings.push(message);
        }
    }

    /// Reset the dashboard to its empty state (Back to home).
    pub fn clear_results(&mut self) {
        self.query.clear();
        self.report = None;
        self.fetch_error = None;
        self.warnings.clear();
        self.resolved_place = None;
        self.status_message = "Ready.".to_string();
    }

    /// Persist the session; failures are logged and otherwise ignored.
    pub fn save_session(&self) {
        let data = crate::app::session::snapshot(self);
        let path = crate::app::session::session_path(&self.paths.data_dir);
        if let Err(e) = crate::app::session::save(&data, &path) {
            tracing::warn!(error = %e, "Could not save session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::config::AppConfig;
    use std::path::PathBuf;

    fn state() -> AppState {
        let paths = PlatformPaths {
            config_dir: PathBuf::from("."),
            data_dir: PathBuf::from("."),
        };
        AppState::new(AppConfig::default(), paths, false)
    }

    #[test]
    fn test_remember_query_dedupes_and_caps() {
        let mut state = state();
        for q in ["Mumbai", "Kerala", "mumbai", "Assam"] {
            state.remember_query(q);
        }
        // "mumbai" replaced the earlier "Mumbai" entry.
        assert_eq!(state.recent_queries, vec!["Assam", "mumbai", "Kerala"]);

        for i in 0..20 {
            state.remember_query(&format!("place-{i}"));
        }
        assert_eq!(state.recent_queries.len(), MAX_RECENT_QUERIES);
        assert_eq!(state.recent_queries[0], "place-19");
    }

    #[test]
    fn test_remember_query_ignores_blank() {
        let mut state = state();
        state.remember_query("   ");
        assert!(state.recent_queries.is_empty());
    }

    #[test]
    fn test_warnings_are_bounded() {
        let mut state = state();
        for i in 0..(MAX_WARNINGS + 10) {
            state.push_warning(format!("warning {i}"));
        }
        assert_eq!(state.warnings.len(), MAX_WARNINGS);
    }

    #[test]
    fn test_clear_results() {
        let mut state = state();
        state.query = "Mumbai".to_string();
        state.fetch_error = Some("boom".to_string());
        state.report = Some(crate::core::fixtures::report_for("Mumbai"));
        state.clear_results();
        assert!(state.query.is_empty());
        assert!(state.report.is_none());
        assert!(state.fetch_error.is_none());
    }
}
