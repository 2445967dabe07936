// Stormwatch - app/session.rs
//
// Session persistence: save and restore the last query, data source,
// recent searches, and flood-form values between application restarts.
//
// Design principles:
// - Session is saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good session.
// - Load errors are silently discarded (corrupt or incompatible sessions
//   just start the app fresh rather than surfacing errors to the user).
// - The data directory is created on first save; no user action required.
// - Fetched reports are NOT persisted — the last query is re-fetched on
//   restore so the dashboard always reflects current conditions.

use crate::app::state::AppState;
use crate::core::model::{DataSource, FloodIndicators};
use crate::util::constants::{MAX_RECENT_QUERIES, SESSION_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment this constant whenever `SessionData` gains or removes fields
/// in a breaking way. Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

// =============================================================================
// On-disk data structure
// =============================================================================

/// Complete persistent session snapshot.
///
/// All fields are optional-friendly; deserialisation failures for individual
/// fields are handled by serde defaults so minor format additions are tolerated
/// without bumping the version.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version — must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// The query shown when the app was last used. Restored at startup
    /// and re-fetched automatically.
    pub last_query: Option<String>,

    /// Selected data source.
    #[serde(default)]
    pub data_source: DataSource,

    /// Recent successful queries, newest first.
    #[serde(default)]
    pub recent_queries: Vec<String>,

    /// Flood-form values as last entered.
    #[serde(default)]
    pub flood_form: FloodIndicators,
}

/// Build a snapshot of the persistable subset of `AppState`.
pub fn snapshot(state: &AppState) -> SessionData {
    SessionData {
        version: SESSION_VERSION,
        last_query: state
            .recent_queries
            .first()
            .cloned()
            .or_else(|| Some(state.query.trim().to_string()).filter(|q| !q.is_empty())),
        data_source: state.data_source,
        recent_queries: state.recent_queries.clone(),
        flood_form: state.flood_form,
    }
}

/// Apply a loaded session to fresh state. The last query is queued as
/// the initial fetch rather than fetched here.
pub fn restore(state: &mut AppState, data: SessionData) {
    state.data_source = data.data_source;
    state.recent_queries = data.recent_queries;
    state.recent_queries.truncate(MAX_RECENT_QUERIES);
    state.flood_form = data.flood_form;

    if let Some(query) = data.last_query.filter(|q| !q.trim().is_empty()) {
        state.query = query.clone();
        state.initial_fetch = Some(query);
    }
}

// =============================================================================
// I/O helpers
// =============================================================================

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed.  Returns a descriptive error
/// string suitable for a tracing warn! call; the caller decides whether to
/// surface it to the user (typically it is logged and ignored).
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    // Ensure the parent directory exists before writing.
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create session directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    // Atomic write: write to a sibling temp file then rename.
    // A crash between write and rename loses the new session but never
    // corrupts the previous one (rename is atomic on all supported platforms).
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write session temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise session file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch).  The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // Distinguish "file not found" (normal first run) from other errors.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed — starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch — starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_data() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            last_query: Some("Mumbai".to_string()),
            data_source: DataSource::OpenMeteo,
            recent_queries: vec!["Mumbai".to_string(), "Kerala".to_string()],
            flood_form: FloodIndicators {
                rain_mm: 120.0,
                rain3d_mm: 260.0,
                river_level_m: 51.2,
                danger_level_m: 50.0,
                soil_moist_pct: 70.0,
                upstream_rain_mm: 180.0,
            },
        }
    }

    /// Save and load must round-trip all fields accurately.
    #[test]
    fn test_session_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let original = sample_data();

        save(&original, &path).expect("save should succeed");
        let loaded = load(&path).expect("load should return Some after valid save");

        assert_eq!(loaded.version, SESSION_VERSION);
        assert_eq!(loaded.last_query, original.last_query);
        assert_eq!(loaded.data_source, DataSource::OpenMeteo);
        assert_eq!(loaded.recent_queries, original.recent_queries);
        assert_eq!(loaded.flood_form, original.flood_form);
    }

    /// Load must return None when the file does not exist (first run).
    #[test]
    fn test_session_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.json");
        assert!(load(&path).is_none());
    }

    /// Load must return None when the JSON is malformed rather than panicking.
    #[test]
    fn test_session_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    /// Load must return None when the version field is wrong.
    #[test]
    fn test_session_load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut data = sample_data();
        data.version = 99;
        save(&data, &path).unwrap();
        // (save() writes whatever version we give it — validation is in load().)
        assert!(load(&path).is_none());
    }

    /// A crash during save (temp file exists) must not corrupt the original.
    #[test]
    fn test_session_save_atomic_does_not_corrupt_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        // Write an initial good session.
        let original = sample_data();
        save(&original, &path).unwrap();

        // Simulate a leftover temp file (e.g. from a previous crash).
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, b"garbage").unwrap();

        // Save a new session — should overwrite the temp file and rename correctly.
        let mut updated = sample_data();
        updated.last_query = Some("Assam".to_string());
        save(&updated, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.last_query.as_deref(), Some("Assam"));
    }

    /// A minimal session with only the version field still loads via defaults.
    #[test]
    fn test_session_load_tolerates_missing_optional_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, format!("{{\"version\": {SESSION_VERSION}, \"last_query\": null}}"))
            .unwrap();
        let loaded = load(&path).expect("defaults should fill missing fields");
        assert_eq!(loaded.data_source, DataSource::default());
        assert!(loaded.recent_queries.is_empty());
    }
}
