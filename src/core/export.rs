// Stormwatch - core/export.rs
//
// CSV and JSON export of a fetched report.
// Core layer: writes to any Write trait object.

use crate::core::model::{DisasterAlert, WeatherReport};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export the full report as pretty-printed JSON.
pub fn export_report_json<W: Write>(
    report: &WeatherReport,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })
}

/// Export alerts to CSV format.
///
/// Writes: id, kind, severity, title, area, description
pub fn export_alerts_csv<W: Write>(
    alerts: &[DisasterAlert],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["id", "kind", "severity", "title", "area", "description"])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for alert in alerts {
        csv_writer
            .write_record([
                &alert.id,
                &alert.kind,
                alert.severity.label(),
                &alert.title,
                &alert.area,
                &alert.description,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}
