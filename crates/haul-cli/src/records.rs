//! # Record Files
//!
//! Driver, shipment and route snapshots are read from disk. Files ending in
//! `.yaml` or `.yml` are parsed as YAML, everything else as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Serialization format of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    /// Format implied by the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Read and deserialize one record file.
pub fn load_record<T: DeserializeOwned>(kind: &str, path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {kind} file: {}", path.display()))?;
    let record = match RecordFormat::from_path(path) {
        RecordFormat::Yaml => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML in {kind} file {}", path.display()))?,
        RecordFormat::Json => serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON in {kind} file {}", path.display()))?,
    };
    tracing::debug!(kind, path = %path.display(), "loaded record");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use haul_compliance::{Driver, DriverStatus, Route};
    use std::io::Write;

    fn file_with(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(RecordFormat::from_path(Path::new("d.yaml")), RecordFormat::Yaml);
        assert_eq!(RecordFormat::from_path(Path::new("d.YML")), RecordFormat::Yaml);
        assert_eq!(RecordFormat::from_path(Path::new("d.json")), RecordFormat::Json);
        assert_eq!(RecordFormat::from_path(Path::new("driver")), RecordFormat::Json);
    }

    #[test]
    fn loads_yaml_driver() {
        let f = file_with(
            ".yaml",
            "driver_id: DRV-1\nstatus: suspended\nhos_driving_hours_today: 1\nhos_on_duty_hours_today: 2\nclearinghouse_status: pending\n",
        );
        let d: Driver = load_record("driver", f.path()).unwrap();
        assert_eq!(d.status, DriverStatus::Suspended);
        assert!(!d.lease_agreement_signed);
    }

    #[test]
    fn loads_json_route() {
        let f = file_with(".json", r#"{"estimated_drive_time": 6.5, "destination": "Atlanta, GA"}"#);
        let r: Route = load_record("route", f.path()).unwrap();
        assert_eq!(r.estimated_drive_time, 6.5);
    }

    #[test]
    fn parse_error_names_the_file() {
        let f = file_with(".json", "{ not json");
        let err = load_record::<Route>("route", f.path()).unwrap_err();
        assert!(err.to_string().contains("invalid JSON in route file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_record::<Route>("route", Path::new("/nonexistent/route.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read route file"));
    }
}
