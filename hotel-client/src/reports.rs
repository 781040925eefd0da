//! Report views and export

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use shared::models::{ReportKind, ReportQuery, ReportSnapshot};

use crate::api::HotelApi;
use crate::client::HttpClient;
use crate::error::{ClientResult, ValidationError};
use crate::storage::StorageError;
use crate::validation::validate_date_range;

/// Ranged report, validated before it is requested
pub async fn fetch_report<H: HttpClient>(
    api: &HotelApi<H>,
    kind: ReportKind,
    query: &ReportQuery,
) -> ClientResult<ReportSnapshot> {
    validate_date_range(query.start_date, query.end_date)?;
    tracing::debug!(%kind, start = %query.start_date, end = %query.end_date, "Fetching report");
    api.report(kind, query).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub const fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ValidationError::new(
                "format",
                format!("Unsupported export format: {}", other),
            )
            .with_code(shared::error::ErrorCode::ReportExportFailed)),
        }
    }
}

/// A rendered report ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportExport {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

impl ReportExport {
    /// Write into `dir` under the export filename
    pub fn save(&self, dir: &Path) -> ClientResult<PathBuf> {
        std::fs::create_dir_all(dir).map_err(StorageError::from)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.body).map_err(StorageError::from)?;
        tracing::info!(path = %path.display(), "Report exported");
        Ok(path)
    }
}

/// `<kind>_report_<start>_<end>.<ext>`
pub fn export_filename(kind: ReportKind, query: &ReportQuery, format: ExportFormat) -> String {
    format!(
        "{}_report_{}_{}.{}",
        kind, query.start_date, query.end_date, format.extension()
    )
}

pub fn export_report(
    kind: ReportKind,
    query: &ReportQuery,
    snapshot: &ReportSnapshot,
    format: ExportFormat,
) -> ClientResult<ReportExport> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&snapshot.0)?,
        ExportFormat::Csv => to_csv(&snapshot.0),
    };
    Ok(ReportExport {
        filename: export_filename(kind, query, format),
        content_type: format.content_type(),
        body,
    })
}

/// Flatten into `path,value` rows; object keys joined with `.`, array items by index
fn to_csv(value: &Value) -> String {
    let mut rows = Vec::new();
    flatten(value, String::new(), &mut rows);

    let mut out = String::from("path,value\n");
    for (path, value) in rows {
        out.push_str(&csv_field(&path));
        out.push(',');
        out.push_str(&csv_field(&value));
        out.push('\n');
    }
    out
}

fn flatten(value: &Value, prefix: String, rows: &mut Vec<(String, String)>) {
    let child = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                flatten(v, child(key), rows);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten(v, child(&i.to_string()), rows);
            }
        }
        Value::Null => rows.push((prefix, String::new())),
        Value::String(s) => rows.push((prefix, s.clone())),
        other => rows.push((prefix, other.to_string())),
    }
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
