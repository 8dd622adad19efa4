//! Export of aggregated metric series
//!
//! Writes one column's bucketed series to CSV or JSON so it can be opened
//! in a spreadsheet or fed to another tool.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analytics::Series;
use crate::error::CoreError;

/// Output format for `chanboard export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown export format '{}' (expected csv|json)", other)),
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    period_start: String,
    granularity: &'a str,
    column: &'a str,
    value: f64,
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> CoreError {
    CoreError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn create_file(path: &Path) -> Result<File, CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_error(path, e))?;
    }
    File::create(path).map_err(|e| write_error(path, e))
}

/// Export a series to CSV
///
/// CSV columns: period_start, granularity, column, value
///
/// # Arguments
/// * `series` - Aggregated series of one column
/// * `path` - Destination file path (created/overwritten)
///
/// # Errors
/// `FileWrite` if the file or its parent directory cannot be written
///
/// # Examples
///
/// ```no_run
/// use chanboard_core::analytics::{aggregate, Series};
/// use chanboard_core::export::export_series_to_csv;
/// use chanboard_core::models::{Column, Dataset, Granularity};
/// use std::path::Path;
///
/// let buckets = aggregate(&Dataset::default(), Granularity::Weekly);
/// let series = Series::from_buckets(&buckets, Column::Views, Granularity::Weekly);
/// export_series_to_csv(&series, Path::new("views.csv")).unwrap();
/// ```
pub fn export_series_to_csv(series: &Series, path: &Path) -> Result<(), CoreError> {
    let file = create_file(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    let granularity = series.granularity.name();
    let column = series.column.name();
    if series.points.is_empty() {
        // serde-driven headers are only emitted with the first record
        writer
            .write_record(["period_start", "granularity", "column", "value"])
            .map_err(|e| write_error(path, e))?;
    }
    for point in &series.points {
        writer
            .serialize(CsvRow {
                period_start: point.period_start.format("%Y-%m-%d").to_string(),
                granularity,
                column,
                value: point.value,
            })
            .map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

/// Export a series to pretty-printed JSON
///
/// # Errors
/// `FileWrite` if serialization or the write fails
pub fn export_series_to_json(series: &Series, path: &Path) -> Result<(), CoreError> {
    let file = create_file(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, series).map_err(|e| write_error(path, e))?;
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

/// Dispatch on [`ExportFormat`]
pub fn export_series(series: &Series, path: &Path, format: ExportFormat) -> Result<(), CoreError> {
    match format {
        ExportFormat::Csv => export_series_to_csv(series, path),
        ExportFormat::Json => export_series_to_json(series, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::models::{Column, Dataset, Granularity, Observation};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn series() -> Series {
        let rows = (1..=10)
            .map(|d| Observation {
                views: 10,
                ..Observation::empty(NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            })
            .collect();
        let ds = Dataset::from_unsorted(rows).unwrap();
        let buckets = aggregate(&ds, Granularity::Weekly);
        Series::from_buckets(&buckets, Column::Views, Granularity::Weekly)
    }

    #[test]
    fn test_export_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("views.csv");

        export_series_to_csv(&series(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "period_start,granularity,column,value");
        assert_eq!(lines[1], "2024-01-01,Weekly,VIEWS,70.0");
        assert_eq!(lines[2], "2024-01-08,Weekly,VIEWS,30.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_empty_csv_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        let empty = Series::from_buckets(&[], Column::Likes, Granularity::Daily);

        export_series_to_csv(&empty, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "period_start,granularity,column,value");
    }

    #[test]
    fn test_export_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views.json");

        export_series(&series(), &path, ExportFormat::Json).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["column"], "VIEWS");
        assert_eq!(value["points"].as_array().unwrap().len(), 2);
        assert_eq!(value["points"][0]["value"], 70.0);
    }

    #[test]
    fn test_export_to_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = export_series_to_csv(&series(), dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::FileWrite { .. }));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
