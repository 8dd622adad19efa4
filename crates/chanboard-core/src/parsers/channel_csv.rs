//! Channel statistics CSV parser
//!
//! Required headers (case-insensitive, any order, extra columns ignored):
//! DATE, VIEWS, WATCH_HOURS, LIKES, SHARES, COMMENTS, SUBSCRIBERS_GAINED,
//! SUBSCRIBERS_LOST.

use crate::error::CoreError;
use crate::models::{Dataset, Observation};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Headers that must be present, in the order fields are read
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "DATE",
    "VIEWS",
    "WATCH_HOURS",
    "LIKES",
    "SHARES",
    "COMMENTS",
    "SUBSCRIBERS_GAINED",
    "SUBSCRIBERS_LOST",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parser for the channel CSV
#[derive(Debug, Default, Clone)]
pub struct ChannelCsvParser;

impl ChannelCsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate the dataset at `path`
    ///
    /// # Errors
    /// `DataUnavailable` when the file is missing or unreadable, a required
    /// header is absent, a row does not parse, or a date repeats.
    pub fn parse(&self, path: &Path) -> Result<Dataset, CoreError> {
        if !path.exists() {
            return Err(CoreError::data_unavailable(path, "file not found"));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| CoreError::data_unavailable(path, e.to_string()))?;

        let rows = self.read_rows(&mut reader, path)?;
        let row_count = rows.len();

        let dataset = Dataset::from_unsorted(rows).map_err(|dup| {
            CoreError::data_unavailable(path, format!("duplicate date {}", dup))
        })?;

        info!(
            path = %path.display(),
            rows = row_count,
            first = ?dataset.min_date(),
            last = ?dataset.max_date(),
            "Channel dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse from any reader (used for in-memory fixtures)
    pub fn parse_reader<R: std::io::Read>(&self, source: R) -> Result<Dataset, CoreError> {
        let origin = PathBuf::from("<memory>");
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        let rows = self.read_rows(&mut reader, &origin)?;
        Dataset::from_unsorted(rows).map_err(|dup| {
            CoreError::data_unavailable(&origin, format!("duplicate date {}", dup))
        })
    }

    fn read_rows<R: std::io::Read>(
        &self,
        reader: &mut csv::Reader<R>,
        path: &Path,
    ) -> Result<Vec<Observation>, CoreError> {
        let headers = reader
            .headers()
            .map_err(|e| CoreError::data_unavailable(path, e.to_string()))?
            .clone();
        let indices = column_indices(&headers)
            .map_err(|missing| CoreError::data_unavailable(path, missing))?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            // Header is line 1
            let line = i + 2;
            let record = record.map_err(|e| {
                CoreError::data_unavailable(path, format!("line {}: {}", line, e))
            })?;
            let row = parse_record(&record, &indices).map_err(|msg| {
                CoreError::data_unavailable(path, format!("line {}: {}", line, msg))
            })?;
            rows.push(row);
        }

        debug!(rows = rows.len(), "CSV records parsed");
        Ok(rows)
    }
}

/// Map each required column to its position in the header row
fn column_indices(headers: &csv::StringRecord) -> Result<[usize; 8], String> {
    let mut indices = [0usize; 8];
    let mut missing = Vec::new();

    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h.eq_ignore_ascii_case(name)) {
            Some(pos) => indices[slot] = pos,
            None => missing.push(*name),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(format!("missing required column(s): {}", missing.join(", ")))
    }
}

fn parse_record(record: &csv::StringRecord, idx: &[usize; 8]) -> Result<Observation, String> {
    let field = |slot: usize| record.get(idx[slot]).unwrap_or("");

    Ok(Observation {
        date: parse_date(field(0))?,
        views: parse_count(REQUIRED_COLUMNS[1], field(1))?,
        watch_hours: parse_hours(field(2))?,
        likes: parse_count(REQUIRED_COLUMNS[3], field(3))?,
        shares: parse_count(REQUIRED_COLUMNS[4], field(4))?,
        comments: parse_count(REQUIRED_COLUMNS[5], field(5))?,
        subscribers_gained: parse_count(REQUIRED_COLUMNS[6], field(6))?,
        subscribers_lost: parse_count(REQUIRED_COLUMNS[7], field(7))?,
    })
}

/// Calendar date, accepting a few common spellings
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| format!("invalid DATE '{}'", raw))
}

/// Non-negative integer count; tolerates "1,234" and "12.0"
fn parse_count(column: &str, raw: &str) -> Result<u64, String> {
    let cleaned = raw.replace(',', "");
    if let Ok(v) = cleaned.parse::<u64>() {
        return Ok(v);
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v.is_finite() => Ok(v as u64),
        _ => Err(format!("invalid {} '{}' (expected non-negative integer)", column, raw)),
    }
}

fn parse_hours(raw: &str) -> Result<f64, String> {
    match raw.replace(',', "").parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => Ok(v),
        _ => Err(format!(
            "invalid WATCH_HOURS '{}' (expected non-negative number)",
            raw
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "DATE,VIEWS,WATCH_HOURS,LIKES,SHARES,COMMENTS,SUBSCRIBERS_GAINED,SUBSCRIBERS_LOST";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_valid_file_sorted() {
        let file = write_csv(&format!(
            "{}\n2024-01-02,20,1.5,2,1,0,5,1\n2024-01-01,10,0.5,1,0,3,2,4\n",
            HEADER
        ));
        let ds = ChannelCsvParser::new().parse(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.min_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(ds.total(Column::Views), 30.0);
        assert_eq!(ds.total(Column::WatchHours), 2.0);
        assert_eq!(ds.total(Column::NetSubscribers), 2.0);
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let err = ChannelCsvParser::new()
            .parse(Path::new("/nonexistent/youtube_channel_data.csv"))
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let file = write_csv("DATE,VIEWS\n2024-01-01,1\n");
        let err = ChannelCsvParser::new().parse(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("WATCH_HOURS"), "{}", msg);
        assert!(msg.contains("SUBSCRIBERS_LOST"), "{}", msg);
    }

    #[test]
    fn test_bad_row_names_line() {
        let file = write_csv(&format!(
            "{}\n2024-01-01,10,0.5,1,0,3,2,4\n2024-01-02,-5,0.5,1,0,3,2,4\n",
            HEADER
        ));
        let err = ChannelCsvParser::new().parse(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let csv = format!(
            "{}\n2024-01-01,10,0.5,1,0,3,2,4\n2024-01-01,11,0.5,1,0,3,2,4\n",
            HEADER
        );
        let err = ChannelCsvParser::new()
            .parse_reader(csv.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("duplicate date 2024-01-01"));
    }

    #[test]
    fn test_headers_case_insensitive_and_reordered() {
        let csv = "subscribers_lost,date,views,watch_hours,likes,shares,comments,\
                   subscribers_gained,extra\n\
                   1,01/15/2024,\"1,200\",3.25,4,5,6,7,ignored\n";
        let ds = ChannelCsvParser::new().parse_reader(csv.as_bytes()).unwrap();
        let row = &ds.rows()[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(row.views, 1200);
        assert_eq!(row.net_subscribers(), 6);
    }

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("2024-03-09").unwrap(), expected);
        assert_eq!(parse_date("03/09/2024").unwrap(), expected);
        assert_eq!(parse_date("2024-03-09 00:00:00").unwrap(), expected);
        assert!(parse_date("9 March").is_err());
    }
}
