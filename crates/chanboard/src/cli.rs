//! CLI helpers for the summary, series and init-config commands
//!
//! Tables are built with comfy-table; `--json` bypasses them and prints the
//! serialized core types directly.

use anyhow::{bail, Context, Result};
use chanboard_core::analytics::{MetricSummary, Series};
use chanboard_core::chart::period_label;
use chanboard_core::format::format_thousands;
use chanboard_core::models::Column;
use chanboard_core::DashboardConfig;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Row, Table};
use std::path::Path;

// ============================================================================
// Config
// ============================================================================

/// Save `config` to `path`; an existing file is kept unless `force` is set
pub fn write_config(config: &DashboardConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

// ============================================================================
// Formatters
// ============================================================================

fn decimals(column: Column) -> usize {
    if column.is_fractional() {
        1
    } else {
        0
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|n| Cell::new(n).fg(Color::Cyan)).collect()
}

/// Format every metric's headline numbers as a table (human) or JSON
pub fn format_summary_table(summaries: &[MetricSummary], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(summaries).context("Failed to serialize summary");
    }

    if summaries.is_empty() {
        return Ok("No metrics.".to_string());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(&["Metric", "Total", "Change", "Periods", "Last period"]));

    for summary in summaries {
        let change_color = if summary.delta.is_increase() {
            Color::Green
        } else if summary.delta.is_decrease() {
            Color::Red
        } else {
            Color::Grey
        };
        let last = match summary.last_period {
            Some(start) if summary.last_period_complete => {
                period_label(start, summary.granularity)
            }
            Some(start) => format!("{} (incomplete)", period_label(start, summary.granularity)),
            None => "-".to_string(),
        };

        table.add_row(Row::from(vec![
            Cell::new(summary.column.name()),
            Cell::new(format_thousands(summary.total, decimals(summary.column)))
                .set_alignment(CellAlignment::Right),
            Cell::new(summary.delta.label()).fg(change_color),
            Cell::new(summary.bucket_count).set_alignment(CellAlignment::Right),
            Cell::new(last),
        ]));
    }

    Ok(table.to_string())
}

/// Format one column's periods as a table (human) or JSON
pub fn format_series_table(series: &Series, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(series).context("Failed to serialize series");
    }

    if series.is_empty() {
        return Ok("No data in the selected range.".to_string());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(&["Period", series.column.name()]));

    for point in &series.points {
        table.add_row(Row::from(vec![
            Cell::new(period_label(point.period_start, series.granularity)),
            Cell::new(format_thousands(point.value, decimals(series.column)))
                .set_alignment(CellAlignment::Right),
        ]));
    }

    let total = format_thousands(series.total(), decimals(series.column));
    table.add_row(Row::from(vec![
        Cell::new("Total").fg(Color::Cyan),
        Cell::new(total).set_alignment(CellAlignment::Right),
    ]));

    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanboard_core::analytics::{aggregate, SeriesPoint};
    use chanboard_core::config::ColorScheme;
    use chanboard_core::models::{Dataset, Granularity, Observation};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_unsorted(vec![
            Observation {
                views: 1200,
                watch_hours: 2.5,
                ..Observation::empty(date(1, 1))
            },
            Observation {
                views: 1500,
                watch_hours: 3.0,
                ..Observation::empty(date(1, 2))
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_table_lists_every_column() {
        let summaries = MetricSummary::compute_all(&dataset(), Granularity::Daily, date(6, 1));
        let out = format_summary_table(&summaries, false).unwrap();
        for column in Column::all() {
            assert!(out.contains(column.name()), "missing {}", column);
        }
        assert!(out.contains("2,700"));
        assert!(out.contains("+300 (+25.00%)"));
        assert!(out.contains("5.5"));
    }

    #[test]
    fn test_summary_marks_running_period() {
        let summaries = MetricSummary::compute_all(&dataset(), Granularity::Daily, date(1, 2));
        let out = format_summary_table(&summaries, false).unwrap();
        assert!(out.contains("2024-01-02 (incomplete)"));
    }

    #[test]
    fn test_summary_json() {
        let summaries = MetricSummary::compute_all(&dataset(), Granularity::Weekly, date(6, 1));
        let out = format_summary_table(&summaries, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), Column::COUNT);
        assert_eq!(value[1]["column"], "VIEWS");
        assert_eq!(value[1]["total"], 2700.0);
    }

    #[test]
    fn test_series_table_has_total_row() {
        let ds = dataset();
        let buckets = aggregate(&ds, Granularity::Daily);
        let series = Series::from_buckets(&buckets, Column::Views, Granularity::Daily);
        let out = format_series_table(&series, false).unwrap();
        assert!(out.contains("2024-01-01"));
        assert!(out.contains("1,200"));
        assert!(out.contains("Total"));
        assert!(out.contains("2,700"));
    }

    #[test]
    fn test_write_config_round_trips_and_protects_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chanboard").join("config.toml");
        let config = DashboardConfig {
            style_dir: dir.path().join("styles"),
            color_scheme: ColorScheme::Light,
            ..Default::default()
        };

        write_config(&config, &path, false).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap(), config);

        let err = write_config(&DashboardConfig::default(), &path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(DashboardConfig::load(&path).unwrap(), config);

        write_config(&DashboardConfig::default(), &path, true).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_empty_series() {
        let series = Series {
            column: Column::Likes,
            granularity: Granularity::Monthly,
            points: Vec::<SeriesPoint>::new(),
        };
        assert_eq!(
            format_series_table(&series, false).unwrap(),
            "No data in the selected range."
        );
    }
}
