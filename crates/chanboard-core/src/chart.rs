//! Chart series adapter
//!
//! Turns aggregated buckets into labelled points a frontend can draw as a
//! bar or area chart. No computation beyond format adaptation.

use crate::analytics::AggregationBucket;
use crate::error::CoreError;
use crate::models::{ChartKind, Column, Granularity};
use chrono::NaiveDate;
use serde::Serialize;

/// One plotted point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub period_start: NaiveDate,
    /// Axis label for the period ("2024-03-11", "2024-03", "2024-Q1")
    pub label: String,
    pub value: f64,
}

/// Renderable time-indexed series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub column: Column,
    pub kind: ChartKind,
    pub granularity: Granularity,
    /// Display height in terminal rows
    pub height: u16,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::min)
    }

    /// Last `n` points (bar charts only fit so many columns)
    pub fn tail(&self, n: usize) -> &[ChartPoint] {
        let skip = self.points.len().saturating_sub(n);
        &self.points[skip..]
    }
}

/// Axis label for a period start
pub fn period_label(period_start: NaiveDate, granularity: Granularity) -> String {
    use chrono::Datelike;
    match granularity {
        Granularity::Daily | Granularity::Weekly => period_start.format("%Y-%m-%d").to_string(),
        Granularity::Monthly => period_start.format("%Y-%m").to_string(),
        Granularity::Quarterly => {
            format!("{}-Q{}", period_start.year(), period_start.month0() / 3 + 1)
        }
    }
}

/// Build a chart for one column of a bucket sequence
///
/// # Errors
/// `ColumnNotFound` when `column_name` is not a known numeric column.
pub fn build_chart(
    buckets: &[AggregationBucket],
    column_name: &str,
    granularity: Granularity,
    kind: ChartKind,
    height: u16,
) -> Result<ChartSeries, CoreError> {
    let column: Column = column_name.parse()?;
    let points = buckets
        .iter()
        .map(|b| ChartPoint {
            period_start: b.period_start,
            label: period_label(b.period_start, granularity),
            value: b.get(column),
        })
        .collect();

    Ok(ChartSeries {
        column,
        kind,
        granularity,
        height,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::models::{Dataset, Observation};

    fn buckets() -> Vec<AggregationBucket> {
        let rows = (1..=3)
            .map(|d| Observation {
                likes: d * 10,
                ..Observation::empty(NaiveDate::from_ymd_opt(2024, 2, d as u32).unwrap())
            })
            .collect();
        aggregate(&Dataset::from_unsorted(rows).unwrap(), Granularity::Daily)
    }

    #[test]
    fn test_build_chart_points() {
        let chart =
            build_chart(&buckets(), "LIKES", Granularity::Daily, ChartKind::Area, 8).unwrap();
        assert_eq!(chart.column, Column::Likes);
        assert_eq!(chart.kind, ChartKind::Area);
        assert_eq!(chart.height, 8);
        let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
        assert_eq!(chart.points[0].label, "2024-02-01");
        assert_eq!(chart.max_value(), 30.0);
        assert_eq!(chart.tail(2).len(), 2);
    }

    #[test]
    fn test_unknown_column() {
        let err = build_chart(&buckets(), "DISLIKES", Granularity::Daily, ChartKind::Bar, 8)
            .unwrap_err();
        assert_eq!(err, CoreError::column_not_found("DISLIKES"));
    }

    #[test]
    fn test_period_labels() {
        let d = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(period_label(d, Granularity::Monthly), "2024-08");
        assert_eq!(period_label(d, Granularity::Quarterly), "2024-Q3");
    }
}
