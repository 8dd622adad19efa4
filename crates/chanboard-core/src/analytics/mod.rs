//! Period aggregation, deltas and completeness for channel metrics
//!
//! Everything here is a pure function over an immutable [`Dataset`], so it
//! is recomputed on every filter change without caching.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Column, Dataset, Granularity};

pub mod aggregate;
pub mod completeness;
pub mod delta;


pub use aggregate::{
    aggregate, aggregate_range, aggregate_rows, next_period_start, period_start,
    AggregationBucket, Series, SeriesPoint,
};
pub use completeness::{incomplete_note, is_period_complete};
pub use delta::{calculate_delta, Delta};

/// Headline numbers for one column at one granularity
#[derive(Debug, Clone, Serialize)]
pub struct MetricSummary {
    pub column: Column,
    pub granularity: Granularity,
    /// Sum over the rows the caller chose (all-time or a range)
    pub total: f64,
    pub delta: Delta,
    pub bucket_count: usize,
    pub last_period: Option<NaiveDate>,
    /// False while the last bucket's period is still running
    pub last_period_complete: bool,
}

impl MetricSummary {
    /// Summarise a pre-computed bucket sequence
    pub fn from_buckets(
        buckets: &[AggregationBucket],
        column: Column,
        granularity: Granularity,
        total: f64,
        today: NaiveDate,
    ) -> Self {
        let series = Series::from_buckets(buckets, column, granularity);
        let last_period = series.last_period();
        Self {
            column,
            granularity,
            total,
            delta: calculate_delta(&series.values()),
            bucket_count: buckets.len(),
            last_period,
            last_period_complete: last_period
                .map(|start| is_period_complete(start, today, granularity))
                .unwrap_or(true),
        }
    }

    /// All-time summary of every column
    pub fn compute_all(dataset: &Dataset, granularity: Granularity, today: NaiveDate) -> Vec<Self> {
        let buckets = aggregate(dataset, granularity);
        Column::all()
            .iter()
            .map(|&column| {
                Self::from_buckets(&buckets, column, granularity, dataset.total(column), today)
            })
            .collect()
    }
}
