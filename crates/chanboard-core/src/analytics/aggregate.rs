//! Calendar bucketing of daily observations
//!
//! Buckets are labelled by the first day of their period. Weeks start on
//! Monday. Every period between the first and last observation is emitted,
//! so gaps in the data show up as zero-sum buckets.

use crate::error::CoreError;
use crate::models::{Column, Dataset, Granularity, Observation};
use chrono::{Datelike, Days, Duration, Months, NaiveDate};
use serde::Serialize;

/// Summed values of every numeric column over one calendar period
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationBucket {
    pub period_start: NaiveDate,
    pub granularity: Granularity,
    sums: [f64; Column::COUNT],
}

impl AggregationBucket {
    fn empty(period_start: NaiveDate, granularity: Granularity) -> Self {
        Self {
            period_start,
            granularity,
            sums: [0.0; Column::COUNT],
        }
    }

    fn add(&mut self, row: &Observation) {
        for column in Column::all() {
            self.sums[column.index()] += row.value(*column);
        }
    }

    /// Sum of one column over this bucket
    pub fn get(&self, column: Column) -> f64 {
        self.sums[column.index()]
    }

    /// Last calendar day covered by this bucket
    pub fn period_end(&self) -> NaiveDate {
        next_period_start(self.period_start, self.granularity)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

/// First day of the period containing `date`
pub fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Weekly => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        Granularity::Monthly => month_start(date),
        Granularity::Quarterly => {
            let month_start = month_start(date);
            month_start
                .checked_sub_months(Months::new(date.month0() % 3))
                .unwrap_or(month_start)
        }
    }
}

/// First day of the period following the one that starts at `start`.
///
/// `start` must already be aligned with [`period_start`]. `None` only past
/// the end of the representable calendar.
pub fn next_period_start(start: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Daily => start.succ_opt(),
        Granularity::Weekly => start.checked_add_days(Days::new(7)),
        Granularity::Monthly => start.checked_add_months(Months::new(1)),
        Granularity::Quarterly => start.checked_add_months(Months::new(3)),
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// Aggregate the whole dataset
pub fn aggregate(dataset: &Dataset, granularity: Granularity) -> Vec<AggregationBucket> {
    aggregate_rows(dataset.rows(), granularity)
}

/// Aggregate rows dated within `[start, end]`
///
/// # Errors
/// `ResampleError` when `start` is after `end`.
pub fn aggregate_range(
    dataset: &Dataset,
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
) -> Result<Vec<AggregationBucket>, CoreError> {
    if start > end {
        return Err(CoreError::resample(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(aggregate_rows(dataset.slice(start, end), granularity))
}

/// Aggregate rows sorted ascending by date
pub fn aggregate_rows(rows: &[Observation], granularity: Granularity) -> Vec<AggregationBucket> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Vec::new();
    };

    let last_start = period_start(last.date, granularity);
    let mut current = period_start(first.date, granularity);
    let mut buckets = Vec::new();
    let mut remaining = rows.iter().peekable();

    loop {
        let mut bucket = AggregationBucket::empty(current, granularity);
        while let Some(row) = remaining.next_if(|r| period_start(r.date, granularity) == current) {
            bucket.add(row);
        }
        buckets.push(bucket);

        if current >= last_start {
            break;
        }
        match next_period_start(current, granularity) {
            Some(next) => current = next,
            None => break,
        }
    }

    buckets
}

/// One column projected out of a bucket sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub column: Column,
    pub granularity: Granularity,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub period_start: NaiveDate,
    pub value: f64,
}

impl Series {
    pub fn from_buckets(
        buckets: &[AggregationBucket],
        column: Column,
        granularity: Granularity,
    ) -> Self {
        Self {
            column,
            granularity,
            points: buckets
                .iter()
                .map(|b| SeriesPoint {
                    period_start: b.period_start,
                    value: b.get(column),
                })
                .collect(),
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    pub fn last_period(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.period_start)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
