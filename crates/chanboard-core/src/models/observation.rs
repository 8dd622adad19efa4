//! Daily channel observations and the immutable dataset built from them

use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of channel statistics for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub views: u64,
    pub watch_hours: f64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub subscribers_gained: u64,
    pub subscribers_lost: u64,
}

impl Observation {
    /// Observation with every metric at zero
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            views: 0,
            watch_hours: 0.0,
            likes: 0,
            shares: 0,
            comments: 0,
            subscribers_gained: 0,
            subscribers_lost: 0,
        }
    }

    /// Subscribers gained minus subscribers lost (may be negative)
    pub fn net_subscribers(&self) -> i64 {
        self.subscribers_gained as i64 - self.subscribers_lost as i64
    }

    /// Numeric value of a column for this row
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::NetSubscribers => self.net_subscribers() as f64,
            Column::Views => self.views as f64,
            Column::WatchHours => self.watch_hours,
            Column::Likes => self.likes as f64,
            Column::Shares => self.shares as f64,
            Column::Comments => self.comments as f64,
            Column::SubscribersGained => self.subscribers_gained as f64,
            Column::SubscribersLost => self.subscribers_lost as f64,
        }
    }
}

/// Numeric columns of the channel table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Column {
    NetSubscribers,
    Views,
    WatchHours,
    Likes,
    Shares,
    Comments,
    SubscribersGained,
    SubscribersLost,
}

impl Column {
    pub const COUNT: usize = 8;

    pub fn all() -> &'static [Column; Column::COUNT] {
        &[
            Column::NetSubscribers,
            Column::Views,
            Column::WatchHours,
            Column::Likes,
            Column::Shares,
            Column::Comments,
            Column::SubscribersGained,
            Column::SubscribersLost,
        ]
    }

    /// Stable position used to index per-bucket sums
    pub fn index(self) -> usize {
        match self {
            Column::NetSubscribers => 0,
            Column::Views => 1,
            Column::WatchHours => 2,
            Column::Likes => 3,
            Column::Shares => 4,
            Column::Comments => 5,
            Column::SubscribersGained => 6,
            Column::SubscribersLost => 7,
        }
    }

    /// Header name as it appears in the CSV
    pub fn name(self) -> &'static str {
        match self {
            Column::NetSubscribers => "NET_SUBSCRIBERS",
            Column::Views => "VIEWS",
            Column::WatchHours => "WATCH_HOURS",
            Column::Likes => "LIKES",
            Column::Shares => "SHARES",
            Column::Comments => "COMMENTS",
            Column::SubscribersGained => "SUBSCRIBERS_GAINED",
            Column::SubscribersLost => "SUBSCRIBERS_LOST",
        }
    }

    /// Whether values are fractional (rendered with decimals)
    pub fn is_fractional(self) -> bool {
        matches!(self, Column::WatchHours)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_");
        Column::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CoreError::column_not_found(s))
    }
}

/// Ordered, immutable sequence of daily observations
///
/// Dates are unique and strictly increasing. Gaps are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Observation>,
}

impl Dataset {
    /// Sort rows by date; returns the first duplicated date on conflict
    pub fn from_unsorted(mut rows: Vec<Observation>) -> Result<Self, NaiveDate> {
        rows.sort_by_key(|r| r.date);
        if let Some(dup) = rows.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(dup[0].date);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// Rows whose date lies in `[start, end]` (inclusive)
    pub fn slice(&self, start: NaiveDate, end: NaiveDate) -> &[Observation] {
        let lo = self.rows.partition_point(|r| r.date < start);
        let hi = self.rows.partition_point(|r| r.date <= end);
        if lo >= hi {
            return &[];
        }
        &self.rows[lo..hi]
    }

    /// Sum of a column over all rows
    pub fn total(&self, column: Column) -> f64 {
        sum_column(&self.rows, column)
    }
}

/// Sum of a column over a slice of rows
pub fn sum_column(rows: &[Observation], column: Column) -> f64 {
    rows.iter().map(|r| r.value(column)).sum()
}
