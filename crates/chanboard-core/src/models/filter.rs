//! Shared chart filter: date range, time frame and chart type

use crate::models::Dataset;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Calendar bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Granularity {
    pub fn all() -> &'static [Granularity] {
        &[
            Granularity::Daily,
            Granularity::Weekly,
            Granularity::Monthly,
            Granularity::Quarterly,
        ]
    }

    /// Cycle to next granularity
    pub fn next(self) -> Self {
        match self {
            Self::Daily => Self::Weekly,
            Self::Weekly => Self::Monthly,
            Self::Monthly => Self::Quarterly,
            Self::Quarterly => Self::Daily,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
        }
    }

    /// Singular noun for one period ("the last week is incomplete")
    pub fn period_noun(&self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
            Self::Quarterly => "quarter",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Self::Daily),
            "w" | "week" | "weekly" => Ok(Self::Weekly),
            "m" | "month" | "monthly" => Ok(Self::Monthly),
            "q" | "quarter" | "quarterly" => Ok(Self::Quarterly),
            other => Err(format!(
                "unknown time frame '{}' (expected daily|weekly|monthly|quarterly)",
                other
            )),
        }
    }
}

/// Chart rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Area,
}

impl ChartKind {
    pub fn toggle(self) -> Self {
        match self {
            Self::Bar => Self::Area,
            Self::Area => Self::Bar,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Area => "Area",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "area" => Ok(Self::Area),
            other => Err(format!("unknown chart type '{}' (expected bar|area)", other)),
        }
    }
}

/// Filter applied to every chart on the active page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: Granularity,
    pub chart_kind: ChartKind,
    /// Dataset bounds the dates are clamped to
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl FilterState {
    /// Default filter spanning the whole dataset.
    ///
    /// An empty dataset yields a degenerate range at `fallback`.
    pub fn for_dataset(
        dataset: &Dataset,
        granularity: Granularity,
        chart_kind: ChartKind,
        fallback: NaiveDate,
    ) -> Self {
        let min_date = dataset.min_date().unwrap_or(fallback);
        let max_date = dataset.max_date().unwrap_or(fallback);
        Self {
            start_date: min_date,
            end_date: max_date,
            granularity,
            chart_kind,
            min_date,
            max_date,
        }
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.min_date, self.max_date)
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date.clamp(self.min_date, self.max_date);
        debug!(start = %self.start_date, "Filter start date changed");
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = date.clamp(self.min_date, self.max_date);
        debug!(end = %self.end_date, "Filter end date changed");
    }

    /// Move the start date by `days` (negative moves back)
    pub fn shift_start(&mut self, days: i64) {
        self.set_start_date(self.start_date + Duration::days(days));
    }

    /// Move the end date by `days` (negative moves back)
    pub fn shift_end(&mut self, days: i64) {
        self.set_end_date(self.end_date + Duration::days(days));
    }

    pub fn cycle_granularity(&mut self) {
        self.granularity = self.granularity.next();
    }

    pub fn toggle_chart_kind(&mut self) {
        self.chart_kind = self.chart_kind.toggle();
    }

    /// Restore the full dataset span, keeping time frame and chart type
    pub fn reset_range(&mut self) {
        self.start_date = self.min_date;
        self.end_date = self.max_date;
    }

    /// Re-clamp to new dataset bounds after a reload
    ///
    /// An edge that sat on the old bound follows the new one, so a range
    /// covering the whole span keeps covering it as rows are appended.
    pub fn rebound(&mut self, dataset: &Dataset) {
        let (Some(min), Some(max)) = (dataset.min_date(), dataset.max_date()) else {
            return;
        };
        let start = if self.start_date == self.min_date { min } else { self.start_date };
        let end = if self.end_date == self.max_date { max } else { self.end_date };

        self.min_date = min;
        self.max_date = max;
        self.start_date = start.clamp(min, max);
        self.end_date = end.clamp(min, max);
        debug!(start = %self.start_date, end = %self.end_date, "Filter rebound to dataset");
    }

    /// Whether start comes after end (charts cannot be resampled)
    pub fn is_inverted(&self) -> bool {
        self.start_date > self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_unsorted(vec![
            Observation::empty(day(1, 1)),
            Observation::empty(day(3, 31)),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults_span_dataset() {
        let filter =
            FilterState::for_dataset(&dataset(), Granularity::Daily, ChartKind::Bar, day(6, 1));
        assert_eq!(filter.start_date, day(1, 1));
        assert_eq!(filter.end_date, day(3, 31));
        assert_eq!(filter.bounds(), (day(1, 1), day(3, 31)));
    }

    #[test]
    fn test_dates_clamp_to_bounds() {
        let mut filter =
            FilterState::for_dataset(&dataset(), Granularity::Daily, ChartKind::Bar, day(6, 1));
        filter.set_start_date(day(1, 1) - Duration::days(30));
        assert_eq!(filter.start_date, day(1, 1));
        filter.shift_end(10);
        assert_eq!(filter.end_date, day(3, 31));
        filter.shift_end(-31);
        assert_eq!(filter.end_date, day(2, 29));
    }

    #[test]
    fn test_inverted_range_is_allowed_but_flagged() {
        let mut filter =
            FilterState::for_dataset(&dataset(), Granularity::Daily, ChartKind::Bar, day(6, 1));
        filter.set_start_date(day(3, 1));
        filter.set_end_date(day(2, 1));
        assert!(filter.is_inverted());
        filter.reset_range();
        assert!(!filter.is_inverted());
    }

    #[test]
    fn test_rebound_follows_growing_dataset() {
        let mut filter =
            FilterState::for_dataset(&dataset(), Granularity::Daily, ChartKind::Bar, day(6, 1));
        let grown = Dataset::from_unsorted(vec![
            Observation::empty(day(1, 1)),
            Observation::empty(day(3, 31)),
            Observation::empty(day(4, 10)),
        ])
        .unwrap();

        filter.rebound(&grown);
        assert_eq!(filter.start_date, day(1, 1));
        assert_eq!(filter.end_date, day(4, 10));
        assert_eq!(filter.bounds(), (day(1, 1), day(4, 10)));
    }

    #[test]
    fn test_rebound_keeps_narrowed_range() {
        let mut filter =
            FilterState::for_dataset(&dataset(), Granularity::Daily, ChartKind::Bar, day(6, 1));
        filter.set_start_date(day(2, 1));
        filter.set_end_date(day(3, 1));
        let grown = Dataset::from_unsorted(vec![
            Observation::empty(day(1, 1)),
            Observation::empty(day(4, 10)),
        ])
        .unwrap();

        filter.rebound(&grown);
        assert_eq!((filter.start_date, filter.end_date), (day(2, 1), day(3, 1)));

        let shrunk = Dataset::from_unsorted(vec![
            Observation::empty(day(2, 15)),
            Observation::empty(day(2, 20)),
        ])
        .unwrap();
        filter.rebound(&shrunk);
        assert_eq!((filter.start_date, filter.end_date), (day(2, 15), day(2, 20)));
    }

    #[test]
    fn test_cycles() {
        let ds = dataset();
        let mut filter =
            FilterState::for_dataset(&ds, Granularity::Quarterly, ChartKind::Area, day(6, 1));
        filter.cycle_granularity();
        assert_eq!(filter.granularity, Granularity::Daily);
        filter.toggle_chart_kind();
        assert_eq!(filter.chart_kind, ChartKind::Bar);
    }

    #[test]
    fn test_parse_granularity_and_kind() {
        assert_eq!("Weekly".parse::<Granularity>().unwrap(), Granularity::Weekly);
        assert_eq!("q".parse::<Granularity>().unwrap(), Granularity::Quarterly);
        assert!("yearly".parse::<Granularity>().is_err());
        assert_eq!("AREA".parse::<ChartKind>().unwrap(), ChartKind::Area);
    }
}
