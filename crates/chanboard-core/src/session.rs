//! Per-user dashboard session
//!
//! Navigation position plus the shared chart filter. Owned by the frontend
//! and passed to [`crate::view::render`] on every frame.

use crate::config::DashboardConfig;
use crate::models::{
    ChartKind, Dataset, FilterState, Granularity, MetricCatalog, NavAction, NavigationState, Page,
    Section,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSession {
    pub navigation: NavigationState,
    pub filter: FilterState,
}

impl DashboardSession {
    /// Fresh session on the welcome page, filter spanning the whole dataset
    pub fn new(
        dataset: &Dataset,
        granularity: Granularity,
        chart_kind: ChartKind,
        today: NaiveDate,
    ) -> Self {
        Self {
            navigation: NavigationState::new(),
            filter: FilterState::for_dataset(dataset, granularity, chart_kind, today),
        }
    }

    /// Session using the configured default time frame and chart type
    pub fn from_config(dataset: &Dataset, config: &DashboardConfig, today: NaiveDate) -> Self {
        Self::new(
            dataset,
            config.default_granularity,
            config.default_chart_kind,
            today,
        )
    }

    pub fn page(&self) -> Page {
        self.navigation.page()
    }

    pub fn section(&self) -> Option<Section> {
        self.navigation.section()
    }

    /// Apply a navigation action; returns true if the page changed
    pub fn navigate(&mut self, action: NavAction, catalog: &MetricCatalog) -> bool {
        self.navigation.apply(action, catalog)
    }

    /// Keep the filter valid after the dataset was reloaded
    pub fn on_dataset_reloaded(&mut self, dataset: &Dataset) {
        self.filter.rebound(dataset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn two_days() -> Dataset {
        let rows = vec![Observation::empty(day(1)), Observation::empty(day(9))];
        Dataset::from_unsorted(rows).unwrap()
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let ds = two_days();
        let config = DashboardConfig {
            default_granularity: Granularity::Monthly,
            default_chart_kind: ChartKind::Area,
            ..Default::default()
        };
        let session = DashboardSession::from_config(&ds, &config, day(20));
        assert_eq!(session.page(), Page::Welcome);
        assert_eq!(session.filter.granularity, Granularity::Monthly);
        assert_eq!(session.filter.chart_kind, ChartKind::Area);
        assert_eq!((session.filter.start_date, session.filter.end_date), (day(1), day(9)));
    }

    #[test]
    fn test_filter_survives_navigation() {
        let ds = two_days();
        let catalog = MetricCatalog::default();
        let mut session = DashboardSession::new(&ds, Granularity::Daily, ChartKind::Bar, day(20));

        session.filter.shift_start(2);
        assert!(session.navigate(NavAction::OpenSection(Section::B), &catalog));
        assert!(session.navigate(NavAction::OpenMetric("Total Likes".into()), &catalog));
        assert!(session.navigate(NavAction::Back, &catalog));
        assert_eq!(session.filter.start_date, day(3));
        assert_eq!(session.section(), Some(Section::B));
    }

    #[test]
    fn test_reload_reclamps_filter() {
        let ds = two_days();
        let mut session = DashboardSession::new(&ds, Granularity::Daily, ChartKind::Bar, day(20));

        let shorter =
            Dataset::from_unsorted(vec![Observation::empty(day(3)), Observation::empty(day(5))])
                .unwrap();
        session.on_dataset_reloaded(&shorter);
        assert_eq!((session.filter.start_date, session.filter.end_date), (day(3), day(5)));
    }
}
