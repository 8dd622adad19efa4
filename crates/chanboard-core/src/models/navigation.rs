//! Page navigation state machine
//!
//! Welcome -> Section -> MetricDetail, and back the same way. Every
//! transition is an explicit user action; anything else is ignored.

use crate::models::metric::{MetricCatalog, Section};
use tracing::debug;

/// Page currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Welcome,
    Section,
    MetricDetail,
}

/// User-triggered navigation action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    OpenSection(Section),
    /// Metric title or slug
    OpenMetric(String),
    Back,
}

/// Where the user is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    page: Page,
    section: Option<Section>,
    /// Slug of the drilled-in metric
    metric: Option<String>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn section(&self) -> Option<Section> {
        self.section
    }

    pub fn metric(&self) -> Option<&str> {
        self.metric.as_deref()
    }

    /// Apply an action. Returns true if the state changed.
    pub fn apply(&mut self, action: NavAction, catalog: &MetricCatalog) -> bool {
        let changed = match (self.page, action) {
            (Page::Welcome, NavAction::OpenSection(section)) => {
                self.page = Page::Section;
                self.section = Some(section);
                true
            }
            (Page::Section, NavAction::OpenMetric(name)) => {
                let found = self
                    .section
                    .and_then(|s| catalog.find(s, &name))
                    .map(|m| m.slug());
                match found {
                    Some(slug) => {
                        self.page = Page::MetricDetail;
                        self.metric = Some(slug);
                        true
                    }
                    None => {
                        debug!(
                            metric = %name,
                            section = ?self.section,
                            "Metric not in active section, ignoring"
                        );
                        false
                    }
                }
            }
            (Page::MetricDetail, NavAction::Back) => {
                self.page = Page::Section;
                self.metric = None;
                true
            }
            (Page::Section, NavAction::Back) => {
                self.page = Page::Welcome;
                self.section = None;
                true
            }
            (page, action) => {
                debug!(?page, ?action, "Invalid navigation transition, ignoring");
                false
            }
        };

        if changed {
            debug!(page = ?self.page, section = ?self.section, metric = ?self.metric, "Navigated");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_round_trip() {
        let catalog = MetricCatalog::default();
        let mut nav = NavigationState::new();
        assert_eq!(nav.page(), Page::Welcome);

        assert!(nav.apply(NavAction::OpenSection(Section::A), &catalog));
        assert_eq!(nav.page(), Page::Section);
        assert_eq!(nav.section(), Some(Section::A));

        assert!(nav.apply(NavAction::OpenMetric("Total Views".into()), &catalog));
        assert_eq!(nav.page(), Page::MetricDetail);
        assert_eq!(nav.metric(), Some("total_views"));

        assert!(nav.apply(NavAction::Back, &catalog));
        assert_eq!(nav.page(), Page::Section);
        assert_eq!(nav.section(), Some(Section::A));
        assert_eq!(nav.metric(), None);

        assert!(nav.apply(NavAction::Back, &catalog));
        assert_eq!(nav.page(), Page::Welcome);
        assert_eq!(nav.section(), None);
    }

    #[test]
    fn test_unknown_metric_is_noop() {
        let catalog = MetricCatalog::default();
        let mut nav = NavigationState::new();
        nav.apply(NavAction::OpenSection(Section::B), &catalog);
        let before = nav.clone();

        assert!(!nav.apply(NavAction::OpenMetric("Total Views".into()), &catalog));
        assert_eq!(nav, before);
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let catalog = MetricCatalog::default();
        let mut nav = NavigationState::new();

        assert!(!nav.apply(NavAction::Back, &catalog));
        assert!(!nav.apply(NavAction::OpenMetric("Total Views".into()), &catalog));
        assert_eq!(nav, NavigationState::new());

        nav.apply(NavAction::OpenSection(Section::A), &catalog);
        assert!(!nav.apply(NavAction::OpenSection(Section::B), &catalog));
        assert_eq!(nav.section(), Some(Section::A));

        nav.apply(NavAction::OpenMetric("total_subscribers".into()), &catalog);
        assert!(!nav.apply(NavAction::OpenSection(Section::B), &catalog));
        assert!(!nav.apply(NavAction::OpenMetric("Total Views".into()), &catalog));
        assert_eq!(nav.metric(), Some("total_subscribers"));
    }
}
