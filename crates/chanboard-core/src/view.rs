//! Page view models
//!
//! [`render`] turns the session, dataset and catalog into a frontend
//! agnostic [`PageView`]. Nothing here touches a terminal, so every page is
//! testable as plain data.
//!
//! Each metric card is computed independently: a bad column or an inverted
//! date range degrades that one card to [`Widget::Degraded`] and leaves the
//! rest of the page intact.

use crate::analytics::{
    aggregate_range, calculate_delta, incomplete_note, is_period_complete, Delta, Series,
};
use crate::chart::{build_chart, ChartSeries};
use crate::config::DashboardConfig;
use crate::error::CoreError;
use crate::format::format_thousands;
use crate::models::metric::title_from_slug;
use crate::models::observation::sum_column;
use crate::models::{
    Column, Dataset, FilterState, MetricCatalog, MetricDef, Page, Section, TotalScope,
};
use crate::session::DashboardSession;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

pub const DASHBOARD_TITLE: &str = "YouTube Channel Dashboard";

/// Chart heights, in terminal rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub card_chart_height: u16,
    pub detail_chart_height: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            card_chart_height: config.card_chart_height,
            detail_chart_height: config.detail_chart_height,
        }
    }
}

/// A widget that either rendered or failed on its own
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Widget<T> {
    Ready(T),
    Degraded {
        title: String,
        #[serde(serialize_with = "serialize_error")]
        error: CoreError,
    },
}

fn serialize_error<S: serde::Serializer>(error: &CoreError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}

impl<T> Widget<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Widget::Ready(inner) => Some(inner),
            Widget::Degraded { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Widget::Ready(_) => None,
            Widget::Degraded { error, .. } => Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Widget::Degraded { .. })
    }
}

/// One metric's headline number, change and chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub slug: String,
    pub color: String,
    pub column: Column,
    pub total: f64,
    pub total_label: String,
    pub delta: Delta,
    /// `+1,234 (+5.00%)`
    pub delta_label: String,
    pub chart: ChartSeries,
    /// Set when the last plotted period is still running
    pub incomplete_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WelcomeView {
    pub title: String,
    /// (section, heading) entries the user can open
    pub sections: Vec<(Section, String)>,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub heading: String,
    pub cards: Vec<Widget<MetricCard>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDetailView {
    pub section: Section,
    /// "Total Views Chart"
    pub heading: String,
    pub card: Widget<MetricCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Welcome(WelcomeView),
    Section(SectionView),
    MetricDetail(MetricDetailView),
}

impl PageView {
    /// Every error carried by a degraded widget on this page
    pub fn errors(&self) -> Vec<&CoreError> {
        match self {
            PageView::Welcome(_) => Vec::new(),
            PageView::Section(view) => view.cards.iter().filter_map(Widget::error).collect(),
            PageView::MetricDetail(view) => view.card.error().into_iter().collect(),
        }
    }
}

/// Render the page the session is on
pub fn render(
    session: &DashboardSession,
    dataset: &Dataset,
    catalog: &MetricCatalog,
    today: NaiveDate,
    options: RenderOptions,
) -> PageView {
    let nav = &session.navigation;
    match (nav.page(), nav.section()) {
        (Page::Section, Some(section)) => PageView::Section(SectionView {
            section,
            heading: section.heading().to_string(),
            cards: catalog
                .metrics(section)
                .iter()
                .map(|def| {
                    metric_widget(
                        def,
                        section,
                        dataset,
                        &session.filter,
                        today,
                        options.card_chart_height,
                    )
                })
                .collect(),
        }),
        (Page::MetricDetail, Some(section)) => {
            let def = nav.metric().and_then(|slug| catalog.find(section, slug));
            let card = match def {
                Some(def) => metric_widget(
                    def,
                    section,
                    dataset,
                    &session.filter,
                    today,
                    options.detail_chart_height,
                ),
                None => Widget::Degraded {
                    title: nav.metric().unwrap_or_default().to_string(),
                    error: CoreError::column_not_found(nav.metric().unwrap_or_default()),
                },
            };
            PageView::MetricDetail(MetricDetailView {
                section,
                heading: detail_heading(nav.metric().unwrap_or_default()),
                card,
            })
        }
        _ => PageView::Welcome(welcome(dataset)),
    }
}

/// "total_views" -> "Total Views Chart"
pub fn detail_heading(metric_slug: &str) -> String {
    format!("{} Chart", title_from_slug(metric_slug))
}

fn welcome(dataset: &Dataset) -> WelcomeView {
    WelcomeView {
        title: DASHBOARD_TITLE.to_string(),
        sections: Section::all()
            .iter()
            .map(|s| (*s, s.heading().to_string()))
            .collect(),
        rows: dataset.len(),
        first_date: dataset.min_date(),
        last_date: dataset.max_date(),
    }
}

fn metric_widget(
    def: &MetricDef,
    section: Section,
    dataset: &Dataset,
    filter: &FilterState,
    today: NaiveDate,
    height: u16,
) -> Widget<MetricCard> {
    match metric_card(def, section, dataset, filter, today, height) {
        Ok(card) => Widget::Ready(card),
        Err(error) => {
            warn!(metric = %def.title, error = %error, "Metric card degraded");
            Widget::Degraded {
                title: def.title.clone(),
                error,
            }
        }
    }
}

/// Build one metric card under the current filter
///
/// # Errors
/// `ColumnNotFound` when the metric names an unknown column, `ResampleError`
/// when the filter's start date is after its end date.
pub fn metric_card(
    def: &MetricDef,
    section: Section,
    dataset: &Dataset,
    filter: &FilterState,
    today: NaiveDate,
    height: u16,
) -> Result<MetricCard, CoreError> {
    let column: Column = def.column.parse()?;
    let granularity = filter.granularity;
    let buckets = aggregate_range(dataset, filter.start_date, filter.end_date, granularity)?;
    let chart = build_chart(&buckets, &def.column, granularity, filter.chart_kind, height)?;

    let total = match section.total_scope() {
        TotalScope::AllTime => dataset.total(column),
        TotalScope::SelectedRange => {
            sum_column(dataset.slice(filter.start_date, filter.end_date), column)
        }
    };

    let series = Series::from_buckets(&buckets, column, granularity);
    let delta = calculate_delta(&series.values());
    let incomplete = series
        .last_period()
        .filter(|start| !is_period_complete(*start, today, granularity))
        .map(|_| incomplete_note(granularity));

    Ok(MetricCard {
        title: def.title.clone(),
        slug: def.slug(),
        color: def.color.clone(),
        column,
        total,
        total_label: format_thousands(total, if column.is_fractional() { 1 } else { 0 }),
        delta,
        delta_label: delta.label(),
        chart,
        incomplete_note: incomplete,
    })
}
