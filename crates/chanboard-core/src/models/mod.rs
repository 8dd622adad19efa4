//! Data models for chanboard

pub mod filter;
pub mod metric;
pub mod navigation;
pub mod observation;

pub use filter::{ChartKind, FilterState, Granularity};
pub use metric::{MetricCatalog, MetricDef, Section, TotalScope};
pub use navigation::{NavAction, NavigationState, Page};
pub use observation::{Column, Dataset, Observation};
