pub mod breadcrumbs;
pub mod metric_card;
pub mod metric_chart;
pub mod toast;

pub use breadcrumbs::Breadcrumb;
pub use toast::{Toast, ToastKind, ToastManager};
