//! One renderer per dashboard page

pub mod metric_detail;
pub mod section;
pub mod welcome;
