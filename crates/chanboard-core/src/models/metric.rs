//! Metric catalog: which metrics each dashboard section shows

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistics section of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// All-time channel totals
    A,
    /// Engagement totals over the selected range
    B,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[Section::A, Section::B]
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Section::A => "Section 1: All-Time Statistics",
            Section::B => "Section 2: Engagement Statistics",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Section::A => "Section 1",
            Section::B => "Section 2",
        }
    }

    /// Stylesheet resource looked up while this section is active
    pub fn style_file(&self) -> &'static str {
        match self {
            Section::A => "style.toml",
            Section::B => "section2_style.toml",
        }
    }

    /// Rows the card totals are summed over
    pub fn total_scope(&self) -> TotalScope {
        match self {
            Section::A => TotalScope::AllTime,
            Section::B => TotalScope::SelectedRange,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Span used for a card's headline total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalScope {
    AllTime,
    SelectedRange,
}

/// One metric card definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDef {
    /// Card title, e.g. "Total Views"
    pub title: String,
    /// Source column name, resolved at render time
    pub column: String,
    /// Accent colour as `#rrggbb`
    pub color: String,
}

impl MetricDef {
    pub fn new(
        title: impl Into<String>,
        column: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            column: column.into(),
            color: color.into(),
        }
    }

    /// Lower-case, underscore-separated identifier ("total_views")
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    /// Matches either the title (case-insensitive) or the slug
    pub fn matches(&self, name: &str) -> bool {
        self.title.eq_ignore_ascii_case(name.trim()) || self.slug() == slugify(name)
    }
}

/// Convert a title into a metric slug
pub fn slugify(title: &str) -> String {
    title.trim().replace(' ', "_").to_lowercase()
}

/// Turn a slug back into a display title ("total_views" -> "Total Views")
pub fn title_from_slug(slug: &str) -> String {
    slug.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Metrics per section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCatalog {
    section_a: Vec<MetricDef>,
    section_b: Vec<MetricDef>,
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self {
            section_a: vec![
                MetricDef::new("Total Subscribers", "NET_SUBSCRIBERS", "#29b80a"),
                MetricDef::new("Total Views", "VIEWS", "#FF9F36"),
                MetricDef::new("Total Watch Hours", "WATCH_HOURS", "#D45B90"),
            ],
            section_b: vec![
                MetricDef::new("Total Likes", "LIKES", "#3F8EFC"),
                MetricDef::new("Total Shares", "SHARES", "#F5C518"),
                MetricDef::new("Total Comments", "COMMENTS", "#9B59B6"),
            ],
        }
    }
}

impl MetricCatalog {
    pub fn new(section_a: Vec<MetricDef>, section_b: Vec<MetricDef>) -> Self {
        Self {
            section_a,
            section_b,
        }
    }

    pub fn metrics(&self, section: Section) -> &[MetricDef] {
        match section {
            Section::A => &self.section_a,
            Section::B => &self.section_b,
        }
    }

    /// Look up a metric by title or slug within one section
    pub fn find(&self, section: Section, name: &str) -> Option<&MetricDef> {
        self.metrics(section).iter().find(|m| m.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        let def = MetricDef::new("Total Watch Hours", "WATCH_HOURS", "#D45B90");
        assert_eq!(def.slug(), "total_watch_hours");
        assert_eq!(title_from_slug(&def.slug()), "Total Watch Hours");
    }

    #[test]
    fn test_find_is_section_scoped() {
        let catalog = MetricCatalog::default();
        assert!(catalog.find(Section::A, "Total Views").is_some());
        assert!(catalog.find(Section::A, "total_views").is_some());
        assert!(catalog.find(Section::B, "Total Views").is_none());
        assert!(catalog.find(Section::B, "total likes").is_some());
    }

    #[test]
    fn test_section_style_lookup() {
        assert_eq!(Section::A.style_file(), "style.toml");
        assert_eq!(Section::B.style_file(), "section2_style.toml");
        assert_eq!(Section::A.total_scope(), TotalScope::AllTime);
    }
}
