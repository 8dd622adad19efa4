//! Bar / area rendering of a [`ChartSeries`]

use crate::theme::Palette;
use chanboard_core::chart::{ChartPoint, ChartSeries};
use chanboard_core::format::format_compact;
use chanboard_core::models::{ChartKind, Granularity};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, BarChart, Chart, Dataset, GraphType, Paragraph},
};

/// Axis label short enough for one bar
pub fn short_label(point: &ChartPoint, granularity: Granularity) -> String {
    match granularity {
        // "2024-03-11" -> "03-11"
        Granularity::Daily | Granularity::Weekly => point
            .label
            .split_once('-')
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_else(|| point.label.clone()),
        Granularity::Monthly | Granularity::Quarterly => point.label.clone(),
    }
}

fn bar_width(granularity: Granularity) -> u16 {
    match granularity {
        Granularity::Daily | Granularity::Weekly => 5,
        Granularity::Monthly | Granularity::Quarterly => 7,
    }
}

/// Bars are unsigned; negative periods (net subscriber loss) draw as empty
fn bar_value(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

/// Draw `series` in `area` using the series' chart kind
pub fn render(
    frame: &mut Frame,
    area: Rect,
    series: &ChartSeries,
    color: Color,
    palette: &Palette,
) {
    if series.is_empty() {
        let empty = Paragraph::new("No data in the selected range")
            .style(Style::default().fg(palette.muted));
        frame.render_widget(empty, area);
        return;
    }

    match series.kind {
        ChartKind::Bar => render_bars(frame, area, series, color, palette),
        ChartKind::Area => render_area(frame, area, series, color, palette),
    }
}

fn render_bars(
    frame: &mut Frame,
    area: Rect,
    series: &ChartSeries,
    color: Color,
    palette: &Palette,
) {
    let width = bar_width(series.granularity);
    let fits = (area.width / (width + 1)).max(1) as usize;
    let points = series.tail(fits);

    let labels: Vec<String> = points
        .iter()
        .map(|p| short_label(p, series.granularity))
        .collect();
    let data: Vec<(&str, u64)> = points
        .iter()
        .zip(&labels)
        .map(|(p, label)| (label.as_str(), bar_value(p.value)))
        .collect();

    let bar_chart = BarChart::default()
        .data(&data[..])
        .bar_width(width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(palette.muted));

    frame.render_widget(bar_chart, area);
}

fn render_area(
    frame: &mut Frame,
    area: Rect,
    series: &ChartSeries,
    color: Color,
    palette: &Palette,
) {
    let data: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let y_min = series.min_value();
    let y_max = series.max_value().max(1.0);
    let x_max = (data.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![
        // Filled body
        Dataset::default()
            .marker(symbols::Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(color))
            .data(&data),
        // Outline
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette.text))
            .data(&data),
    ];

    let first = series.points.first().map(|p| p.label.clone()).unwrap_or_default();
    let last = series.points.last().map(|p| p.label.clone()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .labels(vec![Span::raw(first), Span::raw(last)])
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .labels(vec![
                    Span::raw(format_compact(y_min)),
                    Span::raw(format_compact(y_max)),
                ])
                .bounds([y_min, y_max * 1.1]),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanboard_core::analytics::aggregate;
    use chanboard_core::chart::build_chart;
    use chanboard_core::models::{Dataset as ChannelData, Observation};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn series(kind: ChartKind) -> ChartSeries {
        let rows = (1..=5)
            .map(|d| Observation {
                views: d * 100,
                ..Observation::empty(NaiveDate::from_ymd_opt(2024, 3, d as u32).unwrap())
            })
            .collect();
        let ds = ChannelData::from_unsorted(rows).unwrap();
        build_chart(&aggregate(&ds, Granularity::Daily), "VIEWS", Granularity::Daily, kind, 8)
            .unwrap()
    }

    #[test]
    fn test_short_labels() {
        let s = series(ChartKind::Bar);
        assert_eq!(short_label(&s.points[0], Granularity::Daily), "03-01");
        let quarter = ChartPoint {
            period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            label: "2024-Q1".to_string(),
            value: 0.0,
        };
        assert_eq!(short_label(&quarter, Granularity::Quarterly), "2024-Q1");
    }

    #[test]
    fn test_negative_bars_clamp() {
        assert_eq!(bar_value(-12.0), 0);
        assert_eq!(bar_value(12.4), 12);
    }

    #[test]
    fn test_renders_both_kinds() {
        let palette = Palette::default();
        for kind in [ChartKind::Bar, ChartKind::Area] {
            let s = series(kind);
            let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
            terminal
                .draw(|f| render(f, f.area(), &s, Color::Yellow, &palette))
                .unwrap();
        }
    }

    #[test]
    fn test_empty_series_message() {
        let mut s = series(ChartKind::Bar);
        s.points.clear();
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &s, Color::Yellow, &Palette::default()))
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("No data in the selected range"));
    }
}
