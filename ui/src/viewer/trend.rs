//! The unified trend chart: merged rows rendered as one SVG region.
//!
//! The x axis is categorical over the merged row sequence: rows sit at
//! equal spacing in the order the alignment engine produced them. A series
//! with no reading for a row leaves a gap (the polyline breaks), never a
//! zero. The same markup the page shows is what the report captures.

use std::collections::HashSet;

use dioxus::prelude::*;

use crate::core::align::{merge_rows, Row};
use crate::core::series::Series;
use crate::core::visibility;
use crate::report::svg::xml_escape;
use crate::viewer::ViewerState;

pub const CHART_WIDTH_PX: u32 = 1200;
pub const CHART_HEIGHT_PX: u32 = 480;

const PAD_LEFT: f64 = 60.0;
const PAD_RIGHT: f64 = 24.0;
const PAD_TOP: f64 = 48.0;
const PAD_BOTTOM: f64 = 36.0;
const MAX_X_TICKS: usize = 8;

/// Value range across the visible series, padded so lines never hug the
/// frame. `None` when nothing is visible.
fn visible_value_range(rows: &[Row], active: &[&Series]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in rows {
        for series in active {
            if let Some(value) = row.values.get(&series.name) {
                if value.is_finite() {
                    min = min.min(*value);
                    max = max.max(*value);
                }
            }
        }
    }
    if !min.is_finite() {
        return None;
    }
    let span = max - min;
    if span.abs() < 1e-9 {
        Some((min - 0.5, max + 0.5))
    } else {
        Some((min - span * 0.05, max + span * 0.05))
    }
}

/// Split one series' readings into contiguous pixel segments; a row without
/// a value for this series ends the current segment.
fn series_segments(
    rows: &[Row],
    name: &str,
    x_at: impl Fn(usize) -> f64,
    y_at: impl Fn(f64) -> f64,
) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        match row.values.get(name) {
            Some(value) if value.is_finite() => current.push((x_at(i), y_at(*value))),
            _ => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Build the chart region as standalone SVG markup.
pub fn chart_svg(rows: &[Row], series: &[Series], hidden: &HashSet<String>) -> String {
    let width = f64::from(CHART_WIDTH_PX);
    let height = f64::from(CHART_HEIGHT_PX);
    let active = visibility::active_series(series, hidden);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{CHART_WIDTH_PX}' height='{CHART_HEIGHT_PX}' viewBox='0 0 {CHART_WIDTH_PX} {CHART_HEIGHT_PX}'>\n"
    ));
    svg.push_str(&format!(
        "  <rect width='{CHART_WIDTH_PX}' height='{CHART_HEIGHT_PX}' fill='#ffffff'/>\n"
    ));

    // Legend line across the top, visible series only.
    let mut legend_x = PAD_LEFT;
    for s in &active {
        svg.push_str(&format!(
            "  <rect x='{legend_x:.0}' y='14' width='12' height='12' rx='2' fill='{}'/>\n",
            s.color
        ));
        svg.push_str(&format!(
            "  <text x='{:.0}' y='25' font-family='sans-serif' font-size='13' fill='#374151'>{}</text>\n",
            legend_x + 18.0,
            xml_escape(&s.name)
        ));
        legend_x += 30.0 + s.name.chars().count() as f64 * 7.5;
    }

    let inner_w = width - PAD_LEFT - PAD_RIGHT;
    let inner_h = height - PAD_TOP - PAD_BOTTOM;
    let bottom = height - PAD_BOTTOM;

    match visible_value_range(rows, &active) {
        None => {
            svg.push_str(&format!(
                "  <text x='{:.0}' y='{:.0}' text-anchor='middle' font-family='sans-serif' font-size='15' font-style='italic' fill='#6b7280'>No data for the selected period</text>\n",
                width / 2.0,
                height / 2.0
            ));
        }
        Some((y_min, y_max)) => {
            let denom = rows.len().saturating_sub(1).max(1) as f64;
            let x_at = move |i: usize| PAD_LEFT + i as f64 * inner_w / denom;
            let y_span = y_max - y_min;
            let y_at = move |v: f64| PAD_TOP + (1.0 - (v - y_min) / y_span) * inner_h;

            // Frame and horizontal guides.
            svg.push_str(&format!(
                "  <line x1='{PAD_LEFT}' y1='{PAD_TOP}' x2='{PAD_LEFT}' y2='{bottom:.0}' stroke='#d1d5db' stroke-width='1'/>\n"
            ));
            svg.push_str(&format!(
                "  <line x1='{PAD_LEFT}' y1='{bottom:.0}' x2='{:.0}' y2='{bottom:.0}' stroke='#d1d5db' stroke-width='1'/>\n",
                width - PAD_RIGHT
            ));
            for step in 0..=4 {
                let value = y_min + y_span * f64::from(step) / 4.0;
                let y = y_at(value);
                if step > 0 {
                    svg.push_str(&format!(
                        "  <line x1='{PAD_LEFT}' y1='{y:.1}' x2='{:.0}' y2='{y:.1}' stroke='#f3f4f6' stroke-width='1'/>\n",
                        width - PAD_RIGHT
                    ));
                }
                svg.push_str(&format!(
                    "  <text x='{:.0}' y='{:.1}' text-anchor='end' font-family='sans-serif' font-size='11' fill='#6b7280'>{value:.1}</text>\n",
                    PAD_LEFT - 8.0,
                    y + 4.0
                ));
            }

            // Sparse x tick labels over the row labels.
            let step = rows.len().div_ceil(MAX_X_TICKS).max(1);
            for (i, row) in rows.iter().enumerate().step_by(step) {
                svg.push_str(&format!(
                    "  <text x='{:.1}' y='{:.0}' text-anchor='middle' font-family='sans-serif' font-size='11' fill='#6b7280'>{}</text>\n",
                    x_at(i),
                    bottom + 18.0,
                    xml_escape(&row.time_label)
                ));
            }

            for s in &active {
                for segment in series_segments(rows, &s.name, x_at, y_at) {
                    if let [(x, y)] = segment.as_slice() {
                        svg.push_str(&format!(
                            "  <circle cx='{x:.1}' cy='{y:.1}' r='3' fill='{}'/>\n",
                            s.color
                        ));
                    } else {
                        let points = segment
                            .iter()
                            .map(|(x, y)| format!("{x:.1},{y:.1}"))
                            .collect::<Vec<_>>()
                            .join(" ");
                        svg.push_str(&format!(
                            "  <polyline points='{points}' fill='none' stroke='{}' stroke-width='2' stroke-linejoin='round' stroke-linecap='round'/>\n",
                            s.color
                        ));
                    }
                }
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[component]
pub fn TrendChart(state: Signal<ViewerState>) -> Element {
    let s = state();

    if s.series.is_empty() {
        return rsx! {
            section { class: "viewer-card trend-chart",
                div { class: "viewer-card__header",
                    h2 { "Trend" }
                }
                p { class: "viewer-card__placeholder",
                    "Process a batch of datalogger files to see their readings on one chart."
                }
            }
        };
    }

    let rows = merge_rows(&s.series, &s.range());
    let row_count = rows.len();
    let svg = chart_svg(&rows, &s.series, &s.hidden);
    let legend: Vec<(String, &'static str, bool)> = s
        .series
        .iter()
        .map(|series| {
            (
                series.name.clone(),
                series.color,
                s.hidden.contains(&series.name),
            )
        })
        .collect();

    rsx! {
        section { class: "viewer-card trend-chart",
            div { class: "viewer-card__header",
                h2 { "Trend" }
                span { class: "viewer-card__meta", "{row_count} aligned rows" }
            }

            div { class: "trend-chart__canvas", dangerous_inner_html: "{svg}" }

            div { class: "trend-chart__legend",
                for (name, color, is_hidden) in legend.into_iter() {
                    {render_legend_entry(state, name, color, is_hidden)}
                }
            }
        }
    }
}

fn render_legend_entry(
    mut state: Signal<ViewerState>,
    name: String,
    color: &'static str,
    is_hidden: bool,
) -> Element {
    let toggle_name = name.clone();
    rsx! {
        button {
            r#type: "button",
            class: format!(
                "trend-chart__legend-entry {}",
                if is_hidden { "trend-chart__legend-entry--hidden" } else { "" }
            ),
            onclick: move |_| {
                visibility::toggle(&mut state.write().hidden, &toggle_name);
            },
            span {
                class: "trend-chart__swatch",
                style: "background: {color};",
            }
            "{name}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::DateRange;
    use crate::core::series::palette_color;
    use crate::core::timefmt;
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn sample(ts: OffsetDateTime, temperature: f64) -> crate::core::series::Sample {
        crate::core::series::Sample {
            timestamp: ts,
            temperature,
            time_label: timefmt::minute_label(ts),
        }
    }

    fn series(id: usize, name: &str, samples: Vec<crate::core::series::Sample>) -> Series {
        Series {
            id,
            name: name.to_string(),
            color: palette_color(id),
            samples,
            resampled_samples: Vec::new(),
            stats: None,
        }
    }

    fn batch_with_gap() -> Vec<Series> {
        vec![
            series(
                0,
                "a.xlsx",
                vec![
                    sample(datetime!(2024-03-05 10:00 UTC), 20.0),
                    sample(datetime!(2024-03-05 11:00 UTC), 21.0),
                    sample(datetime!(2024-03-05 12:00 UTC), 20.5),
                ],
            ),
            series(
                1,
                "b.xlsx",
                vec![
                    sample(datetime!(2024-03-05 10:00 UTC), 22.0),
                    // no 11:00 reading: the line must break
                    sample(datetime!(2024-03-05 12:00 UTC), 23.0),
                ],
            ),
        ]
    }

    #[test]
    fn gaps_split_a_series_into_segments() {
        let rows = merge_rows(&batch_with_gap(), &DateRange::default());
        let segments = series_segments(&rows, "b.xlsx", |i| i as f64, |v| v);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].len(), 1);

        let continuous = series_segments(&rows, "a.xlsx", |i| i as f64, |v| v);
        assert_eq!(continuous.len(), 1);
        assert_eq!(continuous[0].len(), 3);
    }

    #[test]
    fn value_range_ignores_hidden_series() {
        let batch = batch_with_gap();
        let rows = merge_rows(&batch, &DateRange::default());

        let all: Vec<&Series> = batch.iter().collect();
        let (min, max) = visible_value_range(&rows, &all).unwrap();
        assert!(min < 20.0 && max > 23.0 - 1e-9);

        let only_a: Vec<&Series> = batch.iter().take(1).collect();
        let (_, max_a) = visible_value_range(&rows, &only_a).unwrap();
        assert!(max_a < 22.0);

        assert!(visible_value_range(&rows, &[]).is_none());
    }

    #[test]
    fn flat_series_still_gets_a_drawable_span() {
        let batch = vec![series(
            0,
            "flat.xlsx",
            vec![
                sample(datetime!(2024-03-05 10:00 UTC), 20.0),
                sample(datetime!(2024-03-05 11:00 UTC), 20.0),
            ],
        )];
        let rows = merge_rows(&batch, &DateRange::default());
        let refs: Vec<&Series> = batch.iter().collect();
        let (min, max) = visible_value_range(&rows, &refs).unwrap();
        assert!(max - min >= 1.0 - 1e-9);
    }

    #[test]
    fn hidden_series_draws_no_line_and_no_legend_entry() {
        let batch = batch_with_gap();
        let rows = merge_rows(&batch, &DateRange::default());
        let mut hidden = HashSet::new();
        hidden.insert("b.xlsx".to_string());

        let svg = chart_svg(&rows, &batch, &hidden);
        assert!(svg.contains(palette_color(0)));
        assert!(!svg.contains(palette_color(1)));
        // The merged rows still carry b's keys; only the display omits them.
        assert!(rows.iter().any(|r| r.values.contains_key("b.xlsx")));
    }

    #[test]
    fn empty_rows_render_the_no_data_message() {
        let svg = chart_svg(&[], &batch_with_gap(), &HashSet::new());
        assert!(svg.contains("No data for the selected period"));
        assert!(!svg.contains("polyline"));
    }
}
