//! End-to-end pipeline checks: shaped upload responses through alignment,
//! filtering, visibility and report planning.

use std::collections::HashSet;

use ui::core::align::merge_rows;
use ui::core::range::DateRange;
use ui::core::resampled::resampled_view;
use ui::core::visibility;
use ui::report::layout::{plan_report, BlockKind};
use ui::report::svg::{table_height_px, TABLE_WIDTH_PX};
use ui::upload::{shape_series, UploadResponse, WireSample, WireStats};

fn wire(ts: &str, temperature: f64) -> WireSample {
    WireSample {
        timestamp: ts.to_string(),
        temperature,
    }
}

fn fridge_response() -> UploadResponse {
    UploadResponse {
        data: vec![
            wire("2024-03-05T10:00:00", 4.0),
            wire("2024-03-05T10:01:00", 4.2),
            wire("2024-03-05T11:00:00", 4.1),
        ],
        stats: Some(WireStats {
            min: 4.0,
            avg: 4.1,
            max: 4.2,
            count: Some(3),
            start: "2024-03-05T10:00:00".into(),
            end: "2024-03-05T11:00:00".into(),
        }),
        resampled: Some(vec![
            wire("2024-03-05T10:00:00", 4.1),
            wire("2024-03-05T11:00:00", 4.1),
        ]),
    }
}

fn freezer_response() -> UploadResponse {
    UploadResponse {
        data: vec![
            wire("2024-03-05T10:00:00", -18.0),
            wire("2024-03-05T12:00:00", -17.5),
        ],
        stats: None,
        resampled: Some(vec![wire("2024-03-05T12:00:00", -17.8)]),
    }
}

#[test]
fn range_narrows_chart_and_tables_together() {
    let batch = vec![
        shape_series(0, "fridge.xlsx".into(), fridge_response()),
        shape_series(1, "freezer.xlsx".into(), freezer_response()),
    ];

    let everything = DateRange::default();
    assert_eq!(merge_rows(&batch, &everything).len(), 4);
    let tables = resampled_view(&batch, &everything);
    assert_eq!(tables[0].samples.len(), 2);
    assert_eq!(tables[1].samples.len(), 1);

    // Clamp to the 10:00 hour: both derived views shrink, independently.
    let narrow = DateRange::from_inputs("2024-03-05T10:00", "2024-03-05T10:59");
    let rows = merge_rows(&batch, &narrow);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.time_label.starts_with("10:")));

    let tables = resampled_view(&batch, &narrow);
    assert_eq!(tables[0].samples.len(), 1);
    // The freezer table stays in the view with nothing in range.
    assert_eq!(tables[1].name, "freezer.xlsx");
    assert!(tables[1].samples.is_empty());
}

#[test]
fn hiding_a_series_changes_tables_and_stats_but_not_row_keys() {
    let batch = vec![
        shape_series(0, "fridge.xlsx".into(), fridge_response()),
        shape_series(1, "freezer.xlsx".into(), freezer_response()),
    ];
    let range = DateRange::default();
    let mut hidden = HashSet::new();

    // Two visible: no stats.
    assert!(visibility::displayed_stats(&batch, &hidden).is_none());

    visibility::toggle(&mut hidden, "freezer.xlsx");

    // Exactly one visible, and it carries stats.
    let (only, stats) = visibility::displayed_stats(&batch, &hidden).unwrap();
    assert_eq!(only.name, "fridge.xlsx");
    assert_eq!(stats.count, Some(3));

    // The chart's merged row set is untouched by visibility: the hidden
    // series still occupies its row keys.
    let rows = merge_rows(&batch, &range);
    assert!(rows.iter().any(|row| row.values.contains_key("freezer.xlsx")));

    // Tables shrink to the visible series.
    let visible_tables: Vec<_> = resampled_view(&batch, &range)
        .into_iter()
        .filter(|table| !hidden.contains(&table.name))
        .collect();
    assert_eq!(visible_tables.len(), 1);
    assert_eq!(visible_tables[0].name, "fridge.xlsx");
}

#[test]
fn report_plan_covers_chart_stats_and_only_visible_tables() {
    let batch = vec![
        shape_series(0, "fridge.xlsx".into(), fridge_response()),
        shape_series(1, "freezer.xlsx".into(), freezer_response()),
    ];
    let range = DateRange::default();
    let mut hidden = HashSet::new();
    visibility::toggle(&mut hidden, "freezer.xlsx");

    let with_stats = visibility::displayed_stats(&batch, &hidden).is_some();
    assert!(with_stats);

    let table_dims: Vec<(u32, u32)> = resampled_view(&batch, &range)
        .iter()
        .filter(|table| !hidden.contains(&table.name))
        .map(|table| (TABLE_WIDTH_PX, table_height_px(table)))
        .collect();
    assert_eq!(table_dims.len(), 1);

    let plan = plan_report((1200, 480), with_stats, &table_dims);

    let kinds: Vec<BlockKind> = plan.blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Chart, BlockKind::Stats, BlockKind::Table(0)]
    );
    // Chart leads page one from the top margin.
    assert_eq!(plan.blocks[0].page, 0);
}
