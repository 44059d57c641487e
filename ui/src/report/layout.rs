//! Pure pagination planner for the exported report.
//!
//! Geometry is in millimetres on a landscape A4 page with fixed margins.
//! Bitmaps are scaled to the content width preserving their pixel aspect
//! ratio; a block that would cross the printable bottom starts a new page.

pub const PAGE_WIDTH_MM: f64 = 297.0;
pub const PAGE_HEIGHT_MM: f64 = 210.0;
pub const MARGIN_MM: f64 = 10.0;
/// Vertical gap between consecutive blocks.
pub const BLOCK_GAP_MM: f64 = 6.0;
/// Line advance inside the stats block.
pub const STATS_LINE_MM: f64 = 6.0;
/// Fixed height of the five-line stats block.
pub const STATS_BLOCK_MM: f64 = 5.0 * STATS_LINE_MM + 4.0;

pub fn content_width_mm() -> f64 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Chart,
    Stats,
    /// Index into the captured table list.
    Table(usize),
}

/// One placed block; `y_top_mm` is measured from the top edge of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub kind: BlockKind,
    pub page: usize,
    pub y_top_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPlan {
    pub blocks: Vec<PlacedBlock>,
    pub page_count: usize,
}

fn scaled_height_mm((width_px, height_px): (u32, u32), target_width_mm: f64) -> f64 {
    if width_px == 0 {
        return 0.0;
    }
    target_width_mm * f64::from(height_px) / f64::from(width_px)
}

/// Lay the report out: chart on top of page one, the optional stats block
/// under it, then each table in order with page breaks as needed.
pub fn plan_report(
    chart_px: (u32, u32),
    with_stats: bool,
    tables_px: &[(u32, u32)],
) -> ReportPlan {
    let content_w = content_width_mm();
    let printable_bottom = PAGE_HEIGHT_MM - MARGIN_MM;

    let mut blocks = Vec::with_capacity(tables_px.len() + 2);
    let mut page = 0usize;
    let mut cursor = MARGIN_MM;

    let chart_h = scaled_height_mm(chart_px, content_w);
    blocks.push(PlacedBlock {
        kind: BlockKind::Chart,
        page,
        y_top_mm: cursor,
        width_mm: content_w,
        height_mm: chart_h,
    });
    cursor += chart_h + BLOCK_GAP_MM;

    if with_stats {
        blocks.push(PlacedBlock {
            kind: BlockKind::Stats,
            page,
            y_top_mm: cursor,
            width_mm: content_w,
            height_mm: STATS_BLOCK_MM,
        });
        cursor += STATS_BLOCK_MM + BLOCK_GAP_MM;
    }

    for (index, &px) in tables_px.iter().enumerate() {
        let height = scaled_height_mm(px, content_w);
        let fresh_page = (cursor - MARGIN_MM).abs() < f64::EPSILON;
        if cursor + height > printable_bottom && !fresh_page {
            page += 1;
            cursor = MARGIN_MM;
        }
        blocks.push(PlacedBlock {
            kind: BlockKind::Table(index),
            page,
            y_top_mm: cursor,
            width_mm: content_w,
            height_mm: height,
        });
        cursor += height + BLOCK_GAP_MM;
    }

    ReportPlan {
        blocks,
        page_count: page + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_is_scaled_to_content_width_preserving_aspect() {
        let plan = plan_report((1200, 480), false, &[]);
        let chart = &plan.blocks[0];
        assert_eq!(chart.kind, BlockKind::Chart);
        assert_eq!(chart.page, 0);
        assert_eq!(chart.y_top_mm, MARGIN_MM);
        assert_eq!(chart.width_mm, content_width_mm());
        let expected = content_width_mm() * 480.0 / 1200.0;
        assert!((chart.height_mm - expected).abs() < 1e-9);
        assert_eq!(plan.page_count, 1);
    }

    #[test]
    fn stats_block_sits_under_the_chart_with_fixed_height() {
        let plan = plan_report((1200, 480), true, &[]);
        let chart = &plan.blocks[0];
        let stats = &plan.blocks[1];
        assert_eq!(stats.kind, BlockKind::Stats);
        assert_eq!(stats.page, 0);
        assert!((stats.y_top_mm - (MARGIN_MM + chart.height_mm + BLOCK_GAP_MM)).abs() < 1e-9);
        assert_eq!(stats.height_mm, STATS_BLOCK_MM);
    }

    #[test]
    fn tables_break_onto_a_new_page_when_space_runs_out() {
        // Wide flat chart leaves room; tall tables force breaks.
        let tables = vec![(1000, 600), (1000, 600), (1000, 600)];
        let plan = plan_report((1200, 200), false, &tables);

        let pages: Vec<usize> = plan
            .blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Table(_)))
            .map(|b| b.page)
            .collect();

        // Each table is ~166 mm tall at content width; only one fits a page.
        assert_eq!(pages, vec![1, 2, 3]);
        assert_eq!(plan.page_count, 4);
        for block in plan
            .blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Table(_)))
        {
            assert_eq!(block.y_top_mm, MARGIN_MM);
        }
    }

    #[test]
    fn short_tables_share_a_page() {
        let tables = vec![(1000, 100), (1000, 100)];
        let plan = plan_report((1200, 200), false, &tables);
        let pages: Vec<usize> = plan.blocks.iter().map(|b| b.page).collect();
        assert_eq!(pages, vec![0, 0, 0]);
        assert_eq!(plan.page_count, 1);
    }

    #[test]
    fn oversized_table_on_a_fresh_page_is_placed_not_looped() {
        // Taller than the printable area even alone; must still be placed
        // exactly once at the top of its page.
        let tables = vec![(500, 3000), (1000, 100)];
        let plan = plan_report((1200, 600), false, &tables);

        let giant = plan
            .blocks
            .iter()
            .find(|b| b.kind == BlockKind::Table(0))
            .unwrap();
        assert_eq!(giant.y_top_mm, MARGIN_MM);
        let follower = plan
            .blocks
            .iter()
            .find(|b| b.kind == BlockKind::Table(1))
            .unwrap();
        assert!(follower.page > giant.page);
    }

    #[test]
    fn zero_width_bitmap_collapses_instead_of_dividing_by_zero() {
        let plan = plan_report((0, 0), false, &[(0, 10)]);
        assert_eq!(plan.blocks[0].height_mm, 0.0);
        assert_eq!(plan.blocks[1].height_mm, 0.0);
    }
}
