//! Standalone SVG markup for the table regions the report captures.

use crate::core::resampled::TableView;

pub const TABLE_WIDTH_PX: u32 = 1000;
const TITLE_PX: u32 = 40;
const HEADER_PX: u32 = 34;
const ROW_PX: u32 = 28;
const PAD_PX: u32 = 12;

pub(crate) fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn table_height_px(table: &TableView) -> u32 {
    let rows = table.samples.len().max(1) as u32;
    TITLE_PX + HEADER_PX + rows * ROW_PX + PAD_PX
}

/// Render one series' hourly table to self-contained SVG markup. An empty
/// filter result still produces a table with an explicit "no data" row.
pub fn table_svg(table: &TableView) -> String {
    let width = TABLE_WIDTH_PX;
    let height = table_height_px(table);
    let name = xml_escape(&table.name);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'>\n"
    ));
    svg.push_str(&format!(
        "  <rect width='{width}' height='{height}' fill='#ffffff'/>\n"
    ));

    // Title with the series swatch.
    svg.push_str(&format!(
        "  <rect x='16' y='12' width='14' height='14' rx='3' fill='{}'/>\n",
        table.color
    ));
    svg.push_str(&format!(
        "  <text x='40' y='25' font-family='sans-serif' font-size='17' font-weight='600' fill='#111827'>{name}</text>\n"
    ));

    // Header row.
    let header_top = TITLE_PX;
    svg.push_str(&format!(
        "  <rect x='0' y='{header_top}' width='{width}' height='{HEADER_PX}' fill='#f3f4f6'/>\n"
    ));
    let header_baseline = header_top + 23;
    svg.push_str(&format!(
        "  <text x='16' y='{header_baseline}' font-family='sans-serif' font-size='14' font-weight='600' fill='#374151'>Time</text>\n"
    ));
    svg.push_str(&format!(
        "  <text x='520' y='{header_baseline}' font-family='sans-serif' font-size='14' font-weight='600' fill='#374151'>Temperature (\u{b0}C)</text>\n"
    ));

    if table.samples.is_empty() {
        let baseline = header_top + HEADER_PX + 19;
        svg.push_str(&format!(
            "  <text x='16' y='{baseline}' font-family='sans-serif' font-size='14' font-style='italic' fill='#6b7280'>No data for the selected period</text>\n"
        ));
    } else {
        for (i, sample) in table.samples.iter().enumerate() {
            let top = header_top + HEADER_PX + i as u32 * ROW_PX;
            let baseline = top + 19;
            svg.push_str(&format!(
                "  <line x1='0' y1='{top}' x2='{width}' y2='{top}' stroke='#e5e7eb' stroke-width='1'/>\n"
            ));
            svg.push_str(&format!(
                "  <text x='16' y='{baseline}' font-family='sans-serif' font-size='14' fill='#111827'>{}</text>\n",
                xml_escape(&sample.time_label)
            ));
            svg.push_str(&format!(
                "  <text x='520' y='{baseline}' font-family='sans-serif' font-size='14' fill='#111827'>{:.1}</text>\n",
                sample.temperature
            ));
        }
    }

    svg.push_str("</svg>\n");
    svg
}
