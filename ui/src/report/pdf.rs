//! Assembles the planned blocks into the final PDF document.

use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument, PdfLayerReference};

use super::capture::RegionBitmap;
use super::layout::{BlockKind, PlacedBlock, ReportPlan, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, STATS_LINE_MM};
use super::ReportError;

const IMAGE_DPI: f64 = 300.0;
const STATS_FONT_PT: f32 = 11.0;

/// Build the paginated document: every page up front, then each planned
/// block onto its page's layer.
pub fn build_pdf(
    plan: &ReportPlan,
    chart: &RegionBitmap,
    tables: &[RegionBitmap],
    stats_lines: Option<[String; 5]>,
) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Temperature report",
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Report",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Document(e.to_string()))?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..plan.page_count {
        let (page, layer) = doc.add_page(
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            "Report",
        );
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for block in &plan.blocks {
        let layer = &layers[block.page];
        match block.kind {
            BlockKind::Chart => place_bitmap(layer, chart, block)?,
            BlockKind::Table(index) => {
                let bitmap = tables
                    .get(index)
                    .ok_or_else(|| ReportError::Document("table capture missing".to_string()))?;
                place_bitmap(layer, bitmap, block)?;
            }
            BlockKind::Stats => {
                if let Some(lines) = &stats_lines {
                    place_stats(layer, &font, block, lines);
                }
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ReportError::Document(e.to_string()))
}

/// PDF y grows upward from the bottom edge; the plan measures from the top.
fn place_bitmap(
    layer: &PdfLayerReference,
    bitmap: &RegionBitmap,
    block: &PlacedBlock,
) -> Result<(), ReportError> {
    let decoded = printpdf::image_crate::load_from_memory(&bitmap.png)
        .map_err(|e| ReportError::Document(e.to_string()))?;
    let image = Image::from_dynamic_image(&decoded);

    // Natural print size at IMAGE_DPI, scaled up to the planned width.
    let natural_width_mm = f64::from(bitmap.width) * 25.4 / IMAGE_DPI;
    let scale = if natural_width_mm > 0.0 {
        block.width_mm / natural_width_mm
    } else {
        1.0
    };

    let y_bottom = PAGE_HEIGHT_MM - block.y_top_mm - block.height_mm;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM as f32)),
            translate_y: Some(Mm(y_bottom as f32)),
            scale_x: Some(scale as f32),
            scale_y: Some(scale as f32),
            dpi: Some(IMAGE_DPI as f32),
            ..Default::default()
        },
    );
    Ok(())
}

fn place_stats(
    layer: &PdfLayerReference,
    font: &printpdf::IndirectFontRef,
    block: &PlacedBlock,
    lines: &[String; 5],
) {
    for (i, line) in lines.iter().enumerate() {
        let baseline_top = block.y_top_mm + (i as f64 + 1.0) * STATS_LINE_MM;
        layer.use_text(
            line,
            STATS_FONT_PT,
            Mm(MARGIN_MM as f32),
            Mm((PAGE_HEIGHT_MM - baseline_top) as f32),
            font,
        );
    }
}
