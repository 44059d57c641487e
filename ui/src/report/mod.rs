//! Report composition: capture the chart and table regions, plan the
//! pages, assemble the PDF and hand it to the platform.

use std::collections::HashSet;

use tracing::info;

use crate::core::align::merge_rows;
use crate::core::format;
use crate::core::range::DateRange;
use crate::core::resampled::resampled_view;
use crate::core::series::{Series, SeriesStats};
use crate::core::timefmt;
use crate::core::visibility;
use crate::viewer::trend;

pub mod capture;
pub mod layout;
pub mod pdf;
pub mod svg;

/// The report always saves under this name.
pub const REPORT_FILENAME: &str = "ht810-report.pdf";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("nothing to export yet")]
    Empty,
    #[error("could not render a report region: {0}")]
    Capture(String),
    #[error("could not assemble the document: {0}")]
    Document(String),
    #[error("could not save the report: {0}")]
    Deliver(String),
}

/// Compose and deliver the report. Captures run one region at a time:
/// chart first, then each visible series' table in series order; hidden
/// series are never rendered or captured. Returns a user-facing message
/// describing where the report went.
pub async fn compose_report(
    series: &[Series],
    hidden: &HashSet<String>,
    range: &DateRange,
) -> Result<String, ReportError> {
    if series.is_empty() {
        return Err(ReportError::Empty);
    }

    let rows = merge_rows(series, range);
    let chart_svg = trend::chart_svg(&rows, series, hidden);
    let chart = capture::rasterize(&chart_svg, trend::CHART_WIDTH_PX, trend::CHART_HEIGHT_PX).await?;

    let stats_text = visibility::displayed_stats(series, hidden).map(|(_, stats)| stats_lines(stats));

    let mut tables = Vec::new();
    for table in resampled_view(series, range)
        .iter()
        .filter(|table| !hidden.contains(&table.name))
    {
        let markup = svg::table_svg(table);
        let height = svg::table_height_px(table);
        tables.push(capture::rasterize(&markup, svg::TABLE_WIDTH_PX, height).await?);
    }

    let table_dims: Vec<(u32, u32)> = tables.iter().map(|t| (t.width, t.height)).collect();
    let plan = layout::plan_report(
        (chart.width, chart.height),
        stats_text.is_some(),
        &table_dims,
    );

    let bytes = pdf::build_pdf(&plan, &chart, &tables, stats_text)?;
    info!(
        pages = plan.page_count,
        tables = tables.len(),
        "report assembled"
    );

    deliver(bytes).await
}

/// The five fixed report lines for the single visible series.
fn stats_lines(stats: &SeriesStats) -> [String; 5] {
    [
        format!("Minimum: {}", format::format_temp_precise(stats.min)),
        format!("Average: {}", format::format_temp_precise(stats.avg)),
        format!("Maximum: {}", format::format_temp_precise(stats.max)),
        format!("Start: {}", timefmt::day_time_label(stats.start)),
        format!("End: {}", timefmt::day_time_label(stats.end)),
    ]
}

async fn deliver(bytes: Vec<u8>) -> Result<String, ReportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let deliver = |message: &str| ReportError::Deliver(message.to_string());

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let mut parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let mut opts = BlobPropertyBag::new();
        opts.type_("application/pdf");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| deliver("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| deliver("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| deliver("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| deliver("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| deliver("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(REPORT_FILENAME);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| deliver("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok("Report download started".to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let dir = export_dir()?;
        fs::create_dir_all(&dir).map_err(|e| ReportError::Deliver(e.to_string()))?;
        let path = dir.join(REPORT_FILENAME);
        let mut file = fs::File::create(&path).map_err(|e| ReportError::Deliver(e.to_string()))?;
        file.write_all(&bytes)
            .map_err(|e| ReportError::Deliver(e.to_string()))?;
        Ok(format!("Report saved to {}", path.to_string_lossy()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, ReportError> {
    let dirs = directories::ProjectDirs::from("local", "HT810", "HT810 Viewer")
        .ok_or_else(|| ReportError::Deliver("unable to determine export directory".to_string()))?;
    Ok(dirs.data_dir().join("exports"))
}
