//! Batch upload orchestration: one request per selected file, strictly
//! sequential, committed all-or-nothing.
//!
//! Sequencing is deliberate: upload order is what assigns series ids and
//! palette colors, so files go out one at a time and the whole batch either
//! replaces the series store or leaves it untouched.

use serde::Deserialize;
use tracing::warn;

use crate::core::series::{palette_color, Sample, SelectedFile, Series, SeriesStats};
use crate::core::timefmt;

mod client;
pub use client::HttpEndpoint;

/// Raw period bounds exactly as typed into the two `datetime-local`
/// inputs; forwarded verbatim to the server when bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodBounds {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PeriodBounds {
    pub fn from_inputs(start_raw: &str, end_raw: &str) -> Self {
        let keep = |raw: &str| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Self {
            start: keep(start_raw),
            end: keep(end_raw),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The server rejected a file and explained why (`detail` field);
    /// surfaced verbatim.
    #[error("{0}")]
    Server(String),
    #[error("upload request failed: {0}")]
    Transport(String),
    #[error("could not read the server response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireSample {
    pub timestamp: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    #[serde(default)]
    pub count: Option<u64>,
    pub start: String,
    pub end: String,
}

/// Success body of the parsing server's upload endpoint. Unknown fields
/// (`time_key`, `temp_key`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub data: Vec<WireSample>,
    #[serde(default)]
    pub stats: Option<WireStats>,
    #[serde(default)]
    pub resampled: Option<Vec<WireSample>>,
}

/// The one seam the orchestrator needs from the outside world.
#[allow(async_fn_in_trait)]
pub trait UploadEndpoint {
    async fn upload(
        &self,
        file: &SelectedFile,
        bounds: &PeriodBounds,
    ) -> Result<UploadResponse, UploadError>;
}

/// Upload every selected file in order and shape the responses into series.
///
/// The first failure aborts the remaining files and discards the partial
/// buffer; the caller's store is only replaced from a fully successful
/// batch (the `Ok` value).
pub async fn run_batch<E: UploadEndpoint>(
    endpoint: &E,
    files: &[SelectedFile],
    bounds: &PeriodBounds,
) -> Result<Vec<Series>, UploadError> {
    let mut batch = Vec::with_capacity(files.len());
    for (id, file) in files.iter().enumerate() {
        let response = endpoint.upload(file, bounds).await?;
        batch.push(shape_series(id, file.name.clone(), response));
    }
    Ok(batch)
}

/// Reshape one upload response into a `Series`: minute labels for the chart
/// samples, date+time labels for the hourly table samples, palette color by
/// upload order.
pub fn shape_series(id: usize, name: String, response: UploadResponse) -> Series {
    let samples = shape_samples(&name, &response.data, timefmt::minute_label);
    let resampled_samples = response
        .resampled
        .as_deref()
        .map(|wire| shape_samples(&name, wire, timefmt::day_time_label))
        .unwrap_or_default();
    let stats = response.stats.and_then(|wire| shape_stats(&name, wire));

    Series {
        id,
        color: palette_color(id),
        name,
        samples,
        resampled_samples,
        stats,
    }
}

fn shape_samples(
    name: &str,
    wire: &[WireSample],
    label: fn(time::OffsetDateTime) -> String,
) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(wire.len());
    for raw in wire {
        match timefmt::parse_timestamp(&raw.timestamp) {
            Some(timestamp) => samples.push(Sample {
                timestamp,
                temperature: raw.temperature,
                time_label: label(timestamp),
            }),
            None => warn!(
                file = name,
                timestamp = raw.timestamp.as_str(),
                "dropping sample with unreadable timestamp"
            ),
        }
    }
    samples
}

fn shape_stats(name: &str, wire: WireStats) -> Option<SeriesStats> {
    let start = timefmt::parse_timestamp(&wire.start);
    let end = timefmt::parse_timestamp(&wire.end);
    match (start, end) {
        (Some(start), Some(end)) => Some(SeriesStats {
            min: wire.min,
            avg: wire.avg,
            max: wire.max,
            count: wire.count,
            start,
            end,
        }),
        _ => {
            warn!(file = name, "dropping stats with unreadable period");
            None
        }
    }
}
