//! Data model for uploaded datalogger series.

use time::OffsetDateTime;

/// Fixed line palette; series cycle through it by upload order.
pub const SERIES_PALETTE: [&str; 5] = ["#2563eb", "#dc2626", "#16a34a", "#9333ea", "#ea580c"];

pub fn palette_color(id: usize) -> &'static str {
    SERIES_PALETTE[id % SERIES_PALETTE.len()]
}

/// One reading, annotated with the label it aligns under.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: OffsetDateTime,
    pub temperature: f64,
    pub time_label: String,
}

/// Server-computed summary for a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub count: Option<u64>,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

/// One uploaded file's processed result. `name` (the original filename) is
/// the key every per-series lookup uses: the hidden set, chart row columns
/// and table grouping. Duplicate names within a batch collide.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Upload order within the batch, 0-based.
    pub id: usize,
    pub name: String,
    pub color: &'static str,
    /// Minute-granularity readings, pre-sorted by the server.
    pub samples: Vec<Sample>,
    /// Hourly resampled readings, tables only.
    pub resampled_samples: Vec<Sample>,
    pub stats: Option<SeriesStats>,
}

/// A file picked in the UI, waiting to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_after_five() {
        assert_eq!(palette_color(0), SERIES_PALETTE[0]);
        assert_eq!(palette_color(4), SERIES_PALETTE[4]);
        assert_eq!(palette_color(5), SERIES_PALETTE[0]);
        assert_eq!(palette_color(7), SERIES_PALETTE[2]);
    }
}
