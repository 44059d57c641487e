//! Shared state and panels for the viewer page.

use std::collections::HashSet;

use crate::core::range::DateRange;
use crate::core::series::{SelectedFile, Series};

mod controls;
mod export;
mod stats;
mod tables;
pub mod trend;

pub use controls::UploadControls;
pub use export::ExportPanel;
pub use stats::StatsPanel;
pub use tables::TablesPanel;
pub use trend::TrendChart;

/// The picker never keeps more than this many files.
pub const MAX_FILES: usize = 5;

/// One batch's worth of UI state. The series store is only ever replaced
/// wholesale (successful batch) or cleared (reset); everything the panels
/// show is recomputed from `(series, range, hidden)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerState {
    pub files: Vec<SelectedFile>,
    pub series: Vec<Series>,
    pub hidden: HashSet<String>,
    /// Raw `datetime-local` input values; blank means unbounded.
    pub range_start: String,
    pub range_end: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Batch generation. A finished upload may only commit while the
    /// store's generation still matches the one it started with, which
    /// keeps a stale response from an abandoned batch out of the store.
    pub generation: u64,
}

impl ViewerState {
    pub fn range(&self) -> DateRange {
        DateRange::from_inputs(&self.range_start, &self.range_end)
    }

    /// Clear everything and invalidate any in-flight batch.
    pub fn reset(&mut self) {
        self.files.clear();
        self.series.clear();
        self.hidden.clear();
        self.range_start.clear();
        self.range_end.clear();
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }
}
