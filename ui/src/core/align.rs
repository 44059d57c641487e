//! Merges per-file minute samples into one label-aligned row sequence.

use std::collections::HashMap;

use time::OffsetDateTime;

use super::range::DateRange;
use super::series::Series;

/// One chart row. `values` holds a column per series that has a reading
/// for this label; a missing series is an absent key and renders as a gap,
/// never as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub time_label: String,
    pub timestamp: OffsetDateTime,
    pub values: HashMap<String, f64>,
}

/// Merge every series' samples into rows keyed by minute label, then apply
/// the range filter over each row's timestamp.
///
/// Rows come out in first-encounter order of a series-major, sample-minor
/// traversal. They are NOT re-sorted by timestamp: if the uploaded files are
/// not chronologically aligned with each other, later-introduced labels stay
/// where the traversal first met them.
pub fn merge_rows(series: &[Series], range: &DateRange) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for s in series {
        for sample in &s.samples {
            let at = match index.get(&sample.time_label) {
                Some(&at) => at,
                None => {
                    index.insert(sample.time_label.clone(), rows.len());
                    rows.push(Row {
                        time_label: sample.time_label.clone(),
                        timestamp: sample.timestamp,
                        values: HashMap::new(),
                    });
                    rows.len() - 1
                }
            };
            // Last write wins when one series repeats a label.
            rows[at].values.insert(s.name.clone(), sample.temperature);
        }
    }

    rows.retain(|row| range.contains(row.timestamp));
    rows
}
