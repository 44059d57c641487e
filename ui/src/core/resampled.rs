//! Per-series filtering of the hourly resampled readings.
//!
//! Tables are decoupled from the chart's merged rows: each series keeps its
//! own hourly sequence and the range filter applies to each series
//! independently. A series with no matches stays in the view so the table
//! can say "no data for the selected period" instead of vanishing.

use super::range::DateRange;
use super::series::{Sample, Series};

/// One series' table: its identity plus the hourly samples inside the
/// current range.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub name: String,
    pub color: &'static str,
    pub samples: Vec<Sample>,
}

/// Build the table view for every series, in series order.
pub fn resampled_view(series: &[Series], range: &DateRange) -> Vec<TableView> {
    series
        .iter()
        .map(|s| TableView {
            name: s.name.clone(),
            color: s.color,
            samples: s
                .resampled_samples
                .iter()
                .filter(|sample| range.contains(sample.timestamp))
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::palette_color;
    use crate::core::timefmt;
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn hourly(ts: OffsetDateTime, temperature: f64) -> Sample {
        Sample {
            timestamp: ts,
            temperature,
            time_label: timefmt::day_time_label(ts),
        }
    }

    fn batch() -> Vec<Series> {
        vec![
            Series {
                id: 0,
                name: "a.xlsx".into(),
                color: palette_color(0),
                samples: Vec::new(),
                resampled_samples: vec![
                    hourly(datetime!(2024-03-05 10:00 UTC), 20.0),
                    hourly(datetime!(2024-03-05 11:00 UTC), 21.0),
                ],
                stats: None,
            },
            Series {
                id: 1,
                name: "b.xlsx".into(),
                color: palette_color(1),
                samples: Vec::new(),
                resampled_samples: vec![hourly(datetime!(2024-03-06 08:00 UTC), 22.0)],
                stats: None,
            },
        ]
    }

    #[test]
    fn filters_each_series_independently() {
        let range = DateRange::new(
            Some(datetime!(2024-03-05 00:00 UTC)),
            Some(datetime!(2024-03-05 23:59 UTC)),
        );
        let view = resampled_view(&batch(), &range);

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].samples.len(), 2);
        // Out-of-range series stays in the mapping, just empty.
        assert_eq!(view[1].name, "b.xlsx");
        assert!(view[1].samples.is_empty());
    }

    #[test]
    fn unbounded_range_keeps_everything() {
        let view = resampled_view(&batch(), &DateRange::default());
        assert_eq!(view[0].samples.len(), 2);
        assert_eq!(view[1].samples.len(), 1);
    }
}
