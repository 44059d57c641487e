//! Legend visibility state and the stats display rule.

use std::collections::HashSet;

use super::series::{Series, SeriesStats};

/// Toggle a series in or out of the hidden set (legend click).
pub fn toggle(hidden: &mut HashSet<String>, name: &str) {
    if !hidden.remove(name) {
        hidden.insert(name.to_string());
    }
}

/// Series whose name is not currently hidden, in series order.
pub fn active_series<'a>(series: &'a [Series], hidden: &HashSet<String>) -> Vec<&'a Series> {
    series.iter().filter(|s| !hidden.contains(&s.name)).collect()
}

/// Summary statistics are shown only while EXACTLY one series is visible.
/// Strict equality, not "at least one".
pub fn displayed_stats<'a>(
    series: &'a [Series],
    hidden: &HashSet<String>,
) -> Option<(&'a Series, &'a SeriesStats)> {
    let active = active_series(series, hidden);
    match active.as_slice() {
        [only] => only.stats.as_ref().map(|stats| (*only, stats)),
        _ => None,
    }
}
