//! Inclusive date-range predicate shared by chart and table filtering.

use time::OffsetDateTime;

use super::timefmt;

/// Optional inclusive `[start, end]` bound. An absent side disables that
/// side; with both absent the filter is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
}

impl DateRange {
    pub fn new(start: Option<OffsetDateTime>, end: Option<OffsetDateTime>) -> Self {
        Self { start, end }
    }

    /// Build from the two raw `datetime-local` input strings; blank or
    /// unreadable inputs leave that side unbounded.
    pub fn from_inputs(start_raw: &str, end_raw: &str) -> Self {
        Self {
            start: timefmt::parse_timestamp(start_raw),
            end: timefmt::parse_timestamp(end_raw),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True iff `ts` falls inside the bound, both ends inclusive.
    pub fn contains(&self, ts: OffsetDateTime) -> bool {
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts > end {
                return false;
            }
        }
        true
    }
}
