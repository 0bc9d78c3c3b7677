//! Linear trend estimation over a chronologically sorted series.

use crate::model::entry::Entry;
use chrono::TimeDelta;

/// Mean first differences of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// Mean of `value[i] - value[i - 1]`.
    pub avg_change: f64,
    /// Mean of `date[i] - date[i - 1]`, truncated to whole milliseconds.
    pub avg_step: TimeDelta,
}

impl Trend {
    /// Whether a value trend exists that can move the series at all.
    pub fn has_progress(&self) -> bool {
        self.avg_change != 0.0 && self.avg_change.is_finite()
    }
}

/// Estimates the trend of `entries`, which must already be sorted by date.
///
/// Returns `None` when fewer than two entries are given. The step is the
/// sum of millisecond deltas divided by the pair count with truncating
/// integer division, so irregular spacing yields a reproducible value.
pub fn estimate_trend(entries: &[Entry]) -> Option<Trend> {
    if entries.len() < 2 {
        return None;
    }

    let pairs = entries.len() - 1;
    let mut total_change = 0.0_f64;
    let mut total_millis = 0_i64;
    for window in entries.windows(2) {
        total_change += window[1].value - window[0].value;
        total_millis = total_millis.saturating_add(
            window[1]
                .date
                .signed_duration_since(window[0].date)
                .num_milliseconds(),
        );
    }

    Some(Trend {
        avg_change: total_change / pairs as f64,
        avg_step: TimeDelta::milliseconds(total_millis / pairs as i64),
    })
}
