//! Date-bounded extrapolation.

use super::trend::Trend;
use crate::model::dataset::DatasetId;
use crate::model::entry::Entry;
use chrono::{DateTime, TimeDelta, Utc};
use log::warn;

/// Appends projected entries every `avg_step` after `last` while the next
/// date is on or before `end_date`.
///
/// A zero trend still yields a flat series and values are not clamped.
/// A non-positive step would never advance past `end_date`, so nothing is
/// appended in that case.
pub(crate) fn append_until_end_date(
    dataset_id: DatasetId,
    mut projected: Vec<Entry>,
    last: &Entry,
    trend: Trend,
    end_date: DateTime<Utc>,
    limit: Option<usize>,
) -> Vec<Entry> {
    if trend.avg_step <= TimeDelta::zero() {
        warn!(
            "event=projection module=projection status=skipped mode=end_date reason=non_positive_step dataset_id={dataset_id} step_ms={}",
            trend.avg_step.num_milliseconds()
        );
        return projected;
    }

    let mut value = last.value;
    let mut next_date = last.date.checked_add_signed(trend.avg_step);
    let mut emitted = 0_usize;

    while let Some(date) = next_date.filter(|date| *date <= end_date) {
        if limit.is_some_and(|max| emitted >= max) {
            warn!("event=projection module=projection status=truncated mode=end_date dataset_id={dataset_id} emitted={emitted}");
            break;
        }

        value += trend.avg_change;
        projected.push(Entry::projected(dataset_id, value, date));
        emitted += 1;
        next_date = date.checked_add_signed(trend.avg_step);
    }

    projected
}
