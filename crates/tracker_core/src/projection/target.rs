//! Target-bounded extrapolation.

use super::trend::Trend;
use crate::model::dataset::DatasetId;
use crate::model::entry::Entry;
use log::warn;

/// Appends projected entries after `last` until `target` is crossed.
///
/// # Contract
/// - Every pass steps once, emits the entry, then tests the stop condition,
///   so a trend with progress always yields at least one entry.
/// - Rising trends stop once `value >= target`.
/// - Falling trends stop once `value <= target` or `value <= 0`; each
///   decremented value is clamped at zero, which guarantees termination for
///   a finite, non-zero `avg_change` even when `target` is unreachable.
/// - A step that leaves `value` unchanged in `f64` ends the projection.
/// - `limit` caps the number of appended entries when set.
pub(crate) fn append_until_target(
    dataset_id: DatasetId,
    mut projected: Vec<Entry>,
    last: &Entry,
    trend: Trend,
    target: f64,
    limit: Option<usize>,
) -> Vec<Entry> {
    let avg_change = trend.avg_change;
    let mut value = last.value;
    let mut date = last.date;
    let mut emitted = 0_usize;

    loop {
        if limit.is_some_and(|max| emitted >= max) {
            warn!("event=projection module=projection status=truncated mode=target dataset_id={dataset_id} emitted={emitted}");
            break;
        }
        let Some(next_date) = date.checked_add_signed(trend.avg_step) else {
            warn!("event=projection module=projection status=stopped mode=target reason=date_overflow dataset_id={dataset_id}");
            break;
        };

        let stepped = value + avg_change;
        if stepped == value {
            warn!("event=projection module=projection status=skipped mode=target reason=no_progress dataset_id={dataset_id} value={value} avg_change={avg_change}");
            break;
        }
        value = if avg_change < 0.0 && stepped < 0.0 {
            0.0
        } else {
            stepped
        };
        date = next_date;

        projected.push(Entry::projected(dataset_id, value, date));
        emitted += 1;

        if target_reached(value, avg_change, target) {
            break;
        }
    }

    projected
}

fn target_reached(value: f64, avg_change: f64, target: f64) -> bool {
    (avg_change > 0.0 && value >= target)
        || (avg_change < 0.0 && (value <= target || value <= 0.0))
}

#[cfg(test)]
mod tests {
    use super::{append_until_target, target_reached};
    use crate::model::entry::Entry;
    use crate::projection::trend::Trend;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn last_entry(value: f64) -> Entry {
        Entry::new(7, value, "last", Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
    }

    fn daily(avg_change: f64) -> Trend {
        Trend {
            avg_change,
            avg_step: TimeDelta::days(1),
        }
    }

    #[test]
    fn rising_series_stops_at_or_above_target() {
        assert!(!target_reached(30.0, 10.0, 40.0));
        assert!(target_reached(40.0, 10.0, 40.0));
        assert!(target_reached(45.0, 10.0, 40.0));
    }

    #[test]
    fn falling_series_stops_at_target_or_floor() {
        assert!(!target_reached(20.0, -5.0, 10.0));
        assert!(target_reached(10.0, -5.0, 10.0));
        assert!(target_reached(0.0, -5.0, -100.0));
    }

    #[test]
    fn first_step_is_emitted_before_the_stop_test() {
        let last = last_entry(0.0);
        let output = append_until_target(7, Vec::new(), &last, daily(-10.0), -100.0, None);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].value, 0.0);
        assert_eq!(output[0].date, last.date + TimeDelta::days(1));
    }

    #[test]
    fn step_below_value_precision_ends_projection() {
        let last = last_entry(1e16);
        let output = append_until_target(7, Vec::new(), &last, daily(0.5), 2e16, None);
        assert!(output.is_empty());
    }

    #[test]
    fn limit_caps_appended_entries() {
        let last = last_entry(0.0);
        let output = append_until_target(7, Vec::new(), &last, daily(1.0), 1e9, Some(4));

        let values: Vec<f64> = output.iter().map(|entry| entry.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
