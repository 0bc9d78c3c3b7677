//! Forward projection of dataset entries from their historical trend.
//!
//! # Responsibility
//! - Sort a caller's entries into an owned chronological copy.
//! - Estimate the mean value change and mean time step of that copy.
//! - Extrapolate until the dataset target is crossed or its end date passes.
//!
//! # Invariants
//! - The caller's slice is never mutated.
//! - Output is the real entries (flagged non-projected) followed by zero or
//!   more synthesized entries built with `Entry::projected`.
//! - Every input maps to a defined output; projection never fails.

mod end_date;
mod target;
pub mod trend;

use crate::model::dataset::Dataset;
use crate::model::entry::Entry;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use trend::{estimate_trend, Trend};

/// Termination policy for a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Extrapolate until `Dataset::target_value` is crossed.
    Target,
    /// Extrapolate until `Dataset::end_date` is exceeded.
    EndDate,
}

impl ProjectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::EndDate => "end_date",
        }
    }
}

impl Display for ProjectionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "target" => Ok(Self::Target),
            "end_date" | "end-date" | "enddate" => Ok(Self::EndDate),
            other => Err(format!(
                "unsupported projection mode `{other}`; expected target|end-date"
            )),
        }
    }
}

/// Projection engine with an optional ceiling on synthesized entries.
///
/// The default projector is unbounded. Callers exposed to untrusted input
/// should set a ceiling with [`Projector::with_max_projected`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projector {
    max_projected: Option<usize>,
}

impl Projector {
    /// Creates a projector without an output ceiling.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Creates a projector that appends at most `max` synthesized entries.
    pub fn with_max_projected(max: usize) -> Self {
        Self {
            max_projected: Some(max),
        }
    }

    pub fn max_projected(&self) -> Option<usize> {
        self.max_projected
    }

    /// Runs the strategy selected by `mode`.
    pub fn project(
        &self,
        mode: ProjectionMode,
        dataset: &Dataset,
        entries: &[Entry],
    ) -> Vec<Entry> {
        match mode {
            ProjectionMode::Target => self.until_target(dataset, entries),
            ProjectionMode::EndDate => self.until_end_date(dataset, entries),
        }
    }

    /// Projects until the dataset target value is crossed.
    ///
    /// # Contract
    /// - No target (or a non-finite one) or fewer than two entries: the
    ///   input is returned in its original order, flagged non-projected.
    /// - Zero (or non-finite) average change: the sorted real entries only.
    pub fn until_target(&self, dataset: &Dataset, entries: &[Entry]) -> Vec<Entry> {
        let Some(target) = dataset.target_value.filter(|value| value.is_finite()) else {
            return wrap_real(entries);
        };
        let Some((sorted, trend)) = sorted_with_trend(entries) else {
            return wrap_real(entries);
        };

        let real = wrap_real(&sorted);
        if !trend.has_progress() {
            return real;
        }
        let Some(last) = sorted.last() else {
            return real;
        };

        target::append_until_target(dataset.id, real, last, trend, target, self.max_projected)
    }

    /// Projects until the dataset end date, inclusive.
    ///
    /// # Contract
    /// - No end date or fewer than two entries: the input is returned in
    ///   its original order, flagged non-projected.
    /// - A non-positive average step: the sorted real entries only.
    pub fn until_end_date(&self, dataset: &Dataset, entries: &[Entry]) -> Vec<Entry> {
        let Some(end_date) = dataset.end_date else {
            return wrap_real(entries);
        };
        let Some((sorted, trend)) = sorted_with_trend(entries) else {
            return wrap_real(entries);
        };

        let real = wrap_real(&sorted);
        if !trend.avg_change.is_finite() {
            return real;
        }
        let Some(last) = sorted.last() else {
            return real;
        };

        end_date::append_until_end_date(
            dataset.id,
            real,
            last,
            trend,
            end_date,
            self.max_projected,
        )
    }
}

/// Projects `entries` forward until `dataset.target_value` is crossed.
pub fn project_until_target(dataset: &Dataset, entries: &[Entry]) -> Vec<Entry> {
    Projector::unbounded().until_target(dataset, entries)
}

/// Projects `entries` forward until `dataset.end_date`, inclusive.
pub fn project_until_end_date(dataset: &Dataset, entries: &[Entry]) -> Vec<Entry> {
    Projector::unbounded().until_end_date(dataset, entries)
}

/// Returns an owned copy of `entries` stably sorted by date.
pub fn sort_by_date(entries: &[Entry]) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| entry.date);
    sorted
}

fn sorted_with_trend(entries: &[Entry]) -> Option<(Vec<Entry>, Trend)> {
    let sorted = sort_by_date(entries);
    let trend = estimate_trend(&sorted)?;
    Some((sorted, trend))
}

fn wrap_real(entries: &[Entry]) -> Vec<Entry> {
    entries.iter().map(Entry::as_real).collect()
}
