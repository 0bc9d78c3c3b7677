//! Entry domain model.
//!
//! # Responsibility
//! - Represent one real or synthesized observation of a dataset.
//!
//! # Invariants
//! - `value` is finite.
//! - Synthesized entries use `PROJECTED_ENTRY_ID` and `PROJECTED_LABEL` so
//!   consumers can tell provenance apart without reading `projected` alone.

use super::dataset::DatasetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage identifier of an entry.
pub type EntryId = i64;

/// Id carried by every synthesized entry.
pub const PROJECTED_ENTRY_ID: EntryId = 0;

/// Label carried by every synthesized entry.
pub const PROJECTED_LABEL: &str = "Projected";

/// One observation in a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub id: EntryId,
    #[serde(default)]
    pub dataset_id: DatasetId,
    pub value: f64,
    #[serde(default)]
    pub label: String,
    pub date: DateTime<Utc>,
    /// `true` only for entries synthesized by projection.
    #[serde(default)]
    pub projected: bool,
}

/// Validation failures for entry writes.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    NonFiniteValue(f64),
    ProjectedEntry,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteValue(value) => write!(f, "entry value must be finite, got {value}"),
            Self::ProjectedEntry => write!(f, "projected entries cannot be persisted"),
        }
    }
}

impl Error for EntryValidationError {}

impl Entry {
    /// Creates an unsaved real observation.
    pub fn new(
        dataset_id: DatasetId,
        value: f64,
        label: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            dataset_id,
            value,
            label: label.into(),
            date,
            projected: false,
        }
    }

    /// Creates a synthesized entry for projection output.
    pub fn projected(dataset_id: DatasetId, value: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: PROJECTED_ENTRY_ID,
            dataset_id,
            value,
            label: PROJECTED_LABEL.to_string(),
            date,
            projected: true,
        }
    }

    /// Returns a copy flagged as a real observation.
    pub fn as_real(&self) -> Self {
        Self {
            projected: false,
            ..self.clone()
        }
    }

    /// Checks write-time invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.value.is_finite() {
            return Err(EntryValidationError::NonFiniteValue(self.value));
        }
        if self.projected {
            return Err(EntryValidationError::ProjectedEntry);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryValidationError, PROJECTED_ENTRY_ID, PROJECTED_LABEL};
    use chrono::{TimeZone, Utc};

    #[test]
    fn projected_constructor_sets_provenance_markers() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entry = Entry::projected(7, 12.5, date);
        assert_eq!(entry.id, PROJECTED_ENTRY_ID);
        assert_eq!(entry.label, PROJECTED_LABEL);
        assert_eq!(entry.dataset_id, 7);
        assert!(entry.projected);
    }

    #[test]
    fn validate_rejects_nan_and_projected_entries() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let nan = Entry::new(1, f64::NAN, "bad", date);
        assert!(matches!(
            nan.validate(),
            Err(EntryValidationError::NonFiniteValue(_))
        ));

        let projected = Entry::projected(1, 3.0, date);
        assert_eq!(
            projected.validate(),
            Err(EntryValidationError::ProjectedEntry)
        );
    }

    #[test]
    fn projected_flag_defaults_to_false_on_input() {
        let entry: Entry =
            serde_json::from_str(r#"{"value":4.2,"label":"w1","date":"2024-01-01T00:00:00Z"}"#)
                .unwrap();
        assert!(!entry.projected);
        assert_eq!(entry.label, "w1");
    }
}
