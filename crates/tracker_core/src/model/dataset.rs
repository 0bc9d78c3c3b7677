//! Dataset domain model.
//!
//! # Responsibility
//! - Describe a named series of entries and the bounds used for projection.
//!
//! # Invariants
//! - `name` is never blank.
//! - `target_value` is finite when set.
//! - `end_date` is not earlier than `start_date` when both are set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage identifier of a dataset.
pub type DatasetId = i64;

/// A named, owned collection of entries.
///
/// The optional target value and end date bound the two projection
/// strategies; when either is absent its strategy is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Ignored on create; assigned by storage.
    #[serde(default)]
    pub id: DatasetId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display unit for values (for example `kg` or `$`).
    #[serde(default)]
    pub symbol: String,
    /// Value the series is trending toward.
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive horizon for date-bounded projection.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Validation failures for dataset writes.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetValidationError {
    BlankName,
    NonFiniteTarget(f64),
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl Display for DatasetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "dataset name cannot be blank"),
            Self::NonFiniteTarget(value) => {
                write!(f, "dataset target value must be finite, got {value}")
            }
            Self::EndBeforeStart { start, end } => write!(
                f,
                "dataset end date {} is earlier than start date {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            ),
        }
    }
}

impl Error for DatasetValidationError {}

impl Dataset {
    /// Creates an unsaved dataset with no projection bounds.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            symbol: String::new(),
            target_value: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Sets the target value, consuming and returning `self`.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target_value = Some(target);
        self
    }

    /// Sets the end date, consuming and returning `self`.
    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Checks write-time invariants.
    pub fn validate(&self) -> Result<(), DatasetValidationError> {
        if self.name.trim().is_empty() {
            return Err(DatasetValidationError::BlankName);
        }
        if let Some(target) = self.target_value {
            if !target.is_finite() {
                return Err(DatasetValidationError::NonFiniteTarget(target));
            }
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(DatasetValidationError::EndBeforeStart { start, end });
            }
        }
        Ok(())
    }
}
