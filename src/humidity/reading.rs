use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::classifier::{classify, HumidityStatus};

/// Wire and storage format of `analyzedAt`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One humidity measurement. Immutable once built; the status is never
/// stored and always derived from `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    id: Option<i32>,
    value: f64,
    analyzed_at: NaiveDateTime,
}

impl Reading {
    /// New, not yet persisted reading captured now (UTC, whole seconds).
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self::captured_at(value, Utc::now().naive_utc())
    }

    /// New, not yet persisted reading with an explicit capture time.
    #[must_use]
    pub fn captured_at(value: f64, analyzed_at: NaiveDateTime) -> Self {
        Self {
            id: None,
            value,
            analyzed_at: analyzed_at.trunc_subsecs(0),
        }
    }

    /// Rebuild a reading loaded from a store.
    #[must_use]
    pub fn restore(id: i32, value: f64, analyzed_at: NaiveDateTime) -> Self {
        Self {
            id: Some(id),
            value,
            analyzed_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn analyzed_at(&self) -> NaiveDateTime {
        self.analyzed_at
    }

    #[must_use]
    pub fn status(&self) -> HumidityStatus {
        classify(self.value)
    }
}

/// A reading as served by `GET /humidity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HumidityResponse {
    /// Store-assigned identity
    pub id: Option<i32>,
    /// Band derived from `value`
    pub status: HumidityStatus,
    /// Raw sensor value (0-1023)
    pub value: f64,
    /// Capture time, `YYYY-MM-DD HH:MM:SS`
    #[schema(example = "2025-03-14 09:26:53")]
    pub analyzed_at: String,
}

impl From<&Reading> for HumidityResponse {
    fn from(reading: &Reading) -> Self {
        Self {
            id: reading.id(),
            status: reading.status(),
            value: reading.value(),
            analyzed_at: reading.analyzed_at().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
