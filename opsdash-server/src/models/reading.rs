//! Metric readings

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::coerce::{self, CoercionError};

/// Number of readings returned by the recent-readings listing.
pub const RECENT_READINGS_LIMIT: i64 = 100;

/// A stored, timestamped numeric observation.
///
/// Non-finite values serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MetricReading {
    pub id: i64,
    pub metric_name: String,
    pub value: f64,
    #[sqlx(rename = "recorded_at")]
    pub timestamp: DateTime<Utc>,
}

/// A reading about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMetricReading {
    pub metric_name: String,
    pub value: f64,
    /// `None` means "now", assigned by the store.
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewMetricReading {
    /// Build from a decoded request body (`metricName`, `value`, `timestamp`).
    ///
    /// Only an unparseable timestamp fails; everything else is coerced.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, CoercionError> {
        Ok(Self {
            metric_name: coerce::to_text(fields.get("metricName")),
            value: coerce::to_number(fields.get("value")),
            timestamp: coerce::to_timestamp(fields.get("timestamp"))?,
        })
    }
}
