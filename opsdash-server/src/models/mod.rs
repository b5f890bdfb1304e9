//! Domain records and request-field coercion
//!
//! Request fields are coerced, not validated. See `coerce`.

pub mod coerce;
pub mod reading;
pub mod rule;

pub use coerce::CoercionError;
pub use reading::{MetricReading, NewMetricReading, RECENT_READINGS_LIMIT};
pub use rule::{AlertRule, NewAlertRule};
