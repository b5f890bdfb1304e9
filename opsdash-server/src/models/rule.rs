//! Alert rules
//!
//! Rules are stored comparisons only. Nothing evaluates them.

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::coerce;

/// A stored alert rule.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    pub id: i64,
    pub metric_name: String,
    pub operator: String,
    pub threshold: f64,
}

/// A rule about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlertRule {
    pub metric_name: String,
    pub operator: String,
    pub threshold: f64,
}

impl NewAlertRule {
    /// Build from a decoded request body (`metricName`, `operator`, `threshold`).
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            metric_name: coerce::to_text(fields.get("metricName")),
            operator: coerce::to_text(fields.get("operator")),
            threshold: coerce::to_number(fields.get("threshold")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_from_body() {
        let body = json!({"metricName": "cpu", "operator": ">=", "threshold": "90"});
        let rule = NewAlertRule::from_fields(body.as_object().unwrap());
        assert_eq!(rule.metric_name, "cpu");
        assert_eq!(rule.operator, ">=");
        assert_eq!(rule.threshold, 90.0);
    }

    #[test]
    fn operator_is_not_checked() {
        let body = json!({"metricName": "cpu", "operator": "!=", "threshold": 1});
        let rule = NewAlertRule::from_fields(body.as_object().unwrap());
        assert_eq!(rule.operator, "!=");
    }

    #[test]
    fn non_numeric_threshold_is_nan() {
        let body = json!({"metricName": "cpu", "operator": ">", "threshold": "high"});
        let rule = NewAlertRule::from_fields(body.as_object().unwrap());
        assert!(rule.threshold.is_nan());
    }
}
