//! Metric data model.
//!
//! A metric is a named value of one of two kinds:
//! - **Counter**: a running total; updates accumulate.
//! - **Gauge**: a point-in-time observation; updates overwrite.
//!
//! The value is an enum, so a metric carries exactly one value consistent
//! with its kind. Snapshot entries serialize as
//! `{"name": "...", "type": "counter"|"gauge", "value": ...}`.

use serde::{Deserialize, Serialize};

/// Metric kind (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    /// String representation used in logs and snapshot encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// The typed value of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MetricValue {
    /// Running total.
    Counter(i64),
    /// Most recent observation.
    Gauge(f64),
}

/// A named measurement. Unique key within a repository is `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(flatten)]
    pub value: MetricValue,
}

impl Metric {
    /// New counter metric.
    pub fn counter(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: MetricValue::Counter(value),
        }
    }

    /// New gauge metric.
    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: MetricValue::Gauge(value),
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self.value {
            MetricValue::Counter(_) => MetricKind::Counter,
            MetricValue::Gauge(_) => MetricKind::Gauge,
        }
    }

    /// Value rendered for log export.
    pub fn value_string(&self) -> String {
        match self.value {
            MetricValue::Counter(v) => v.to_string(),
            MetricValue::Gauge(v) => v.to_string(),
        }
    }
}
