//! Metric result types.
//!
//! This module provides the values a completed metric produces and the
//! per-metric entry that appears in a serialized report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value produced by a completed measurement.
///
/// Serialized untagged, so a number is written as a JSON number, a list as a
/// JSON array, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A numeric measurement (bytes, milliseconds, counts).
    Number(f64),
    /// A textual measurement such as a checksum.
    String(String),
    /// A yes/no measurement.
    Boolean(bool),
    /// An ordered sequence of values.
    List(Vec<MetricValue>),
}

impl MetricValue {
    /// Returns the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<MetricValue>> From<Vec<T>> for MetricValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// One metric entry of a serialized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResult {
    /// Machine-readable identifier, e.g. `peak-memory`.
    pub identifier: String,
    /// Human-readable name.
    pub display_name: String,
    /// The measured value.
    pub value: MetricValue,
}

impl MetricResult {
    /// Create a new MetricResult.
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        value: impl Into<MetricValue>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            value: value.into(),
        }
    }
}
