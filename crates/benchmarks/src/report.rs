//! Report serialization.
//!
//! A [`BenchmarkReport`] is the in-memory document describing one run. Its
//! fields serialize in a fixed order: `date`, `arguments`, `platform`,
//! `metrics`.

use crate::log::BenchmarkLog;
use crate::probe::PLATFORM_NAME;
use crate::result::MetricResult;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Medium-length date and time, e.g. `Oct 19, 2026 at 3:04:05 PM`.
pub const DATE_FORMAT: &str = "%b %-d, %Y at %-I:%M:%S %p";

/// The report of one benchmarked run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// When the run started.
    pub date: String,
    /// Invocation arguments, without the program name.
    pub arguments: Vec<String>,
    /// Platform the run executed on.
    pub platform: String,
    /// Metrics with a value, in recording order.
    pub metrics: Vec<MetricResult>,
}

impl BenchmarkReport {
    /// Build the report for a log.
    ///
    /// Metrics that never produced a value are left out.
    pub fn from_log(log: &BenchmarkLog) -> Self {
        let metrics = log
            .metrics()
            .iter()
            .filter_map(|metric| {
                metric.value.clone().map(|value| MetricResult {
                    identifier: metric.identifier.clone(),
                    display_name: metric.display_name.clone(),
                    value,
                })
            })
            .collect();

        Self {
            date: format_date(&log.started_at()),
            arguments: log.arguments().to_vec(),
            platform: PLATFORM_NAME.to_string(),
            metrics,
        }
    }

    /// Look up a metric by the identifier it was reported with.
    pub fn metric(&self, identifier: &str) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.identifier == identifier)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize as a JSON value.
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Format a timestamp the way reports write it.
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.format(DATE_FORMAT).to_string()
}
