//! Counter metric.

use crate::metric::Metric;
use crate::result::MetricValue;
use std::borrow::Cow;

/// A count of something produced or processed during the run.
#[derive(Debug, Clone)]
pub struct Counter {
    name: String,
    count: u64,
}

impl Counter {
    /// A counter reported as `counter-<name>`.
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    /// The counted value.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Metric for Counter {
    const IDENTIFIER: &'static str = "counter";
    const DISPLAY_NAME: &'static str = "Count";

    fn identifier(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}-{}", Self::IDENTIFIER, self.name))
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("Number of {}", self.name))
    }

    fn result(&self) -> Option<MetricValue> {
        Some(MetricValue::from(self.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_reports_count() {
        let counter = Counter::new("files", 12);
        assert_eq!(counter.identifier(), "counter-files");
        assert_eq!(counter.display_name(), "Number of files");
        assert_eq!(counter.result(), Some(MetricValue::Number(12.0)));
    }
}
