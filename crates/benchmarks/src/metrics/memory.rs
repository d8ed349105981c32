//! Peak memory footprint metric.

use crate::metric::Metric;
use crate::probe::{MemoryProbe, PlatformProbe};
use crate::result::MetricValue;
use tracing::debug;

/// Peak memory footprint of the process, in bytes.
///
/// The probe runs once, when the metric is constructed. On platforms without
/// a probe, or when the probe fails, the metric has no result.
#[derive(Debug, Clone, Copy)]
pub struct PeakMemory {
    bytes: Option<u64>,
}

impl PeakMemory {
    /// Measure with the probe for the current platform.
    pub fn new() -> Self {
        Self::with_probe(&PlatformProbe::default())
    }

    /// Measure with a specific probe.
    pub fn with_probe(probe: &dyn MemoryProbe) -> Self {
        let bytes = match probe.peak_memory_footprint() {
            Ok(bytes) => Some(bytes),
            Err(error) => {
                debug!(%error, "peak memory probe unavailable");
                None
            }
        };
        Self { bytes }
    }

    /// The measured footprint in bytes.
    pub fn bytes(&self) -> Option<u64> {
        self.bytes
    }
}

impl Default for PeakMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for PeakMemory {
    const IDENTIFIER: &'static str = "peak-memory";
    const DISPLAY_NAME: &'static str = "Peak memory footprint";

    fn result(&self) -> Option<MetricValue> {
        self.bytes.map(MetricValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::probe::MockMemoryProbe;

    #[test]
    fn test_successful_probe_reports_bytes() {
        let mut probe = MockMemoryProbe::new();
        probe
            .expect_peak_memory_footprint()
            .times(1)
            .returning(|| Ok(4096));

        let metric = PeakMemory::with_probe(&probe);
        assert_eq!(metric.bytes(), Some(4096));
        assert_eq!(metric.result(), Some(MetricValue::Number(4096.0)));
    }

    #[test]
    fn test_failed_probe_has_no_result() {
        let mut probe = MockMemoryProbe::new();
        probe
            .expect_peak_memory_footprint()
            .times(1)
            .returning(|| Err(ProbeError::Kernel { code: 5 }));

        let metric = PeakMemory::with_probe(&probe);
        assert!(metric.result().is_none());
    }

    #[test]
    fn test_identity() {
        let metric = PeakMemory::with_probe(&crate::probe::UnsupportedProbe);
        assert_eq!(metric.identifier(), "peak-memory");
        assert_eq!(metric.display_name(), "Peak memory footprint");
        assert!(metric.result().is_none());
    }
}
