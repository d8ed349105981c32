//! The metric kind contract.
//!
//! Every kind of measurement implements [`Metric`]. Kinds whose value is
//! known as soon as they are constructed (peak memory, a checksum) are
//! instantaneous; kinds that bound an interval also implement
//! [`BlockMetric`] and only produce a result once [`BlockMetric::end`] has
//! run.

use crate::result::MetricValue;
use std::borrow::Cow;

/// A kind of measurement with a stable identity and an optional result.
pub trait Metric {
    /// Stable machine-readable identifier of the kind.
    ///
    /// The log's prefix filter is always evaluated against this value.
    const IDENTIFIER: &'static str;

    /// Human-readable name of the kind.
    const DISPLAY_NAME: &'static str;

    /// Identifier reported for this instance.
    ///
    /// Parameterized kinds override this to include their parameter.
    fn identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::IDENTIFIER)
    }

    /// Display name reported for this instance.
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::DISPLAY_NAME)
    }

    /// The measured value, or `None` if the probe failed or the measurement
    /// never completed.
    fn result(&self) -> Option<MetricValue>;
}

/// A metric bounded by an explicit begin/end pair.
pub trait BlockMetric: Metric {
    /// Capture the start snapshot.
    fn begin(&mut self);

    /// Capture the end snapshot and compute the result.
    fn end(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Metric for Fixed {
        const IDENTIFIER: &'static str = "fixed";
        const DISPLAY_NAME: &'static str = "Fixed value";

        fn result(&self) -> Option<MetricValue> {
            Some(MetricValue::Number(1.0))
        }
    }

    struct Step(u32);

    impl Metric for Step {
        const IDENTIFIER: &'static str = "step";
        const DISPLAY_NAME: &'static str = "Step";

        fn identifier(&self) -> Cow<'_, str> {
            Cow::Owned(format!("step-{}", self.0))
        }

        fn result(&self) -> Option<MetricValue> {
            None
        }
    }

    #[test]
    fn test_default_identity_uses_static_values() {
        assert_eq!(Fixed.identifier(), "fixed");
        assert_eq!(Fixed.display_name(), "Fixed value");
    }

    #[test]
    fn test_dynamic_identifier_overrides_static() {
        let step = Step(3);
        assert_eq!(step.identifier(), "step-3");
        assert_eq!(step.display_name(), "Step");
        assert_eq!(Step::IDENTIFIER, "step");
    }
}
