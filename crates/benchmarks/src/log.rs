//! The benchmark log.
//!
//! A [`BenchmarkLog`] is created once at process start and passed by
//! reference to every place that measures something. It decides whether a
//! metric is retained (the gate) and keeps retained metrics in the order
//! they completed.
//!
//! ```
//! use docbench_benchmarks::metrics::{Counter, ElapsedTime};
//! use docbench_benchmarks::{BenchmarkConfig, BenchmarkLog};
//!
//! let mut log = BenchmarkLog::new(BenchmarkConfig::enabled());
//!
//! let handle = log.begin(ElapsedTime::new);
//! // ... work ...
//! log.end(handle);
//!
//! let pages = log.wrap(
//!     || ElapsedTime::named("render"),
//!     |log| {
//!         log.add(Counter::new("pages", 3));
//!         Ok::<_, std::io::Error>(3)
//!     },
//! )?;
//! assert_eq!(pages, 3);
//! assert_eq!(log.len(), 3);
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! The log is not internally synchronized. Every mutating operation takes
//! `&mut self`; hosts that measure from several threads must wrap the log in
//! their own lock.

use crate::config::BenchmarkConfig;
use crate::metric::{BlockMetric, Metric};
use crate::report::BenchmarkReport;
use crate::result::MetricValue;
use chrono::{DateTime, Local};
use tracing::trace;

/// A retained metric as stored by the log.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMetric {
    /// Identifier reported by the metric instance.
    pub identifier: String,
    /// Display name reported by the metric instance.
    pub display_name: String,
    /// The result, absent if the measurement produced none.
    pub value: Option<MetricValue>,
}

impl RecordedMetric {
    fn capture<M: Metric>(metric: &M) -> Self {
        Self {
            identifier: metric.identifier().into_owned(),
            display_name: metric.display_name().into_owned(),
            value: metric.result(),
        }
    }
}

/// Recorder for the metrics of one process run.
#[derive(Debug, Clone)]
pub struct BenchmarkLog {
    enabled: bool,
    filter: Option<String>,
    started_at: DateTime<Local>,
    arguments: Vec<String>,
    metrics: Vec<RecordedMetric>,
}

impl BenchmarkLog {
    /// Create a log for this process.
    ///
    /// The invocation arguments are captured from the environment, without
    /// the program name.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self::with_arguments(config, std::env::args().skip(1))
    }

    /// Create a log configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(BenchmarkConfig::from_env())
    }

    /// Create a log that records nothing.
    pub fn disabled() -> Self {
        Self::new(BenchmarkConfig::disabled())
    }

    /// Create a log with explicit invocation arguments.
    pub fn with_arguments<I, S>(config: BenchmarkConfig, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: config.enabled,
            filter: config.filter,
            started_at: Local::now(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            metrics: Vec::new(),
        }
    }

    /// Whether the log records anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The identifier prefix filter, if any.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// When the log was created.
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Invocation arguments, without the program name.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Retained metrics in recording order.
    pub fn metrics(&self) -> &[RecordedMetric] {
        &self.metrics
    }

    /// Number of retained metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether no metric has been retained.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Whether metrics of kind `M` pass the gate.
    pub fn should_record<M: Metric>(&self) -> bool {
        self.should_record_identifier(M::IDENTIFIER)
    }

    /// Whether a kind with the given static identifier passes the gate.
    pub fn should_record_identifier(&self, identifier: &str) -> bool {
        self.enabled
            && self
                .filter
                .as_deref()
                .map_or(true, |prefix| identifier.starts_with(prefix))
    }

    fn record<M: Metric>(&mut self, metric: &M) {
        let recorded = RecordedMetric::capture(metric);
        trace!(
            identifier = %recorded.identifier,
            has_value = recorded.value.is_some(),
            "recorded metric"
        );
        self.metrics.push(recorded);
    }

    /// Record an already constructed metric.
    ///
    /// The metric has already run its probe by the time it is passed in, so
    /// the probe cost is paid even when the gate rejects it.
    pub fn add<M: Metric>(&mut self, metric: M) {
        if !self.should_record::<M>() {
            trace!(identifier = M::IDENTIFIER, filter = ?self.filter, "metric gated out");
            return;
        }
        self.record(&metric);
    }

    /// Start a block metric.
    ///
    /// Returns `None` without calling `make_metric` when the gate rejects the
    /// kind. Pass the returned handle to [`end`](Self::end).
    pub fn begin<M, F>(&self, make_metric: F) -> Option<M>
    where
        M: BlockMetric,
        F: FnOnce() -> M,
    {
        if !self.should_record::<M>() {
            trace!(identifier = M::IDENTIFIER, filter = ?self.filter, "metric gated out");
            return None;
        }
        let mut metric = make_metric();
        metric.begin();
        Some(metric)
    }

    /// Finish a block metric started with [`begin`](Self::begin) and record it.
    ///
    /// Does nothing for a `None` handle or when the gate no longer passes.
    /// The handle is consumed, so a metric cannot be recorded twice:
    ///
    /// ```compile_fail
    /// use docbench_benchmarks::metrics::ElapsedTime;
    /// use docbench_benchmarks::{BenchmarkConfig, BenchmarkLog};
    ///
    /// let mut log = BenchmarkLog::new(BenchmarkConfig::enabled());
    /// let handle = log.begin(ElapsedTime::new);
    /// log.end(handle);
    /// log.end(handle);
    /// ```
    pub fn end<M: BlockMetric>(&mut self, handle: Option<M>) {
        let Some(mut metric) = handle else {
            return;
        };
        if !self.should_record::<M>() {
            return;
        }
        metric.end();
        self.record(&metric);
    }

    /// Measure `body` with a block metric.
    ///
    /// `body` runs exactly once whether or not the metric is gated in, and
    /// receives the log so it can record nested metrics. On success the metric
    /// is ended and recorded after anything `body` recorded. On failure the
    /// metric is dropped unrecorded and the error is returned unchanged.
    /// Metrics `body` recorded before failing stay in the log, which is
    /// append-only.
    pub fn wrap<M, F, B, T, E>(&mut self, make_metric: F, body: B) -> Result<T, E>
    where
        M: BlockMetric,
        F: FnOnce() -> M,
        B: FnOnce(&mut Self) -> Result<T, E>,
    {
        let handle = self.begin(make_metric);
        let value = body(self)?;
        self.end(handle);
        Ok(value)
    }

    /// Build the report for the metrics retained so far.
    pub fn report(&self) -> BenchmarkReport {
        BenchmarkReport::from_log(self)
    }
}

impl Default for BenchmarkLog {
    fn default() -> Self {
        Self::disabled()
    }
}
