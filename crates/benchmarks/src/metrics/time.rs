//! Block metrics that measure an interval of time.

use crate::metric::{BlockMetric, Metric};
use crate::result::MetricValue;
use std::borrow::Cow;
use std::time::{Duration, Instant};

fn as_millis(duration: Duration) -> MetricValue {
    MetricValue::Number(duration.as_secs_f64() * 1000.0)
}

/// Wall-clock time between `begin` and `end`, in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct ElapsedTime {
    name: Option<String>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl ElapsedTime {
    /// An unnamed duration, reported as `duration`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A named duration, reported as `duration-<name>`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The measured interval, once ended.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }
}

impl Metric for ElapsedTime {
    const IDENTIFIER: &'static str = "duration";
    const DISPLAY_NAME: &'static str = "Duration for an operation";

    fn identifier(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Owned(format!("{}-{name}", Self::IDENTIFIER)),
            None => Cow::Borrowed(Self::IDENTIFIER),
        }
    }

    fn display_name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Owned(format!("Duration for '{name}'")),
            None => Cow::Borrowed(Self::DISPLAY_NAME),
        }
    }

    fn result(&self) -> Option<MetricValue> {
        self.elapsed.map(as_millis)
    }
}

impl BlockMetric for ElapsedTime {
    fn begin(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    fn end(&mut self) {
        if let Some(started) = self.started {
            self.elapsed = Some(started.elapsed());
        }
    }
}

/// Processor time (user + system) spent by the process between `begin` and
/// `end`, in milliseconds.
///
/// Only available on unix targets.
#[derive(Debug, Clone, Default)]
pub struct CpuTime {
    name: Option<String>,
    started: Option<Duration>,
    spent: Option<Duration>,
}

impl CpuTime {
    /// An unnamed measurement, reported as `cpu-time`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A named measurement, reported as `cpu-time-<name>`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The processor time spent, once ended.
    pub fn spent(&self) -> Option<Duration> {
        self.spent
    }
}

impl Metric for CpuTime {
    const IDENTIFIER: &'static str = "cpu-time";
    const DISPLAY_NAME: &'static str = "Processor time for an operation";

    fn identifier(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Owned(format!("{}-{name}", Self::IDENTIFIER)),
            None => Cow::Borrowed(Self::IDENTIFIER),
        }
    }

    fn display_name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Owned(format!("Processor time for '{name}'")),
            None => Cow::Borrowed(Self::DISPLAY_NAME),
        }
    }

    fn result(&self) -> Option<MetricValue> {
        self.spent.map(as_millis)
    }
}

impl BlockMetric for CpuTime {
    fn begin(&mut self) {
        self.started = process_cpu_time();
        self.spent = None;
    }

    fn end(&mut self) {
        if let (Some(started), Some(now)) = (self.started, process_cpu_time()) {
            self.spent = Some(now.saturating_sub(started));
        }
    }
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn process_cpu_time() -> Option<Duration> {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let status = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if status != 0 {
        tracing::debug!(status, "getrusage failed");
        return None;
    }

    let timeval = |tv: libc::timeval| {
        Duration::from_secs(tv.tv_sec.max(0) as u64) + Duration::from_micros(tv.tv_usec.max(0) as u64)
    };
    Some(timeval(usage.ru_utime) + timeval(usage.ru_stime))
}

#[cfg(not(unix))]
fn process_cpu_time() -> Option<Duration> {
    None
}
