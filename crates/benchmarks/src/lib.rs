//! Opt-in metrics collection and reporting for docbench.
//!
//! This crate records performance measurements (memory footprint, elapsed
//! time, counters, checksums) during a single process run and shapes them
//! into a report.
//!
//! # Quick Start
//!
//! ```no_run
//! use docbench_benchmarks::metrics::{ElapsedTime, PeakMemory};
//! use docbench_benchmarks::{io, BenchmarkLog};
//!
//! // Read DOCBENCH_BENCHMARK / DOCBENCH_BENCHMARK_FILTER once at startup.
//! let mut log = BenchmarkLog::from_env();
//!
//! let total = log.wrap(
//!     || ElapsedTime::named("convert"),
//!     |_log| Ok::<_, std::io::Error>((1..=10).sum::<u32>()),
//! )?;
//! log.add(PeakMemory::new());
//!
//! if log.is_enabled() {
//!     io::write_all_outputs(&log.report(), "benchmarks/output")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`metric`] - The `Metric` and `BlockMetric` traits
//! - [`metrics`] - Built-in metric kinds
//! - [`probe`] - Platform memory probes
//! - [`log`] - The `BenchmarkLog` recorder
//! - [`config`] - Environment configuration
//! - [`report`] - The serialized report
//! - [`result`] - Metric values and report entries
//! - [`io`] - Reading and writing reports
//! - [`markdown`] - Markdown summaries

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod io;
pub mod log;
pub mod markdown;
pub mod metric;
pub mod metrics;
pub mod probe;
pub mod report;
pub mod result;

pub use config::BenchmarkConfig;
pub use error::{ProbeError, ReportError};
pub use log::{BenchmarkLog, RecordedMetric};
pub use metric::{BlockMetric, Metric};
pub use probe::{MemoryProbe, PlatformProbe, PLATFORM_NAME};
pub use report::BenchmarkReport;
pub use result::{MetricResult, MetricValue};
