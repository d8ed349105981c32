//! Error types for probes and report output.
//!
//! Probe errors never leave the metric that ran the probe; they are logged
//! and turned into an absent value. Report errors come only from persisting
//! a finished report.

use thiserror::Error;

/// Errors that can occur while reading a system counter.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The current platform has no probe implementation.
    #[error("Probe is not supported on this platform")]
    Unsupported,

    /// The kernel call returned a non-success status.
    #[error("Kernel call failed with status {code}")]
    Kernel {
        /// Status code returned by the kernel.
        code: i32,
    },

    /// The status source could not be read.
    #[error("Failed to read process status: {0}")]
    Read(#[from] std::io::Error),

    /// The expected field is missing from the status text.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The field is present but its value is malformed.
    #[error("Malformed value: {0}")]
    Parse(String),
}

/// Errors that can occur while persisting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
