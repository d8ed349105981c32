//! I/O operations for benchmark reports.
//!
//! This module writes a finished report to the filesystem as JSON and as a
//! markdown summary, and reads a JSON report back.

use crate::error::ReportError;
use crate::markdown;
use crate::report::BenchmarkReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the JSON report inside an output directory.
pub const REPORT_FILE: &str = "benchmark.json";

/// File name of the markdown summary inside an output directory.
pub const SUMMARY_FILE: &str = "benchmark.md";

/// Write a report as pretty-printed JSON.
pub fn write_report_json(report: &BenchmarkReport, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let json = report.to_json()?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the markdown summary of a report.
pub fn write_summary(report: &BenchmarkReport, path: impl AsRef<Path>) -> Result<(), ReportError> {
    fs::write(path, markdown::generate_summary(report))?;
    Ok(())
}

/// Write the JSON report and the markdown summary into `dir`, creating it
/// if needed. Returns the paths written.
pub fn write_all_outputs(
    report: &BenchmarkReport,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ReportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let json_path = dir.join(REPORT_FILE);
    write_report_json(report, &json_path)?;

    let summary_path = dir.join(SUMMARY_FILE);
    write_summary(report, &summary_path)?;

    info!(
        dir = %dir.display(),
        metrics = report.metrics.len(),
        "wrote benchmark report"
    );
    Ok(vec![json_path, summary_path])
}

/// Read a report from a JSON file.
pub fn read_report_json(path: impl AsRef<Path>) -> Result<BenchmarkReport, ReportError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
