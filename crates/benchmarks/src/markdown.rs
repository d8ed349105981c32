//! Markdown output generation for benchmark reports.

use crate::report::BenchmarkReport;
use crate::result::MetricValue;
use std::fmt::{self, Write};

/// Longest value rendered in full before it is shortened.
const MAX_VALUE_WIDTH: usize = 50;

/// Generate a markdown summary of a report.
pub fn generate_summary(report: &BenchmarkReport) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut output, report);
    output
}

fn write_summary(output: &mut String, report: &BenchmarkReport) -> fmt::Result {
    writeln!(output, "# Benchmark Summary\n")?;
    writeln!(output, "Date: {}\n", report.date)?;
    writeln!(output, "Platform: {}\n", report.platform)?;
    if !report.arguments.is_empty() {
        writeln!(output, "Arguments: `{}`\n", report.arguments.join(" "))?;
    }

    writeln!(output, "## Metrics\n")?;
    writeln!(output, "| Metric | Identifier | Value |")?;
    writeln!(output, "|--------|------------|-------|")?;

    for metric in &report.metrics {
        writeln!(
            output,
            "| {} | {} | {} |",
            escape_cell(&metric.display_name),
            escape_cell(&metric.identifier),
            escape_cell(&format_value(&metric.value))
        )?;
    }

    writeln!(output, "\n---")?;
    writeln!(output, "Total metrics: {}", report.metrics.len())
}

fn format_value(value: &MetricValue) -> String {
    let text = value.to_string();
    if text.chars().count() > MAX_VALUE_WIDTH {
        let short: String = text.chars().take(MAX_VALUE_WIDTH - 3).collect();
        format!("{short}...")
    } else {
        text
    }
}

/// Escape pipes so a cell cannot split the table row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::MetricResult;

    fn report(metrics: Vec<MetricResult>) -> BenchmarkReport {
        BenchmarkReport {
            date: "Oct 19, 2026 at 3:04:05 PM".to_string(),
            arguments: vec!["scan".to_string(), "docs".to_string()],
            platform: "Linux".to_string(),
            metrics,
        }
    }

    #[test]
    fn test_summary_lists_metrics_in_order() {
        let summary = generate_summary(&report(vec![
            MetricResult::new("peak-memory", "Peak memory footprint", 2048u64),
            MetricResult::new("duration", "Duration for an operation", 1.5),
        ]));

        let memory = summary.find("| Peak memory footprint | peak-memory | 2048 |").unwrap();
        let duration = summary.find("| Duration for an operation | duration | 1.5 |").unwrap();
        assert!(memory < duration);
        assert!(summary.contains("Arguments: `scan docs`"));
        assert!(summary.contains("Total metrics: 2"));
    }

    #[test]
    fn test_long_values_are_shortened() {
        let digest = "a".repeat(64);
        let summary = generate_summary(&report(vec![MetricResult::new(
            "checksum-content",
            "Checksum of content",
            digest.as_str(),
        )]));

        assert!(summary.contains(&format!("{}...", "a".repeat(47))));
        assert!(!summary.contains(&digest));
    }

    #[test]
    fn test_empty_report() {
        let summary = generate_summary(&report(Vec::new()));
        assert!(summary.contains("Total metrics: 0"));
    }

    #[test]
    fn test_pipes_are_escaped_in_cells() {
        let summary = generate_summary(&report(vec![MetricResult::new(
            "counter-a|b",
            "Files | folders",
            "x|y",
        )]));

        assert!(summary.contains(r"| Files \| folders | counter-a\|b | x\|y |"));
        let row = summary.lines().find(|line| line.starts_with("| Files")).unwrap();
        assert_eq!(row.matches(" | ").count(), 2);
    }
}
