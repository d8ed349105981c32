//! CLI for docbench.
//!
//! This crate hosts the benchmark library: it scans a documentation output
//! directory as its unit of work, records metrics about the scan, and writes
//! the benchmark report.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use clap::{Parser, Subcommand, ValueEnum};
use docbench_benchmarks::config::{ENV_ENABLED, ENV_FILTER};
use docbench_benchmarks::io::{self as report_io, REPORT_FILE, SUMMARY_FILE};
use docbench_benchmarks::metrics::{Checksum, Counter, CpuTime, ElapsedTime, OutputSize, PeakMemory};
use docbench_benchmarks::{
    BenchmarkConfig, BenchmarkLog, BenchmarkReport, MemoryProbe, PlatformProbe, PLATFORM_NAME,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// docbench CLI.
#[derive(Parser, Debug)]
#[command(name = "docbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory and report benchmark metrics about the scan.
    ///
    /// Benchmarking is enabled by DOCBENCH_BENCHMARK or --benchmark. When
    /// enabled, the report is written to the output directory, or printed as
    /// JSON when no output directory is given.
    Scan {
        /// Directory to scan.
        path: PathBuf,

        /// Directory to write the report into.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which report files to write.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,

        /// Record metrics even if DOCBENCH_BENCHMARK is not set.
        #[arg(long)]
        benchmark: bool,

        /// Only record metric kinds whose identifier starts with this prefix.
        #[arg(long)]
        filter: Option<String>,

        /// Verbose output.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show benchmark configuration and platform support.
    Status {
        /// Show detailed status information.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Report files written by `scan`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `benchmark.json` only.
    Json,
    /// `benchmark.md` only.
    Markdown,
    /// Both files.
    Both,
}

/// What a scan found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of regular files.
    pub files: u64,
    /// Total content size in bytes.
    pub bytes: u64,
    /// SHA-256 over relative paths and contents, in path order.
    pub digest: String,
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Scan { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Scan {
            path,
            output,
            format,
            benchmark,
            filter,
            verbose,
        } => {
            let config = scan_config(BenchmarkConfig::from_env(), benchmark, filter);
            let mut log = BenchmarkLog::new(config);
            let to_stderr = report_on_stdout(&log, output.as_deref());

            let summary = scan_directory(&mut log, &path)?;
            log.add(PeakMemory::new());

            print_line(
                to_stderr,
                &format!(
                    "Scanned {} files ({} bytes) in {}",
                    summary.files,
                    summary.bytes,
                    path.display()
                ),
            );
            if verbose {
                print_line(to_stderr, &format!("Content checksum: {}", summary.digest));
            }

            if log.is_enabled() {
                let report = log.report();
                write_report(&report, output.as_deref(), format)?;
                if verbose {
                    for metric in &report.metrics {
                        print_line(
                            to_stderr,
                            &format!("  - {}: {}", metric.identifier, metric.value),
                        );
                    }
                }
            } else {
                debug!("benchmarking disabled; no report written");
            }

            Ok(())
        }
        Commands::Status { detailed } => {
            let config = BenchmarkConfig::from_env();

            println!("docbench benchmark status");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Platform: {}", PLATFORM_NAME);
            println!("Enabled: {}", config.enabled);
            println!("Filter: {}", config.filter.as_deref().unwrap_or("(none)"));

            if detailed {
                match PlatformProbe::default().peak_memory_footprint() {
                    Ok(bytes) => println!("Memory probe: available ({} bytes peak)", bytes),
                    Err(error) => println!("Memory probe: unavailable ({})", error),
                }
                println!("\nEnvironment:");
                println!("  - {}", ENV_ENABLED);
                println!("  - {}", ENV_FILTER);
                println!("\nOutput files:");
                println!("  - {}", REPORT_FILE);
                println!("  - {}", SUMMARY_FILE);
            }

            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(io::stderr)
        .try_init();
}

/// `RUST_LOG` directives when set and valid, otherwise `warn` (`info` when
/// verbose).
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default = if verbose { "info" } else { "warn" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Benchmark configuration for `scan`: the flags override the environment.
fn scan_config(env: BenchmarkConfig, benchmark: bool, filter: Option<String>) -> BenchmarkConfig {
    BenchmarkConfig {
        enabled: env.enabled || benchmark,
        filter: filter.or(env.filter),
    }
}

/// Whether the report JSON goes to stdout, so human output must not.
fn report_on_stdout(log: &BenchmarkLog, output: Option<&Path>) -> bool {
    log.is_enabled() && output.is_none()
}

fn print_line(to_stderr: bool, line: &str) {
    if to_stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Scan `root`, recording the scan's metrics into `log`.
///
/// Records, in order: processor time of the file walk, the file count, the
/// content checksum, the size on disk, and the wall-clock duration of the
/// whole scan. Nothing is recorded if the scan fails.
pub fn scan_directory(log: &mut BenchmarkLog, root: &Path) -> io::Result<ScanSummary> {
    log.wrap(
        || ElapsedTime::named("scan"),
        |log| -> io::Result<ScanSummary> {
            let cpu = log.begin(|| CpuTime::named("scan"));
            let mut files = Vec::new();
            collect_files(root, &mut files)?;
            files.sort();

            let mut chunks = Vec::with_capacity(files.len() * 2);
            let mut bytes = 0u64;
            for file in &files {
                let relative = file.strip_prefix(root).unwrap_or(file.as_path());
                chunks.push(relative.to_string_lossy().into_owned().into_bytes());
                let content = fs::read(file)?;
                bytes += content.len() as u64;
                chunks.push(content);
            }
            log.end(cpu);

            let checksum = Checksum::new("content", &chunks);
            let summary = ScanSummary {
                files: files.len() as u64,
                bytes,
                digest: checksum.digest().to_string(),
            };

            log.add(Counter::new("files", summary.files));
            log.add(checksum);
            log.add(OutputSize::new(root));

            info!(files = summary.files, bytes = summary.bytes, "scan complete");
            Ok(summary)
        },
    )
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), files)?;
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }
    Ok(())
}

/// Write `report` in `format` into `output`, or print it as JSON.
pub fn write_report(
    report: &BenchmarkReport,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(dir) = output else {
        println!("{}", report.to_json()?);
        return Ok(());
    };

    match format {
        OutputFormat::Both => {
            report_io::write_all_outputs(report, dir)?;
        }
        OutputFormat::Json => {
            fs::create_dir_all(dir)?;
            report_io::write_report_json(report, dir.join(REPORT_FILE))?;
        }
        OutputFormat::Markdown => {
            fs::create_dir_all(dir)?;
            report_io::write_summary(report, dir.join(SUMMARY_FILE))?;
        }
    }
    println!("Benchmark report written to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data").join("topic.json"), "{}").unwrap();
        dir
    }

    fn enabled_log() -> BenchmarkLog {
        BenchmarkLog::with_arguments(BenchmarkConfig::enabled(), ["scan"])
    }

    #[test]
    fn test_parse_scan_command() {
        let cli = Cli::try_parse_from([
            "docbench", "scan", "out", "--benchmark", "--filter", "duration", "-f", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Scan {
                path,
                format,
                benchmark,
                filter,
                ..
            } => {
                assert_eq!(path, PathBuf::from("out"));
                assert_eq!(format, OutputFormat::Json);
                assert!(benchmark);
                assert_eq!(filter.as_deref(), Some("duration"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn debug_enabled(filter: EnvFilter) -> bool {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, || tracing::enabled!(Level::DEBUG))
    }

    fn warn_enabled(filter: EnvFilter) -> bool {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, || tracing::enabled!(Level::WARN))
    }

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert!(debug_enabled(log_filter(false, Some("debug"))));
        assert!(debug_enabled(log_filter(true, Some("debug"))));
    }

    #[test]
    fn test_log_filter_defaults_without_rust_log() {
        assert!(!debug_enabled(log_filter(false, None)));
        assert!(warn_enabled(log_filter(false, None)));
        assert!(!debug_enabled(log_filter(true, Some(""))));
    }

    #[test]
    fn test_log_filter_ignores_invalid_rust_log() {
        assert!(warn_enabled(log_filter(false, Some("[[not a directive"))));
        assert!(!debug_enabled(log_filter(false, Some("[[not a directive"))));
    }

    #[test]
    fn test_scan_config_flags_override_environment() {
        let env = BenchmarkConfig::disabled();
        assert_eq!(scan_config(env.clone(), false, None), BenchmarkConfig::disabled());
        assert_eq!(scan_config(env, true, None), BenchmarkConfig::enabled());

        let env = BenchmarkConfig::enabled().with_filter("peak");
        assert_eq!(
            scan_config(env.clone(), false, None),
            BenchmarkConfig::enabled().with_filter("peak")
        );
        assert_eq!(
            scan_config(env, false, Some("duration".to_string())),
            BenchmarkConfig::enabled().with_filter("duration")
        );
    }

    #[test]
    fn test_report_on_stdout_only_without_output_dir() {
        let out = PathBuf::from("out");
        assert!(report_on_stdout(&enabled_log(), None));
        assert!(!report_on_stdout(&enabled_log(), Some(&out)));
        assert!(!report_on_stdout(&BenchmarkLog::disabled(), None));
    }

    #[test]
    fn test_scan_records_metrics_in_order() {
        let dir = fixture();
        let mut log = enabled_log();

        let summary = scan_directory(&mut log, dir.path()).unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.bytes, 15);

        let identifiers: Vec<_> = log.metrics().iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(
            identifiers,
            [
                "cpu-time-scan",
                "counter-files",
                "checksum-content",
                "output-size",
                "duration-scan"
            ]
        );
    }

    #[test]
    fn test_scan_digest_is_stable() {
        let dir = fixture();
        let first = scan_directory(&mut BenchmarkLog::disabled(), dir.path()).unwrap();
        let second = scan_directory(&mut BenchmarkLog::disabled(), dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_scan_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = enabled_log();

        assert!(scan_directory(&mut log, &dir.path().join("missing")).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_write_report_json_only() {
        let dir = fixture();
        let out = tempfile::tempdir().unwrap();
        let mut log = enabled_log();
        scan_directory(&mut log, dir.path()).unwrap();

        write_report(&log.report(), Some(out.path()), OutputFormat::Json).unwrap();
        assert!(out.path().join(REPORT_FILE).exists());
        assert!(!out.path().join(SUMMARY_FILE).exists());
    }
}
