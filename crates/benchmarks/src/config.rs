//! Benchmark configuration.
//!
//! Benchmarking is opt-in. The host reads the configuration once at process
//! start and builds its [`BenchmarkLog`](crate::BenchmarkLog) from it.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `DOCBENCH_BENCHMARK` | `true`, `1` or `yes` enables recording |
//! | `DOCBENCH_BENCHMARK_FILTER` | only record kinds whose identifier starts with this prefix |

use serde::{Deserialize, Serialize};

/// Environment variable that enables recording.
pub const ENV_ENABLED: &str = "DOCBENCH_BENCHMARK";

/// Environment variable holding the identifier prefix filter.
pub const ENV_FILTER: &str = "DOCBENCH_BENCHMARK_FILTER";

/// Activation input for a benchmark log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Whether metrics are recorded at all.
    pub enabled: bool,
    /// Identifier prefix a metric kind must match to be recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl BenchmarkConfig {
    /// A configuration that records every metric.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            filter: None,
        }
    }

    /// A configuration that records nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Restrict recording to kinds whose identifier starts with `prefix`.
    pub fn with_filter(mut self, prefix: impl Into<String>) -> Self {
        self.filter = Some(prefix.into());
        self
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup.
    ///
    /// Unrecognized values for [`ENV_ENABLED`] leave recording disabled, and
    /// an empty filter is treated as no filter.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup(ENV_ENABLED)
            .and_then(|value| parse_flag(&value))
            .unwrap_or(false);
        let filter = lookup(ENV_FILTER).filter(|prefix| !prefix.is_empty());

        Self { enabled, filter }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_unset_is_disabled() {
        let config = BenchmarkConfig::from_lookup(lookup(&[]));
        assert_eq!(config, BenchmarkConfig::disabled());
    }

    #[test]
    fn test_enable_flag_spellings() {
        for value in ["true", "1", "YES", " yes "] {
            let config = BenchmarkConfig::from_lookup(lookup(&[(ENV_ENABLED, value)]));
            assert!(config.enabled, "{value:?} should enable");
        }
        for value in ["false", "0", "no", "maybe"] {
            let config = BenchmarkConfig::from_lookup(lookup(&[(ENV_ENABLED, value)]));
            assert!(!config.enabled, "{value:?} should not enable");
        }
    }

    #[test]
    fn test_filter_is_read() {
        let config = BenchmarkConfig::from_lookup(lookup(&[
            (ENV_ENABLED, "yes"),
            (ENV_FILTER, "peak"),
        ]));
        assert_eq!(config, BenchmarkConfig::enabled().with_filter("peak"));
    }

    #[test]
    fn test_empty_filter_is_no_filter() {
        let config = BenchmarkConfig::from_lookup(lookup(&[(ENV_FILTER, "")]));
        assert!(config.filter.is_none());
    }
}
