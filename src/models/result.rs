//! Benchmark result data models
//!
//! Contains the per-strategy result, the report for a whole suite run,
//! and host information captured alongside them.

use crate::config::BenchConfig;
use crate::util::units::{format_millis, format_seconds, format_speedup};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Sum produced by a strategy, widened to a common representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SumValue {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for SumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumValue::Signed(v) => write!(f, "{}", v),
            SumValue::Unsigned(v) => write!(f, "{}", v),
            SumValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl SumValue {
    /// Whether two sums of the same input agree.
    ///
    /// Integer sums must be identical. Float sums may differ by at most
    /// `tolerance`, see [`crate::reduce::summation_error_bound`].
    pub fn agrees_with(&self, other: &SumValue, tolerance: f64) -> bool {
        match (*self, *other) {
            (SumValue::Float(a), SumValue::Float(b)) => (a - b).abs() <= tolerance,
            (SumValue::Float(_), _) | (_, SumValue::Float(_)) => false,
            (a, b) => a.as_i128() == b.as_i128(),
        }
    }

    fn as_i128(&self) -> i128 {
        match *self {
            SumValue::Signed(v) => v as i128,
            SumValue::Unsigned(v) => v as i128,
            SumValue::Float(v) => v as i128,
        }
    }
}

/// Which clock measured the elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockSource {
    /// Host monotonic clock around the engine call
    Host,
    /// Accelerator events recorded on the device
    Device,
}

/// Result of a single strategy invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Timestamp when the strategy finished
    pub timestamp: DateTime<Utc>,
    /// Strategy label, e.g. "Serial" or "4 Threads"
    pub strategy: String,
    /// Computed sum
    pub sum: SumValue,
    /// Elapsed time of the reduction
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
    /// Clock that produced `elapsed`
    pub clock: ClockSource,
}

impl BenchmarkResult {
    /// Create a result timed on the host
    pub fn host(strategy: impl Into<String>, sum: SumValue, elapsed: Duration) -> Self {
        Self {
            timestamp: Utc::now(),
            strategy: strategy.into(),
            sum,
            elapsed,
            clock: ClockSource::Host,
        }
    }

    /// Create a result timed by the device
    pub fn device(strategy: impl Into<String>, sum: SumValue, elapsed: Duration) -> Self {
        Self {
            clock: ClockSource::Device,
            ..Self::host(strategy, sum, elapsed)
        }
    }

    /// Report lines for this result.
    ///
    /// Host-timed runs print one line with seconds to 6 places; device-timed
    /// runs print the sum and the device time in milliseconds to 3 places.
    pub fn report_lines(&self) -> Vec<String> {
        match self.clock {
            ClockSource::Host => vec![format!(
                "{}: Resultado={}, Tempo={} segundos",
                self.strategy,
                self.sum,
                format_seconds(self.elapsed)
            )],
            ClockSource::Device => vec![
                format!("{}: Resultado da soma: {}", self.strategy, self.sum),
                format!("{}: Tempo total GPU (ms): {}", self.strategy, format_millis(self.elapsed)),
            ],
        }
    }

    /// Speedup of this result relative to `baseline` (baseline time / this time)
    pub fn speedup_over(&self, baseline: &BenchmarkResult) -> Option<f64> {
        if self.elapsed.is_zero() {
            return None;
        }
        Some(baseline.elapsed.as_secs_f64() / self.elapsed.as_secs_f64())
    }
}

/// Host information captured at suite start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostInfo {
    /// Operating system and architecture
    pub os: String,
    /// Logical CPUs available to this process
    pub logical_cpus: usize,
}

impl HostInfo {
    /// Detect the current host
    pub fn detect() -> Self {
        Self {
            os: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            logical_cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// Every strategy result of one driver run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Timestamp when the suite started
    pub started_at: DateTime<Utc>,
    /// Configuration the suite ran with
    pub config: BenchConfig,
    /// Host the suite ran on
    pub host: HostInfo,
    /// Results in execution order
    pub results: Vec<BenchmarkResult>,
}

impl SuiteReport {
    /// Start an empty report for `config`
    pub fn new(config: BenchConfig) -> Self {
        Self {
            started_at: Utc::now(),
            config,
            host: HostInfo::detect(),
            results: Vec::new(),
        }
    }

    /// The serial baseline, if it was run
    pub fn baseline(&self) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.strategy == crate::bench::strategy::SERIAL_LABEL)
    }

    /// Render the text report, one block per strategy
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        for result in &self.results {
            lines.extend(result.report_lines());
        }
        lines.join("\n")
    }

    /// Speedup of every other host-timed result over the serial baseline
    pub fn speedup_lines(&self) -> Vec<String> {
        let Some(baseline) = self.baseline() else {
            return Vec::new();
        };
        self.results
            .iter()
            .filter(|r| r.clock == ClockSource::Host && r.strategy != baseline.strategy)
            .filter_map(|r| {
                r.speedup_over(baseline)
                    .map(|factor| format!("{} vs {}: {}", r.strategy, baseline.strategy, format_speedup(factor)))
            })
            .collect()
    }

    /// Render the report as pretty JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Custom serde module for Duration serialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_nanos() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}
