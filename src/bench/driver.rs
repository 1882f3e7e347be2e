//! Benchmark suite driver
//!
//! Builds the input once, runs every configured strategy in order on
//! tokio's blocking pool, optionally checks each parallel sum against the
//! serial baseline, and collects the results into a [`SuiteReport`].

use std::sync::Arc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use crate::bench::input::build_input;
use crate::bench::strategy::{ParallelStrategy, ReductionStrategy, SerialStrategy};
use crate::config::BenchConfig;
use crate::gpu::{detect_accelerator, Accelerator, GpuSumBenchmark};
use crate::models::{BenchmarkResult, SuiteReport};
use crate::reduce::{summation_error_bound, Stopwatch};
use crate::util::units::{format_bytes, format_count};
use crate::{SumBenchError, Result};

/// Runs a suite of strategies described by a [`BenchConfig`]
pub struct BenchmarkDriver {
    config: BenchConfig,
    accelerator: Option<Arc<dyn Accelerator>>,
}

impl BenchmarkDriver {
    /// Create a driver, validating `config`
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            accelerator: None,
        })
    }

    /// Use `accelerator` for the GPU strategy instead of detecting one
    pub fn with_accelerator(mut self, accelerator: Arc<dyn Accelerator>) -> Self {
        self.accelerator = Some(accelerator);
        self
    }

    /// Configuration this driver runs
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run every strategy and return the report
    pub async fn run(&self) -> Result<SuiteReport> {
        self.run_inner(None).await
    }

    /// Run every strategy, showing a progress bar on stderr
    pub async fn run_with_progress(&self) -> Result<SuiteReport> {
        let pb = ProgressBar::new(self.strategy_count() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
                .map_err(|e| SumBenchError::OutputError(format!("Invalid progress template: {}", e)))?,
        );

        let report = self.run_inner(Some(&pb)).await;
        pb.finish_and_clear();
        report
    }

    /// Number of strategies the configuration selects
    pub fn strategy_count(&self) -> usize {
        usize::from(self.config.include_serial)
            + self.config.thread_counts.len()
            + usize::from(self.config.gpu_size.is_some())
    }

    /// Build the strategy list in execution order
    fn plan(&self, input: Arc<[i64]>) -> Result<Vec<Arc<dyn ReductionStrategy>>> {
        let mut strategies: Vec<Arc<dyn ReductionStrategy>> = Vec::with_capacity(self.strategy_count());

        if self.config.include_serial {
            strategies.push(Arc::new(SerialStrategy::new(input.clone())));
        }

        for &threads in &self.config.thread_counts {
            strategies.push(Arc::new(ParallelStrategy::new(input.clone(), threads)?));
        }

        if let Some(size) = self.config.gpu_size {
            let accelerator = match &self.accelerator {
                Some(accelerator) => accelerator.clone(),
                None => detect_accelerator()?,
            };
            strategies.push(Arc::new(GpuSumBenchmark::new(accelerator, size)?));
        }

        Ok(strategies)
    }

    async fn run_inner(&self, progress: Option<&ProgressBar>) -> Result<SuiteReport> {
        let suite_clock = Stopwatch::start();
        let mut report = SuiteReport::new(self.config.clone());

        info!(
            elements = %format_count(self.config.sequence_len),
            size = %format_bytes((self.config.sequence_len * std::mem::size_of::<i64>()) as u64),
            input = %self.config.input.description(),
            "building benchmark input"
        );
        let input = build_input(&self.config)?;
        let tolerance = summation_error_bound(&input[..]);
        let strategies = self.plan(input)?;

        for strategy in strategies {
            let label = strategy.label();
            if let Some(pb) = progress {
                pb.set_message(label.clone());
            }

            let result = Self::run_blocking(strategy).await?;
            info!(
                strategy = %result.strategy,
                sum = %result.sum,
                elapsed_secs = result.elapsed.as_secs_f64(),
                "strategy finished"
            );

            if self.config.verify {
                Self::verify(&report, &result, tolerance)?;
            }

            report.results.push(result);
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        info!(
            strategies = report.results.len(),
            total_secs = suite_clock.elapsed().as_secs_f64(),
            "suite finished"
        );
        Ok(report)
    }

    /// Run one strategy on the blocking pool; the timing happens inside the task
    async fn run_blocking(strategy: Arc<dyn ReductionStrategy>) -> Result<BenchmarkResult> {
        let label = strategy.label();
        match tokio::task::spawn_blocking(move || strategy.run()).await {
            Ok(result) => result,
            Err(e) => Err(SumBenchError::WorkerFailure(format!(
                "strategy '{}' did not complete: {}",
                label, e
            ))),
        }
    }

    /// Compare a CPU result against the serial baseline already in `report`
    fn verify(report: &SuiteReport, result: &BenchmarkResult, tolerance: f64) -> Result<()> {
        let Some(baseline) = report.baseline() else {
            return Ok(());
        };
        // The GPU sums its own random data, so only host runs are comparable
        if result.clock != baseline.clock {
            return Ok(());
        }

        if !result.sum.agrees_with(&baseline.sum, tolerance) {
            warn!(
                strategy = %result.strategy,
                expected = %baseline.sum,
                actual = %result.sum,
                "results do not match"
            );
            return Err(SumBenchError::ResultMismatch(format!(
                "{} returned {} but {} returned {}",
                result.strategy, result.sum, baseline.strategy, baseline.sum
            )));
        }

        Ok(())
    }
}

/// Run the suite described by `config` without a progress bar
pub async fn run_suite(config: BenchConfig) -> Result<SuiteReport> {
    BenchmarkDriver::new(config)?.run().await
}
