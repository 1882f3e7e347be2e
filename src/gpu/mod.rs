//! Accelerator-backed reduction strategy
//!
//! The device generates its own uniform random input in `[0, 1)`, sums it,
//! and times the work with its own events. Nothing about device memory or
//! kernel scheduling leaks into the CPU engines; the only contract is a sum
//! and a device-measured duration.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use crate::bench::strategy::ReductionStrategy;
use crate::models::{BenchmarkResult, SumValue};
use crate::{SumBenchError, Result};

/// Sum and elapsed time as reported by the device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSum {
    /// Sum of the generated values
    pub sum: f64,
    /// Time between the start and stop events on the device
    pub device_elapsed: Duration,
}

/// A compute device able to generate and sum random data.
///
/// Errors must be reported as `SumBenchError::DeviceFailure`.
pub trait Accelerator: Send + Sync {
    /// Device name for labels and logs
    fn name(&self) -> String;

    /// Generate `size` uniform values on the device, sum them and time it
    fn random_sum(&self, size: usize) -> Result<DeviceSum>;
}

/// GPU summation benchmark of a fixed size
pub struct GpuSumBenchmark<A: ?Sized> {
    accelerator: Arc<A>,
    size: usize,
}

impl<A: Accelerator + ?Sized> GpuSumBenchmark<A> {
    /// Create a benchmark summing `size` device-generated values
    pub fn new(accelerator: Arc<A>, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(SumBenchError::InvalidArgument(
                "GPU input size must be greater than 0".to_string()
            ));
        }
        Ok(Self { accelerator, size })
    }
}

impl<A: Accelerator + ?Sized> ReductionStrategy for GpuSumBenchmark<A> {
    fn label(&self) -> String {
        format!("GPU ({})", self.accelerator.name())
    }

    fn run(&self) -> Result<BenchmarkResult> {
        debug!(size = self.size, device = %self.accelerator.name(), "device reduction");
        let DeviceSum { sum, device_elapsed } = self.accelerator.random_sum(self.size)?;

        if !sum.is_finite() {
            return Err(SumBenchError::DeviceFailure(format!(
                "device returned a non-finite sum ({})",
                sum
            )));
        }

        info!(sum, elapsed_ms = device_elapsed.as_secs_f64() * 1000.0, "device reduction finished");
        Ok(BenchmarkResult::device(self.label(), SumValue::Float(sum), device_elapsed))
    }
}

/// Find an accelerator backend for this build.
///
/// No device backend is compiled into this crate; callers with a device
/// supply their own [`Accelerator`] to the driver.
pub fn detect_accelerator() -> Result<Arc<dyn Accelerator>> {
    Err(SumBenchError::DeviceFailure(
        "no accelerator backend available in this build".to_string()
    ))
}
