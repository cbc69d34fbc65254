//! Trailing moving average.
//!
//! `out[i] = round(mean(values[max(0, i−period+1) ..= i]))`. Near the start the
//! window shrinks to the available history: no look-ahead, no zero padding,
//! and the divisor is the number of values actually in the window.

use crate::error::{PipelineError, PipelineResult};

/// Window used by the dashboard chart.
pub const DEFAULT_PERIOD: usize = 7;

/// Trailing-window smoother with a fixed period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovingAverage {
    period: usize,
    label: String,
}

impl MovingAverage {
    pub fn new(period: usize) -> PipelineResult<Self> {
        if period == 0 {
            return Err(PipelineError::invalid("moving-average period must be >= 1"));
        }
        Ok(Self {
            period,
            label: format!("{period}d avg"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Short legend suffix, e.g. `7d avg`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn compute<T>(&self, values: &[T]) -> Vec<f64>
    where
        T: Copy + Into<f64>,
    {
        (0..values.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(self.period);
                let window = &values[start..=i];
                let sum: f64 = window.iter().map(|&v| v.into()).sum();
                (sum / window.len() as f64).round()
            })
            .collect()
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            label: format!("{DEFAULT_PERIOD}d avg"),
        }
    }
}

/// Smooth `values` over a trailing window of `period` entries.
pub fn moving_average<T>(values: &[T], period: usize) -> PipelineResult<Vec<f64>>
where
    T: Copy + Into<f64>,
{
    Ok(MovingAverage::new(period)?.compute(values))
}
