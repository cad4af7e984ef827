// src/simulation/config.rs

use crate::error::{ensure_threshold, ensure_trials, SimError, SimResult};
use crate::model::cost::{CostModel, LOSS_OVER_INVENTORY, LOSS_UNDER_INVENTORY};
use std::path::PathBuf;

pub const DEFAULT_TRIALS: u32 = 10_000;
pub const DEFAULT_RISK_THRESHOLD: f64 = 200_000.0;
pub const DEFAULT_REFERENCE_STOCK: u32 = 1000;

/// Inclusive stepped range, e.g. stock levels 1000..=10000 by 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl SweepRange {
    pub fn new(start: u32, end: u32, step: u32) -> Self {
        Self { start, end, step }
    }

    pub fn validate(&self, name: &'static str) -> SimResult<()> {
        if self.step == 0 {
            return Err(SimError::invalid(name, "step must be at least 1"));
        }
        if self.start > self.end {
            return Err(SimError::invalid(
                name,
                format!("start {} is past end {}", self.start, self.end),
            ));
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        (self.start..=self.end).step_by(self.step.max(1) as usize)
    }

    pub fn len(&self) -> usize {
        if self.step == 0 || self.start > self.end {
            return 0;
        }
        ((self.end - self.start) / self.step) as usize + 1
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Stock levels evaluated for cost and risk.
    pub stock_range: SweepRange,
    /// Trial counts evaluated for the deviation study.
    pub iteration_range: SweepRange,
    /// Trials per cost and risk estimate.
    pub trials: u32,
    pub risk_threshold: f64,
    /// Stock level the deviation study runs at.
    pub reference_stock: u32,
    pub loss_under: f64,
    pub loss_over: f64,
    pub compute_risk: bool,
    pub compute_deviation: bool,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            stock_range: SweepRange::new(1000, 10_000, 10),
            iteration_range: SweepRange::new(100, 5000, 1),
            trials: DEFAULT_TRIALS,
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            reference_stock: DEFAULT_REFERENCE_STOCK,
            loss_under: LOSS_UNDER_INVENTORY,
            loss_over: LOSS_OVER_INVENTORY,
            compute_risk: true,
            compute_deviation: true,
            seed: None,
            output_dir: PathBuf::from("CSV"),
        }
    }
}

impl SimulationConfig {
    pub fn cost_model(&self) -> CostModel {
        CostModel::new(self.loss_under, self.loss_over)
    }

    /// Every trial count in the iteration sweep must be at least 1.
    pub fn validate_iteration_range(&self) -> SimResult<()> {
        self.iteration_range.validate("iteration_range")?;
        ensure_trials("iteration_range.start", self.iteration_range.start)
    }

    /// Checks every field. Nothing runs until this passes.
    pub fn validate(&self) -> SimResult<()> {
        self.stock_range.validate("stock_range")?;
        ensure_trials("trials", self.trials)?;

        if self.compute_risk {
            ensure_threshold("risk_threshold", self.risk_threshold)?;
        }

        if self.compute_deviation {
            self.validate_iteration_range()?;
        }

        for (name, loss) in [("loss_under", self.loss_under), ("loss_over", self.loss_over)] {
            if !(loss.is_finite() && loss > 0.0) {
                return Err(SimError::invalid(
                    name,
                    format!("must be a finite positive number, got {loss}"),
                ));
            }
        }
        Ok(())
    }
}
