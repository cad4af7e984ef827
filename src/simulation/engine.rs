// src/simulation/engine.rs

use crate::error::{ensure_threshold, ensure_trials, SimError, SimResult};
use crate::io::demand::DemandSource;
use crate::io::sink::{Channel, ResultRow, RowSink};
use crate::model::cost::CostModel;
use crate::simulation::config::SimulationConfig;
use crate::simulation::estimators::{estimate_cost, estimate_deviation, estimate_risk};
use crate::strategy::optimization::{calculate_critical_ratio, newsvendor_stock};
use tracing::{debug, info, warn};

/// Log progress every this many sweep points.
const PROGRESS_EVERY: usize = 100;

/// One sink per channel. Risk and deviation sinks are required only when
/// their channel is enabled in the config.
pub struct SweepSinks<'a> {
    pub cost: &'a mut dyn RowSink,
    pub risk: Option<&'a mut dyn RowSink>,
    pub deviation: Option<&'a mut dyn RowSink>,
}

/// What a full run produced, plus the analytic benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    /// Stock level with the lowest simulated mean cost (lowest stock on ties).
    pub best_stock: u32,
    pub best_cost: f64,
    pub critical_ratio: f64,
    pub newsvendor_stock: u32,
    pub cost_rows: usize,
    pub risk_rows: usize,
    pub deviation_rows: usize,
}

/// Result of the stock sweep on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockSweepOutcome {
    pub best_stock: u32,
    pub best_cost: f64,
    pub rows: usize,
    pub risk_rows: usize,
}

pub struct SweepDriver<D: DemandSource> {
    config: SimulationConfig,
    model: CostModel,
    demand: D,
}

impl<D: DemandSource> SweepDriver<D> {
    /// Validates the whole config up front; no trial runs on bad input.
    pub fn new(config: SimulationConfig, demand: D) -> SimResult<Self> {
        config.validate()?;
        let model = config.cost_model();
        Ok(Self {
            config,
            model,
            demand,
        })
    }

    /// Runs the stock sweep, then the iteration sweep when enabled.
    pub fn run(&mut self, sinks: SweepSinks<'_>) -> SimResult<SweepSummary> {
        let SweepSinks {
            cost,
            risk,
            deviation,
        } = sinks;

        expect_channel(&*cost, Channel::Cost)?;
        if let Some(sink) = risk.as_ref() {
            expect_channel(&**sink, Channel::Risk)?;
        }
        if let Some(sink) = deviation.as_ref() {
            expect_channel(&**sink, Channel::Deviation)?;
        }
        if self.config.compute_risk && risk.is_none() {
            return Err(SimError::invalid("sinks.risk", "risk enabled without a sink"));
        }
        if self.config.compute_deviation && deviation.is_none() {
            return Err(SimError::invalid(
                "sinks.deviation",
                "deviation enabled without a sink",
            ));
        }

        let risk = match risk {
            Some(sink) if !self.config.compute_risk => {
                warn!("risk disabled, closing its sink without rows");
                sink.close()?;
                None
            }
            other => other,
        };

        let stock = self.stock_sweep(cost, risk)?;

        let deviation_rows = match deviation {
            Some(sink) if self.config.compute_deviation => self.iteration_sweep(sink)?,
            Some(sink) => {
                warn!("deviation disabled, closing its sink without rows");
                sink.close()?;
                0
            }
            None => 0,
        };

        let critical_ratio = calculate_critical_ratio(self.model.loss_under, self.model.loss_over);
        let summary = SweepSummary {
            best_stock: stock.best_stock,
            best_cost: stock.best_cost,
            critical_ratio,
            newsvendor_stock: newsvendor_stock(&self.model),
            cost_rows: stock.rows,
            risk_rows: stock.risk_rows,
            deviation_rows,
        };
        info!(
            best_stock = summary.best_stock,
            best_cost = summary.best_cost,
            newsvendor_stock = summary.newsvendor_stock,
            "sweep finished"
        );
        Ok(summary)
    }

    /// Cost (and risk, when a risk sink is given) for every stock level in
    /// the configured range, ascending. Closes the sinks afterwards.
    ///
    /// Parameters are checked before the first trial, so an error never
    /// leaves rows behind.
    pub fn stock_sweep(
        &mut self,
        cost: &mut dyn RowSink,
        mut risk: Option<&mut dyn RowSink>,
    ) -> SimResult<StockSweepOutcome> {
        let range = self.config.stock_range;
        range.validate("stock_range")?;
        ensure_trials("trials", self.config.trials)?;
        if risk.is_some() {
            ensure_threshold("risk_threshold", self.config.risk_threshold)?;
        }
        info!(
            start = range.start,
            end = range.end,
            step = range.step,
            points = range.len(),
            trials = self.config.trials,
            risk = risk.is_some(),
            "stock sweep started"
        );

        let mut outcome = StockSweepOutcome {
            best_stock: range.start,
            best_cost: f64::INFINITY,
            rows: 0,
            risk_rows: 0,
        };

        for (index, stock) in range.iter().enumerate() {
            let average_cost =
                estimate_cost(&mut self.demand, &self.model, stock, self.config.trials)?;
            cost.write_row(&ResultRow::new(stock, average_cost))?;
            outcome.rows += 1;

            if let Some(sink) = risk.as_mut() {
                let ratio = estimate_risk(
                    &mut self.demand,
                    &self.model,
                    stock,
                    self.config.trials,
                    self.config.risk_threshold,
                )?;
                sink.write_row(&ResultRow::new(stock, ratio))?;
                outcome.risk_rows += 1;
            }

            if average_cost < outcome.best_cost {
                outcome.best_cost = average_cost;
                outcome.best_stock = stock;
            }

            if index % PROGRESS_EVERY == 0 {
                debug!(stock, average_cost, "stock sweep progress");
            }
        }

        cost.close()?;
        if let Some(sink) = risk {
            sink.close()?;
        }
        Ok(outcome)
    }

    /// Standard deviation of cost at the reference stock for every trial
    /// count in the iteration range. Closes the sink afterwards.
    pub fn iteration_sweep(&mut self, deviation: &mut dyn RowSink) -> SimResult<usize> {
        self.config.validate_iteration_range()?;
        let range = self.config.iteration_range;
        info!(
            start = range.start,
            end = range.end,
            step = range.step,
            points = range.len(),
            reference_stock = self.config.reference_stock,
            "iteration sweep started"
        );

        let mut rows = 0;
        for (index, trials) in range.iter().enumerate() {
            let std_deviation = estimate_deviation(
                &mut self.demand,
                &self.model,
                trials,
                self.config.reference_stock,
            )?;
            deviation.write_row(&ResultRow::new(trials, std_deviation))?;
            rows += 1;

            if index % (PROGRESS_EVERY * 10) == 0 {
                debug!(trials, std_deviation, "iteration sweep progress");
            }
        }

        deviation.close()?;
        Ok(rows)
    }
}

fn expect_channel(sink: &dyn RowSink, expected: Channel) -> SimResult<()> {
    if sink.channel() != expected {
        return Err(SimError::invalid(
            "sinks",
            format!("expected a {expected} sink, got {}", sink.channel()),
        ));
    }
    Ok(())
}
