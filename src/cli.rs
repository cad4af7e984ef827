// src/cli.rs

use crate::model::cost::{LOSS_OVER_INVENTORY, LOSS_UNDER_INVENTORY};
use crate::simulation::config::{
    SimulationConfig, SweepRange, DEFAULT_REFERENCE_STOCK, DEFAULT_RISK_THRESHOLD, DEFAULT_TRIALS,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "vaccine-stock-sim",
    about = "Monte Carlo search for the cheapest vaccine stock level"
)]
pub struct Cli {
    /// Seed for the random source (omit for a fresh run each time)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory the CSV files are written to
    #[arg(long, default_value = "CSV")]
    pub output_dir: PathBuf,

    /// Trials per cost and risk estimate
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: u32,

    /// First stock level of the sweep
    #[arg(long, default_value_t = 1000)]
    pub stock_start: u32,

    /// Last stock level of the sweep (inclusive)
    #[arg(long, default_value_t = 10_000)]
    pub stock_end: u32,

    /// Distance between stock levels
    #[arg(long, default_value_t = 10)]
    pub stock_step: u32,

    /// Smallest trial count of the deviation study
    #[arg(long, default_value_t = 100)]
    pub iter_start: u32,

    /// Largest trial count of the deviation study (inclusive)
    #[arg(long, default_value_t = 5000)]
    pub iter_end: u32,

    /// Distance between trial counts
    #[arg(long, default_value_t = 1)]
    pub iter_step: u32,

    /// Cost above which a trial counts as risky
    #[arg(long, default_value_t = DEFAULT_RISK_THRESHOLD)]
    pub threshold: f64,

    /// Stock level the deviation study runs at
    #[arg(long, default_value_t = DEFAULT_REFERENCE_STOCK)]
    pub reference_stock: u32,

    /// Penalty per unit of unmet demand
    #[arg(long, default_value_t = LOSS_UNDER_INVENTORY)]
    pub loss_under: f64,

    /// Penalty per unit of leftover stock
    #[arg(long, default_value_t = LOSS_OVER_INVENTORY)]
    pub loss_over: f64,

    /// Skip the risk analysis
    #[arg(long)]
    pub no_risk: bool,

    /// Skip the standard deviation study
    #[arg(long)]
    pub no_deviation: bool,

    /// Log at debug level unless STOCKSIM_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> SimulationConfig {
        SimulationConfig {
            stock_range: SweepRange::new(self.stock_start, self.stock_end, self.stock_step),
            iteration_range: SweepRange::new(self.iter_start, self.iter_end, self.iter_step),
            trials: self.trials,
            risk_threshold: self.threshold,
            reference_stock: self.reference_stock,
            loss_under: self.loss_under,
            loss_over: self.loss_over,
            compute_risk: !self.no_risk,
            compute_deviation: !self.no_deviation,
            seed: self.seed,
            output_dir: self.output_dir,
        }
    }
}
