//! Monte Carlo estimation of optimal vaccine stock levels.
//!
//! Demand is drawn from a fixed piecewise-uniform distribution; each stock
//! level is scored by its mean holding/shortage cost and by the share of
//! trials whose cost crosses a risk threshold. A second sweep tracks how
//! the cost standard deviation behaves as the trial count grows.

pub mod cli;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{SimError, SimResult};
