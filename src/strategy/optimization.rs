// src/strategy/optimization.rs

//! Analytic benchmark for the simulated sweep (the Newsvendor Model).
//!
//! For a single-period order with linear shortage and overage costs, the
//! expected cost is minimized by stocking the demand quantile at the
//! critical ratio.

use crate::io::demand::demand_quantile;
use crate::model::cost::CostModel;

/// Calculates the Critical Ratio (Target Service Level).
///
/// The probability of not stocking out that balances the cost of
/// understocking against the cost of overstocking.
///
/// Formula: CR = UnderCost / (UnderCost + OverCost)
pub fn calculate_critical_ratio(under_cost: f64, over_cost: f64) -> f64 {
    if under_cost + over_cost == 0.0 {
        return 0.0;
    }
    under_cost / (under_cost + over_cost)
}

/// Optimal stock level under the fixed demand distribution.
///
/// # Formula
/// Stock* = F^-1(CR)
///
/// Where F is the piecewise-uniform demand CDF. Rounded to whole units.
pub fn newsvendor_stock(model: &CostModel) -> u32 {
    let critical_ratio = calculate_critical_ratio(model.loss_under, model.loss_over);
    demand_quantile(critical_ratio).round() as u32
}
