// src/simulation/estimators.rs

//! Monte Carlo estimators over the demand distribution.
//!
//! Every estimator runs one pass of `trials` independent samples. Sampling
//! cannot fail, so the only errors are a zero trial count or a bad threshold.

use crate::error::{ensure_threshold, ensure_trials, SimResult};
use crate::io::demand::DemandSource;
use crate::model::cost::CostModel;

/// Mean cost of holding `stock` over `trials` sampled demands.
pub fn estimate_cost<D: DemandSource + ?Sized>(
    demand: &mut D,
    model: &CostModel,
    stock: u32,
    trials: u32,
) -> SimResult<f64> {
    ensure_trials("trials", trials)?;

    let total: f64 = (0..trials)
        .map(|_| model.cost(stock, demand.sample()))
        .sum();
    Ok(total / trials as f64)
}

/// Share of trials whose cost is strictly above `threshold`.
pub fn estimate_risk<D: DemandSource + ?Sized>(
    demand: &mut D,
    model: &CostModel,
    stock: u32,
    trials: u32,
    threshold: f64,
) -> SimResult<f64> {
    ensure_trials("trials", trials)?;
    ensure_threshold("threshold", threshold)?;

    let risky = (0..trials)
        .filter(|_| model.cost(stock, demand.sample()) > threshold)
        .count();
    Ok(risky as f64 / trials as f64)
}

/// Population standard deviation of `trials` cost samples at `stock`.
///
/// Two passes over the collected samples: mean first, then the mean squared
/// deviation (divided by `trials`, not `trials - 1`).
pub fn estimate_deviation<D: DemandSource + ?Sized>(
    demand: &mut D,
    model: &CostModel,
    trials: u32,
    stock: u32,
) -> SimResult<f64> {
    ensure_trials("trials", trials)?;

    let costs: Vec<f64> = (0..trials)
        .map(|_| model.cost(stock, demand.sample()))
        .collect();

    let n = costs.len() as f64;
    let mean = costs.iter().sum::<f64>() / n;
    let variance = costs.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::io::demand::{DemandSampler, FixedDemand};
    use crate::model::random::{ScriptedSource, SeededSource};

    fn model() -> CostModel {
        CostModel::default()
    }

    #[test]
    fn scripted_midpoint_demand_costs_nothing_at_5000() {
        let mut sampler = DemandSampler::new(ScriptedSource::constant(0.5));
        assert_eq!(estimate_cost(&mut sampler, &model(), 5000, 1).unwrap(), 0.0);
    }

    #[test]
    fn fixed_shortage_is_exact_and_always_risky() {
        let mut demand = FixedDemand(6000);
        assert_eq!(
            estimate_cost(&mut demand, &model(), 1000, 10_000).unwrap(),
            750_000.0
        );
        assert_eq!(
            estimate_risk(&mut demand, &model(), 1000, 10_000, 200_000.0).unwrap(),
            1.0
        );
    }

    #[test]
    fn cost_equal_to_threshold_is_not_risky() {
        // 4000 units over * 50 = 200_000 exactly
        let mut demand = FixedDemand(1000);
        assert_eq!(model().cost(5000, 1000), 200_000.0);
        assert_eq!(
            estimate_risk(&mut demand, &model(), 5000, 100, 200_000.0).unwrap(),
            0.0
        );
    }

    #[test]
    fn constant_demand_has_zero_deviation() {
        let mut demand = FixedDemand(4321);
        assert_eq!(
            estimate_deviation(&mut demand, &model(), 500, 1000).unwrap(),
            0.0
        );
    }

    #[test]
    fn deviation_is_population_form() {
        // demands 2000 and 4000 at stock 1000 -> costs 150_000 and 450_000
        // population sd = 150_000 (sample sd would be ~212_132)
        struct Alternating(bool);
        impl DemandSource for Alternating {
            fn sample(&mut self) -> u32 {
                self.0 = !self.0;
                if self.0 {
                    2000
                } else {
                    4000
                }
            }
        }
        let sd = estimate_deviation(&mut Alternating(false), &model(), 2, 1000).unwrap();
        assert!((sd - 150_000.0).abs() < 1e-6, "{sd}");
    }

    #[test]
    fn single_trial_deviation_is_zero() {
        let mut sampler = DemandSampler::new(SeededSource::new(3));
        assert_eq!(estimate_deviation(&mut sampler, &model(), 1, 1000).unwrap(), 0.0);
    }

    #[test]
    fn zero_trials_is_rejected() {
        let mut demand = FixedDemand(5000);
        assert!(matches!(
            estimate_cost(&mut demand, &model(), 5000, 0),
            Err(SimError::InvalidParameter { .. })
        ));
        assert!(estimate_risk(&mut demand, &model(), 5000, 0, 1.0).is_err());
        assert!(estimate_deviation(&mut demand, &model(), 0, 5000).is_err());
    }

    #[test]
    fn bad_threshold_is_rejected() {
        let mut demand = FixedDemand(6000);
        for threshold in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            assert!(
                matches!(
                    estimate_risk(&mut demand, &model(), 1000, 10, threshold),
                    Err(SimError::InvalidParameter { name: "threshold", .. })
                ),
                "threshold {threshold} accepted"
            );
        }
        assert_eq!(
            estimate_risk(&mut demand, &model(), 1000, 10, 0.0).unwrap(),
            1.0
        );
    }

    #[test]
    fn seeded_estimates_reproduce() {
        let run = || {
            let mut sampler = DemandSampler::new(SeededSource::new(99));
            (
                estimate_cost(&mut sampler, &model(), 4000, 2000).unwrap(),
                estimate_risk(&mut sampler, &model(), 4000, 2000, 200_000.0).unwrap(),
                estimate_deviation(&mut sampler, &model(), 2000, 1000).unwrap(),
            )
        };
        let (a, b) = (run(), run());
        assert_eq!(a.0.to_bits(), b.0.to_bits());
        assert_eq!(a.1.to_bits(), b.1.to_bits());
        assert_eq!(a.2.to_bits(), b.2.to_bits());
    }

    #[test]
    fn risk_falls_as_stock_climbs_into_the_demand_bulk() {
        // expected shares: ~0.75 at 2000, ~0.43 at 4000, ~0.18 at 6000
        let mut sampler = DemandSampler::new(SeededSource::new(11));
        let low = estimate_risk(&mut sampler, &model(), 2000, 20_000, 200_000.0).unwrap();
        let mid = estimate_risk(&mut sampler, &model(), 4000, 20_000, 200_000.0).unwrap();
        let high = estimate_risk(&mut sampler, &model(), 6000, 20_000, 200_000.0).unwrap();
        for r in [low, mid, high] {
            assert!((0.0..=1.0).contains(&r));
        }
        assert!(low > mid + 0.1, "low={low} mid={mid}");
        assert!(mid > high + 0.1, "mid={mid} high={high}");
    }

    #[test]
    fn deviation_is_non_negative_for_random_demand() {
        let mut sampler = DemandSampler::new(SeededSource::new(5));
        for trials in [1, 2, 10, 500] {
            assert!(estimate_deviation(&mut sampler, &model(), trials, 1000).unwrap() >= 0.0);
        }
    }
}
