// src/model/cost.rs

/// Penalty per unit of demand left unserved.
pub const LOSS_UNDER_INVENTORY: f64 = 150.0;
/// Penalty per unit of stock left over.
pub const LOSS_OVER_INVENTORY: f64 = 50.0;

/// Asymmetric piecewise-linear loss between stock and realized demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub loss_under: f64,
    pub loss_over: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            loss_under: LOSS_UNDER_INVENTORY,
            loss_over: LOSS_OVER_INVENTORY,
        }
    }
}

impl CostModel {
    pub fn new(loss_under: f64, loss_over: f64) -> Self {
        Self {
            loss_under,
            loss_over,
        }
    }

    /// Cost of holding `stock` when `demand` materializes.
    /// Zero exactly when the two match.
    pub fn cost(&self, stock: u32, demand: u32) -> f64 {
        if demand > stock {
            (demand - stock) as f64 * self.loss_under
        } else {
            (stock - demand) as f64 * self.loss_over
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shortage_costs_three_times_overstock() {
        let model = CostModel::default();
        assert_eq!(model.cost(1000, 1100), 15_000.0);
        assert_eq!(model.cost(1100, 1000), 5_000.0);
    }

    #[test]
    fn exact_match_costs_nothing() {
        assert_eq!(CostModel::default().cost(5000, 5000), 0.0);
    }

    #[test]
    fn large_shortage() {
        assert_eq!(CostModel::default().cost(1000, 6000), 750_000.0);
    }

    proptest! {
        #[test]
        fn prop_cost_non_negative_and_zero_only_on_match(
            stock in 0u32..20_000,
            demand in 0u32..20_000,
        ) {
            let cost = CostModel::default().cost(stock, demand);
            prop_assert!(cost >= 0.0);
            prop_assert_eq!(cost == 0.0, stock == demand);
        }

        #[test]
        fn prop_cost_matches_branch_formula(
            stock in 0u32..20_000,
            demand in 0u32..20_000,
        ) {
            let cost = CostModel::default().cost(stock, demand);
            if demand > stock {
                prop_assert_eq!(cost, (demand - stock) as f64 * 150.0);
            } else {
                prop_assert_eq!(cost, (stock - demand) as f64 * 50.0);
            }
        }
    }
}
