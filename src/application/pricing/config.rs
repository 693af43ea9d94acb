//! Pricing configuration.

use serde::{Deserialize, Serialize};

use crate::domain::PricingMethod;

/// Settings for an optimization pass, read from the `[pricing]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Algorithm used to choose prices.
    #[serde(default)]
    pub method: PricingMethod,
    /// Number of candidate prices evaluated by grid search, endpoints included.
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    /// Decimal places kept for prices, demand and profit.
    #[serde(default = "default_round_dp")]
    pub round_dp: u32,
    /// Constrain the linearized program by ingredient stock.
    #[serde(default)]
    pub enforce_inventory: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            method: PricingMethod::default(),
            grid_points: default_grid_points(),
            round_dp: default_round_dp(),
            enforce_inventory: false,
        }
    }
}

const fn default_grid_points() -> usize {
    100
}

const fn default_round_dp() -> u32 {
    2
}
