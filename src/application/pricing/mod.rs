//! Menu price optimization.
//!
//! Each menu item carries a linear demand curve over its admissible price
//! range (see [`crate::domain::menu`]). A [`Pricer`] picks one price per
//! item; [`PricingEngine`] re-evaluates demand and profit on the exact
//! curve, rounds the figures and checks ingredient stock.
//!
//! Three pricers are available:
//!
//! - [`ClosedFormPricer`] - stationary point of the profit parabola, clamped
//!   to the range and compared against the endpoints
//! - [`GridSearchPricer`] - best of N evenly spaced prices
//! - [`LinearizedPricer`] - straight line through the profit at both
//!   endpoints, solved as an LP; the only pricer that can respect
//!   ingredient stock
//!
//! # Example
//!
//! ```
//! use feastfair::application::pricing::optimize;
//! use feastfair::domain::{MenuItem, MenuItemSpec};
//! use rust_decimal_macros::dec;
//!
//! let latte = MenuItem::try_new(MenuItemSpec {
//!     name: "Latte".into(),
//!     cost: dec!(1.00),
//!     current_price: None,
//!     min_price: dec!(3.00),
//!     max_price: dec!(6.00),
//!     base_demand: dec!(50),
//!     elasticity: dec!(0.6),
//! })
//! .unwrap();
//!
//! let outcome = optimize(&[latte]).unwrap();
//! assert_eq!(outcome.items.len(), 1);
//! ```

mod closed_form;
mod config;
mod grid;
mod inventory;
mod linearized;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

pub use closed_form::ClosedFormPricer;
pub use config::PricingConfig;
pub use grid::GridSearchPricer;
pub use inventory::{ingredient_usage, shortages};
pub use linearized::LinearizedPricer;

use crate::domain::{
    Ingredient, MenuItem, Price, PricedItem, PricingMethod, PricingOutcome, RecipeLine,
};
use crate::error::{PricingError, Result};
use crate::port::Solver;

/// Everything a pricer may look at.
#[derive(Debug, Clone, Copy)]
pub struct PricingInput<'a> {
    pub items: &'a [MenuItem],
    pub recipes: &'a [RecipeLine],
    pub ingredients: &'a [Ingredient],
}

impl<'a> PricingInput<'a> {
    /// Input with menu items only, no inventory data.
    #[must_use]
    pub const fn items_only(items: &'a [MenuItem]) -> Self {
        Self {
            items,
            recipes: &[],
            ingredients: &[],
        }
    }
}

/// A price selection algorithm.
pub trait Pricer: Send + Sync {
    /// Which method this pricer implements.
    fn method(&self) -> PricingMethod;

    /// Choose one price per item, in input order.
    fn choose_prices(&self, input: &PricingInput<'_>) -> Result<Vec<Price>>;
}

/// Runs a pricer and turns its prices into a rounded [`PricingOutcome`].
pub struct PricingEngine {
    pricer: Box<dyn Pricer>,
    round_dp: u32,
}

impl PricingEngine {
    #[must_use]
    pub fn new(pricer: Box<dyn Pricer>, round_dp: u32) -> Self {
        Self { pricer, round_dp }
    }

    #[must_use]
    pub fn method(&self) -> PricingMethod {
        self.pricer.method()
    }

    /// Price every item in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::EmptyMenu`] when there are no items,
    /// [`PricingError::Overflow`] when the total profit leaves the decimal
    /// range, or the pricer's own error.
    pub fn run(&self, input: &PricingInput<'_>) -> Result<PricingOutcome> {
        if input.items.is_empty() {
            return Err(PricingError::EmptyMenu.into());
        }

        let prices = self.pricer.choose_prices(input)?;
        if prices.len() != input.items.len() {
            return Err(PricingError::SolutionSizeMismatch {
                expected: input.items.len(),
                got: prices.len(),
            }
            .into());
        }

        let dp = self.round_dp;
        let mut total_profit = Decimal::ZERO;
        let mut demands = Vec::with_capacity(prices.len());
        let mut items = Vec::with_capacity(prices.len());

        for (item, price) in input.items.iter().zip(prices) {
            let price = price.clamp(item.min_price(), item.max_price());
            let demand = item.demand_at(price);
            let overflow = || PricingError::Overflow {
                item: item.name().to_string(),
            };
            let profit = (price - item.cost())
                .checked_mul(demand)
                .ok_or_else(overflow)?;
            total_profit = total_profit.checked_add(profit).ok_or_else(overflow)?;
            demands.push(demand);

            debug!(
                item = item.name(),
                price = %price,
                demand = %demand,
                profit = %profit,
                "Priced menu item"
            );

            items.push(PricedItem {
                menu_item_id: item.id(),
                name: item.name().to_string(),
                current_price: item.current_price(),
                price: price.round_dp(dp),
                demand: demand.round_dp(dp),
                profit: profit.round_dp(dp),
            });
        }

        let shortages = shortages(input, &demands, dp);
        let total_profit = total_profit.round_dp(dp);

        info!(
            method = %self.method(),
            items = items.len(),
            total_profit = %total_profit,
            shortages = shortages.len(),
            "Optimization complete"
        );

        Ok(PricingOutcome {
            method: self.method(),
            items,
            total_profit,
            shortages,
        })
    }
}

/// Build the pricer selected by `config`.
///
/// The linearized pricer is backed by `solver`.
pub fn build_engine(config: &PricingConfig, solver: Arc<dyn Solver>) -> PricingEngine {
    let pricer: Box<dyn Pricer> = match config.method {
        PricingMethod::ClosedForm => Box::new(ClosedFormPricer),
        PricingMethod::GridSearch => Box::new(GridSearchPricer::new(config.grid_points)),
        PricingMethod::Linearized => {
            Box::new(LinearizedPricer::new(solver, config.enforce_inventory))
        }
    };
    PricingEngine::new(pricer, config.round_dp)
}

/// Price `items` independently with the closed-form method, rounded to cents.
///
/// # Errors
///
/// Returns [`PricingError::EmptyMenu`] when `items` is empty.
pub fn optimize(items: &[MenuItem]) -> Result<PricingOutcome> {
    PricingEngine::new(Box::new(ClosedFormPricer), 2).run(&PricingInput::items_only(items))
}
