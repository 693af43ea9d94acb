//! Sampled grid search over each item's price range.

use rust_decimal::Decimal;

use super::{Pricer, PricingInput};
use crate::domain::{MenuItem, Price, PricingMethod};
use crate::error::{PricingError, Result};

/// Evaluates evenly spaced prices and keeps the most profitable one.
#[derive(Debug, Clone, Copy)]
pub struct GridSearchPricer {
    grid_points: usize,
}

impl GridSearchPricer {
    #[must_use]
    pub const fn new(grid_points: usize) -> Self {
        Self { grid_points }
    }

    /// First price with maximal profit among the grid points of `item`.
    fn best_price(&self, item: &MenuItem) -> Price {
        let range = item.price_range();
        if range.is_zero() {
            return item.min_price();
        }

        let last = Decimal::from(self.grid_points - 1);
        let mut best = item.min_price();
        let mut best_profit = item.profit_at(best);

        for i in 1..self.grid_points {
            // last point is pinned to max_price so rounding never drops it
            let price = if i == self.grid_points - 1 {
                item.max_price()
            } else {
                item.min_price() + range * Decimal::from(i) / last
            };
            let profit = item.profit_at(price);
            if profit > best_profit {
                best = price;
                best_profit = profit;
            }
        }

        best
    }
}

impl Pricer for GridSearchPricer {
    fn method(&self) -> PricingMethod {
        PricingMethod::GridSearch
    }

    fn choose_prices(&self, input: &PricingInput<'_>) -> Result<Vec<Price>> {
        if self.grid_points < 2 {
            return Err(PricingError::TooFewGridPoints(self.grid_points).into());
        }
        Ok(input.items.iter().map(|item| self.best_price(item)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pricing::tests::item;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_fewer_than_two_points() {
        let items = vec![item("Cake", dec!(2), dec!(4), dec!(8), dec!(20), dec!(0.5))];
        let result = GridSearchPricer::new(1).choose_prices(&PricingInput::items_only(&items));
        assert!(matches!(
            result,
            Err(Error::Pricing(PricingError::TooFewGridPoints(1)))
        ));
    }

    #[test]
    fn two_points_compare_endpoints() {
        let cake = item("Cake", dec!(2), dec!(4), dec!(8), dec!(20), dec!(0.5));
        // profit(4) = 40, profit(8) = 60
        assert_eq!(GridSearchPricer::new(2).best_price(&cake), dec!(8));
    }

    #[test]
    fn finds_interior_optimum_on_the_grid() {
        // five points: 4, 5, 6, 7, 8; the optimum 7 is one of them
        let cake = item("Cake", dec!(2), dec!(4), dec!(8), dec!(20), dec!(0.5));
        assert_eq!(GridSearchPricer::new(5).best_price(&cake), dec!(7));
    }

    #[test]
    fn ties_keep_the_first_point() {
        // zero margin everywhere once demand hits zero
        let bun = item("Bun", dec!(0), dec!(0), dec!(1), dec!(0), dec!(1));
        assert_eq!(GridSearchPricer::new(11).best_price(&bun), dec!(0));
    }

    #[test]
    fn zero_width_range_returns_min() {
        let tea = item("Tea", dec!(0.5), dec!(2), dec!(2), dec!(15), dec!(0.9));
        assert_eq!(GridSearchPricer::new(100).best_price(&tea), dec!(2));
    }

    #[test]
    fn default_grid_lands_near_closed_form() {
        let latte = item("Latte", dec!(1.10), dec!(2.99), dec!(5.99), dec!(50), dec!(0.7));
        let grid = GridSearchPricer::new(100).best_price(&latte);
        let exact = super::super::closed_form::best_price(&latte);
        // grid spacing is 3 / 99
        assert!((grid - exact).abs() <= dec!(0.0304));
        assert!(latte.profit_at(grid) <= latte.profit_at(exact));
    }
}
