//! Closed-form pricer.
//!
//! With `k = elasticity / (max_price - min_price)` the profit on the
//! positive-demand segment is the parabola
//!
//! ```text
//! profit(p) = base_demand * (p - cost) * (1 + k * min_price - k * p)
//! ```
//!
//! whose derivative vanishes at `p* = (1/k + min_price + cost) / 2`. For
//! `k > 0` the parabola opens downwards and `p*` is the maximum; past the
//! demand kink `min_price + 1/k` profit is flat at zero. For `k <= 0`
//! profit has no interior maximum, so only the endpoints matter.

use rust_decimal::Decimal;

use super::{Pricer, PricingInput};
use crate::domain::{MenuItem, Price, PricingMethod};
use crate::error::Result;

/// Exact per-item profit maximizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClosedFormPricer;

impl Pricer for ClosedFormPricer {
    fn method(&self) -> PricingMethod {
        PricingMethod::ClosedForm
    }

    fn choose_prices(&self, input: &PricingInput<'_>) -> Result<Vec<Price>> {
        Ok(input.items.iter().map(best_price).collect())
    }
}

/// Candidate prices worth evaluating for `item`, ascending.
fn candidates(item: &MenuItem) -> Vec<Price> {
    let (min, max) = (item.min_price(), item.max_price());
    let mut out = vec![min, max];

    let range = item.price_range();
    if range.is_zero() {
        return vec![min];
    }

    let inverse_k = item
        .elasticity()
        .checked_div(range)
        .filter(|k| *k > Decimal::ZERO)
        .and_then(|k| Decimal::ONE.checked_div(k));

    if let Some(inverse_k) = inverse_k {
        let stationary = (inverse_k + min + item.cost()) / Decimal::TWO;
        let kink = min + inverse_k;
        out.extend([stationary, kink].into_iter().filter(|p| item.admits(*p)));
    }

    out.sort();
    out.dedup();
    out
}

/// Highest-profit candidate; the lowest price wins a tie.
pub(super) fn best_price(item: &MenuItem) -> Price {
    let mut best = item.min_price();
    let mut best_profit = item.profit_at(best);

    for price in candidates(item) {
        let profit = item.profit_at(price);
        if profit > best_profit {
            best = price;
            best_profit = profit;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pricing::tests::item;
    use rust_decimal_macros::dec;

    #[test]
    fn interior_optimum_matches_derivative() {
        // k = 0.5 / 4 = 0.125, p* = (8 + 4 + 2) / 2 = 7
        let cake = item("Cake", dec!(2), dec!(4), dec!(8), dec!(20), dec!(0.5));
        assert_eq!(best_price(&cake), dec!(7));
        // demand = 20 * (1 - 0.5 * 0.75) = 12.5, profit = 5 * 12.5
        assert_eq!(cake.profit_at(dec!(7)), dec!(62.5));
    }

    #[test]
    fn stationary_point_above_range_picks_max() {
        let cake = item("Cake", dec!(2), dec!(4), dec!(8), dec!(20), dec!(0.1));
        assert_eq!(best_price(&cake), dec!(8));
    }

    #[test]
    fn stationary_point_below_range_picks_min() {
        // k = 3 / 1 = 3, p* = (0.333.. + 4 + 0) / 2 < 4
        let bun = item("Bun", dec!(0), dec!(4), dec!(5), dec!(10), dec!(3));
        assert_eq!(best_price(&bun), dec!(4));
    }

    #[test]
    fn zero_elasticity_prices_at_max() {
        let water = item("Water", dec!(0.2), dec!(1), dec!(3), dec!(40), dec!(0));
        assert_eq!(best_price(&water), dec!(3));
    }

    #[test]
    fn negative_elasticity_prices_at_max() {
        // demand grows with price, profit grows too
        let wine = item("Wine", dec!(5), dec!(10), dec!(20), dec!(20), dec!(-5));
        assert_eq!(best_price(&wine), dec!(20));
    }

    #[test]
    fn cost_above_every_price_minimizes_loss() {
        // profit is negative wherever demand is positive; at the kink it is 0
        let truffle = item("Truffle", dec!(50), dec!(10), dec!(20), dec!(5), dec!(2));
        let price = best_price(&truffle);
        assert_eq!(truffle.profit_at(price), Decimal::ZERO);
        assert_eq!(price, dec!(15));
    }

    #[test]
    fn zero_width_range_returns_the_only_price() {
        let tea = item("Tea", dec!(0.5), dec!(2), dec!(2), dec!(15), dec!(0.9));
        assert_eq!(best_price(&tea), dec!(2));
    }

    #[test]
    fn beats_every_grid_point() {
        let latte = item("Latte", dec!(1.10), dec!(2.99), dec!(5.99), dec!(50), dec!(0.7));
        let best = latte.profit_at(best_price(&latte));
        let step = latte.price_range() / dec!(99);
        for i in 0..100 {
            let p = latte.min_price() + step * Decimal::from(i);
            assert!(latte.profit_at(p) <= best, "grid point {p} beats closed form");
        }
    }
}
