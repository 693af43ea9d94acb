//! Ingredient consumption at chosen demand levels.

use rust_decimal::Decimal;
use tracing::warn;

use super::PricingInput;
use crate::domain::{Ingredient, IngredientShortage, Quantity};

/// Quantity of every ingredient consumed when each item sells `demands[i]` units.
///
/// Returns one entry per ingredient in `input.ingredients`, in the same order.
/// Recipe lines for items or ingredients not present in `input` are ignored.
#[must_use]
pub fn ingredient_usage<'a>(
    input: &PricingInput<'a>,
    demands: &[Quantity],
) -> Vec<(&'a Ingredient, Quantity)> {
    input
        .ingredients
        .iter()
        .map(|ingredient| {
            let required = input
                .recipes
                .iter()
                .filter(|line| Some(line.ingredient_id()) == ingredient.id())
                .filter_map(|line| {
                    input
                        .items
                        .iter()
                        .position(|item| item.id() == Some(line.menu_item_id()))
                        .and_then(|idx| demands.get(idx))
                        .map(|demand| line.quantity() * demand)
                })
                .sum::<Decimal>();
            (ingredient, required)
        })
        .collect()
}

/// Ingredients whose rounded required quantity exceeds what is on hand.
#[must_use]
pub fn shortages(
    input: &PricingInput<'_>,
    demands: &[Quantity],
    round_dp: u32,
) -> Vec<IngredientShortage> {
    ingredient_usage(input, demands)
        .into_iter()
        .filter_map(|(ingredient, required)| {
            let required = required.round_dp(round_dp);
            if required <= ingredient.available_quantity() {
                return None;
            }
            warn!(
                ingredient = ingredient.name(),
                required = %required,
                available = %ingredient.available_quantity(),
                "Ingredient shortage"
            );
            Some(IngredientShortage {
                ingredient_id: ingredient.id(),
                ingredient: ingredient.name().to_string(),
                required,
                available: ingredient.available_quantity(),
                unit: ingredient.unit().to_string(),
            })
        })
        .collect()
}
