//! Terminal tables for menu records and optimization results.

use std::fmt::Display;

use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::{
    Ingredient, IngredientShortage, MenuItem, OptimizationRun, PricedItem, PricingOutcome,
};

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cost")]
    cost: Decimal,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Base Demand")]
    demand: Decimal,
    #[tabled(rename = "Elasticity")]
    elasticity: Decimal,
}

#[derive(Tabled)]
struct IngredientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Cost/Unit")]
    cost_per_unit: Decimal,
}

#[derive(Tabled)]
struct PricedRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Optimized")]
    price: Decimal,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Demand")]
    demand: Decimal,
    #[tabled(rename = "Profit")]
    profit: Decimal,
}

#[derive(Tabled)]
struct ShortageRow {
    #[tabled(rename = "Ingredient")]
    name: String,
    #[tabled(rename = "Required")]
    required: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Deficit")]
    deficit: String,
}

#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "Run")]
    id: String,
    #[tabled(rename = "Created (UTC)")]
    created_at: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Total Profit")]
    total_profit: Decimal,
}

/// Display an optional value, `-` when absent.
pub fn or_dash(value: Option<impl Display>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Menu items with their pricing parameters.
pub fn items(items: &[MenuItem]) -> String {
    render(items.iter().map(|item| ItemRow {
        id: or_dash(item.id()),
        name: item.name().to_string(),
        cost: item.cost(),
        current: or_dash(item.current_price()),
        range: format!("{} - {}", item.min_price(), item.max_price()),
        demand: item.base_demand(),
        elasticity: item.elasticity(),
    }))
}

/// Ingredients with stock on hand.
pub fn ingredients(ingredients: &[Ingredient]) -> String {
    render(ingredients.iter().map(|ingredient| IngredientRow {
        id: or_dash(ingredient.id()),
        name: ingredient.name().to_string(),
        available: format!("{} {}", ingredient.available_quantity(), ingredient.unit()),
        cost_per_unit: ingredient.cost_per_unit(),
    }))
}

/// One row per priced item.
pub fn priced_items(items: &[PricedItem]) -> String {
    render(items.iter().map(|item| PricedRow {
        name: item.name.clone(),
        current: or_dash(item.current_price),
        price: item.price,
        change: item.price_change().map_or_else(
            || "-".to_string(),
            |change| {
                if change > Decimal::ZERO {
                    format!("+{change}")
                } else {
                    change.to_string()
                }
            },
        ),
        demand: item.demand,
        profit: item.profit,
    }))
}

/// Ingredients the chosen prices would run short of.
pub fn shortages(shortages: &[IngredientShortage]) -> String {
    render(shortages.iter().map(|shortage| ShortageRow {
        name: shortage.ingredient.clone(),
        required: format!("{} {}", shortage.required, shortage.unit),
        available: format!("{} {}", shortage.available, shortage.unit),
        deficit: format!("{} {}", shortage.deficit(), shortage.unit),
    }))
}

/// Summary line per stored run.
pub fn runs(runs: &[OptimizationRun]) -> String {
    render(runs.iter().map(|run| RunRow {
        id: run.id.to_string(),
        created_at: run.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        method: run.outcome.method.to_string(),
        items: run.outcome.items.len(),
        total_profit: run.outcome.total_profit,
    }))
}

/// Item table followed by the total line, as shown after `optimize` and `results show`.
pub fn outcome(outcome: &PricingOutcome) -> String {
    format!(
        "{}\nTotal expected profit: {}",
        priced_items(&outcome.items),
        outcome.total_profit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricingMethod;
    use rust_decimal_macros::dec;

    #[test]
    fn priced_table_shows_signed_change() {
        let items = vec![
            PricedItem {
                menu_item_id: None,
                name: "Cake".into(),
                current_price: Some(dec!(4.99)),
                price: dec!(7.00),
                demand: dec!(12.5),
                profit: dec!(62.5),
            },
            PricedItem {
                menu_item_id: None,
                name: "Tea".into(),
                current_price: None,
                price: dec!(2.00),
                demand: dec!(15),
                profit: dec!(22.5),
            },
        ];
        let table = priced_items(&items);

        assert!(table.contains("Cake"));
        assert!(table.contains("+2.01"));
        assert!(table.contains("Optimized"));
    }

    #[test]
    fn outcome_appends_total() {
        let outcome = PricingOutcome {
            method: PricingMethod::ClosedForm,
            items: vec![],
            total_profit: dec!(135.85),
            shortages: vec![],
        };
        assert!(super::outcome(&outcome).ends_with("Total expected profit: 135.85"));
    }

    #[test]
    fn or_dash_handles_missing_values() {
        assert_eq!(or_dash(None::<Decimal>), "-");
        assert_eq!(or_dash(Some(dec!(3.5))), "3.5");
    }
}
