//! Handler for the `seed` command: sample bakery and café data.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tracing::{debug, info};

use crate::adapter::inbound::cli::output;
use crate::domain::{Ingredient, IngredientSpec, MenuItem, MenuItemSpec, RecipeLine};
use crate::error::Result;
use crate::port::{InventoryStore, MenuStore};

struct SampleIngredient {
    name: &'static str,
    quantity: Decimal,
    unit: &'static str,
    cost_per_unit: Decimal,
}

struct SampleItem {
    name: &'static str,
    cost: Decimal,
    current_price: Decimal,
    min_price: Decimal,
    max_price: Decimal,
    base_demand: Decimal,
    elasticity: Decimal,
    recipe: &'static [(&'static str, Decimal)],
}

const INGREDIENTS: [SampleIngredient; 5] = [
    SampleIngredient {
        name: "Flour",
        quantity: dec!(5000),
        unit: "grams",
        cost_per_unit: dec!(0.002),
    },
    SampleIngredient {
        name: "Sugar",
        quantity: dec!(3000),
        unit: "grams",
        cost_per_unit: dec!(0.003),
    },
    SampleIngredient {
        name: "Butter",
        quantity: dec!(2000),
        unit: "grams",
        cost_per_unit: dec!(0.01),
    },
    SampleIngredient {
        name: "Coffee Beans",
        quantity: dec!(1000),
        unit: "grams",
        cost_per_unit: dec!(0.05),
    },
    SampleIngredient {
        name: "Milk",
        quantity: dec!(10000),
        unit: "ml",
        cost_per_unit: dec!(0.002),
    },
];

// Item costs equal the ingredient cost of one unit of the recipe.
const ITEMS: [SampleItem; 2] = [
    SampleItem {
        name: "Chocolate Cake",
        cost: dec!(0.94),
        current_price: dec!(4.99),
        min_price: dec!(3.99),
        max_price: dec!(7.99),
        base_demand: dec!(20),
        elasticity: dec!(1.0),
        recipe: &[
            ("Flour", dec!(100)),
            ("Sugar", dec!(80)),
            ("Butter", dec!(50)),
        ],
    },
    SampleItem {
        name: "Coffee Latte",
        cost: dec!(1.15),
        current_price: dec!(3.49),
        min_price: dec!(2.99),
        max_price: dec!(5.99),
        base_demand: dec!(50),
        elasticity: dec!(0.9),
        recipe: &[("Coffee Beans", dec!(15)), ("Milk", dec!(200))],
    },
];

/// Counts of records created by [`seed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub ingredients: usize,
    pub items: usize,
    pub recipe_lines: usize,
}

/// Insert the sample records that are not present yet.
///
/// Ingredients and items are matched by name, so running twice adds nothing.
///
/// # Errors
///
/// Returns an error if the store rejects a write.
pub async fn seed<S: MenuStore + InventoryStore>(store: &S) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for sample in &INGREDIENTS {
        if store.find_ingredient(sample.name).await?.is_some() {
            debug!(name = sample.name, "Ingredient already present");
            continue;
        }
        let ingredient = Ingredient::try_new(IngredientSpec {
            name: sample.name.to_string(),
            available_quantity: sample.quantity,
            unit: sample.unit.to_string(),
            cost_per_unit: sample.cost_per_unit,
        })?;
        store.add_ingredient(&ingredient).await?;
        summary.ingredients += 1;
    }

    let existing = store.list_items().await?;
    for sample in &ITEMS {
        if existing.iter().any(|item| item.name() == sample.name) {
            debug!(name = sample.name, "Menu item already present");
            continue;
        }
        let item = MenuItem::try_new(MenuItemSpec {
            name: sample.name.to_string(),
            cost: sample.cost,
            current_price: Some(sample.current_price),
            min_price: sample.min_price,
            max_price: sample.max_price,
            base_demand: sample.base_demand,
            elasticity: sample.elasticity,
        })?;
        let item = store.add_item(&item).await?;
        summary.items += 1;

        let Some(item_id) = item.id() else {
            continue;
        };
        for (ingredient_name, quantity) in sample.recipe {
            let Some(ingredient_id) = store
                .find_ingredient(ingredient_name)
                .await?
                .and_then(|ingredient| ingredient.id())
            else {
                continue;
            };
            store
                .set_recipe_line(&RecipeLine::try_new(item_id, ingredient_id, *quantity)?)
                .await?;
            summary.recipe_lines += 1;
        }
    }

    info!(
        ingredients = summary.ingredients,
        items = summary.items,
        recipe_lines = summary.recipe_lines,
        "Seeded sample data"
    );
    Ok(summary)
}

/// Execute `seed`.
pub async fn execute<S: MenuStore + InventoryStore>(store: &S) -> Result<()> {
    let summary = seed(store).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "seed",
            "ingredients": summary.ingredients,
            "items": summary.items,
            "recipe_lines": summary.recipe_lines,
        }));
        return Ok(());
    }

    if summary == SeedSummary::default() {
        output::note("Sample data already present; nothing added.");
        return Ok(());
    }
    output::success(&format!(
        "Added {} ingredients, {} menu items and {} recipe lines",
        summary.ingredients, summary.items, summary.recipe_lines
    ));
    output::hint(&format!("run {}", output::highlight("feastfair optimize")));
    Ok(())
}
