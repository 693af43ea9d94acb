//! Handlers for the `recipe` command group.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use crate::adapter::inbound::cli::output;
use crate::domain::{recipe_cost, IngredientId, MenuItemId, Quantity, RecipeLine};
use crate::error::{Error, Result};
use crate::port::{InventoryStore, MenuStore};

#[derive(Tabled, Serialize)]
struct LineRow {
    #[tabled(rename = "Ingredient ID")]
    ingredient_id: IngredientId,
    #[tabled(rename = "Ingredient")]
    name: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Cost")]
    cost: Decimal,
}

/// Execute `recipe set`.
pub async fn set<S: MenuStore + InventoryStore>(
    store: &S,
    item: MenuItemId,
    ingredient: IngredientId,
    quantity: Quantity,
) -> Result<()> {
    let line = RecipeLine::try_new(item, ingredient, quantity)?;
    let menu_item = store
        .get_item(item)
        .await?
        .ok_or_else(|| Error::not_found("menu item", item))?;
    let stock = store
        .get_ingredient(ingredient)
        .await?
        .ok_or_else(|| Error::not_found("ingredient", ingredient))?;

    store.set_recipe_line(&line).await?;
    info!(
        item = menu_item.name(),
        ingredient = stock.name(),
        quantity = %quantity,
        "Set recipe line"
    );

    if output::is_json() {
        output::json_output(json!({ "command": "recipe.set", "line": line }));
        return Ok(());
    }
    output::success(&format!(
        "{} uses {} {} of {}",
        output::highlight(menu_item.name()),
        quantity,
        stock.unit(),
        stock.name()
    ));
    Ok(())
}

/// Execute `recipe remove`.
pub async fn remove<S: InventoryStore>(
    store: &S,
    item: MenuItemId,
    ingredient: IngredientId,
) -> Result<()> {
    if !store.remove_recipe_line(item, ingredient).await? {
        return Err(Error::not_found(
            "recipe line",
            format!("{item}/{ingredient}"),
        ));
    }
    info!(item = %item, ingredient = %ingredient, "Removed recipe line");

    if output::is_json() {
        output::json_output(json!({
            "command": "recipe.remove",
            "menu_item_id": item,
            "ingredient_id": ingredient,
            "removed": true,
        }));
        return Ok(());
    }
    output::success("Removed recipe line");
    Ok(())
}

/// Execute `recipe show`.
pub async fn show<S: MenuStore + InventoryStore>(store: &S, item: MenuItemId) -> Result<()> {
    let menu_item = store
        .get_item(item)
        .await?
        .ok_or_else(|| Error::not_found("menu item", item))?;
    let lines = store.recipe_for(item).await?;
    let ingredients = store.list_ingredients().await?;
    let total = recipe_cost(item, &lines, &ingredients);

    let rows: Vec<LineRow> = lines
        .iter()
        .filter_map(|line| {
            ingredients
                .iter()
                .find(|ingredient| ingredient.id() == Some(line.ingredient_id()))
                .map(|ingredient| LineRow {
                    ingredient_id: line.ingredient_id(),
                    name: ingredient.name().to_string(),
                    quantity: format!("{} {}", line.quantity(), ingredient.unit()),
                    cost: line.quantity() * ingredient.cost_per_unit(),
                })
        })
        .collect();

    if output::is_json() {
        output::json_output(json!({
            "command": "recipe.show",
            "menu_item_id": item,
            "name": menu_item.name(),
            "lines": rows,
            "ingredient_cost": total,
        }));
        return Ok(());
    }

    output::section(&format!("Recipe: {}", menu_item.name()));
    if rows.is_empty() {
        output::note("No ingredients assigned.");
        return Ok(());
    }
    output::lines(&Table::new(rows).with(Style::rounded()).to_string());
    output::field("Ingredient cost", total);
    output::field("Item cost", menu_item.cost());
    Ok(())
}
