//! Handlers for the `ingredient` command group.

use serde_json::json;
use tracing::info;

use crate::adapter::inbound::cli::command::IngredientAddArgs;
use crate::adapter::inbound::cli::{output, prompt, table};
use crate::domain::{Ingredient, IngredientId, IngredientSpec};
use crate::error::{Error, Result};
use crate::port::InventoryStore;

/// Execute `ingredient add`.
pub async fn add<S: InventoryStore>(store: &S, args: IngredientAddArgs) -> Result<()> {
    let ingredient = Ingredient::try_new(IngredientSpec {
        name: args.name,
        available_quantity: args.available,
        unit: args.unit,
        cost_per_unit: args.cost_per_unit,
    })?;
    if store.find_ingredient(ingredient.name()).await?.is_some() {
        return Err(Error::Database(format!(
            "an ingredient named '{}' already exists",
            ingredient.name()
        )));
    }

    let ingredient = store.add_ingredient(&ingredient).await?;
    info!(id = ?ingredient.id(), name = ingredient.name(), "Added ingredient");

    if output::is_json() {
        output::json_output(json!({ "command": "ingredient.add", "ingredient": ingredient }));
        return Ok(());
    }
    output::success(&format!(
        "Added {} (id {})",
        output::highlight(ingredient.name()),
        table::or_dash(ingredient.id())
    ));
    Ok(())
}

/// Execute `ingredient list`.
pub async fn list<S: InventoryStore>(store: &S) -> Result<()> {
    let ingredients = store.list_ingredients().await?;

    if output::is_json() {
        output::json_output(json!({ "command": "ingredient.list", "ingredients": ingredients }));
        return Ok(());
    }
    if ingredients.is_empty() {
        output::note("No ingredients yet.");
        return Ok(());
    }
    output::lines(&table::ingredients(&ingredients));
    Ok(())
}

/// Execute `ingredient remove`.
pub async fn remove<S: InventoryStore>(store: &S, id: IngredientId, yes: bool) -> Result<()> {
    let ingredient = store
        .get_ingredient(id)
        .await?
        .ok_or_else(|| Error::not_found("ingredient", id))?;
    let prompt = format!(
        "Remove {} from stock and from every recipe?",
        ingredient.name()
    );
    if !prompt::confirm(&prompt, yes)? {
        output::note("Nothing removed.");
        return Ok(());
    }

    if !store.remove_ingredient(id).await? {
        return Err(Error::not_found("ingredient", id));
    }
    info!(id = %id, name = ingredient.name(), "Removed ingredient");

    if output::is_json() {
        output::json_output(json!({ "command": "ingredient.remove", "id": id, "removed": true }));
        return Ok(());
    }
    output::success(&format!("Removed {}", ingredient.name()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use rust_decimal_macros::dec;

    fn milk() -> IngredientAddArgs {
        IngredientAddArgs {
            name: "Milk".into(),
            available: dec!(10000),
            unit: "ml".into(),
            cost_per_unit: dec!(0.002),
        }
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let store = MemoryStore::new();
        add(&store, milk()).await.unwrap();

        let result = add(&store, milk()).await;
        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(store.list_ingredients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_unit_is_a_domain_error() {
        let store = MemoryStore::new();
        let result = add(
            &store,
            IngredientAddArgs {
                unit: "  ".into(),
                ..milk()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Domain(_))));
    }

    #[tokio::test]
    async fn remove_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let result = remove(&store, IngredientId::new(9), true).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
