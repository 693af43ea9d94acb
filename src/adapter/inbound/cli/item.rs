//! Handlers for the `item` command group.

use serde_json::json;
use tracing::info;

use crate::adapter::inbound::cli::command::{ItemAddArgs, ItemUpdateArgs};
use crate::adapter::inbound::cli::{output, prompt, table};
use crate::domain::{recipe_cost, MenuItem, MenuItemId, MenuItemSpec};
use crate::error::{Error, Result};
use crate::port::{InventoryStore, MenuStore};

/// Execute `item add`.
pub async fn add<S: MenuStore>(store: &S, args: ItemAddArgs) -> Result<()> {
    let item = MenuItem::try_new(MenuItemSpec {
        name: args.name,
        cost: args.cost,
        current_price: args.current_price,
        min_price: args.min_price,
        max_price: args.max_price,
        base_demand: args.demand,
        elasticity: args.elasticity,
    })?;
    let item = store.add_item(&item).await?;
    info!(id = ?item.id(), name = item.name(), "Added menu item");

    if output::is_json() {
        output::json_output(json!({ "command": "item.add", "item": item }));
        return Ok(());
    }
    output::success(&format!(
        "Added {} (id {})",
        output::highlight(item.name()),
        table::or_dash(item.id())
    ));
    Ok(())
}

/// Execute `item list`.
pub async fn list<S: MenuStore>(store: &S) -> Result<()> {
    let items = store.list_items().await?;

    if output::is_json() {
        output::json_output(json!({ "command": "item.list", "items": items }));
        return Ok(());
    }
    if items.is_empty() {
        output::note("No menu items yet.");
        output::hint(&format!(
            "run {} or {}",
            output::highlight("feastfair item add"),
            output::highlight("feastfair seed")
        ));
        return Ok(());
    }
    output::lines(&table::items(&items));
    Ok(())
}

/// Execute `item show`.
pub async fn show<S: MenuStore + InventoryStore>(store: &S, id: MenuItemId) -> Result<()> {
    let item = fetch(store, id).await?;
    let lines = store.recipe_for(id).await?;
    let ingredients = store.list_ingredients().await?;
    let ingredient_cost = recipe_cost(id, &lines, &ingredients);

    if output::is_json() {
        output::json_output(json!({
            "command": "item.show",
            "item": item,
            "recipe": lines,
            "ingredient_cost": ingredient_cost,
        }));
        return Ok(());
    }

    output::section(item.name());
    output::field("ID", id);
    output::field("Cost", item.cost());
    output::field("Current price", table::or_dash(item.current_price()));
    output::field(
        "Price range",
        format!("{} - {}", item.min_price(), item.max_price()),
    );
    output::field("Base demand", item.base_demand());
    output::field("Elasticity", item.elasticity());
    output::field("Recipe lines", lines.len());
    output::field("Ingredient cost", ingredient_cost);
    if !lines.is_empty() && ingredient_cost > item.cost() {
        output::warning("ingredient cost exceeds the item's production cost");
    }
    Ok(())
}

/// Execute `item update`.
pub async fn update<S: MenuStore>(store: &S, args: ItemUpdateArgs) -> Result<()> {
    let existing = fetch(store, args.id).await?;
    let mut spec = existing.to_spec();

    if let Some(name) = args.name {
        spec.name = name;
    }
    if let Some(cost) = args.cost {
        spec.cost = cost;
    }
    if let Some(min_price) = args.min_price {
        spec.min_price = min_price;
    }
    if let Some(max_price) = args.max_price {
        spec.max_price = max_price;
    }
    if let Some(demand) = args.demand {
        spec.base_demand = demand;
    }
    if let Some(elasticity) = args.elasticity {
        spec.elasticity = elasticity;
    }
    if args.clear_current_price {
        spec.current_price = None;
    } else if let Some(current) = args.current_price {
        spec.current_price = Some(current);
    }

    let item = MenuItem::try_new(spec)?.with_id(args.id);
    if !store.update_item(args.id, &item).await? {
        return Err(Error::not_found("menu item", args.id));
    }
    info!(id = %args.id, name = item.name(), "Updated menu item");

    if output::is_json() {
        output::json_output(json!({ "command": "item.update", "item": item }));
        return Ok(());
    }
    output::success(&format!("Updated {}", output::highlight(item.name())));
    Ok(())
}

/// Execute `item remove`.
pub async fn remove<S: MenuStore>(store: &S, id: MenuItemId, yes: bool) -> Result<()> {
    let item = fetch(store, id).await?;
    let prompt = format!("Remove {} and its recipe?", item.name());
    if !prompt::confirm(&prompt, yes)? {
        output::note("Nothing removed.");
        return Ok(());
    }

    if !store.remove_item(id).await? {
        return Err(Error::not_found("menu item", id));
    }
    info!(id = %id, name = item.name(), "Removed menu item");

    if output::is_json() {
        output::json_output(json!({ "command": "item.remove", "id": id, "removed": true }));
        return Ok(());
    }
    output::success(&format!("Removed {}", item.name()));
    Ok(())
}

async fn fetch<S: MenuStore>(store: &S, id: MenuItemId) -> Result<MenuItem> {
    store
        .get_item(id)
        .await?
        .ok_or_else(|| Error::not_found("menu item", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use rust_decimal_macros::dec;

    fn add_args(name: &str) -> ItemAddArgs {
        ItemAddArgs {
            name: name.into(),
            cost: dec!(2),
            min_price: dec!(4),
            max_price: dec!(8),
            demand: dec!(20),
            elasticity: dec!(0.5),
            current_price: Some(dec!(4.99)),
        }
    }

    fn update_args(id: MenuItemId) -> ItemUpdateArgs {
        ItemUpdateArgs {
            id,
            name: None,
            cost: None,
            min_price: None,
            max_price: None,
            demand: None,
            elasticity: None,
            current_price: None,
            clear_current_price: false,
        }
    }

    #[tokio::test]
    async fn add_then_update_keeps_untouched_fields() {
        let store = MemoryStore::new();
        add(&store, add_args("Cake")).await.unwrap();
        let id = store.list_items().await.unwrap()[0].id().unwrap();

        update(
            &store,
            ItemUpdateArgs {
                max_price: Some(dec!(9)),
                clear_current_price: true,
                ..update_args(id)
            },
        )
        .await
        .unwrap();

        let item = store.get_item(id).await.unwrap().unwrap();
        assert_eq!(item.max_price(), dec!(9));
        assert_eq!(item.min_price(), dec!(4));
        assert_eq!(item.current_price(), None);
    }

    #[tokio::test]
    async fn update_rejects_inverted_range() {
        let store = MemoryStore::new();
        add(&store, add_args("Cake")).await.unwrap();
        let id = store.list_items().await.unwrap()[0].id().unwrap();

        let result = update(
            &store,
            ItemUpdateArgs {
                min_price: Some(dec!(10)),
                ..update_args(id)
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Domain(_))));
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let store = MemoryStore::new();
        let result = remove(&store, MenuItemId::new(3), true).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn remove_with_yes_deletes() {
        let store = MemoryStore::new();
        add(&store, add_args("Cake")).await.unwrap();
        let id = store.list_items().await.unwrap()[0].id().unwrap();

        remove(&store, id, true).await.unwrap();
        assert!(store.list_items().await.unwrap().is_empty());
    }
}
