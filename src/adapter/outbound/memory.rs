//! In-memory store implementation for tests and dry runs.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    Ingredient, IngredientId, MenuItem, MenuItemId, OptimizationRun, PricingOutcome, RecipeLine,
    RunId,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{InventoryStore, MenuStore, RunStore};

#[derive(Debug, Default)]
struct Tables {
    items: BTreeMap<MenuItemId, MenuItem>,
    ingredients: BTreeMap<IngredientId, Ingredient>,
    recipes: BTreeMap<(MenuItemId, IngredientId), RecipeLine>,
    runs: BTreeMap<RunId, OptimizationRun>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory store with the same semantics as the SQLite store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MenuStore for MemoryStore {
    async fn add_item(&self, item: &MenuItem) -> Result<MenuItem> {
        let mut tables = self.tables.write();
        let id = MenuItemId::new(tables.next_id());
        let item = item.clone().with_id(id);
        tables.items.insert(id, item.clone());
        Ok(item)
    }

    async fn get_item(&self, id: MenuItemId) -> Result<Option<MenuItem>> {
        Ok(self.tables.read().items.get(&id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<MenuItem>> {
        Ok(self.tables.read().items.values().cloned().collect())
    }

    async fn update_item(&self, id: MenuItemId, item: &MenuItem) -> Result<bool> {
        let mut tables = self.tables.write();
        match tables.items.get_mut(&id) {
            Some(slot) => {
                *slot = item.clone().with_id(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_item(&self, id: MenuItemId) -> Result<bool> {
        let mut tables = self.tables.write();
        tables.recipes.retain(|(item, _), _| *item != id);
        Ok(tables.items.remove(&id).is_some())
    }
}

impl InventoryStore for MemoryStore {
    async fn add_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient> {
        let mut tables = self.tables.write();
        if tables
            .ingredients
            .values()
            .any(|existing| existing.name() == ingredient.name())
        {
            return Err(Error::Database(format!(
                "UNIQUE constraint failed: ingredients.name ({})",
                ingredient.name()
            )));
        }
        let id = IngredientId::new(tables.next_id());
        let ingredient = ingredient.clone().with_id(id);
        tables.ingredients.insert(id, ingredient.clone());
        Ok(ingredient)
    }

    async fn get_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>> {
        Ok(self.tables.read().ingredients.get(&id).cloned())
    }

    async fn find_ingredient(&self, name: &str) -> Result<Option<Ingredient>> {
        Ok(self
            .tables
            .read()
            .ingredients
            .values()
            .find(|ingredient| ingredient.name() == name)
            .cloned())
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        Ok(self.tables.read().ingredients.values().cloned().collect())
    }

    async fn remove_ingredient(&self, id: IngredientId) -> Result<bool> {
        let mut tables = self.tables.write();
        tables.recipes.retain(|(_, ingredient), _| *ingredient != id);
        Ok(tables.ingredients.remove(&id).is_some())
    }

    async fn set_recipe_line(&self, line: &RecipeLine) -> Result<()> {
        let mut tables = self.tables.write();
        if !tables.items.contains_key(&line.menu_item_id())
            || !tables.ingredients.contains_key(&line.ingredient_id())
        {
            return Err(Error::Database(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        tables
            .recipes
            .insert((line.menu_item_id(), line.ingredient_id()), *line);
        Ok(())
    }

    async fn remove_recipe_line(&self, item: MenuItemId, ingredient: IngredientId) -> Result<bool> {
        Ok(self
            .tables
            .write()
            .recipes
            .remove(&(item, ingredient))
            .is_some())
    }

    async fn recipe_for(&self, item: MenuItemId) -> Result<Vec<RecipeLine>> {
        Ok(self
            .tables
            .read()
            .recipes
            .values()
            .filter(|line| line.menu_item_id() == item)
            .copied()
            .collect())
    }

    async fn recipe_lines(&self) -> Result<Vec<RecipeLine>> {
        Ok(self.tables.read().recipes.values().copied().collect())
    }
}

impl RunStore for MemoryStore {
    async fn save_run(&self, outcome: &PricingOutcome) -> Result<OptimizationRun> {
        let mut tables = self.tables.write();
        let run = OptimizationRun {
            id: RunId::new(tables.next_id()),
            created_at: Utc::now(),
            outcome: outcome.clone(),
        };
        tables.runs.insert(run.id, run.clone());
        Ok(run)
    }

    async fn get_run(&self, id: RunId) -> Result<Option<OptimizationRun>> {
        Ok(self.tables.read().runs.get(&id).cloned())
    }

    async fn latest_run(&self) -> Result<Option<OptimizationRun>> {
        Ok(self.tables.read().runs.values().next_back().cloned())
    }

    async fn list_runs(&self, limit: usize) -> Result<Vec<OptimizationRun>> {
        Ok(self
            .tables
            .read()
            .runs
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IngredientSpec, MenuItemSpec, PricingMethod};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn cake() -> MenuItem {
        MenuItem::try_new(MenuItemSpec {
            name: "Cake".into(),
            cost: dec!(2),
            current_price: None,
            min_price: dec!(4),
            max_price: dec!(8),
            base_demand: dec!(20),
            elasticity: dec!(0.5),
        })
        .unwrap()
    }

    fn flour() -> Ingredient {
        Ingredient::try_new(IngredientSpec {
            name: "Flour".into(),
            available_quantity: dec!(5000),
            unit: "grams".into(),
            cost_per_unit: dec!(0.002),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn items_list_in_insertion_order() {
        let store = MemoryStore::new();
        let first = store.add_item(&cake()).await.unwrap();
        let second = store.add_item(&cake()).await.unwrap();

        let ids: Vec<_> = store
            .list_items()
            .await
            .unwrap()
            .iter()
            .filter_map(MenuItem::id)
            .collect();
        assert_eq!(ids, vec![first.id().unwrap(), second.id().unwrap()]);
    }

    #[tokio::test]
    async fn removing_ingredient_drops_recipe_lines() {
        let store = MemoryStore::new();
        let item = store.add_item(&cake()).await.unwrap().id().unwrap();
        let flour = store.add_ingredient(&flour()).await.unwrap().id().unwrap();
        store
            .set_recipe_line(&RecipeLine::try_new(item, flour, dec!(200)).unwrap())
            .await
            .unwrap();

        assert!(store.remove_ingredient(flour).await.unwrap());
        assert!(store.recipe_for(item).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_and_dangling_lines_are_rejected() {
        let store = MemoryStore::new();
        let flour_id = store.add_ingredient(&flour()).await.unwrap().id().unwrap();
        assert!(store.add_ingredient(&flour()).await.is_err());

        let line = RecipeLine::try_new(MenuItemId::new(77), flour_id, dec!(1)).unwrap();
        assert!(store.set_recipe_line(&line).await.is_err());
    }

    #[tokio::test]
    async fn latest_run_is_the_last_saved() {
        let store = MemoryStore::new();
        assert!(store.latest_run().await.unwrap().is_none());

        let outcome = PricingOutcome {
            method: PricingMethod::ClosedForm,
            items: vec![],
            total_profit: Decimal::ZERO,
            shortages: vec![],
        };
        store.save_run(&outcome).await.unwrap();
        let last = store.save_run(&outcome).await.unwrap();

        assert_eq!(store.latest_run().await.unwrap().unwrap().id, last.id);
        assert_eq!(store.list_runs(10).await.unwrap().len(), 2);
    }
}
