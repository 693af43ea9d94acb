//! Persistence ports for menu items, inventory and optimization runs.

use std::future::Future;

use crate::domain::{
    Ingredient, IngredientId, MenuItem, MenuItemId, OptimizationRun, PricingOutcome, RecipeLine,
    RunId,
};
use crate::error::Result;

/// Storage operations for menu items.
pub trait MenuStore: Send + Sync {
    /// Insert a menu item and return it with its assigned id.
    fn add_item(&self, item: &MenuItem) -> impl Future<Output = Result<MenuItem>> + Send;

    /// Get a menu item by id.
    fn get_item(&self, id: MenuItemId) -> impl Future<Output = Result<Option<MenuItem>>> + Send;

    /// List all menu items in insertion order.
    fn list_items(&self) -> impl Future<Output = Result<Vec<MenuItem>>> + Send;

    /// Replace the fields of an existing item. Returns false if it does not exist.
    fn update_item(
        &self,
        id: MenuItemId,
        item: &MenuItem,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Delete a menu item together with its recipe lines.
    fn remove_item(&self, id: MenuItemId) -> impl Future<Output = Result<bool>> + Send;
}

/// Storage operations for ingredients and recipes.
pub trait InventoryStore: Send + Sync {
    /// Insert an ingredient and return it with its assigned id.
    fn add_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> impl Future<Output = Result<Ingredient>> + Send;

    /// Get an ingredient by id.
    fn get_ingredient(
        &self,
        id: IngredientId,
    ) -> impl Future<Output = Result<Option<Ingredient>>> + Send;

    /// Get an ingredient by its exact name.
    fn find_ingredient(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Ingredient>>> + Send;

    /// List all ingredients in insertion order.
    fn list_ingredients(&self) -> impl Future<Output = Result<Vec<Ingredient>>> + Send;

    /// Delete an ingredient together with every recipe line using it.
    fn remove_ingredient(&self, id: IngredientId) -> impl Future<Output = Result<bool>> + Send;

    /// Insert a recipe line, replacing the quantity if the pair exists.
    fn set_recipe_line(&self, line: &RecipeLine) -> impl Future<Output = Result<()>> + Send;

    /// Delete one recipe line.
    fn remove_recipe_line(
        &self,
        item: MenuItemId,
        ingredient: IngredientId,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Recipe lines for one menu item.
    fn recipe_for(&self, item: MenuItemId) -> impl Future<Output = Result<Vec<RecipeLine>>> + Send;

    /// Every recipe line.
    fn recipe_lines(&self) -> impl Future<Output = Result<Vec<RecipeLine>>> + Send;
}

/// Storage operations for optimization runs.
pub trait RunStore: Send + Sync {
    /// Persist an outcome and return the stored run.
    fn save_run(
        &self,
        outcome: &PricingOutcome,
    ) -> impl Future<Output = Result<OptimizationRun>> + Send;

    /// Get a run by id, including its items.
    fn get_run(&self, id: RunId) -> impl Future<Output = Result<Option<OptimizationRun>>> + Send;

    /// Most recent run, if any.
    fn latest_run(&self) -> impl Future<Output = Result<Option<OptimizationRun>>> + Send;

    /// Most recent runs first, at most `limit`.
    fn list_runs(&self, limit: usize) -> impl Future<Output = Result<Vec<OptimizationRun>>> + Send;
}

/// Everything the CLI needs from a backing store.
pub trait Store: MenuStore + InventoryStore + RunStore {}

impl<T: MenuStore + InventoryStore + RunStore> Store for T {}
