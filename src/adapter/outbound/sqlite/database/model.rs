//! Database model types for Diesel ORM.
//!
//! Decimal columns are stored as text so prices round-trip exactly.

use diesel::prelude::*;

use super::schema::{ingredients, menu_items, optimization_runs, optimized_items, recipe_lines};

/// Database row for a menu item (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MenuItemRow {
    pub id: i32,
    pub name: String,
    pub cost: String,
    pub current_price: Option<String>,
    pub min_price: String,
    pub max_price: String,
    pub base_demand: String,
    pub elasticity: String,
}

/// Database row for a menu item (insertable and updatable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = menu_items)]
#[diesel(treat_none_as_null = true)]
pub struct NewMenuItemRow {
    pub name: String,
    pub cost: String,
    pub current_price: Option<String>,
    pub min_price: String,
    pub max_price: String,
    pub base_demand: String,
    pub elasticity: String,
}

/// Database row for an ingredient (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IngredientRow {
    pub id: i32,
    pub name: String,
    pub available_quantity: String,
    pub unit: String,
    pub cost_per_unit: String,
}

/// Database row for an ingredient (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ingredients)]
pub struct NewIngredientRow {
    pub name: String,
    pub available_quantity: String,
    pub unit: String,
    pub cost_per_unit: String,
}

/// Database row for a recipe line.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = recipe_lines)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeLineRow {
    pub menu_item_id: i32,
    pub ingredient_id: i32,
    pub quantity: String,
}

/// Database row for an optimization run (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = optimization_runs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RunRow {
    pub id: i32,
    pub method: String,
    pub total_profit: String,
    pub shortages: String,
    pub created_at: String,
}

/// Database row for an optimization run (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = optimization_runs)]
pub struct NewRunRow {
    pub method: String,
    pub total_profit: String,
    pub shortages: String,
    pub created_at: String,
}

/// Database row for one priced item of a run (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = optimized_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OptimizedItemRow {
    pub id: i32,
    pub run_id: i32,
    pub position: i32,
    pub menu_item_id: Option<i32>,
    pub name: String,
    pub current_price: Option<String>,
    pub price: String,
    pub demand: String,
    pub profit: String,
}

/// Database row for one priced item of a run (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = optimized_items)]
pub struct NewOptimizedItemRow {
    pub run_id: i32,
    pub position: i32,
    pub menu_item_id: Option<i32>,
    pub name: String,
    pub current_price: Option<String>,
    pub price: String,
    pub demand: String,
    pub profit: String,
}

/// Helper struct for querying `last_insert_rowid()`.
#[derive(QueryableByName, Debug)]
pub struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub id: i32,
}
