//! SQLite menu, inventory and run store.
//!
//! Provides persistent storage for the whole application using SQLite and
//! Diesel ORM.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use rust_decimal::Decimal;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::{configure_sqlite_connection, DbPool};
use crate::adapter::outbound::sqlite::database::model::{
    IngredientRow, LastInsertRowId, MenuItemRow, NewIngredientRow, NewMenuItemRow,
    NewOptimizedItemRow, NewRunRow, OptimizedItemRow, RecipeLineRow, RunRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    ingredients, menu_items, optimization_runs, optimized_items, recipe_lines,
};
use crate::domain::{
    Ingredient, IngredientId, IngredientShortage, IngredientSpec, MenuItem, MenuItemId,
    MenuItemSpec, OptimizationRun, PricedItem, PricingMethod, PricingOutcome, RecipeLine, RunId,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{InventoryStore, MenuStore, RunStore};

type SqlitePooled = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed store.
///
/// Implements every store port on a single connection pool.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    ///
    /// The pool must already be migrated.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<SqlitePooled> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
        Ok(conn)
    }
}

fn parse_decimal(column: &str, value: &str) -> Result<Decimal> {
    value
        .parse()
        .map_err(|e| Error::Parse(format!("{column}: {e}")))
}

fn parse_optional(column: &str, value: Option<&str>) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(column, v)).transpose()
}

fn item_to_row(item: &MenuItem) -> NewMenuItemRow {
    NewMenuItemRow {
        name: item.name().to_string(),
        cost: item.cost().to_string(),
        current_price: item.current_price().map(|p| p.to_string()),
        min_price: item.min_price().to_string(),
        max_price: item.max_price().to_string(),
        base_demand: item.base_demand().to_string(),
        elasticity: item.elasticity().to_string(),
    }
}

fn item_from_row(row: MenuItemRow) -> Result<MenuItem> {
    let spec = MenuItemSpec {
        name: row.name,
        cost: parse_decimal("cost", &row.cost)?,
        current_price: parse_optional("current_price", row.current_price.as_deref())?,
        min_price: parse_decimal("min_price", &row.min_price)?,
        max_price: parse_decimal("max_price", &row.max_price)?,
        base_demand: parse_decimal("base_demand", &row.base_demand)?,
        elasticity: parse_decimal("elasticity", &row.elasticity)?,
    };
    Ok(MenuItem::try_new(spec)?.with_id(MenuItemId::new(row.id)))
}

fn ingredient_from_row(row: IngredientRow) -> Result<Ingredient> {
    let spec = IngredientSpec {
        name: row.name,
        available_quantity: parse_decimal("available_quantity", &row.available_quantity)?,
        unit: row.unit,
        cost_per_unit: parse_decimal("cost_per_unit", &row.cost_per_unit)?,
    };
    Ok(Ingredient::try_new(spec)?.with_id(IngredientId::new(row.id)))
}

fn line_from_row(row: RecipeLineRow) -> Result<RecipeLine> {
    Ok(RecipeLine::try_new(
        MenuItemId::new(row.menu_item_id),
        IngredientId::new(row.ingredient_id),
        parse_decimal("quantity", &row.quantity)?,
    )?)
}

fn priced_from_row(row: OptimizedItemRow) -> Result<PricedItem> {
    Ok(PricedItem {
        menu_item_id: row.menu_item_id.map(MenuItemId::new),
        name: row.name,
        current_price: parse_optional("current_price", row.current_price.as_deref())?,
        price: parse_decimal("price", &row.price)?,
        demand: parse_decimal("demand", &row.demand)?,
        profit: parse_decimal("profit", &row.profit)?,
    })
}

fn run_from_rows(row: RunRow, items: Vec<OptimizedItemRow>) -> Result<OptimizationRun> {
    let method: PricingMethod = row.method.parse()?;
    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.created_at)
        .map_err(|e| Error::Parse(e.to_string()))?
        .with_timezone(&Utc);
    let shortages: Vec<IngredientShortage> = serde_json::from_str(&row.shortages)?;
    let items = items
        .into_iter()
        .map(priced_from_row)
        .collect::<Result<Vec<_>>>()?;

    Ok(OptimizationRun {
        id: RunId::new(row.id),
        created_at,
        outcome: PricingOutcome {
            method,
            items,
            total_profit: parse_decimal("total_profit", &row.total_profit)?,
            shortages,
        },
    })
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i32> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}

fn load_run(conn: &mut SqliteConnection, row: RunRow) -> Result<OptimizationRun> {
    let items: Vec<OptimizedItemRow> = optimized_items::table
        .filter(optimized_items::run_id.eq(row.id))
        .order(optimized_items::position.asc())
        .select(OptimizedItemRow::as_select())
        .load(conn)?;
    run_from_rows(row, items)
}

impl MenuStore for SqliteStore {
    async fn add_item(&self, item: &MenuItem) -> Result<MenuItem> {
        let row = item_to_row(item);
        let mut conn = self.conn()?;

        let id = conn.transaction(|conn| {
            diesel::insert_into(menu_items::table)
                .values(&row)
                .execute(conn)?;
            last_insert_rowid(conn)
        })?;

        debug!(id = id, name = item.name(), "Stored menu item");
        Ok(item.clone().with_id(MenuItemId::new(id)))
    }

    async fn get_item(&self, id: MenuItemId) -> Result<Option<MenuItem>> {
        let mut conn = self.conn()?;
        let row: Option<MenuItemRow> = menu_items::table
            .find(id.get())
            .select(MenuItemRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(item_from_row).transpose()
    }

    async fn list_items(&self) -> Result<Vec<MenuItem>> {
        let mut conn = self.conn()?;
        let rows: Vec<MenuItemRow> = menu_items::table
            .order(menu_items::id.asc())
            .select(MenuItemRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(item_from_row).collect()
    }

    async fn update_item(&self, id: MenuItemId, item: &MenuItem) -> Result<bool> {
        let row = item_to_row(item);
        let mut conn = self.conn()?;
        let updated = diesel::update(menu_items::table.find(id.get()))
            .set(&row)
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    async fn remove_item(&self, id: MenuItemId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = conn.transaction(|conn| {
            diesel::delete(recipe_lines::table.filter(recipe_lines::menu_item_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(menu_items::table.find(id.get())).execute(conn)
        })?;
        Ok(deleted > 0)
    }
}

impl InventoryStore for SqliteStore {
    async fn add_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient> {
        let row = NewIngredientRow {
            name: ingredient.name().to_string(),
            available_quantity: ingredient.available_quantity().to_string(),
            unit: ingredient.unit().to_string(),
            cost_per_unit: ingredient.cost_per_unit().to_string(),
        };
        let mut conn = self.conn()?;

        let id = conn.transaction(|conn| {
            diesel::insert_into(ingredients::table)
                .values(&row)
                .execute(conn)?;
            last_insert_rowid(conn)
        })?;

        debug!(id = id, name = ingredient.name(), "Stored ingredient");
        Ok(ingredient.clone().with_id(IngredientId::new(id)))
    }

    async fn get_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>> {
        let mut conn = self.conn()?;
        let row: Option<IngredientRow> = ingredients::table
            .find(id.get())
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(ingredient_from_row).transpose()
    }

    async fn find_ingredient(&self, name: &str) -> Result<Option<Ingredient>> {
        let mut conn = self.conn()?;
        let row: Option<IngredientRow> = ingredients::table
            .filter(ingredients::name.eq(name))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(ingredient_from_row).transpose()
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        let mut conn = self.conn()?;
        let rows: Vec<IngredientRow> = ingredients::table
            .order(ingredients::id.asc())
            .select(IngredientRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(ingredient_from_row).collect()
    }

    async fn remove_ingredient(&self, id: IngredientId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = conn.transaction(|conn| {
            diesel::delete(recipe_lines::table.filter(recipe_lines::ingredient_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(ingredients::table.find(id.get())).execute(conn)
        })?;
        Ok(deleted > 0)
    }

    async fn set_recipe_line(&self, line: &RecipeLine) -> Result<()> {
        let row = RecipeLineRow {
            menu_item_id: line.menu_item_id().get(),
            ingredient_id: line.ingredient_id().get(),
            quantity: line.quantity().to_string(),
        };
        let mut conn = self.conn()?;
        diesel::replace_into(recipe_lines::table)
            .values(&row)
            .execute(&mut conn)?;
        Ok(())
    }

    async fn remove_recipe_line(&self, item: MenuItemId, ingredient: IngredientId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(recipe_lines::table.find((item.get(), ingredient.get())))
            .execute(&mut conn)?;
        Ok(deleted > 0)
    }

    async fn recipe_for(&self, item: MenuItemId) -> Result<Vec<RecipeLine>> {
        let mut conn = self.conn()?;
        let rows: Vec<RecipeLineRow> = recipe_lines::table
            .filter(recipe_lines::menu_item_id.eq(item.get()))
            .order(recipe_lines::ingredient_id.asc())
            .select(RecipeLineRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(line_from_row).collect()
    }

    async fn recipe_lines(&self) -> Result<Vec<RecipeLine>> {
        let mut conn = self.conn()?;
        let rows: Vec<RecipeLineRow> = recipe_lines::table
            .order((recipe_lines::menu_item_id.asc(), recipe_lines::ingredient_id.asc()))
            .select(RecipeLineRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(line_from_row).collect()
    }
}

impl RunStore for SqliteStore {
    async fn save_run(&self, outcome: &PricingOutcome) -> Result<OptimizationRun> {
        let created_at = Utc::now();
        let run_row = NewRunRow {
            method: outcome.method.to_string(),
            total_profit: outcome.total_profit.to_string(),
            shortages: serde_json::to_string(&outcome.shortages)?,
            created_at: created_at.to_rfc3339(),
        };
        let mut conn = self.conn()?;

        let id = conn.transaction(|conn| {
            diesel::insert_into(optimization_runs::table)
                .values(&run_row)
                .execute(conn)?;
            let run_id = last_insert_rowid(conn)?;

            let rows: Vec<NewOptimizedItemRow> = outcome
                .items
                .iter()
                .zip(0..)
                .map(|(item, position)| NewOptimizedItemRow {
                    run_id,
                    position,
                    menu_item_id: item.menu_item_id.map(MenuItemId::get),
                    name: item.name.clone(),
                    current_price: item.current_price.map(|p| p.to_string()),
                    price: item.price.to_string(),
                    demand: item.demand.to_string(),
                    profit: item.profit.to_string(),
                })
                .collect();
            if !rows.is_empty() {
                diesel::insert_into(optimized_items::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            Ok::<i32, diesel::result::Error>(run_id)
        })?;

        debug!(id = id, method = %outcome.method, "Stored optimization run");
        Ok(OptimizationRun {
            id: RunId::new(id),
            created_at,
            outcome: outcome.clone(),
        })
    }

    async fn get_run(&self, id: RunId) -> Result<Option<OptimizationRun>> {
        let mut conn = self.conn()?;
        let row: Option<RunRow> = optimization_runs::table
            .find(id.get())
            .select(RunRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(|row| load_run(&mut conn, row)).transpose()
    }

    async fn latest_run(&self) -> Result<Option<OptimizationRun>> {
        let mut conn = self.conn()?;
        let row: Option<RunRow> = optimization_runs::table
            .order(optimization_runs::id.desc())
            .select(RunRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(|row| load_run(&mut conn, row)).transpose()
    }

    async fn list_runs(&self, limit: usize) -> Result<Vec<OptimizationRun>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut conn = self.conn()?;
        let rows: Vec<RunRow> = optimization_runs::table
            .order(optimization_runs::id.desc())
            .limit(limit)
            .select(RunRow::as_select())
            .load(&mut conn)?;
        rows.into_iter()
            .map(|row| load_run(&mut conn, row))
            .collect()
    }
}
