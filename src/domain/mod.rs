//! Menu, inventory and pricing-result types.
//!
//! Nothing in here touches storage or the terminal.

pub mod error;
pub mod id;
pub mod ingredient;
pub mod menu;
pub mod money;
pub mod optimization;

pub use error::DomainError;
pub use id::{IngredientId, MenuItemId, RunId};
pub use ingredient::{recipe_cost, Ingredient, IngredientSpec, RecipeLine};
pub use menu::{MenuItem, MenuItemSpec};
pub use money::{Price, Quantity};
pub use optimization::{
    IngredientShortage, OptimizationRun, PricedItem, PricingMethod, PricingOutcome,
};
