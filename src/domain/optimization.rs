//! Results of a price optimization pass.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{IngredientId, MenuItemId, RunId};
use super::money::{Price, Quantity};

/// Algorithm used to choose prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingMethod {
    /// Exact per-item maximum from the derivative of the profit curve.
    #[default]
    ClosedForm,
    /// Best of evenly spaced candidate prices.
    GridSearch,
    /// Two-point linearization solved as a linear program.
    Linearized,
}

impl PricingMethod {
    /// All methods, in display order.
    pub const ALL: [Self; 3] = [Self::ClosedForm, Self::GridSearch, Self::Linearized];

    /// Stable name used in config files, the CLI and the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClosedForm => "closed-form",
            Self::GridSearch => "grid-search",
            Self::Linearized => "linearized",
        }
    }
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "closed-form" | "analytic" => Ok(Self::ClosedForm),
            "grid-search" | "grid" => Ok(Self::GridSearch),
            "linearized" | "simplex" | "lp" => Ok(Self::Linearized),
            _ => Err(DomainError::UnknownMethod(s.to_string())),
        }
    }
}

/// Optimized price and its expected outcome for one menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    pub menu_item_id: Option<MenuItemId>,
    pub name: String,
    pub current_price: Option<Price>,
    pub price: Price,
    pub demand: Quantity,
    pub profit: Decimal,
}

impl PricedItem {
    /// Difference between the optimized and the current price.
    #[must_use]
    pub fn price_change(&self) -> Option<Decimal> {
        self.current_price.map(|current| self.price - current)
    }
}

/// An ingredient the chosen prices would consume beyond what is on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientShortage {
    pub ingredient_id: Option<IngredientId>,
    pub ingredient: String,
    pub required: Quantity,
    pub available: Quantity,
    pub unit: String,
}

impl IngredientShortage {
    /// Quantity missing to cover expected demand.
    #[must_use]
    pub fn deficit(&self) -> Quantity {
        self.required - self.available
    }
}

/// Output of one optimization pass, before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOutcome {
    pub method: PricingMethod,
    pub items: Vec<PricedItem>,
    pub total_profit: Decimal,
    #[serde(default)]
    pub shortages: Vec<IngredientShortage>,
}

/// A persisted optimization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRun {
    pub id: RunId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: PricingOutcome,
}
