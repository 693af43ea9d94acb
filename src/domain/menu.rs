//! Menu items and the linear demand curve they carry.
//!
//! Demand is modelled as a straight line over the normalized price range:
//!
//! ```text
//! x         = (price - min_price) / (max_price - min_price)
//! demand(x) = max(0, base_demand * (1 - elasticity * x))
//! profit    = (price - cost) * demand
//! ```
//!
//! `base_demand` is the expected number of units sold at `min_price`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{ensure_amount, ensure_within, DomainError, MAX_ELASTICITY};
use super::id::MenuItemId;
use super::money::{Price, Quantity};

/// Unvalidated menu item fields, as entered by an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemSpec {
    pub name: String,
    pub cost: Price,
    #[serde(default)]
    pub current_price: Option<Price>,
    pub min_price: Price,
    pub max_price: Price,
    pub base_demand: Quantity,
    pub elasticity: Decimal,
}

/// A menu item with validated pricing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    id: Option<MenuItemId>,
    name: String,
    cost: Price,
    current_price: Option<Price>,
    min_price: Price,
    max_price: Price,
    base_demand: Quantity,
    elasticity: Decimal,
}

impl MenuItem {
    /// Validate a spec and build a menu item without an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, a price, cost or demand is
    /// negative or above [`MAX_AMOUNT`](super::error::MAX_AMOUNT), the
    /// elasticity magnitude exceeds [`MAX_ELASTICITY`], or
    /// `min_price > max_price`.
    pub fn try_new(spec: MenuItemSpec) -> Result<Self, DomainError> {
        let name = spec.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName { entity: "menu item" });
        }
        ensure_amount("cost", spec.cost)?;
        ensure_amount("min_price", spec.min_price)?;
        ensure_amount("max_price", spec.max_price)?;
        ensure_amount("base_demand", spec.base_demand)?;
        ensure_within("elasticity", spec.elasticity, MAX_ELASTICITY)?;
        if let Some(current) = spec.current_price {
            ensure_amount("current_price", current)?;
        }
        if spec.min_price > spec.max_price {
            return Err(DomainError::InvertedPriceRange {
                min: spec.min_price,
                max: spec.max_price,
            });
        }

        Ok(Self {
            id: None,
            name,
            cost: spec.cost,
            current_price: spec.current_price,
            min_price: spec.min_price,
            max_price: spec.max_price,
            base_demand: spec.base_demand,
            elasticity: spec.elasticity,
        })
    }

    /// Attach a persisted id.
    #[must_use]
    pub fn with_id(mut self, id: MenuItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Convert back into an editable spec.
    #[must_use]
    pub fn to_spec(&self) -> MenuItemSpec {
        MenuItemSpec {
            name: self.name.clone(),
            cost: self.cost,
            current_price: self.current_price,
            min_price: self.min_price,
            max_price: self.max_price,
            base_demand: self.base_demand,
            elasticity: self.elasticity,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<MenuItemId> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn cost(&self) -> Price {
        self.cost
    }

    #[must_use]
    pub const fn current_price(&self) -> Option<Price> {
        self.current_price
    }

    #[must_use]
    pub const fn min_price(&self) -> Price {
        self.min_price
    }

    #[must_use]
    pub const fn max_price(&self) -> Price {
        self.max_price
    }

    #[must_use]
    pub const fn base_demand(&self) -> Quantity {
        self.base_demand
    }

    #[must_use]
    pub const fn elasticity(&self) -> Decimal {
        self.elasticity
    }

    /// Width of the admissible price range.
    #[must_use]
    pub fn price_range(&self) -> Price {
        self.max_price - self.min_price
    }

    /// Position of `price` within the range, 0 at `min_price` and 1 at `max_price`.
    ///
    /// A zero-width range always maps to 0.
    #[must_use]
    pub fn normalized(&self, price: Price) -> Decimal {
        let range = self.price_range();
        if range.is_zero() {
            return Decimal::ZERO;
        }
        (price - self.min_price) / range
    }

    /// Price at normalized position `x`.
    #[must_use]
    pub fn price_at(&self, x: Decimal) -> Price {
        self.min_price + x * self.price_range()
    }

    /// Expected units sold at normalized position `x`, never negative.
    #[must_use]
    pub fn demand_at_normalized(&self, x: Decimal) -> Quantity {
        let demand = self.base_demand * (Decimal::ONE - self.elasticity * x);
        demand.max(Decimal::ZERO)
    }

    /// Expected units sold at `price`, never negative.
    #[must_use]
    pub fn demand_at(&self, price: Price) -> Quantity {
        self.demand_at_normalized(self.normalized(price))
    }

    /// Expected profit at `price`.
    #[must_use]
    pub fn profit_at(&self, price: Price) -> Decimal {
        (price - self.cost) * self.demand_at(price)
    }

    /// Whether `price` lies inside `[min_price, max_price]`.
    #[must_use]
    pub fn admits(&self, price: Price) -> bool {
        price >= self.min_price && price <= self.max_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn spec() -> MenuItemSpec {
        MenuItemSpec {
            name: "Chocolate Cake".into(),
            cost: dec!(2.00),
            current_price: Some(dec!(4.99)),
            min_price: dec!(4.00),
            max_price: dec!(8.00),
            base_demand: dec!(20),
            elasticity: dec!(0.5),
        }
    }

    #[test]
    fn try_new_trims_name() {
        let item = MenuItem::try_new(MenuItemSpec {
            name: "  Latte ".into(),
            ..spec()
        })
        .unwrap();
        assert_eq!(item.name(), "Latte");
        assert!(item.id().is_none());
    }

    #[test]
    fn try_new_rejects_blank_name() {
        let result = MenuItem::try_new(MenuItemSpec {
            name: "   ".into(),
            ..spec()
        });
        assert!(matches!(result, Err(DomainError::EmptyName { .. })));
    }

    #[test]
    fn try_new_rejects_negative_cost() {
        let result = MenuItem::try_new(MenuItemSpec {
            cost: dec!(-1),
            ..spec()
        });
        assert!(matches!(
            result,
            Err(DomainError::Negative { field: "cost", .. })
        ));
    }

    #[test]
    fn try_new_rejects_inverted_range() {
        let result = MenuItem::try_new(MenuItemSpec {
            min_price: dec!(9),
            ..spec()
        });
        assert!(matches!(result, Err(DomainError::InvertedPriceRange { .. })));
    }

    #[test]
    fn try_new_rejects_negative_demand() {
        let result = MenuItem::try_new(MenuItemSpec {
            base_demand: dec!(-5),
            ..spec()
        });
        assert!(matches!(
            result,
            Err(DomainError::Negative {
                field: "base_demand",
                ..
            })
        ));
    }

    #[test]
    fn try_new_rejects_demand_too_large_to_price() {
        let result = MenuItem::try_new(MenuItemSpec {
            base_demand: dec!(100000000000000000000000),
            ..spec()
        });
        assert!(matches!(
            result,
            Err(DomainError::TooLarge {
                field: "base_demand",
                ..
            })
        ));
    }

    #[test]
    fn try_new_bounds_elasticity_both_ways() {
        for elasticity in [dec!(1000.01), dec!(-1000.01)] {
            let result = MenuItem::try_new(MenuItemSpec {
                elasticity,
                ..spec()
            });
            assert!(matches!(
                result,
                Err(DomainError::TooLarge {
                    field: "elasticity",
                    ..
                })
            ));
        }
    }

    #[test]
    fn negative_elasticity_is_allowed() {
        let item = MenuItem::try_new(MenuItemSpec {
            elasticity: dec!(-5),
            ..spec()
        });
        assert!(item.is_ok());
    }

    #[test]
    fn demand_falls_linearly_across_range() {
        let item = MenuItem::try_new(spec()).unwrap();
        assert_eq!(item.demand_at(dec!(4.00)), dec!(20));
        assert_eq!(item.demand_at(dec!(6.00)), dec!(15));
        assert_eq!(item.demand_at(dec!(8.00)), dec!(10));
    }

    #[test]
    fn demand_is_clamped_at_zero() {
        let item = MenuItem::try_new(MenuItemSpec {
            elasticity: dec!(2),
            ..spec()
        })
        .unwrap();
        assert_eq!(item.demand_at(dec!(8.00)), Decimal::ZERO);
        assert_eq!(item.profit_at(dec!(8.00)), Decimal::ZERO);
    }

    #[test]
    fn profit_uses_margin_times_demand() {
        let item = MenuItem::try_new(spec()).unwrap();
        // (6 - 2) * 15
        assert_eq!(item.profit_at(dec!(6.00)), dec!(60));
    }

    #[test]
    fn zero_width_range_normalizes_to_zero() {
        let item = MenuItem::try_new(MenuItemSpec {
            min_price: dec!(5),
            max_price: dec!(5),
            ..spec()
        })
        .unwrap();
        assert_eq!(item.normalized(dec!(5)), Decimal::ZERO);
        assert_eq!(item.demand_at(dec!(5)), dec!(20));
        assert_eq!(item.price_at(Decimal::ONE), dec!(5));
    }

    #[test]
    fn spec_roundtrip_preserves_fields() {
        let item = MenuItem::try_new(spec()).unwrap().with_id(MenuItemId::new(4));
        assert_eq!(item.to_spec(), spec());
        assert_eq!(item.id(), Some(MenuItemId::new(4)));
    }
}
