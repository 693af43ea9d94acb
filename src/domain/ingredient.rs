//! Ingredients, stock levels and recipe lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{ensure_amount, ensure_within, DomainError, MAX_AMOUNT};
use super::id::{IngredientId, MenuItemId};
use super::money::{Price, Quantity};

/// Unvalidated ingredient fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSpec {
    pub name: String,
    pub available_quantity: Quantity,
    pub unit: String,
    pub cost_per_unit: Price,
}

/// An ingredient with the quantity currently on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    id: Option<IngredientId>,
    name: String,
    available_quantity: Quantity,
    unit: String,
    cost_per_unit: Price,
}

impl Ingredient {
    /// Validate a spec and build an ingredient without an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or unit is blank, or the quantity or
    /// unit cost is negative or above [`MAX_AMOUNT`].
    pub fn try_new(spec: IngredientSpec) -> Result<Self, DomainError> {
        let name = spec.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName {
                entity: "ingredient",
            });
        }
        let unit = spec.unit.trim().to_string();
        if unit.is_empty() {
            return Err(DomainError::EmptyUnit);
        }
        ensure_amount("available_quantity", spec.available_quantity)?;
        ensure_amount("cost_per_unit", spec.cost_per_unit)?;

        Ok(Self {
            id: None,
            name,
            available_quantity: spec.available_quantity,
            unit,
            cost_per_unit: spec.cost_per_unit,
        })
    }

    /// Attach a persisted id.
    #[must_use]
    pub fn with_id(mut self, id: IngredientId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub const fn id(&self) -> Option<IngredientId> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn available_quantity(&self) -> Quantity {
        self.available_quantity
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub const fn cost_per_unit(&self) -> Price {
        self.cost_per_unit
    }
}

/// Quantity of one ingredient consumed per unit sold of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLine {
    menu_item_id: MenuItemId,
    ingredient_id: IngredientId,
    quantity: Quantity,
}

impl RecipeLine {
    /// Build a recipe line.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is zero, negative or above [`MAX_AMOUNT`].
    pub fn try_new(
        menu_item_id: MenuItemId,
        ingredient_id: IngredientId,
        quantity: Quantity,
    ) -> Result<Self, DomainError> {
        if quantity <= Decimal::ZERO {
            return Err(DomainError::NonPositiveQuantity { quantity });
        }
        ensure_within("quantity", quantity, MAX_AMOUNT)?;
        Ok(Self {
            menu_item_id,
            ingredient_id,
            quantity,
        })
    }

    #[must_use]
    pub const fn menu_item_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    #[must_use]
    pub const fn ingredient_id(&self) -> IngredientId {
        self.ingredient_id
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Ingredient cost of one unit of `item`, summed over its recipe lines.
///
/// Lines referencing ingredients not present in `ingredients` are skipped.
#[must_use]
pub fn recipe_cost(item: MenuItemId, lines: &[RecipeLine], ingredients: &[Ingredient]) -> Price {
    lines
        .iter()
        .filter(|line| line.menu_item_id == item)
        .filter_map(|line| {
            ingredients
                .iter()
                .find(|ing| ing.id == Some(line.ingredient_id))
                .map(|ing| line.quantity * ing.cost_per_unit)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flour() -> Ingredient {
        Ingredient::try_new(IngredientSpec {
            name: "Flour".into(),
            available_quantity: dec!(5000),
            unit: "grams".into(),
            cost_per_unit: dec!(0.002),
        })
        .unwrap()
        .with_id(IngredientId::new(1))
    }

    fn butter() -> Ingredient {
        Ingredient::try_new(IngredientSpec {
            name: "Butter".into(),
            available_quantity: dec!(2000),
            unit: "grams".into(),
            cost_per_unit: dec!(0.01),
        })
        .unwrap()
        .with_id(IngredientId::new(2))
    }

    #[test]
    fn try_new_rejects_blank_unit() {
        let result = Ingredient::try_new(IngredientSpec {
            name: "Milk".into(),
            available_quantity: dec!(100),
            unit: " ".into(),
            cost_per_unit: dec!(0.002),
        });
        assert_eq!(result, Err(DomainError::EmptyUnit));
    }

    #[test]
    fn try_new_rejects_negative_stock() {
        let result = Ingredient::try_new(IngredientSpec {
            name: "Milk".into(),
            available_quantity: dec!(-1),
            unit: "ml".into(),
            cost_per_unit: dec!(0.002),
        });
        assert!(matches!(
            result,
            Err(DomainError::Negative {
                field: "available_quantity",
                ..
            })
        ));
    }

    #[test]
    fn recipe_line_requires_positive_quantity() {
        let result = RecipeLine::try_new(MenuItemId::new(1), IngredientId::new(1), dec!(0));
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveQuantity { .. })
        ));
    }

    #[test]
    fn recipe_line_rejects_huge_quantity() {
        let result = RecipeLine::try_new(
            MenuItemId::new(1),
            IngredientId::new(1),
            dec!(1000000000.5),
        );
        assert!(matches!(
            result,
            Err(DomainError::TooLarge {
                field: "quantity",
                ..
            })
        ));
    }

    #[test]
    fn recipe_cost_sums_matching_lines() {
        let cake = MenuItemId::new(1);
        let latte = MenuItemId::new(2);
        let lines = vec![
            RecipeLine::try_new(cake, IngredientId::new(1), dec!(100)).unwrap(),
            RecipeLine::try_new(cake, IngredientId::new(2), dec!(50)).unwrap(),
            RecipeLine::try_new(latte, IngredientId::new(2), dec!(10)).unwrap(),
        ];
        let ingredients = vec![flour(), butter()];

        // 100 * 0.002 + 50 * 0.01
        assert_eq!(recipe_cost(cake, &lines, &ingredients), dec!(0.70));
        assert_eq!(recipe_cost(latte, &lines, &ingredients), dec!(0.10));
    }

    #[test]
    fn recipe_cost_skips_unknown_ingredients() {
        let cake = MenuItemId::new(1);
        let lines = vec![RecipeLine::try_new(cake, IngredientId::new(99), dec!(5)).unwrap()];
        assert_eq!(recipe_cost(cake, &lines, &[flour()]), Decimal::ZERO);
    }
}
