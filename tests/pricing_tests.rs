//! Pricing methods compared on the sample menu.

use std::sync::Arc;

use feastfair::adapter::outbound::memory::MemoryStore;
use feastfair::adapter::outbound::solver::HighsSolver;
use feastfair::application::pricing::{build_engine, PricingConfig, PricingInput};
use feastfair::domain::{
    Ingredient, IngredientSpec, MenuItem, MenuItemSpec, PricingMethod, RecipeLine,
};
use feastfair::port::{InventoryStore, MenuStore, Solver};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct Menu {
    items: Vec<MenuItem>,
    recipes: Vec<RecipeLine>,
    ingredients: Vec<Ingredient>,
}

impl Menu {
    fn input(&self) -> PricingInput<'_> {
        PricingInput {
            items: &self.items,
            recipes: &self.recipes,
            ingredients: &self.ingredients,
        }
    }
}

async fn bakery(milk_on_hand: Decimal) -> Menu {
    let store = MemoryStore::new();
    let cake = store
        .add_item(
            &MenuItem::try_new(MenuItemSpec {
                name: "Chocolate Cake".into(),
                cost: dec!(0.94),
                current_price: Some(dec!(4.99)),
                min_price: dec!(3.99),
                max_price: dec!(7.99),
                base_demand: dec!(20),
                elasticity: dec!(1.0),
            })
            .unwrap(),
        )
        .await
        .unwrap();
    let latte = store
        .add_item(
            &MenuItem::try_new(MenuItemSpec {
                name: "Coffee Latte".into(),
                cost: dec!(1.15),
                current_price: Some(dec!(3.49)),
                min_price: dec!(2.99),
                max_price: dec!(5.99),
                base_demand: dec!(50),
                elasticity: dec!(0.9),
            })
            .unwrap(),
        )
        .await
        .unwrap();
    let flour = store
        .add_ingredient(
            &Ingredient::try_new(IngredientSpec {
                name: "Flour".into(),
                available_quantity: dec!(5000),
                unit: "grams".into(),
                cost_per_unit: dec!(0.002),
            })
            .unwrap(),
        )
        .await
        .unwrap();
    let milk = store
        .add_ingredient(
            &Ingredient::try_new(IngredientSpec {
                name: "Milk".into(),
                available_quantity: milk_on_hand,
                unit: "ml".into(),
                cost_per_unit: dec!(0.002),
            })
            .unwrap(),
        )
        .await
        .unwrap();

    for (item, ingredient, quantity) in [
        (&cake, &flour, dec!(100)),
        (&latte, &milk, dec!(200)),
    ] {
        let line =
            RecipeLine::try_new(item.id().unwrap(), ingredient.id().unwrap(), quantity).unwrap();
        store.set_recipe_line(&line).await.unwrap();
    }

    Menu {
        items: store.list_items().await.unwrap(),
        recipes: store.recipe_lines().await.unwrap(),
        ingredients: store.list_ingredients().await.unwrap(),
    }
}

fn solver() -> Arc<dyn Solver> {
    Arc::new(HighsSolver::new())
}

#[tokio::test]
async fn closed_form_is_never_beaten_by_grid_search() {
    let menu = bakery(dec!(10000)).await;
    let exact = build_engine(&PricingConfig::default(), solver())
        .run(&menu.input())
        .unwrap();
    let grid = build_engine(
        &PricingConfig {
            method: PricingMethod::GridSearch,
            grid_points: 50,
            ..PricingConfig::default()
        },
        solver(),
    )
    .run(&menu.input())
    .unwrap();

    assert!(exact.total_profit >= grid.total_profit);
}

#[tokio::test]
async fn short_milk_is_reported_for_every_method() {
    // Latte demand at its lowest price needs 10000 ml.
    let menu = bakery(dec!(500)).await;

    for method in [PricingMethod::ClosedForm, PricingMethod::GridSearch] {
        let outcome = build_engine(
            &PricingConfig {
                method,
                ..PricingConfig::default()
            },
            solver(),
        )
        .run(&menu.input())
        .unwrap();

        assert_eq!(outcome.shortages.len(), 1, "{method}");
        assert_eq!(outcome.shortages[0].ingredient, "Milk");
    }
}

#[tokio::test]
async fn enforced_inventory_keeps_usage_within_stock() {
    let menu = bakery(dec!(6000)).await;
    let outcome = build_engine(
        &PricingConfig {
            method: PricingMethod::Linearized,
            enforce_inventory: true,
            ..PricingConfig::default()
        },
        solver(),
    )
    .run(&menu.input())
    .unwrap();

    assert!(outcome.shortages.is_empty(), "{:?}", outcome.shortages);
    let latte = &outcome.items[1];
    assert!(latte.demand * dec!(200) <= dec!(6000.5));
    assert!(latte.price > dec!(2.99));
}

#[tokio::test]
async fn enforced_inventory_holds_for_elastic_items() {
    // The tart sells nothing at its top price, which must not leave its milk
    // share to the latte.
    let store = MemoryStore::new();
    let tart = store
        .add_item(
            &MenuItem::try_new(MenuItemSpec {
                name: "Custard Tart".into(),
                cost: dec!(10),
                current_price: None,
                min_price: dec!(3),
                max_price: dec!(6),
                base_demand: dec!(50),
                elasticity: dec!(2),
            })
            .unwrap(),
        )
        .await
        .unwrap();
    let latte = store
        .add_item(
            &MenuItem::try_new(MenuItemSpec {
                name: "Latte".into(),
                cost: dec!(0),
                current_price: None,
                min_price: dec!(3),
                max_price: dec!(6),
                base_demand: dec!(50),
                elasticity: dec!(0.8),
            })
            .unwrap(),
        )
        .await
        .unwrap();
    let milk = store
        .add_ingredient(
            &Ingredient::try_new(IngredientSpec {
                name: "Milk".into(),
                available_quantity: dec!(4000),
                unit: "ml".into(),
                cost_per_unit: dec!(0.002),
            })
            .unwrap(),
        )
        .await
        .unwrap();
    for item in [&tart, &latte] {
        let line =
            RecipeLine::try_new(item.id().unwrap(), milk.id().unwrap(), dec!(100)).unwrap();
        store.set_recipe_line(&line).await.unwrap();
    }
    let menu = Menu {
        items: store.list_items().await.unwrap(),
        recipes: store.recipe_lines().await.unwrap(),
        ingredients: store.list_ingredients().await.unwrap(),
    };

    let outcome = build_engine(
        &PricingConfig {
            method: PricingMethod::Linearized,
            enforce_inventory: true,
            ..PricingConfig::default()
        },
        solver(),
    )
    .run(&menu.input())
    .unwrap();

    assert!(outcome.shortages.is_empty(), "{:?}", outcome.shortages);
    assert_eq!(outcome.items[0].demand, dec!(0));
    assert!(outcome.items[1].demand <= dec!(40));
}

#[tokio::test]
async fn outcome_rows_follow_menu_order() {
    let menu = bakery(dec!(10000)).await;
    let outcome = build_engine(&PricingConfig::default(), solver())
        .run(&menu.input())
        .unwrap();

    let names: Vec<_> = outcome.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["Chocolate Cake", "Coffee Latte"]);
    assert!(outcome
        .items
        .iter()
        .all(|item| item.menu_item_id.is_some()));
}
