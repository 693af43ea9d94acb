//! Handler for the `optimize` command.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::adapter::inbound::cli::command::OptimizeArgs;
use crate::adapter::inbound::cli::{output, results, table};
use crate::adapter::outbound::solver::HighsSolver;
use crate::application::pricing::{build_engine, PricingConfig, PricingInput};
use crate::domain::PricingMethod;
use crate::error::Result;
use crate::port::Store;

/// Merge command-line flags over the `[pricing]` section.
#[must_use]
pub fn effective_config(base: &PricingConfig, args: &OptimizeArgs) -> PricingConfig {
    PricingConfig {
        method: args.method.unwrap_or(base.method),
        grid_points: args.grid_points.unwrap_or(base.grid_points),
        round_dp: base.round_dp,
        enforce_inventory: if args.enforce_inventory {
            true
        } else if args.no_enforce_inventory {
            false
        } else {
            base.enforce_inventory
        },
    }
}

/// Execute `optimize`.
pub async fn execute<S: Store>(store: &S, base: &PricingConfig, args: &OptimizeArgs) -> Result<()> {
    let config = effective_config(base, args);

    let items = store.list_items().await?;
    let ingredients = store.list_ingredients().await?;
    let recipes = store.recipe_lines().await?;
    let input = PricingInput {
        items: &items,
        recipes: &recipes,
        ingredients: &ingredients,
    };

    let engine = build_engine(&config, Arc::new(HighsSolver::new()));
    let outcome = engine.run(&input)?;

    let run = if args.dry_run {
        None
    } else {
        let run = store.save_run(&outcome).await?;
        info!(run_id = %run.id, "Saved optimization run");
        Some(run)
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "optimize",
            "run_id": run.as_ref().map(|run| run.id),
            "dry_run": args.dry_run,
            "method": outcome.method,
            "items": outcome.items,
            "total_profit": outcome.total_profit,
            "shortages": outcome.shortages,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Method", outcome.method);
    if config.method == PricingMethod::GridSearch {
        output::field("Grid points", config.grid_points);
    }
    if config.method == PricingMethod::Linearized {
        output::field(
            "Inventory",
            if config.enforce_inventory {
                "enforced"
            } else {
                "reported only"
            },
        );
    } else if config.enforce_inventory {
        output::note("inventory limits are enforced by the linearized method only");
    }

    output::section("Optimized prices");
    output::lines(&table::outcome(&outcome));
    results::print_shortages(&outcome.shortages);

    match run {
        Some(run) => {
            output::success(&format!("Saved as run {}", output::highlight(run.id)));
            output::hint(&format!(
                "run {} to download it",
                output::highlight(format!("feastfair export {}", run.id))
            ));
        }
        None => output::note("Dry run: results were not saved."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::domain::{MenuItem, MenuItemSpec};
    use crate::error::{Error, PricingError};
    use crate::port::{MenuStore, RunStore};
    use rust_decimal_macros::dec;

    fn args() -> OptimizeArgs {
        OptimizeArgs {
            method: None,
            grid_points: None,
            enforce_inventory: false,
            no_enforce_inventory: false,
            dry_run: false,
        }
    }

    async fn seed_cake(store: &MemoryStore) {
        store
            .add_item(
                &MenuItem::try_new(MenuItemSpec {
                    name: "Cake".into(),
                    cost: dec!(2),
                    current_price: Some(dec!(4.99)),
                    min_price: dec!(4),
                    max_price: dec!(8),
                    base_demand: dec!(20),
                    elasticity: dec!(0.5),
                })
                .unwrap(),
            )
            .await
            .unwrap();
    }

    #[test]
    fn flags_override_config() {
        let base = PricingConfig {
            grid_points: 50,
            ..PricingConfig::default()
        };
        let config = effective_config(
            &base,
            &OptimizeArgs {
                method: Some(PricingMethod::GridSearch),
                grid_points: Some(11),
                ..args()
            },
        );
        assert_eq!(config.method, PricingMethod::GridSearch);
        assert_eq!(config.grid_points, 11);
        assert_eq!(config.round_dp, 2);
    }

    #[test]
    fn inventory_flag_can_switch_off_config() {
        let base = PricingConfig {
            enforce_inventory: true,
            ..PricingConfig::default()
        };
        assert!(effective_config(&base, &args()).enforce_inventory);

        let off = effective_config(
            &base,
            &OptimizeArgs {
                no_enforce_inventory: true,
                ..args()
            },
        );
        assert!(!off.enforce_inventory);

        let on = effective_config(
            &PricingConfig::default(),
            &OptimizeArgs {
                enforce_inventory: true,
                ..args()
            },
        );
        assert!(on.enforce_inventory);
    }

    #[tokio::test]
    async fn empty_menu_fails() {
        let store = MemoryStore::new();
        let result = execute(&store, &PricingConfig::default(), &args()).await;
        assert!(matches!(result, Err(Error::Pricing(PricingError::EmptyMenu))));
    }

    #[tokio::test]
    async fn saves_run_unless_dry_run() {
        let store = MemoryStore::new();
        seed_cake(&store).await;

        execute(
            &store,
            &PricingConfig::default(),
            &OptimizeArgs {
                dry_run: true,
                ..args()
            },
        )
        .await
        .unwrap();
        assert!(store.latest_run().await.unwrap().is_none());

        execute(&store, &PricingConfig::default(), &args())
            .await
            .unwrap();
        let run = store.latest_run().await.unwrap().unwrap();
        assert_eq!(run.outcome.items[0].price, dec!(7.00));
        assert_eq!(run.outcome.total_profit, dec!(62.50));
    }
}
