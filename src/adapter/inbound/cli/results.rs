//! Handlers for the `results` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::RunSelector;
use crate::adapter::inbound::cli::{output, table};
use crate::domain::{IngredientShortage, OptimizationRun};
use crate::error::{Error, Result};
use crate::port::RunStore;

/// Look up the run named on the command line.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the run does not exist or no run has
/// been saved yet.
pub async fn resolve<S: RunStore>(store: &S, selector: RunSelector) -> Result<OptimizationRun> {
    match selector {
        RunSelector::Latest => store
            .latest_run()
            .await?
            .ok_or_else(|| Error::not_found("optimization run", "latest")),
        RunSelector::Id(id) => store
            .get_run(id)
            .await?
            .ok_or_else(|| Error::not_found("optimization run", id)),
    }
}

/// Execute `results list`.
pub async fn list<S: RunStore>(store: &S, limit: usize) -> Result<()> {
    let runs = store.list_runs(limit).await?;

    if output::is_json() {
        let runs: Vec<_> = runs
            .iter()
            .map(|run| {
                json!({
                    "id": run.id,
                    "created_at": run.created_at,
                    "method": run.outcome.method,
                    "items": run.outcome.items.len(),
                    "total_profit": run.outcome.total_profit,
                })
            })
            .collect();
        output::json_output(json!({ "command": "results.list", "runs": runs }));
        return Ok(());
    }
    if runs.is_empty() {
        output::note("No optimization runs yet.");
        output::hint(&format!("run {}", output::highlight("feastfair optimize")));
        return Ok(());
    }
    output::lines(&table::runs(&runs));
    Ok(())
}

/// Execute `results show`.
pub async fn show<S: RunStore>(store: &S, selector: RunSelector) -> Result<()> {
    let run = resolve(store, selector).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "results.show", "run": run }));
        return Ok(());
    }
    print_run(&run);
    Ok(())
}

/// Header fields, item table and shortages of a stored run.
pub fn print_run(run: &OptimizationRun) {
    output::section(&format!("Run {}", run.id));
    output::field("Created", run.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    output::field("Method", run.outcome.method);
    output::lines(&table::outcome(&run.outcome));
    print_shortages(&run.outcome.shortages);
}

/// Shortage table with a warning, or nothing when stock suffices.
pub fn print_shortages(shortages: &[IngredientShortage]) {
    if shortages.is_empty() {
        return;
    }
    output::warning(&format!(
        "{} ingredient(s) would run short at these prices",
        shortages.len()
    ));
    output::lines(&table::shortages(shortages));
}
