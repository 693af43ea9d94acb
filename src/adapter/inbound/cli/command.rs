//! Command-line interface definitions.
//!
//! Defines the CLI structure for the feastfair application using `clap`.
//! Subcommands manage menu items, ingredients and recipes, run price
//! optimization, and view or export stored results.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::application::report::ExportFormat;
use crate::domain::{IngredientId, MenuItemId, PricingMethod, RunId};
use crate::error::Error;

/// Restaurant menu price optimization CLI
#[derive(Parser, Debug)]
#[command(name = "feastfair")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: feastfair.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the feastfair CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a documented configuration file
    Init(InitArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Manage menu items
    #[command(subcommand)]
    Item(ItemCommand),

    /// Manage ingredient stock
    #[command(subcommand)]
    Ingredient(IngredientCommand),

    /// Manage which ingredients each menu item uses
    #[command(subcommand)]
    Recipe(RecipeCommand),

    /// Choose profit-maximizing prices for every menu item
    Optimize(OptimizeArgs),

    /// View stored optimization runs
    #[command(subcommand)]
    Results(ResultsCommand),

    /// Export an optimization run as CSV or JSON
    Export(ExportArgs),

    /// Load sample bakery and café data
    Seed,
}

/// Arguments for `feastfair init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Subcommands for `feastfair config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Subcommands for `feastfair item`.
#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    /// Add a menu item.
    Add(ItemAddArgs),
    /// List menu items.
    List,
    /// Show one menu item with its recipe.
    Show {
        /// Menu item id
        id: MenuItemId,
    },
    /// Change fields of a menu item.
    Update(ItemUpdateArgs),
    /// Remove a menu item and its recipe.
    Remove {
        /// Menu item id
        id: MenuItemId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for `feastfair item add`.
#[derive(Args, Debug)]
pub struct ItemAddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Production cost per unit
    #[arg(long)]
    pub cost: Decimal,

    /// Lowest acceptable price
    #[arg(long)]
    pub min_price: Decimal,

    /// Highest acceptable price
    #[arg(long)]
    pub max_price: Decimal,

    /// Expected units sold at the lowest price
    #[arg(long)]
    pub demand: Decimal,

    /// Fraction of demand lost across the whole price range
    #[arg(long, allow_hyphen_values = true)]
    pub elasticity: Decimal,

    /// Price currently on the menu
    #[arg(long)]
    pub current_price: Option<Decimal>,
}

/// Arguments for `feastfair item update`.
#[derive(Args, Debug)]
pub struct ItemUpdateArgs {
    /// Menu item id
    pub id: MenuItemId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub cost: Option<Decimal>,

    #[arg(long)]
    pub min_price: Option<Decimal>,

    #[arg(long)]
    pub max_price: Option<Decimal>,

    #[arg(long)]
    pub demand: Option<Decimal>,

    #[arg(long, allow_hyphen_values = true)]
    pub elasticity: Option<Decimal>,

    #[arg(long, conflicts_with = "clear_current_price")]
    pub current_price: Option<Decimal>,

    /// Forget the current menu price
    #[arg(long)]
    pub clear_current_price: bool,
}

/// Subcommands for `feastfair ingredient`.
#[derive(Subcommand, Debug)]
pub enum IngredientCommand {
    /// Add an ingredient.
    Add(IngredientAddArgs),
    /// List ingredients and stock.
    List,
    /// Remove an ingredient and every recipe line using it.
    Remove {
        /// Ingredient id
        id: IngredientId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for `feastfair ingredient add`.
#[derive(Args, Debug)]
pub struct IngredientAddArgs {
    /// Unique name
    #[arg(long)]
    pub name: String,

    /// Quantity on hand
    #[arg(long)]
    pub available: Decimal,

    /// Unit the quantity is measured in (grams, ml, ...)
    #[arg(long)]
    pub unit: String,

    /// Purchase cost per unit
    #[arg(long)]
    pub cost_per_unit: Decimal,
}

/// Subcommands for `feastfair recipe`.
#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// Set how much of an ingredient one unit of an item uses.
    Set {
        item: MenuItemId,
        ingredient: IngredientId,
        quantity: Decimal,
    },
    /// Remove an ingredient from an item's recipe.
    Remove {
        item: MenuItemId,
        ingredient: IngredientId,
    },
    /// Show an item's recipe and ingredient cost.
    Show { item: MenuItemId },
}

/// Arguments for `feastfair optimize`.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Pricing method [closed-form, grid-search, linearized]
    #[arg(long)]
    pub method: Option<PricingMethod>,

    /// Candidate prices per item for grid search
    #[arg(long)]
    pub grid_points: Option<usize>,

    /// Keep ingredient use within stock (linearized method)
    #[arg(long, conflicts_with = "no_enforce_inventory")]
    pub enforce_inventory: bool,

    /// Ignore ingredient stock even if the config enforces it
    #[arg(long)]
    pub no_enforce_inventory: bool,

    /// Print results without saving a run
    #[arg(long)]
    pub dry_run: bool,
}

/// Subcommands for `feastfair results`.
#[derive(Subcommand, Debug)]
pub enum ResultsCommand {
    /// List recent runs, newest first.
    List {
        /// Maximum number of runs
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show every item of one run.
    Show {
        /// Run id or "latest"
        #[arg(default_value = "latest")]
        run: RunSelector,
    },
}

/// Arguments for `feastfair export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Run id or "latest"
    #[arg(default_value = "latest")]
    pub run: RunSelector,

    /// Document format [csv, json]
    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A run referenced on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSelector {
    Latest,
    Id(RunId),
}

impl FromStr for RunSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }
        s.parse::<i32>()
            .map(|id| Self::Id(RunId::new(id)))
            .map_err(|_| Error::Parse(format!("expected a run id or \"latest\", got '{s}'")))
    }
}

impl fmt::Display for RunSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_selector_parses_latest_and_ids() {
        assert_eq!("latest".parse::<RunSelector>().unwrap(), RunSelector::Latest);
        assert_eq!(
            "12".parse::<RunSelector>().unwrap(),
            RunSelector::Id(RunId::new(12))
        );
        assert!("yesterday".parse::<RunSelector>().is_err());
    }

    #[test]
    fn optimize_accepts_method_aliases() {
        let cli = Cli::try_parse_from(["feastfair", "optimize", "--method", "grid", "--dry-run"])
            .unwrap();
        let Commands::Optimize(args) = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(args.method, Some(PricingMethod::GridSearch));
        assert!(args.dry_run);
    }

    #[test]
    fn inventory_flags_are_exclusive() {
        let result = Cli::try_parse_from([
            "feastfair",
            "optimize",
            "--enforce-inventory",
            "--no-enforce-inventory",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn negative_elasticity_parses() {
        let cli = Cli::try_parse_from([
            "feastfair",
            "item",
            "add",
            "--name",
            "Wine",
            "--cost",
            "5",
            "--min-price",
            "10",
            "--max-price",
            "20",
            "--demand",
            "20",
            "--elasticity",
            "-0.5",
        ])
        .unwrap();
        let Commands::Item(ItemCommand::Add(args)) = cli.command else {
            panic!("expected item add");
        };
        assert_eq!(args.elasticity, Decimal::new(-5, 1));
    }
}
