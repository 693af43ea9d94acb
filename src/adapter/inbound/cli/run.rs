//! Command dispatch.

use crate::adapter::inbound::cli::command::{
    Cli, Commands, ConfigCommand, IngredientCommand, ItemCommand, RecipeCommand, ResultsCommand,
};
use crate::adapter::inbound::cli::context::{self, Context};
use crate::adapter::inbound::cli::{
    config, export, ingredient, item, optimize, recipe, results, seed,
};
use crate::error::Result;
use crate::infrastructure::config::LoggingConfig;

/// Initialize logging and run the selected command.
pub async fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        verbose,
        command,
        ..
    } = cli;

    if let Commands::Init(args) = &command {
        LoggingConfig::default().init(verbose);
        return config::execute_init(&context::config_path(config_path.as_deref()), args.force);
    }

    let context = Context::load(config_path.as_deref())?;
    context.config.init_logging(verbose);

    match command {
        Commands::Init(_) => Ok(()),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&context),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&context),
        Commands::Item(command) => {
            let store = context.open_store()?;
            match command {
                ItemCommand::Add(args) => item::add(&store, args).await,
                ItemCommand::List => item::list(&store).await,
                ItemCommand::Show { id } => item::show(&store, id).await,
                ItemCommand::Update(args) => item::update(&store, args).await,
                ItemCommand::Remove { id, yes } => item::remove(&store, id, yes).await,
            }
        }
        Commands::Ingredient(command) => {
            let store = context.open_store()?;
            match command {
                IngredientCommand::Add(args) => ingredient::add(&store, args).await,
                IngredientCommand::List => ingredient::list(&store).await,
                IngredientCommand::Remove { id, yes } => ingredient::remove(&store, id, yes).await,
            }
        }
        Commands::Recipe(command) => {
            let store = context.open_store()?;
            match command {
                RecipeCommand::Set {
                    item,
                    ingredient,
                    quantity,
                } => recipe::set(&store, item, ingredient, quantity).await,
                RecipeCommand::Remove { item, ingredient } => {
                    recipe::remove(&store, item, ingredient).await
                }
                RecipeCommand::Show { item } => recipe::show(&store, item).await,
            }
        }
        Commands::Optimize(args) => {
            let store = context.open_store()?;
            optimize::execute(&store, &context.config.pricing, &args).await
        }
        Commands::Results(command) => {
            let store = context.open_store()?;
            match command {
                ResultsCommand::List { limit } => results::list(&store, limit).await,
                ResultsCommand::Show { run } => results::show(&store, run).await,
            }
        }
        Commands::Export(args) => {
            let store = context.open_store()?;
            export::execute(&store, &args).await
        }
        Commands::Seed => {
            let store = context.open_store()?;
            seed::execute(&store).await
        }
    }
}
