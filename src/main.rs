use clap::Parser;
use feastfair::adapter::inbound::cli::command::Cli;
use feastfair::adapter::inbound::cli::output::{self, OutputConfig};
use feastfair::adapter::inbound::cli::run;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = run::execute(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
