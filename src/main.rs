mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use kodion::config::Config;
use kodion::network::Session;
use kodion::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch(&config, args).await,
        Commands::Favorites(command) => commands::favorites(&config, command),
        Commands::Config => commands::show_config(&config),
    };

    Session::shutdown();
    result
}
