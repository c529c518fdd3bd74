use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kodion::humanize::HumanDuration;

#[derive(Parser, Debug)]
#[command(name = "kodion")]
#[command(about = "kodion plugin core CLI", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $KODION_CONFIG or config/kodion.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Perform one request through the pooled client
    Fetch(FetchArgs),

    /// Inspect or edit the favorites list
    #[command(subcommand)]
    Favorites(FavoritesCommand),

    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    pub url: String,

    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Extra header as `Name: value`; may be repeated
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Query parameter as `name=value`; may be repeated
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,

    /// Per-request timeout such as `5s` or `500ms`
    #[arg(long)]
    pub timeout: Option<HumanDuration>,

    /// Decode and pretty-print the body as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail with the request error instead of only logging it
    #[arg(long)]
    pub raise: bool,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// List favorites sorted by name
    List {
        /// Print records as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Remove a favorite by item id
    Remove { id: String },

    /// Remove every favorite
    Clear,
}
