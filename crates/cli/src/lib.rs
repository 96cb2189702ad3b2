pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "basketry",
    about = "Basketry cross-sell operator CLI",
    long_about = "Query cross-sell suggestions, inspect the co-occurrence index, and check effective configuration.",
    after_help = "Examples:\n  basketry suggest \"Stapler\"\n  basketry triples --limit 10\n  basketry stats --dataset data/orders.csv"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a basketry.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Dataset file path or http(s) URL, overriding config")]
    dataset: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank the products most frequently bought together with a product")]
    Suggest {
        #[arg(help = "Product to look up (display name, or product id with --by-id)")]
        product: String,
        #[arg(long, help = "Match by product id instead of product name")]
        by_id: bool,
        #[arg(long, help = "Maximum number of suggestions to print")]
        limit: Option<usize>,
    },
    #[command(about = "List indexed product triples, most frequent first")]
    Triples {
        #[arg(long, help = "Maximum number of triples to print")]
        limit: Option<usize>,
    },
    #[command(about = "Print dataset and index summary counters")]
    Stats,
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = commands::cli_load_options(cli.config, cli.dataset);

    let result = match cli.command {
        Command::Suggest { product, by_id, limit } => {
            commands::suggest::run(options, &product, by_id, limit)
        }
        Command::Triples { limit } => commands::triples::run(options, limit),
        Command::Stats => commands::stats::run(options),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(options) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
