mod api;
mod cli;
mod config;
mod roster;
mod services;

use clap::Parser;
use colored::*;

use crate::cli::Cli;
use crate::config::Settings;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?.with_env(|key| std::env::var(key).ok());
    cli::commands::run(cli.command, settings).await
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine, the variables may be set directly
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}
