use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod controller;
mod events;
mod profile;
mod render;
mod repl;
mod state;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = profile::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    // Building needs no loaded dictionary
    let command = match cli.command {
        Command::Build { input, output } => return commands::build(&input, &output),
        command => command,
    };

    let state = Arc::new(AppState::new(config));
    state.load_dictionary().await?;

    match command {
        Command::Search { query } => commands::search(&state, &query).await,
        Command::English { query } => commands::english(&state, &query).await,
        Command::Word { sentence, index } => commands::word(&state, &sentence, index),
        Command::Split { sentence } => commands::split(&state, &sentence).await,
        Command::Repl => repl::run(state).await,
        Command::Build { .. } => unreachable!("build runs before the dictionary loads"),
    }
}
