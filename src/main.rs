use std::fs::File;
use std::process;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use colored::*;
use gh_stars::app;
use gh_stars::cli::{Cli, USAGE};
use gh_stars::config::Config;
use gh_stars::error::StarsError;
use gh_stars::github::GitHubClient;
use gh_stars::repo;
use gh_stars::session::Session;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    if cli.debug {
        init_debug_log()?;
    }

    let repo = match repo::resolve(cli.repository.as_deref()) {
        Ok(repo) => repo,
        Err(StarsError::NoRepository) => {
            eprintln!("{} no repository specified\n\n{}", "Error:".red().bold(), USAGE);
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let config = Config::from_env().context("invalid configuration")?;
    let client = Arc::new(GitHubClient::from_config(&config).context("failed to create GitHub client")?);
    let session = Session::new(repo, config);

    let mut terminal = ratatui::init();
    let result = app::run(&mut terminal, client, session).await;
    ratatui::restore();

    Ok(result?)
}

/// Logs go to a file since the terminal belongs to the UI.
fn init_debug_log() -> anyhow::Result<()> {
    let file = File::create("debug.txt").context("failed to create debug.txt")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
