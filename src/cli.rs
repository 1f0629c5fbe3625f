use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gh-stars")]
#[command(about = "Show the stargazer history of a GitHub repository as a graph or table")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Repository as owner/name (defaults to the current git repository)
    pub repository: Option<String>,

    /// Write debug logs to debug.txt
    #[arg(short, long)]
    pub debug: bool,
}

pub const USAGE: &str = "Usage: gh-stars [repository]";
