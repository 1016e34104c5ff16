use std::net::SocketAddr;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trivia_core::DEFAULT_PAGE_SIZE;

#[derive(Debug, Parser)]
#[command(name = "trivia", version, about = "JSON API for a trivia question bank")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// SQLite database URL
    #[arg(long, env = "TRIVIA_DB_URL", default_value = "sqlite:trivia.sqlite3", global = true)]
    pub db: String,

    /// Address to listen on
    #[arg(long, env = "TRIVIA_BIND", default_value = "127.0.0.1:5000", global = true)]
    pub bind: SocketAddr,

    /// Questions per page
    #[arg(
        long,
        env = "TRIVIA_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = parse_page_size,
        global = true
    )]
    pub page_size: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Insert the standard categories and starter questions into an empty database
    Seed,
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("page size must be greater than zero".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
