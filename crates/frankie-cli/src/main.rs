//! frankie - a command-line client for the Frank Energie API.
//!
//! Authenticates once with email and password, keeps the token pair in the
//! user's config directory, renews it transparently and renders query
//! results as tables or JSON.

mod commands;
mod hints;
mod output;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use frankie_core::{Config, Country, OutputFormat, Settings};

#[derive(Debug, Parser)]
#[command(name = "frankie", version, about = "CLI tool for Frank Energie")]
struct Cli {
    /// Config file (default is <config dir>/frankie/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format: table or json
    #[arg(short, long, global = true, env = "FRANKIE_OUTPUT")]
    output: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long, global = true, env = "FRANKIE_VERBOSE")]
    verbose: bool,

    /// Country tenant to query: NL or BE
    #[arg(long, global = true, env = "FRANKIE_COUNTRY")]
    country: Option<Country>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Authenticate with Frank Energie
    Login(commands::login::LoginArgs),
    /// Clear stored credentials
    Logout,
    /// Show authentication status
    Status,
    /// Show user information
    User,
    /// Show energy prices
    Prices(commands::prices::PricesArgs),
    /// List user sites (delivery addresses)
    Sites,
    /// Execute a raw GraphQL query
    #[command(after_help = commands::api::EXAMPLES)]
    Api(commands::api::ApiArgs),
}

/// Default log filter when RUST_LOG is unset
fn default_log_filter(settings: &Settings) -> &'static str {
    if settings.verbose {
        "warn,frankie=debug,frankie_core=debug"
    } else {
        "warn"
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(settings)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(Settings::resolve(&config, cli.output, cli.country, cli.verbose))
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    debug!(?settings, "Settings resolved");

    match command {
        Command::Login(args) => commands::login::run(settings, args).await,
        Command::Logout => commands::logout::run(settings),
        Command::Status => commands::status::run(settings),
        Command::User => commands::user::run(settings).await,
        Command::Prices(args) => commands::prices::run(settings, args).await,
        Command::Sites => commands::sites::run(settings).await,
        Command::Api(args) => commands::api::run(settings, args).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let result = match load_settings(&cli) {
        Ok(settings) => {
            init_tracing(&settings);
            run(cli.command, &settings).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", hints::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
