//! Green Basket CLI - Catalog browsing and session replay tools.
//!
//! # Usage
//!
//! ```bash
//! # List categories
//! greenbasket categories
//!
//! # Show a category's products
//! greenbasket category seasonal
//!
//! # Search products
//! greenbasket search apple
//!
//! # Replay a scripted shopping session
//! greenbasket replay session.yaml --json
//! ```
//!
//! # Commands
//!
//! - `categories` - List home screen categories
//! - `category` - Show one category screen
//! - `search` - Search products by name
//! - `replay` - Replay shopper actions and show the resulting cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use greenbasket_cart::{GreenbasketConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "greenbasket")]
#[command(author, version, about = "Green Basket CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product categories
    Categories,
    /// Show the products in a category
    Category {
        /// Category slug (e.g. `fruits`, `non-seasonal`)
        slug: String,
    },
    /// Search products by name
    Search {
        /// Case-insensitive name fragment
        query: String,
    },
    /// Replay a YAML script of shopper actions
    Replay {
        /// Path to the script file
        script: String,

        /// Print the replay report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "greenbasket=info,greenbasket_cart=info".into());

    let json_layer = (format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (format == LogFormat::Text)
        .then(|| tracing_subscriber::fmt::layer().with_target(false).without_time());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = GreenbasketConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result: Result<(), Box<dyn std::error::Error>> = config
        .map_err(Into::into)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &GreenbasketConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Categories => commands::catalog::categories(config)?,
        Commands::Category { slug } => commands::catalog::category(config, &slug)?,
        Commands::Search { query } => commands::catalog::search(config, &query)?,
        Commands::Replay { script, json } => commands::replay::run(config, &script, json)?,
    }
    Ok(())
}
