//! QuickCart CLI - command-line shell for the storefront engine.
//!
//! Each invocation corresponds to one page load of the storefront: persisted
//! session state (cart, preferences, profile) is read at startup, mutated
//! through engine operations, and written back before exit.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! quickcart browse --search shirt --sort price-low
//!
//! # Manage the cart
//! quickcart cart add 14
//! quickcart cart update 14 3
//! quickcart cart show
//!
//! # Place an order
//! quickcart checkout --first-name Ada --last-name Lovelace \
//!     --email ada@example.com --phone 555-0100 \
//!     --address "1 Analytical Way" --city London --zip-code "E1 6AN"
//!
//! # Account
//! quickcart account signup --username ada --email ada@example.com \
//!     --password pw --confirm-password pw
//! quickcart account show
//! quickcart account orders
//!
//! # Toggle the theme
//! quickcart theme
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)] // command output is the product

use clap::{Parser, Subcommand};

use quickcart_storefront::config::StorefrontConfig;
use quickcart_storefront::state::{AppState, Session};

mod commands;

#[derive(Parser)]
#[command(name = "quickcart")]
#[command(author, version, about = "QuickCart storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product listing
    Browse {
        /// Match products whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Keep only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Sort ordering (default, price-low, price-high, name-asc, name-desc)
        #[arg(long, default_value = "default")]
        sort: quickcart_storefront::catalog::SortMode,

        /// List the available categories instead of products
        #[arg(long)]
        categories: bool,
    },
    /// Show or mutate the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Validate the checkout form and place an order
    Checkout(commands::checkout::CheckoutArgs),
    /// View or create the account
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Toggle between dark and light theme
    Theme,
}

#[tokio::main]
async fn main() {
    // Default to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickcart=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;
    let mut session = Session::load(&state);

    match cli.command {
        Commands::Browse {
            search,
            category,
            sort,
            categories,
        } => commands::browse::run(&state, search, category, sort, categories).await?,
        Commands::Cart { action } => commands::cart::run(&state, &mut session, action).await?,
        Commands::Checkout(args) => commands::checkout::run(&mut session, args).await?,
        Commands::Account { action } => commands::account::run(&state, action)?,
        Commands::Theme => commands::theme::run(&state, &mut session)?,
    }
    Ok(())
}
