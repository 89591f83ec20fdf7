//! Golazo CLI - Database migrations and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (schema + session store)
//! golazo-cli migrate
//!
//! # Seed the default discount codes
//! golazo-cli seed discounts
//!
//! # Seed the demo catalog
//! golazo-cli seed catalog
//!
//! # Seed everything
//! golazo-cli seed all
//!
//! # Show discount redemption statistics
//! golazo-cli discounts stats
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed discounts and/or the demo catalog
//! - `discounts stats` - Print per-code redemption statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "golazo-cli")]
#[command(author, version, about = "Golazo CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed database content
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Discount code reporting
    Discounts {
        #[command(subcommand)]
        action: DiscountAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed the default discount codes
    Discounts,
    /// Seed the demo jersey/pack catalog
    Catalog,
    /// Seed discounts and catalog
    All,
}

#[derive(Subcommand)]
enum DiscountAction {
    /// Show per-code redemption statistics
    Stats,
    /// Deactivate a code so future checks reject it
    Deactivate {
        /// The code to deactivate (case-insensitive)
        code: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Discounts => commands::seed::discounts().await?,
            SeedTarget::Catalog => commands::seed::catalog().await?,
            SeedTarget::All => {
                commands::seed::discounts().await?;
                commands::seed::catalog().await?;
            }
        },
        Commands::Discounts { action } => match action {
            DiscountAction::Stats => commands::seed::discount_stats().await?,
            DiscountAction::Deactivate { code } => {
                commands::seed::deactivate_discount(&code).await?;
            }
        },
    }
    Ok(())
}
