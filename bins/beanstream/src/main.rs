//! Beanstream CLI - payments and payment profiles from the terminal

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{OutputFormat, pay, profile};

/// Payments and payment profiles against the Beanstream REST API
#[derive(Parser)]
#[command(name = "beanstream")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file (defaults to BEANSTREAM_* environment variables)
    #[arg(short, long, global = true, env = "BEANSTREAM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output, including redacted request/response bodies
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Charge a card
    Pay {
        /// Amount to charge
        #[arg(short, long)]
        amount: f64,

        /// Card number
        #[arg(long)]
        card_number: String,

        /// Cardholder name
        #[arg(long)]
        name: String,

        /// Expiry month (MM)
        #[arg(long)]
        expiry_month: String,

        /// Expiry year (YY)
        #[arg(long)]
        expiry_year: String,

        /// Card verification digits
        #[arg(long)]
        cvd: Option<String>,

        /// Merchant order number
        #[arg(short, long)]
        order_number: Option<String>,

        /// Authorize only, without capturing funds
        #[arg(long)]
        pre_auth: bool,
    },

    /// Manage payment profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show a profile
    Get {
        /// Profile ID
        id: String,
    },

    /// Delete a profile
    Delete {
        /// Profile ID
        id: String,
    },

    /// List the cards on a profile
    Cards {
        /// Profile ID
        id: String,
    },

    /// Show one card on a profile
    Card {
        /// Profile ID
        id: String,

        /// Card index (1-based)
        card_id: String,
    },

    /// Remove a card from a profile
    RemoveCard {
        /// Profile ID
        id: String,

        /// Card index (1-based)
        card_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "beanstream=debug,beanstream_client=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::Context {
        config: cli.config,
        verbose: cli.verbose,
        format: cli.format,
    };

    let result = match cli.command {
        Commands::Pay {
            amount,
            card_number,
            name,
            expiry_month,
            expiry_year,
            cvd,
            order_number,
            pre_auth,
        } => {
            let args = pay::PayArgs {
                amount,
                card_number,
                name,
                expiry_month,
                expiry_year,
                cvd,
                order_number,
                pre_auth,
            };
            pay::run(&ctx, args).await
        }

        Commands::Profile { action } => match action {
            ProfileAction::Get { id } => profile::get(&ctx, &id).await,
            ProfileAction::Delete { id } => profile::delete(&ctx, &id).await,
            ProfileAction::Cards { id } => profile::cards(&ctx, &id).await,
            ProfileAction::Card { id, card_id } => profile::card(&ctx, &id, &card_id).await,
            ProfileAction::RemoveCard { id, card_id } => {
                profile::remove_card(&ctx, &id, &card_id).await
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<beanstream_client::Error>().and_then(|api| api.status()) {
                Some(status) => eprintln!("{} (HTTP {status}) {}", "Error:".red().bold(), e),
                None => eprintln!("{} {}", "Error:".red().bold(), e),
            }
            ExitCode::FAILURE
        }
    }
}
