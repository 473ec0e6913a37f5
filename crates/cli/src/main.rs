//! QuickCart CLI - migrations and store management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (store schema + session store)
//! qc-cli migrate
//!
//! # Seed a sample grocery catalog
//! qc-cli seed
//!
//! # Grant or revoke admin access for an existing account
//! qc-cli admin grant -e admin@example.com
//! qc-cli admin revoke -e admin@example.com
//!
//! # Inspect or change store settings
//! qc-cli settings show
//! qc-cli settings set --ai-search false
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use quickcart_core::SettingsUpdate;

mod commands;

#[derive(Parser)]
#[command(name = "qc-cli")]
#[command(author, version, about = "QuickCart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed a sample grocery catalog
    Seed,
    /// Manage admin access
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Inspect or change store settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant admin access to an existing account
    Grant {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Revoke admin access
    Revoke {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings
    Show,
    /// Apply a partial update (omitted flags are left unchanged)
    Set {
        /// Whether new users may register
        #[arg(long)]
        signups: Option<bool>,

        /// Whether search queries are normalized by the AI assistant
        #[arg(long)]
        ai_search: Option<bool>,

        /// Whether voice search is available (requires AI search)
        #[arg(long)]
        voice_search: Option<bool>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
        Commands::Admin { action } => match action {
            AdminAction::Grant { email } => commands::admin::set_admin(&email, true).await,
            AdminAction::Revoke { email } => commands::admin::set_admin(&email, false).await,
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show().await,
            SettingsAction::Set {
                signups,
                ai_search,
                voice_search,
            } => {
                commands::settings::set(SettingsUpdate {
                    signups_enabled: signups,
                    ai_search_enabled: ai_search,
                    voice_search_enabled: voice_search,
                })
                .await
            }
        },
    }
}
