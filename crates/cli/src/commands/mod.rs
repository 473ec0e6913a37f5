//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;
pub mod settings;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Repository error from the storefront crate.
    #[error("{0}")]
    Repository(#[from] quickcart_storefront::db::RepositoryError),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the store database using the same variables the server reads.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let url = std::env::var("QUICKCART_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("QUICKCART_DATABASE_URL"))?;

    let pool = quickcart_storefront::db::create_pool(&SecretString::from(url)).await?;
    Ok(pool)
}
