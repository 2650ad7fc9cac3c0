//! `token` subcommands. All of them share one database connection.

use std::sync::Arc;

use clap::{Args, Subcommand};
use hr_trainer_app::{database, tokens::PgTokenStore};

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    /// PostgreSQL connection string
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    action: TokenAction,
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    /// Issue a new single-use access token
    Create(create::CreateTokenArgs),

    /// Show active tokens (previews only)
    List,

    /// Revoke an active token by its record UUID
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or("--database-url or DATABASE_URL is required")?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let store = Arc::new(PgTokenStore::new(pool));

    match command.action {
        TokenAction::Create(args) => create::run(store, args).await,
        TokenAction::List => list::run(store.as_ref()).await,
        TokenAction::Revoke(args) => revoke::run(store.as_ref(), args).await,
    }
}
