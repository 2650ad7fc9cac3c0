use std::sync::Arc;

use clap::Args;
use hr_trainer::{
    clock::SystemClock,
    tokens::{TokenLifecycle, TokenSecret, TokenService, TokenTtl},
};
use hr_trainer_app::tokens::PgTokenStore;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Secret used to sign access tokens
    #[arg(long, env = "TOKEN_SIGNING_SECRET", hide_env_values = true)]
    signing_secret: String,

    /// Token lifetime in hours: 1, 6, 12, 24, 72 or 168
    #[arg(long, default_value_t = TokenTtl::default().hours(), value_parser = parse_ttl)]
    ttl_hours: u32,
}

fn parse_ttl(value: &str) -> Result<u32, String> {
    let hours: u32 = value.parse().map_err(|error: std::num::ParseIntError| error.to_string())?;

    TokenTtl::try_from(hours).map_err(|error| error.to_string())?;

    Ok(hours)
}

pub(crate) async fn run(store: Arc<PgTokenStore>, args: CreateTokenArgs) -> Result<(), String> {
    let ttl = TokenTtl::try_from(args.ttl_hours).map_err(|error| error.to_string())?;

    if args.signing_secret.is_empty() {
        return Err("signing secret cannot be empty".to_string());
    }

    let issued = TokenLifecycle::new(
        store,
        TokenSecret::from(args.signing_secret),
        Arc::new(SystemClock),
    )
    .issue(ttl)
    .await
    .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.record.uuid);
    println!("expires_at: {} ({} hours)", issued.record.expires_at, ttl.hours());
    println!("access_token: {}", issued.token.as_str());
    println!("hand this token to one candidate; it unlocks exactly once");

    Ok(())
}
