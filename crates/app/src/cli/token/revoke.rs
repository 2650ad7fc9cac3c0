use clap::Args;
use hr_trainer::tokens::{TokenRecordUuid, TokenStore, TokenTransition};
use jiff::Timestamp;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// Record UUID from `token list`
    #[arg(long)]
    token_uuid: Uuid,
}

/// Revokes through the store directly. A running server drops the token from its
/// board on the next refresh.
pub(crate) async fn run(store: &dyn TokenStore, args: RevokeTokenArgs) -> Result<(), String> {
    let uuid = TokenRecordUuid::from_uuid(args.token_uuid);

    let revoked = store
        .transition(uuid, TokenTransition::Revoke, Timestamp::now())
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    match revoked {
        Some(record) => println!("revoked token {uuid} (was due to expire {})", record.expires_at),
        None => println!("token {uuid} is not active; nothing to revoke"),
    }

    Ok(())
}
