pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

#[cfg(test)]
mod fixtures {
    use hr_trainer::tokens::{AccessToken, TokenRecord, TokenRecordUuid, TokenStatus};
    use jiff::Timestamp;

    pub(super) fn active_record(token: &str) -> TokenRecord {
        TokenRecord {
            uuid: TokenRecordUuid::new(),
            token: AccessToken::new(token),
            status: TokenStatus::Active,
            created_at: Timestamp::UNIX_EPOCH,
            expires_at: Timestamp::MAX,
            used_at: None,
            revoked_at: None,
        }
    }
}
