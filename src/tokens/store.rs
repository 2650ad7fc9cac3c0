//! Token persistence seam.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::tokens::{
    AccessToken, NewTokenRecord, StoreError, TokenRecord, TokenRecordUuid, TokenTransition,
};

/// Persistence for token records.
///
/// `transition` must be a conditional update: it applies only while the record is still
/// active, so two concurrent callers can never both succeed.
#[automock]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a new active record.
    async fn insert(&self, record: NewTokenRecord) -> Result<TokenRecord, StoreError>;

    /// Find a record by its exact token string.
    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<TokenRecord>, StoreError>;

    /// Active records, newest first.
    async fn list_active(&self) -> Result<Vec<TokenRecord>, StoreError>;

    /// Move an active record to the transition's target status.
    ///
    /// Returns `None` when the record is missing or no longer active.
    async fn transition(
        &self,
        uuid: TokenRecordUuid,
        transition: TokenTransition,
        at: Timestamp,
    ) -> Result<Option<TokenRecord>, StoreError>;
}
