//! In-memory token store.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::tokens::{
    AccessToken, NewTokenRecord, StoreError, TokenRecord, TokenRecordUuid, TokenStore,
    TokenTransition,
};

#[derive(Debug, Error)]
#[error("in-memory token store is offline")]
struct Offline;

#[derive(Debug, Default)]
struct Records {
    by_uuid: FxHashMap<TokenRecordUuid, TokenRecord>,
    by_token: FxHashMap<AccessToken, TokenRecordUuid>,
}

/// Mutex-guarded [`TokenStore`]. Every call is atomic.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    records: Mutex<Records>,
    offline: AtomicBool,
}

impl InMemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`] until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Look up a record by UUID regardless of status.
    pub async fn get(&self, uuid: TokenRecordUuid) -> Option<TokenRecord> {
        self.records.lock().await.by_uuid.get(&uuid).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.by_uuid.len()
    }

    /// Whether nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(Offline));
        }

        Ok(())
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn insert(&self, record: NewTokenRecord) -> Result<TokenRecord, StoreError> {
        self.ensure_online()?;

        let mut records = self.records.lock().await;

        if records.by_token.contains_key(&record.token) || records.by_uuid.contains_key(&record.uuid)
        {
            return Err(StoreError::AlreadyExists);
        }

        let record = TokenRecord::from(record);

        records.by_token.insert(record.token.clone(), record.uuid);
        records.by_uuid.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<TokenRecord>, StoreError> {
        self.ensure_online()?;

        let records = self.records.lock().await;

        Ok(records
            .by_token
            .get(token)
            .and_then(|uuid| records.by_uuid.get(uuid))
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<TokenRecord>, StoreError> {
        self.ensure_online()?;

        let records = self.records.lock().await;

        let mut active: Vec<TokenRecord> = records
            .by_uuid
            .values()
            .filter(|record| record.is_active())
            .cloned()
            .collect();

        active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.uuid.cmp(&a.uuid)));

        Ok(active)
    }

    async fn transition(
        &self,
        uuid: TokenRecordUuid,
        transition: TokenTransition,
        at: Timestamp,
    ) -> Result<Option<TokenRecord>, StoreError> {
        self.ensure_online()?;

        let mut records = self.records.lock().await;

        Ok(records
            .by_uuid
            .get_mut(&uuid)
            .filter(|record| record.is_active())
            .map(|record| {
                record.apply(transition, at);
                record.clone()
            }))
    }
}
