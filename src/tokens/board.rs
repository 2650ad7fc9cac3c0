//! Admin view of active tokens.

use std::{sync::Arc, time::Duration};

use rustc_hash::FxHashSet;
use tokio::{sync::RwLock, task::JoinHandle, time::MissedTickBehavior};
use tracing::warn;

use crate::tokens::{IssuedToken, TokenError, TokenRecord, TokenRecordUuid, TokenService, TokenTtl};

/// How often the board reloads from the store.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Cached list of active tokens.
///
/// Revocation removes the entry from the cache before the store confirms it. A revoked
/// entry stays masked until a listing no longer returns it, so a refresh that read the
/// store before the revoke landed cannot bring it back.
pub struct ActiveTokenBoard {
    service: Arc<dyn TokenService>,
    cache: RwLock<Cache>,
}

#[derive(Debug, Default)]
struct Cache {
    entries: Vec<TokenRecord>,
    revoked: FxHashSet<TokenRecordUuid>,
}

impl std::fmt::Debug for ActiveTokenBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveTokenBoard").finish_non_exhaustive()
    }
}

impl ActiveTokenBoard {
    #[must_use]
    pub fn new(service: Arc<dyn TokenService>) -> Self {
        Self {
            service,
            cache: RwLock::new(Cache::default()),
        }
    }

    /// Cached entries, newest first.
    pub async fn entries(&self) -> Vec<TokenRecord> {
        self.cache.read().await.entries.clone()
    }

    /// Reload the cache from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if listing fails. The cache is left as it was.
    pub async fn refresh(&self) -> Result<Vec<TokenRecord>, TokenError> {
        let mut active = self.service.list_active().await?;

        let mut cache = self.cache.write().await;
        let Cache { entries, revoked } = &mut *cache;

        revoked.retain(|uuid| active.iter().any(|record| record.uuid == *uuid));
        active.retain(|record| !revoked.contains(&record.uuid));
        entries.clone_from(&active);

        Ok(active)
    }

    /// Issue a token and reload the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if issuance fails. A failed reload is only logged.
    pub async fn issue(&self, ttl: TokenTtl) -> Result<IssuedToken, TokenError> {
        let issued = self.service.issue(ttl).await?;

        if let Err(error) = self.refresh().await {
            warn!(kind = %error.kind(), "token list refresh after issue failed");
        }

        Ok(issued)
    }

    /// Drop the entry from the cache, then revoke it in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails. The entry stays hidden until the next
    /// refresh.
    pub async fn revoke(&self, uuid: TokenRecordUuid) -> Result<bool, TokenError> {
        {
            let mut cache = self.cache.write().await;
            cache.entries.retain(|record| record.uuid != uuid);
            cache.revoked.insert(uuid);
        }

        let revoked = self.service.revoke(uuid).await;

        if revoked.is_err() {
            self.cache.write().await.revoked.remove(&uuid);
        }

        revoked
    }

    /// Refresh on a fixed interval until the returned task is aborted.
    pub fn spawn_refresh(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let board = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if let Err(error) = board.refresh().await {
                    warn!(kind = %error.kind(), "periodic token list refresh failed");
                }
            }
        })
    }
}
