//! Token lifecycle: issue, verify and consume, revoke.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    tokens::{
        AccessToken, NewTokenRecord, SignedToken, TokenError, TokenRecord, TokenRecordUuid,
        TokenSecret, TokenStore, TokenTransition, TokenTtl, codec,
    },
};

/// Newly issued token with its persisted record.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Raw token, handed to the candidate once.
    pub token: AccessToken,

    /// Stored record.
    pub record: TokenRecord,
}

#[automock]
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Encode and persist a new active token.
    ///
    /// Nothing is returned unless the record was stored.
    async fn issue(&self, ttl: TokenTtl) -> Result<IssuedToken, TokenError>;

    /// Verify a token and mark it used.
    ///
    /// Succeeds for exactly one caller per token.
    async fn verify_and_consume(&self, token: &str) -> Result<TokenRecord, TokenError>;

    /// Revoke an active token. Returns `false` if it was not active.
    async fn revoke(&self, uuid: TokenRecordUuid) -> Result<bool, TokenError>;

    /// Active tokens, newest first.
    async fn list_active(&self) -> Result<Vec<TokenRecord>, TokenError>;
}

/// [`TokenService`] over a [`TokenStore`].
#[derive(Clone)]
pub struct TokenLifecycle {
    store: Arc<dyn TokenStore>,
    secret: TokenSecret,
    clock: Arc<dyn Clock>,
}

impl TokenLifecycle {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, secret: TokenSecret, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            secret,
            clock,
        }
    }
}

impl fmt::Debug for TokenLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenLifecycle")
            .field("secret", &self.secret)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenService for TokenLifecycle {
    async fn issue(&self, ttl: TokenTtl) -> Result<IssuedToken, TokenError> {
        let now = self.clock.now();
        let SignedToken { token, payload } = codec::issue(&self.secret, ttl, now)?;

        let record = self
            .store
            .insert(NewTokenRecord {
                uuid: TokenRecordUuid::new(),
                token: token.clone(),
                created_at: now,
                expires_at: payload.expires_at().unwrap_or(Timestamp::MAX),
            })
            .await?;

        info!(token_uuid = %record.uuid, %ttl, "issued access token");

        Ok(IssuedToken { token, record })
    }

    async fn verify_and_consume(&self, token: &str) -> Result<TokenRecord, TokenError> {
        let now = self.clock.now();

        codec::verify(token, &self.secret, now)?;

        let record = self
            .store
            .find_by_token(&AccessToken::new(token))
            .await?
            .filter(TokenRecord::is_active)
            .ok_or(TokenError::NotFoundOrConsumed)?;

        let consumed = self
            .store
            .transition(record.uuid, TokenTransition::Consume, now)
            .await?
            .ok_or(TokenError::NotFoundOrConsumed)?;

        debug!(token_uuid = %consumed.uuid, "consumed access token");

        Ok(consumed)
    }

    async fn revoke(&self, uuid: TokenRecordUuid) -> Result<bool, TokenError> {
        let revoked = self
            .store
            .transition(uuid, TokenTransition::Revoke, self.clock.now())
            .await?
            .is_some();

        info!(token_uuid = %uuid, revoked, "revoke requested");

        Ok(revoked)
    }

    async fn list_active(&self) -> Result<Vec<TokenRecord>, TokenError> {
        self.store.list_active().await.map_err(TokenError::from)
    }
}

/// Try to unlock access with `token`.
///
/// Every failure reads as "locked" to the caller; the reason is only logged.
pub async fn unlock<S>(service: &S, token: &str) -> bool
where
    S: TokenService + ?Sized,
{
    match service.verify_and_consume(token).await {
        Ok(record) => {
            debug!(token_uuid = %record.uuid, "access unlocked");

            true
        }
        Err(error) => {
            warn!(kind = %error.kind(), %error, "access denied");

            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;
    use crate::{
        clock::ManualClock,
        tokens::{InMemoryTokenStore, MockTokenStore, StoreError, TokenErrorKind, TokenStatus},
    };

    struct Harness {
        store: Arc<InMemoryTokenStore>,
        clock: Arc<ManualClock>,
        service: TokenLifecycle,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryTokenStore::new());
        let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
        let service = TokenLifecycle::new(
            Arc::clone(&store) as Arc<dyn TokenStore>,
            TokenSecret::new("lifecycle-secret"),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );

        Harness {
            store,
            clock,
            service,
        }
    }

    #[tokio::test]
    async fn issue_persists_an_active_record() -> TestResult {
        let Harness { store, service, .. } = harness();

        let issued = service.issue(TokenTtl::OneHour).await?;
        let stored = store.get(issued.record.uuid).await.ok_or("record missing")?;

        assert_eq!(stored.status, TokenStatus::Active);
        assert_eq!(stored.token, issued.token);
        assert_eq!(stored.expires_at.as_millisecond(), 3_600_000);

        Ok(())
    }

    #[tokio::test]
    async fn issue_fails_without_returning_a_token_when_the_store_is_down() -> TestResult {
        let Harness { store, service, .. } = harness();
        store.set_offline(true);

        let result = service.issue(TokenTtl::OneDay).await;

        assert_eq!(
            result.err().map(|error| error.kind()),
            Some(TokenErrorKind::StoreUnavailable)
        );

        store.set_offline(false);
        assert!(store.is_empty().await, "no record should have been written");

        Ok(())
    }

    #[tokio::test]
    async fn token_is_single_use_within_its_lifetime() -> TestResult {
        let Harness {
            store,
            clock,
            service,
        } = harness();

        let issued = service.issue(TokenTtl::OneHour).await?;

        clock.advance(Duration::from_secs(30 * 60));
        let consumed = service.verify_and_consume(issued.token.as_str()).await?;

        assert_eq!(consumed.status, TokenStatus::Used);
        assert_eq!(consumed.used_at, Some(clock.now()));

        clock.advance(Duration::from_secs(60));
        let second = service.verify_and_consume(issued.token.as_str()).await;

        assert_eq!(
            second.err().map(|error| error.kind()),
            Some(TokenErrorKind::NotFoundOrConsumed)
        );
        assert_eq!(
            store.get(issued.record.uuid).await.map(|record| record.status),
            Some(TokenStatus::Used)
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected_and_left_active() -> TestResult {
        let Harness {
            store,
            clock,
            service,
        } = harness();

        let issued = service.issue(TokenTtl::OneHour).await?;
        clock.advance(Duration::from_secs(61 * 60));

        let result = service.verify_and_consume(issued.token.as_str()).await;

        assert_eq!(
            result.err().map(|error| error.kind()),
            Some(TokenErrorKind::ExpiredToken)
        );
        assert_eq!(
            store.get(issued.record.uuid).await.map(|record| record.status),
            Some(TokenStatus::Active)
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_no_longer_unlocks() -> TestResult {
        let Harness { service, .. } = harness();

        let issued = service.issue(TokenTtl::SixHours).await?;

        assert!(service.revoke(issued.record.uuid).await?, "active token should revoke");
        assert!(!unlock(&service, issued.token.as_str()).await, "revoked token unlocked");

        Ok(())
    }

    #[tokio::test]
    async fn revoking_a_used_token_keeps_it_used() -> TestResult {
        let Harness { store, service, .. } = harness();

        let issued = service.issue(TokenTtl::OneDay).await?;
        service.verify_and_consume(issued.token.as_str()).await?;

        assert!(!service.revoke(issued.record.uuid).await?, "used token should not revoke");

        let record = store.get(issued.record.uuid).await.ok_or("record missing")?;

        assert_eq!(record.status, TokenStatus::Used);
        assert_eq!(record.revoked_at, None);

        Ok(())
    }

    #[tokio::test]
    async fn token_unknown_to_the_store_is_not_found() -> TestResult {
        let Harness { service, clock, .. } = harness();

        let stray = codec::issue(&TokenSecret::new("lifecycle-secret"), TokenTtl::OneDay, clock.now())?;
        let result = service.verify_and_consume(stray.token.as_str()).await;

        assert_eq!(
            result.err().map(|error| error.kind()),
            Some(TokenErrorKind::NotFoundOrConsumed)
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_never_reaches_the_store() {
        let service = TokenLifecycle::new(
            Arc::new(MockTokenStore::new()),
            TokenSecret::new("lifecycle-secret"),
            Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH)),
        );

        assert!(!unlock(&service, "").await, "empty token unlocked");
        assert!(!unlock(&service, "not-a-token").await, "garbage unlocked");
    }

    #[tokio::test]
    async fn lookup_failure_fails_closed() -> TestResult {
        let secret = TokenSecret::new("lifecycle-secret");
        let issued = codec::issue(&secret, TokenTtl::OneDay, Timestamp::UNIX_EPOCH)?;

        let mut store = MockTokenStore::new();
        store
            .expect_find_by_token()
            .returning(|_| Err(StoreError::unavailable(std::io::Error::other("down"))));
        store.expect_transition().never();

        let service = TokenLifecycle::new(
            Arc::new(store),
            secret,
            Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH)),
        );

        let result = service.verify_and_consume(issued.token.as_str()).await;

        assert_eq!(
            result.err().map(|error| error.kind()),
            Some(TokenErrorKind::StoreUnavailable)
        );

        Ok(())
    }

    #[tokio::test]
    async fn lost_consume_race_is_not_found() -> TestResult {
        let secret = TokenSecret::new("lifecycle-secret");
        let issued = codec::issue(&secret, TokenTtl::OneDay, Timestamp::UNIX_EPOCH)?;
        let record = TokenRecord::from(NewTokenRecord {
            uuid: TokenRecordUuid::new(),
            token: issued.token.clone(),
            created_at: Timestamp::UNIX_EPOCH,
            expires_at: Timestamp::UNIX_EPOCH,
        });

        let mut store = MockTokenStore::new();
        store
            .expect_find_by_token()
            .returning(move |_| Ok(Some(record.clone())));
        store.expect_transition().once().returning(|_, _, _| Ok(None));

        let service = TokenLifecycle::new(
            Arc::new(store),
            secret,
            Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH)),
        );

        assert!(!unlock(&service, issued.token.as_str()).await, "lost race unlocked");

        Ok(())
    }
}
