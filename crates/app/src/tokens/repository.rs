//! Access Tokens Repository

use async_trait::async_trait;
use hr_trainer::tokens::{
    AccessToken, NewTokenRecord, StoreError, TokenRecord, TokenRecordUuid, TokenStatus,
    TokenStore, TokenTransition,
};
use jiff::Timestamp;
use jiff_sqlx::{Timestamp as SqlxTimestamp, ToSqlx};
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::tokens::errors::store_error;

const INSERT_TOKEN_SQL: &str = include_str!("sql/insert_token.sql");
const FIND_TOKEN_SQL: &str = include_str!("sql/find_token.sql");
const LIST_ACTIVE_TOKENS_SQL: &str = include_str!("sql/list_active_tokens.sql");
const TRANSITION_TOKEN_SQL: &str = include_str!("sql/transition_token.sql");

/// PostgreSQL-backed [`TokenStore`].
///
/// Transitions are a single `UPDATE ... WHERE status = 'active' RETURNING`, so of two
/// concurrent consumers exactly one gets the row back.
#[derive(Debug, Clone)]
pub struct PgTokenStore {
    pool: PgPool,
}

impl PgTokenStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn insert(&self, record: NewTokenRecord) -> Result<TokenRecord, StoreError> {
        let row = query_as::<Postgres, TokenRow>(INSERT_TOKEN_SQL)
            .bind(record.uuid.into_uuid())
            .bind(record.token.as_str())
            .bind(record.created_at.to_sqlx())
            .bind(record.expires_at.to_sqlx())
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

        row.into_record()
    }

    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<TokenRecord>, StoreError> {
        query_as::<Postgres, TokenRow>(FIND_TOKEN_SQL)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?
            .map(TokenRow::into_record)
            .transpose()
    }

    async fn list_active(&self) -> Result<Vec<TokenRecord>, StoreError> {
        query_as::<Postgres, TokenRow>(LIST_ACTIVE_TOKENS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(TokenRow::into_record)
            .collect()
    }

    async fn transition(
        &self,
        uuid: TokenRecordUuid,
        transition: TokenTransition,
        at: Timestamp,
    ) -> Result<Option<TokenRecord>, StoreError> {
        let row = query_as::<Postgres, TokenRow>(TRANSITION_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .bind(transition.target().as_str())
            .bind(at.to_sqlx())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        if row.is_none() {
            debug!(token_uuid = %uuid, ?transition, "token transition matched no active row");
        }

        row.map(TokenRow::into_record).transpose()
    }
}

#[derive(Debug)]
struct TokenRow {
    uuid: Uuid,
    token: String,
    status: String,
    created_at: Timestamp,
    expires_at: Timestamp,
    used_at: Option<Timestamp>,
    revoked_at: Option<Timestamp>,
}

impl TokenRow {
    fn into_record(self) -> Result<TokenRecord, StoreError> {
        let status = self
            .status
            .parse::<TokenStatus>()
            .map_err(StoreError::unavailable)?;

        Ok(TokenRecord {
            uuid: self.uuid.into(),
            token: AccessToken::new(self.token),
            status,
            created_at: self.created_at,
            expires_at: self.expires_at,
            used_at: self.used_at,
            revoked_at: self.revoked_at,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TokenRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            token: row.try_get("token")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("used_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hr_trainer::{
        clock::ManualClock,
        tokens::{TokenError, TokenLifecycle, TokenSecret, TokenService, TokenTtl},
    };
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;
    use tokio::task::JoinSet;

    use super::*;
    use crate::test::db::TestDb;

    fn new_record(token: &str, created_at: Timestamp) -> TestResult<NewTokenRecord> {
        Ok(NewTokenRecord {
            uuid: TokenRecordUuid::new(),
            token: AccessToken::new(token),
            created_at,
            expires_at: created_at.checked_add(SignedDuration::from_hours(24))?,
        })
    }

    fn start() -> TestResult<Timestamp> {
        Ok("2026-03-01T09:00:00Z".parse()?)
    }

    #[tokio::test]
    async fn insert_then_find_round_trips_the_record() -> TestResult {
        let db = TestDb::new().await;
        let store = PgTokenStore::new(db.pool().clone());
        let record = new_record("aaa.bbb", start()?)?;

        let inserted = store.insert(record.clone()).await?;
        let found = store.find_by_token(&record.token).await?;

        assert_eq!(inserted.status, TokenStatus::Active);
        assert_eq!(found, Some(inserted));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_token_is_rejected() -> TestResult {
        let db = TestDb::new().await;
        let store = PgTokenStore::new(db.pool().clone());

        store.insert(new_record("dup.token", start()?)?).await?;
        let result = store.insert(new_record("dup.token", start()?)?).await;

        assert!(matches!(result, Err(StoreError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn list_active_is_newest_first_and_skips_spent_tokens() -> TestResult {
        let db = TestDb::new().await;
        let store = PgTokenStore::new(db.pool().clone());
        let t0 = start()?;

        let older = store.insert(new_record("older.token", t0)?).await?;
        let newer = store
            .insert(new_record("newer.token", t0.checked_add(SignedDuration::from_mins(5))?)?)
            .await?;
        let spent = store
            .insert(new_record("spent.token", t0.checked_add(SignedDuration::from_mins(1))?)?)
            .await?;

        store
            .transition(spent.uuid, TokenTransition::Consume, t0)
            .await?;

        let active: Vec<_> = store
            .list_active()
            .await?
            .into_iter()
            .map(|record| record.uuid)
            .collect();

        assert_eq!(active, vec![newer.uuid, older.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn transition_only_applies_to_active_rows() -> TestResult {
        let db = TestDb::new().await;
        let store = PgTokenStore::new(db.pool().clone());
        let t0 = start()?;
        let record = store.insert(new_record("once.only", t0)?).await?;

        let used = store
            .transition(record.uuid, TokenTransition::Consume, t0)
            .await?;
        let revoked = store
            .transition(record.uuid, TokenTransition::Revoke, t0)
            .await?;

        assert_eq!(used.map(|record| record.status), Some(TokenStatus::Used));
        assert_eq!(revoked, None);

        let stored = store.find_by_token(&record.token).await?;

        assert_eq!(stored.as_ref().map(|record| record.status), Some(TokenStatus::Used));
        assert_eq!(stored.and_then(|record| record.used_at), Some(t0));

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_consumers_have_exactly_one_winner() -> TestResult {
        let db = TestDb::new().await;
        let store: Arc<dyn TokenStore> = Arc::new(PgTokenStore::new(db.pool().clone()));
        let clock = Arc::new(ManualClock::new(start()?));
        let lifecycle = Arc::new(TokenLifecycle::new(
            store,
            TokenSecret::new("integration-secret"),
            clock,
        ));

        let issued = lifecycle.issue(TokenTtl::OneHour).await?;

        let mut tasks = JoinSet::new();

        for _ in 0..8 {
            let lifecycle = Arc::clone(&lifecycle);
            let token = issued.token.as_str().to_string();

            tasks.spawn(async move { lifecycle.verify_and_consume(&token).await });
        }

        let mut winners = 0;
        let mut losers = 0;

        while let Some(result) = tasks.join_next().await {
            match result? {
                Ok(_) => winners += 1,
                Err(TokenError::NotFoundOrConsumed) => losers += 1,
                Err(error) => return Err(error.into()),
            }
        }

        assert_eq!((winners, losers), (1, 7));

        Ok(())
    }
}
