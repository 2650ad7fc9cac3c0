//! Integration tests for the access token protocol

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use testresult::TestResult;

use hr_trainer::{
    clock::{Clock, ManualClock},
    tokens::{
        AccessGate, ActiveTokenBoard, GateState, InMemoryTokenStore, TokenErrorKind,
        TokenLifecycle, TokenSecret, TokenService, TokenStatus, TokenStore, TokenTtl, unlock,
    },
};

struct Fixture {
    store: Arc<InMemoryTokenStore>,
    clock: Arc<ManualClock>,
    service: Arc<TokenLifecycle>,
}

fn fixture() -> TestResult<Fixture> {
    let store = Arc::new(InMemoryTokenStore::new());
    let clock = Arc::new(ManualClock::new(Timestamp::from_millisecond(
        1_767_225_600_000,
    )?));
    let service = Arc::new(TokenLifecycle::new(
        Arc::clone(&store) as Arc<dyn TokenStore>,
        TokenSecret::new("integration-secret"),
        Arc::clone(&clock) as Arc<dyn Clock>,
    ));

    Ok(Fixture {
        store,
        clock,
        service,
    })
}

#[tokio::test]
async fn one_hour_token_is_used_once_then_rejected() -> TestResult {
    let Fixture {
        store,
        clock,
        service,
    } = fixture()?;

    let issued = service.issue(TokenTtl::OneHour).await?;

    clock.advance(Duration::from_secs(30 * 60));

    assert!(
        unlock(service.as_ref(), issued.token.as_str()).await,
        "first use within the hour should unlock"
    );

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

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_consumers_produce_exactly_one_success() -> TestResult {
    let Fixture { store, service, .. } = fixture()?;

    let issued = service.issue(TokenTtl::OneDay).await?;

    let attempts: Vec<_> = (0..12)
        .map(|_| {
            let service = Arc::clone(&service);
            let token = issued.token.clone();

            tokio::spawn(async move { service.verify_and_consume(token.as_str()).await })
        })
        .collect();

    let mut successes = 0;
    let mut failures = Vec::new();

    for attempt in attempts {
        match attempt.await? {
            Ok(_) => successes += 1,
            Err(error) => failures.push(error.kind()),
        }
    }

    assert_eq!(successes, 1);
    assert!(
        failures
            .iter()
            .all(|kind| *kind == TokenErrorKind::NotFoundOrConsumed),
        "losers should see not-found-or-consumed: {failures:?}"
    );
    assert_eq!(
        store.get(issued.record.uuid).await.map(|record| record.status),
        Some(TokenStatus::Used)
    );

    Ok(())
}

#[tokio::test]
async fn tokens_from_another_secret_never_unlock() -> TestResult {
    let Fixture { clock, service, .. } = fixture()?;

    let foreign = hr_trainer::tokens::issue(
        &TokenSecret::new("someone-else"),
        TokenTtl::OneDay,
        clock.now(),
    )?;

    let result = service.verify_and_consume(foreign.token.as_str()).await;

    assert_eq!(
        result.err().map(|error| error.kind()),
        Some(TokenErrorKind::BadSignature)
    );

    Ok(())
}

#[tokio::test]
async fn board_lists_issued_tokens_and_hides_revoked_ones() -> TestResult {
    let Fixture { store, service, .. } = fixture()?;
    let board = ActiveTokenBoard::new(Arc::clone(&service) as Arc<dyn TokenService>);

    let first = board.issue(TokenTtl::OneHour).await?;
    let second = board.issue(TokenTtl::OneWeek).await?;

    assert_eq!(board.entries().await.len(), 2);

    assert!(board.revoke(first.record.uuid).await?, "active token should revoke");

    let remaining: Vec<_> = board
        .entries()
        .await
        .into_iter()
        .map(|record| record.uuid)
        .collect();

    assert_eq!(remaining, vec![second.record.uuid]);
    assert_eq!(
        store.get(first.record.uuid).await.map(|record| record.status),
        Some(TokenStatus::Revoked)
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn gate_unlocks_with_a_freshly_issued_token() -> TestResult {
    let Fixture { service, .. } = fixture()?;

    let issued = service.issue(TokenTtl::OneDay).await?;
    let gate = AccessGate::spawn(
        Arc::clone(&service) as Arc<dyn TokenService>,
        Duration::from_millis(300),
    );
    let mut state = gate.subscribe();

    gate.input(issued.token.as_str());
    state.wait_for(|state| *state == GateState::Unlocked).await?;

    Ok(())
}
