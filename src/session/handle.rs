//! Session actor.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{Instrument, debug, debug_span};

use crate::session::{SessionClosed, SessionEvent, SessionState, SessionUuid, reduce};

/// State before and after an applied event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub before: SessionState,
    pub after: SessionState,
}

#[derive(Debug)]
struct Command {
    event: SessionEvent,
    reply: Option<oneshot::Sender<Transition>>,
}

/// Handle to a session's actor task.
///
/// The actor applies events one at a time. Clones share the same session. The actor
/// stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    uuid: SessionUuid,
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SessionState>,
    loading_more: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Start the actor for a fresh session.
    #[must_use]
    pub fn spawn(uuid: SessionUuid) -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();
        let (publish, snapshots) = watch::channel(SessionState::default());

        tokio::spawn(
            run(inbox, publish).instrument(debug_span!("session", session_uuid = %uuid)),
        );

        Self {
            uuid,
            commands,
            snapshots,
            loading_more: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn uuid(&self) -> SessionUuid {
        self.uuid
    }

    /// Apply `event` and wait for the resulting transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has stopped.
    pub async fn apply(&self, event: SessionEvent) -> Result<Transition, SessionClosed> {
        let (reply, transition) = oneshot::channel();

        self.commands
            .send(Command {
                event,
                reply: Some(reply),
            })
            .map_err(|_send_error| SessionClosed)?;

        transition.await.map_err(|_recv_error| SessionClosed)
    }

    /// Queue `event` without waiting for it.
    pub fn dispatch(&self, event: SessionEvent) {
        if self.commands.send(Command { event, reply: None }).is_err() {
            debug!(session_uuid = %self.uuid, "dropping event for closed session");
        }
    }

    /// Latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.snapshots.borrow().clone()
    }

    /// Watch snapshots as events are applied.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshots.clone()
    }

    /// Claim the session's single load-more slot.
    ///
    /// Returns `None` while another load-more holds it.
    #[must_use]
    pub fn try_begin_load_more(&self) -> Option<LoadMoreGuard> {
        self.loading_more
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadMoreGuard {
                flag: Arc::clone(&self.loading_more),
            })
    }
}

/// Held while a load-more runs. Releases the slot on drop.
#[derive(Debug)]
pub struct LoadMoreGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for LoadMoreGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

async fn run(mut inbox: mpsc::UnboundedReceiver<Command>, publish: watch::Sender<SessionState>) {
    while let Some(Command { event, reply }) = inbox.recv().await {
        let before = publish.borrow().clone();
        let after = reduce(before.clone(), event);

        publish.send_replace(after.clone());

        if let Some(reply) = reply {
            // Caller may have stopped waiting.
            let _reply_result = reply.send(Transition { before, after });
        }
    }

    debug!("session actor stopped");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;
    use crate::upstream::RoleQuery;

    #[tokio::test]
    async fn apply_returns_before_and_after() -> TestResult {
        let session = SessionHandle::spawn(SessionUuid::new());

        let transition = session
            .apply(SessionEvent::SearchStarted {
                role: RoleQuery::new("SRE", "Lisbon"),
            })
            .await?;

        assert_eq!(transition.before.generation, 0);
        assert_eq!(transition.after.generation, 1);
        assert_eq!(session.snapshot(), transition.after);

        Ok(())
    }

    #[tokio::test]
    async fn dispatched_events_apply_in_order() -> TestResult {
        let session = SessionHandle::spawn(SessionUuid::new());
        let mut snapshots = session.subscribe();

        for _ in 0..3 {
            session.dispatch(SessionEvent::Reset);
        }

        tokio::time::timeout(
            Duration::from_secs(1),
            snapshots.wait_for(|state| state.generation == 3),
        )
        .await??;

        Ok(())
    }

    #[tokio::test]
    async fn load_more_slot_is_exclusive_until_released() {
        let session = SessionHandle::spawn(SessionUuid::new());

        let guard = session.try_begin_load_more();

        assert!(guard.is_some(), "first claim should succeed");
        assert!(session.try_begin_load_more().is_none(), "second claim should fail");

        drop(guard);

        assert!(session.try_begin_load_more().is_some(), "slot should be free again");
    }
}
