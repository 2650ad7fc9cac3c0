//! Session registry.

use std::{sync::Arc, time::Duration};

use hr_trainer::session::{SessionHandle, SessionUuid};
use rustc_hash::FxHashMap;
use tokio::{
    sync::RwLock,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, info};

/// Default idle period before a session is evicted.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Live sessions, keyed by their UUID.
///
/// Sessions are opened after a successful unlock and evicted once they have been idle for
/// longer than the configured timeout. A session with a search or load-more in flight is
/// never evicted.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<FxHashMap<SessionUuid, Entry>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(FxHashMap::default()),
            idle_timeout,
        }
    }

    /// Open a new session with an unguessable UUID.
    pub async fn open(&self) -> SessionHandle {
        let handle = SessionHandle::spawn(SessionUuid::new_random());

        self.sessions.write().await.insert(
            handle.uuid(),
            Entry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );

        info!(session_uuid = %handle.uuid(), "session opened");

        handle
    }

    /// Look up a session and mark it as recently used.
    pub async fn get(&self, uuid: SessionUuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&uuid)?;

        entry.last_seen = Instant::now();

        Some(entry.handle.clone())
    }

    /// Forget a session. Returns whether it existed.
    pub async fn close(&self, uuid: SessionUuid) -> bool {
        self.sessions.write().await.remove(&uuid).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every idle session and return how many went.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|uuid, entry| {
            let snapshot = entry.handle.snapshot();
            let busy = snapshot.is_searching || snapshot.is_loading_more;
            let keep = busy || now.duration_since(entry.last_seen) < self.idle_timeout;

            if !keep {
                debug!(session_uuid = %uuid, "evicting idle session");
            }

            keep
        });

        before - sessions.len()
    }

    /// Sweep idle sessions on a fixed interval until the returned task is aborted.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let evicted = registry.evict_idle().await;

                if evicted > 0 {
                    info!(evicted, "evicted idle sessions");
                }
            }
        })
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}
