//! Debounced access gate.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::sleep,
};
use tracing::debug;

use crate::tokens::{TokenService, unlock};

/// Shortest quiet period before a token is checked.
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(300);

/// Gate state as seen by the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Verifying,
    Unlocked,
}

/// Verifies token input once it stops changing.
///
/// Each change restarts the quiet period. Only the latest input is ever checked. A check
/// that has started always runs to completion, but its result is dropped if the input
/// changed in the meantime.
#[derive(Debug)]
pub struct AccessGate {
    input: mpsc::UnboundedSender<String>,
    state: watch::Receiver<GateState>,
    task: JoinHandle<()>,
}

impl AccessGate {
    /// Start a gate over `service`. `debounce` is raised to [`MIN_DEBOUNCE`] if shorter.
    #[must_use]
    pub fn spawn(service: Arc<dyn TokenService>, debounce: Duration) -> Self {
        let (input, inputs) = mpsc::unbounded_channel();
        let (publish, state) = watch::channel(GateState::Locked);

        let task = tokio::spawn(run(service, debounce.max(MIN_DEBOUNCE), inputs, publish));

        Self { input, state, task }
    }

    /// Record a change to the token input.
    pub fn input(&self, value: impl Into<String>) {
        // The task only stops once the gate is dropped.
        let _send_result = self.input.send(value.into());
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GateState {
        *self.state.borrow()
    }

    /// Watch state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.clone()
    }
}

impl Drop for AccessGate {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    service: Arc<dyn TokenService>,
    debounce: Duration,
    mut inputs: mpsc::UnboundedReceiver<String>,
    publish: watch::Sender<GateState>,
) {
    let mut pending = None;

    loop {
        let current = match pending.take() {
            Some(current) => current,
            None => match inputs.recv().await {
                Some(current) => current,
                None => return,
            },
        };

        let current = match settle(current, debounce, &mut inputs, &publish).await {
            Some(current) => current,
            None => return,
        };

        if current.trim().is_empty() {
            continue;
        }

        publish.send_replace(GateState::Verifying);

        let verification = unlock(service.as_ref(), current.trim());
        tokio::pin!(verification);

        // A started lookup always settles. Input that arrives meanwhile waits for it.
        let mut inputs_open = true;
        let unlocked = loop {
            tokio::select! {
                unlocked = &mut verification => break unlocked,
                next = inputs.recv(), if inputs_open => match next {
                    Some(next) => pending = Some(next),
                    None => inputs_open = false,
                },
            }
        };

        if !inputs_open {
            return;
        }

        if pending.is_some() {
            debug!(unlocked, "token input changed during verification, result discarded");

            publish.send_replace(GateState::Locked);
        } else {
            let state = if unlocked { GateState::Unlocked } else { GateState::Locked };

            publish.send_replace(state);
        }
    }
}

/// Wait until the input has been quiet for `debounce` and return the last value.
///
/// Empty input locks straight away.
async fn settle(
    mut current: String,
    debounce: Duration,
    inputs: &mut mpsc::UnboundedReceiver<String>,
    publish: &watch::Sender<GateState>,
) -> Option<String> {
    loop {
        if current.trim().is_empty() {
            publish.send_replace(GateState::Locked);
        }

        tokio::select! {
            () = sleep(debounce) => return Some(current),
            next = inputs.recv() => current = next?,
        }
    }
}
