//! State

use std::{fmt, sync::Arc};

use hr_trainer_app::context::AppContext;

use crate::config::auth::AdminSecret;

/// Shared by every handler through the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin_secret: AdminSecret,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_secret: AdminSecret) -> Arc<Self> {
        Arc::new(Self { app, admin_secret })
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("admin_secret", &self.admin_secret)
            .finish_non_exhaustive()
    }
}
