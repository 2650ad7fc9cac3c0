//! Depot helpers.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};

use crate::state::State;

pub(crate) trait DepotExt {
    /// Shared server state, or a 500 if it was never injected.
    fn state_or_500(&self) -> Result<Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn state_or_500(&self) -> Result<Arc<State>, StatusError> {
        self.obtain::<Arc<State>>()
            .map(Arc::clone)
            .map_err(|_missing| StatusError::internal_server_error())
    }
}
