//! Admin token management

mod errors;
mod handlers;
pub(crate) mod middleware;
mod responses;

pub(crate) use handlers::*;
