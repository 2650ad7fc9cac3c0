//! Access token persistence.

mod errors;
mod repository;

pub use repository::PgTokenStore;
