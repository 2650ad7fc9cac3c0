//! Token store errors.

use hr_trainer::tokens::StoreError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};

/// Map a SQL failure onto the store error taxonomy.
///
/// A duplicate token or UUID is reported as [`StoreError::AlreadyExists`]. Everything else
/// means the store could not be used.
pub(crate) fn store_error(error: Error) -> StoreError {
    match error.as_database_error().map(DatabaseError::kind) {
        Some(ErrorKind::UniqueViolation) => StoreError::AlreadyExists,
        Some(ErrorKind::Other | _) | None => StoreError::unavailable(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_unavailable() {
        let error = store_error(Error::PoolTimedOut);

        assert!(matches!(error, StoreError::Unavailable(_)));
    }

    #[test]
    fn missing_rows_are_unavailable() {
        let error = store_error(Error::RowNotFound);

        assert!(matches!(error, StoreError::Unavailable(_)));
    }
}
