//! Admin Errors

use hr_trainer::tokens::TokenError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: TokenError) -> StatusError {
    match error {
        TokenError::StoreUnavailable(source) => {
            error!("token store unavailable: {source}");

            StatusError::service_unavailable().brief("Token store unavailable")
        }
        other => {
            error!(kind = %other.kind(), "token operation failed: {other}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use hr_trainer::tokens::StoreError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn unavailable_store_maps_to_503() {
        let status = into_status_error(TokenError::StoreUnavailable(StoreError::AlreadyExists));

        assert_eq!(status.code, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn anything_else_maps_to_500() {
        let status = into_status_error(TokenError::NotFoundOrConsumed);

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
