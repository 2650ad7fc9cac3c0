//! Admin bearer middleware.

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::warn;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    let authorized =
        extract_bearer_token(req).is_some_and(|token| state.admin_secret.matches(token));

    if !authorized {
        warn!(path = %req.uri().path(), "rejected admin request");

        res.render(StatusError::unauthorized().brief("Missing or invalid admin credentials"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
