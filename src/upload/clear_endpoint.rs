use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{Error, endpoints, session::SessionState};

/// Route handler that ends the session, dropping the loaded table and the
/// load cache, then redirects to the home page.
pub async fn clear_session_endpoint(State(state): State<SessionState>) -> Response {
    let mut session = match state.session.lock() {
        Ok(session) => session,
        Err(error) => {
            tracing::error!("could not acquire session lock: {error}");
            return Error::SessionLockError.into_alert_response();
        }
    };

    session.clear();
    tracing::info!("Cleared the loaded transactions");

    (
        HxRedirect(endpoints::ROOT.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
