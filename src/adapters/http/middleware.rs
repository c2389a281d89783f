use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use crate::{
    adapters::http::{app_state::AppState, session_cookies::session_from_jar},
    app_error::AppError,
};

/// Gate for protected routes: requires a granted session inside the
/// retention window. The session is re-read from cookies on every request;
/// there is no server-side revocation, expiry is the only way out.
pub async fn require_access(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = session_from_jar(&cookies).ok_or(AppError::AccessDenied)?;

    if !session.grants_access(Utc::now(), app_state.config.session_ttl_days) {
        return Err(AppError::AccessDenied);
    }

    // Expose the session for downstream extractors.
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
