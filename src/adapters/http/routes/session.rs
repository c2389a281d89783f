//! Session inspection routes: a public peek at the client-held state and a
//! gated probe other parts of the application use to confirm access.

use axum::{
    Extension, Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, session_cookies::session_from_jar},
    app_error::{AppError, AppResult},
    application::session::AccessSession,
};

#[derive(Serialize)]
struct SessionResponse {
    token: Option<Uuid>,
    user_id: Option<Uuid>,
    access_granted: bool,
}

#[derive(Serialize)]
struct MeResponse {
    user_id: Uuid,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/session", get(current))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/session/me", get(me))
}

/// GET /session
/// Reports the session the client is holding. An expired or unparseable
/// session reads the same as none at all.
async fn current(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let response = match session_from_jar(&cookies) {
        Some(session) if !session.is_expired(Utc::now(), app_state.config.session_ttl_days) => {
            SessionResponse {
                token: Some(session.token),
                user_id: session.user_id,
                access_granted: session.access_granted,
            }
        }
        _ => SessionResponse {
            token: None,
            user_id: None,
            access_granted: false,
        },
    };
    Ok(Json(response))
}

/// GET /session/me, behind `require_access`.
async fn me(Extension(session): Extension<AccessSession>) -> AppResult<impl IntoResponse> {
    let user_id = session.user_id.ok_or(AppError::AccessDenied)?;
    Ok(Json(MeResponse { user_id }))
}
