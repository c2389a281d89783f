//! Waitlist enrollment and magic-link verification routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, session_cookies::apply_session},
    app_error::{AppError, AppResult},
    application::{session::AccessSession, validators::is_valid_email},
};

#[derive(Deserialize)]
struct EnrollPayload {
    email: String,
}

#[derive(Serialize)]
struct EnrollResponse {
    token: Uuid,
    is_new: bool,
}

#[derive(Serialize)]
struct BootstrapResponse {
    email: String,
    passcode_required: bool,
}

#[derive(Deserialize)]
struct VerifyPayload {
    passcode: String,
}

#[derive(Serialize)]
struct VerifyResponse {
    granted: bool,
    user_id: Uuid,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enroll", post(enroll))
        .route("/{token}", get(bootstrap))
        .route("/{token}/verify", post(verify))
        .route("/{token}/resend", post(resend))
}

/// POST /waitlist/enroll
/// Creates (or resumes) a waitlist entry and emails the passcode + magic
/// link on the first enrollment. The passcode is never echoed over HTTP.
async fn enroll(
    State(app_state): State<AppState>,
    Json(payload): Json<EnrollPayload>,
) -> AppResult<impl IntoResponse> {
    let email = payload.email.trim();
    if !is_valid_email(email) {
        return Err(AppError::InvalidInput("Invalid email format".into()));
    }

    let enrollment = app_state.waitlist_use_cases.request_access(email).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(EnrollResponse {
            token: enrollment.token,
            is_new: enrollment.is_new,
        }),
    ))
}

/// GET /waitlist/{token}
/// Magic-link landing: surfaces the enrolled email and stages a
/// not-yet-granted session. Never grants access by itself.
async fn bootstrap(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let token = parse_token(&token)?;
    let info = app_state.waitlist_use_cases.bootstrap(token).await?;

    let session = AccessSession::staged(token, Utc::now());
    let jar = apply_session(jar, &session, app_state.config.session_ttl_days);

    Ok((
        StatusCode::OK,
        jar,
        Json(BootstrapResponse {
            email: info.email,
            passcode_required: info.passcode_required,
        }),
    ))
}

/// POST /waitlist/{token}/verify
/// Checks the submitted passcode and, on success, issues granted session
/// cookies. Submitted passcodes are compared exactly, no trimming.
async fn verify(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    jar: CookieJar,
    Json(payload): Json<VerifyPayload>,
) -> AppResult<impl IntoResponse> {
    let token = parse_token(&token)?;
    let access = app_state
        .waitlist_use_cases
        .verify(token, &payload.passcode)
        .await?;

    let session = AccessSession::granted(token, access.user_id, Utc::now());
    let jar = apply_session(jar, &session, app_state.config.session_ttl_days);

    Ok((
        StatusCode::OK,
        jar,
        Json(VerifyResponse {
            granted: true,
            user_id: access.user_id,
        }),
    ))
}

/// POST /waitlist/{token}/resend
/// Re-dispatches the unchanged passcode and magic link.
async fn resend(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    let token = parse_token(&token)?;
    app_state.waitlist_use_cases.resend(token).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Tokens are waitlist document ids; anything that is not one cannot match
/// an entry, so malformed values report as the same not-found the UI shows
/// for expired links.
fn parse_token(raw: &str) -> AppResult<Uuid> {
    raw.parse().map_err(|_| AppError::NotFound)
}
