pub mod session;
pub mod waitlist;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/waitlist", waitlist::router())
        .merge(session::router())
}

/// Routes that sit behind the access-gate middleware. The caller applies
/// `middleware::require_access` when mounting, where the state is in hand.
pub fn protected_router() -> Router<AppState> {
    session::protected_router()
}
