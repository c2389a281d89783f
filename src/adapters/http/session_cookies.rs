//! Cookie codec for the client-held access session.
//!
//! The session travels as four cookies: the waitlist token, the resolved
//! user id (once granted), the access flag, and the issue timestamp the
//! expiry check runs against. All carry the same retention window.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::session::AccessSession;

pub const TOKEN_COOKIE: &str = "wl_token";
pub const USER_ID_COOKIE: &str = "wl_user_id";
pub const ACCESS_COOKIE: &str = "wl_access";
pub const ISSUED_AT_COOKIE: &str = "wl_issued_at";

fn build_cookie(name: &'static str, value: String, ttl_days: i64) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(ttl_days))
        .build()
}

/// Write the session into the jar, replacing any previous session cookies.
pub fn apply_session(jar: CookieJar, session: &AccessSession, ttl_days: i64) -> CookieJar {
    let mut jar = jar
        .add(build_cookie(
            TOKEN_COOKIE,
            session.token.to_string(),
            ttl_days,
        ))
        .add(build_cookie(
            ACCESS_COOKIE,
            session.access_granted.to_string(),
            ttl_days,
        ))
        .add(build_cookie(
            ISSUED_AT_COOKIE,
            session.issued_at.timestamp().to_string(),
            ttl_days,
        ));
    jar = match session.user_id {
        Some(user_id) => jar.add(build_cookie(USER_ID_COOKIE, user_id.to_string(), ttl_days)),
        None => jar.remove(Cookie::from(USER_ID_COOKIE)),
    };
    jar
}

/// Rebuild the session from the jar. Returns None when the cookies are
/// missing or unparseable; expiry is the caller's check.
pub fn session_from_jar(jar: &CookieJar) -> Option<AccessSession> {
    let token: Uuid = jar.get(TOKEN_COOKIE)?.value().parse().ok()?;
    let issued_at: DateTime<Utc> = jar
        .get(ISSUED_AT_COOKIE)?
        .value()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))?;
    let access_granted = jar.get(ACCESS_COOKIE)?.value() == "true";
    let user_id = match jar.get(USER_ID_COOKIE) {
        Some(cookie) => Some(cookie.value().parse().ok()?),
        None => None,
    };

    Some(AccessSession {
        token,
        user_id,
        access_granted,
        issued_at,
    })
}
