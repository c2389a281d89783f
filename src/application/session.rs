//! Client-held access session state.
//!
//! The session is not a server-side record: it is reconstructed on every
//! request from client-retained storage (cookies at the HTTP layer). Expiry
//! is an explicit timestamp check against the configured retention window
//! rather than relying on the storage lifetime alone.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessSession {
    /// Waitlist entry token the session was issued against.
    pub token: Uuid,
    /// Resolved user id once verification succeeds.
    pub user_id: Option<Uuid>,
    pub access_granted: bool,
    pub issued_at: DateTime<Utc>,
}

impl AccessSession {
    /// Session staged by bootstrap: token known, passcode not yet presented.
    pub fn staged(token: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id: None,
            access_granted: false,
            issued_at: now,
        }
    }

    /// Session issued after a successful passcode verification.
    pub fn granted(token: Uuid, user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id: Some(user_id),
            access_granted: true,
            issued_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl_days: i64) -> bool {
        now - self.issued_at > Duration::days(ttl_days)
    }

    /// True only for a granted session still inside the retention window.
    pub fn grants_access(&self, now: DateTime<Utc>, ttl_days: i64) -> bool {
        self.access_granted && self.user_id.is_some() && !self.is_expired(now, ttl_days)
    }
}
