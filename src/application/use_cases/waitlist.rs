//! Waitlist-gated access: enrollment, passcode verification, resend and
//! magic-link bootstrap.
//!
//! The flow over a single token is a two-state machine: an entry starts
//! unverified and becomes verified on the first exact passcode match, at
//! which point a user identity is created and linked permanently. A wrong
//! passcode leaves the entry untouched (the attempt counter is bookkeeping
//! for successful logins only, it is never read to block retries).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::{app_error::AppResult, application::passcode, AppError};

/// Identity linkage of a waitlist entry. An entry is `Unlinked` until the
/// first successful verification; once `Linked` the user id never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    Unlinked,
    Linked(Uuid),
}

impl LinkState {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            LinkState::Unlinked => None,
            LinkState::Linked(id) => Some(*id),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WaitlistEntry {
    /// Document id, doubles as the magic-link token.
    pub token: Uuid,
    pub email: String,
    /// Exactly six ASCII digits, fixed at creation.
    pub passcode: String,
    pub link: LinkState,
    /// Successful-login counter. Inert history: recorded, never enforced.
    pub login_attempt: i32,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl WaitlistEntry {
    pub fn new(email: &str, passcode: String, now: NaiveDateTime) -> Self {
        Self {
            token: Uuid::new_v4(),
            email: email.to_string(),
            passcode,
            link: LinkState::Unlinked,
            login_attempt: 0,
            created_at: now,
            last_login: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    /// Back-reference to the originating waitlist entry (lookup only).
    pub waitlist_id: Uuid,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enrollment {
    pub token: Uuid,
    pub passcode: String,
    pub is_new: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifiedAccess {
    pub user_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapInfo {
    pub email: String,
    pub passcode_required: bool,
}

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>>;
    async fn find_by_token(&self, token: Uuid) -> AppResult<Option<WaitlistEntry>>;
    async fn create(&self, entry: &WaitlistEntry) -> AppResult<()>;
    /// Link a user id to the entry only if none is linked yet (conditional
    /// update). Returns the id that ended up linked, which is `user_id` when
    /// this call won and the previously linked id when it lost.
    async fn link_user(&self, token: Uuid, user_id: Uuid) -> AppResult<Uuid>;
    /// Bump the successful-login counter and stamp `last_login`.
    async fn record_login(&self, token: Uuid, at: NaiveDateTime) -> AppResult<()>;
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, email: &str, waitlist_id: Uuid) -> AppResult<UserRecord>;
}

#[async_trait]
pub trait AccessEmailSender: Send + Sync {
    async fn send_access_email(
        &self,
        to: &str,
        passcode: &str,
        magic_link: &str,
        token: Uuid,
    ) -> AppResult<()>;
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    waitlist: Arc<dyn WaitlistRepo>,
    users: Arc<dyn UserRepo>,
    email: Arc<dyn AccessEmailSender>,
    app_origin: String,
}

impl WaitlistUseCases {
    pub fn new(
        waitlist: Arc<dyn WaitlistRepo>,
        users: Arc<dyn UserRepo>,
        email: Arc<dyn AccessEmailSender>,
        app_origin: String,
    ) -> Self {
        Self {
            waitlist,
            users,
            email,
            app_origin,
        }
    }

    /// The token is used verbatim as a URL path segment, unsigned and
    /// non-expiring, matching the observed storefront behavior.
    pub fn magic_link(&self, token: Uuid) -> String {
        format!("{}/{}", self.app_origin.trim_end_matches('/'), token)
    }

    /// Look up the entry for `email`, creating one with a fresh passcode if
    /// none exists. The resume path never reissues a passcode. No
    /// uniqueness constraint backs the email lookup; concurrent first-time
    /// enrollment of the same address is last-writer-wins.
    #[instrument(skip(self))]
    pub async fn enroll(&self, email: &str) -> AppResult<Enrollment> {
        if let Some(existing) = self.waitlist.find_by_email(email).await? {
            return Ok(Enrollment {
                token: existing.token,
                passcode: existing.passcode,
                is_new: false,
            });
        }

        let entry = WaitlistEntry::new(email, passcode::generate(), Utc::now().naive_utc());
        self.waitlist.create(&entry).await?;
        Ok(Enrollment {
            token: entry.token,
            passcode: entry.passcode,
            is_new: true,
        })
    }

    /// Enroll and, for a first-time entry, dispatch the access email with
    /// the passcode and magic link. Dispatch failures propagate; the entry
    /// itself is already persisted and a manual resend can recover.
    #[instrument(skip(self))]
    pub async fn request_access(&self, email: &str) -> AppResult<Enrollment> {
        let enrollment = self.enroll(email).await?;
        if enrollment.is_new {
            let link = self.magic_link(enrollment.token);
            self.email
                .send_access_email(email, &enrollment.passcode, &link, enrollment.token)
                .await?;
        }
        Ok(enrollment)
    }

    /// Validate `submitted` against the stored passcode for `token` and, on
    /// the first success, create and link a user identity.
    ///
    /// Exact string equality, no normalization. A mismatch mutates nothing.
    /// Re-verifying an already linked entry with the correct passcode
    /// returns the same user id and creates no second user.
    #[instrument(skip(self, submitted))]
    pub async fn verify(&self, token: Uuid, submitted: &str) -> AppResult<VerifiedAccess> {
        let entry = self
            .waitlist
            .find_by_token(token)
            .await?
            .ok_or(AppError::NotFound)?;

        if entry.passcode != submitted {
            return Err(AppError::PasscodeMismatch);
        }

        let user_id = match entry.link {
            LinkState::Linked(existing) => existing,
            LinkState::Unlinked => {
                let user = self.users.create(&entry.email, token).await?;
                // Conditional update guards the link against a concurrent
                // verification; the loser's freshly created user row stays
                // orphaned, there is no compensating delete.
                self.waitlist.link_user(token, user.id).await?
            }
        };

        self.waitlist
            .record_login(token, Utc::now().naive_utc())
            .await?;

        Ok(VerifiedAccess { user_id })
    }

    /// Re-dispatch the unchanged passcode and magic link for an existing
    /// entry. Pure side-effecting trigger: the entry is not mutated, and a
    /// dispatch failure surfaces to the caller for a manual retry.
    #[instrument(skip(self))]
    pub async fn resend(&self, token: Uuid) -> AppResult<()> {
        let entry = self
            .waitlist
            .find_by_token(token)
            .await?
            .ok_or(AppError::NotFound)?;

        let link = self.magic_link(token);
        self.email
            .send_access_email(&entry.email, &entry.passcode, &link, token)
            .await
    }

    /// Entry point for a visitor following a magic link: surface the email
    /// behind `token` and require passcode entry. Never grants access by
    /// itself.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self, token: Uuid) -> AppResult<BootstrapInfo> {
        let entry = self
            .waitlist
            .find_by_token(token)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(BootstrapInfo {
            email: entry.email,
            passcode_required: true,
        })
    }
}
