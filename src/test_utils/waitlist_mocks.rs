//! In-memory mock implementations of the waitlist repository traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{
        AccessEmailSender, LinkState, UserRecord, UserRepo, WaitlistEntry, WaitlistRepo,
    },
};

/// In-memory implementation of WaitlistRepo for testing.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<HashMap<Uuid, WaitlistEntry>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial entries for testing.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        let map: HashMap<Uuid, WaitlistEntry> =
            entries.into_iter().map(|e| (e.token, e)).collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    /// Get all entries (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .values()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn find_by_token(&self, token: Uuid) -> AppResult<Option<WaitlistEntry>> {
        Ok(self.entries.lock().unwrap().get(&token).cloned())
    }

    async fn create(&self, entry: &WaitlistEntry) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(entry.token, entry.clone());
        Ok(())
    }

    async fn link_user(&self, token: Uuid, user_id: Uuid) -> AppResult<Uuid> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.get_mut(&token).ok_or(AppError::NotFound)?;
        match entry.link {
            LinkState::Unlinked => {
                entry.link = LinkState::Linked(user_id);
                Ok(user_id)
            }
            LinkState::Linked(existing) => Ok(existing),
        }
    }

    async fn record_login(&self, token: Uuid, at: NaiveDateTime) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.get_mut(&token).ok_or(AppError::NotFound)?;
        entry.login_attempt += 1;
        entry.last_login = Some(at);
        Ok(())
    }
}

/// In-memory implementation of UserRepo for testing.
#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_all(&self) -> Vec<UserRecord> {
        self.users.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn create(&self, email: &str, waitlist_id: Uuid) -> AppResult<UserRecord> {
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            waitlist_id,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.users.lock().unwrap().insert(record.id, record.clone());
        Ok(record)
    }
}

/// One dispatched access email, captured for assertions.
#[derive(Clone, Debug)]
pub struct SentEmail {
    pub to: String,
    pub passcode: String,
    pub magic_link: String,
    pub token: Uuid,
}

/// Email sender that records every dispatch instead of sending.
#[derive(Default)]
pub struct RecordingEmailSender {
    pub outbox: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessEmailSender for RecordingEmailSender {
    async fn send_access_email(
        &self,
        to: &str,
        passcode: &str,
        magic_link: &str,
        token: Uuid,
    ) -> AppResult<()> {
        self.outbox.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            passcode: passcode.to_string(),
            magic_link: magic_link.to_string(),
            token,
        });
        Ok(())
    }
}

/// Email sender that always fails, for dispatch-error paths.
pub struct FailingEmailSender;

#[async_trait]
impl AccessEmailSender for FailingEmailSender {
    async fn send_access_email(
        &self,
        _to: &str,
        _passcode: &str,
        _magic_link: &str,
        _token: Uuid,
    ) -> AppResult<()> {
        Err(AppError::Dispatch("provider unavailable".into()))
    }
}
