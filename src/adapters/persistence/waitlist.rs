use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{LinkState, WaitlistEntry, WaitlistRepo},
};

// Waitlist entry as stored in the db. The nullable user_id column maps onto
// the LinkState sum type at the boundary.
#[derive(sqlx::FromRow, Debug)]
struct WaitlistRow {
    token: Uuid,
    email: String,
    passcode: String,
    user_id: Option<Uuid>,
    login_attempt: i32,
    created_at: NaiveDateTime,
    last_login: Option<NaiveDateTime>,
}

impl From<WaitlistRow> for WaitlistEntry {
    fn from(row: WaitlistRow) -> Self {
        WaitlistEntry {
            token: row.token,
            email: row.email,
            passcode: row.passcode,
            link: match row.user_id {
                Some(id) => LinkState::Linked(id),
                None => LinkState::Unlinked,
            },
            login_attempt: row.login_attempt,
            created_at: row.created_at,
            last_login: row.last_login,
        }
    }
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query_as::<_, WaitlistRow>(
            "SELECT token, email, passcode, user_id, login_attempt, created_at, last_login
             FROM waitlist WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(WaitlistEntry::from))
    }

    async fn find_by_token(&self, token: Uuid) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query_as::<_, WaitlistRow>(
            "SELECT token, email, passcode, user_id, login_attempt, created_at, last_login
             FROM waitlist WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(WaitlistEntry::from))
    }

    async fn create(&self, entry: &WaitlistEntry) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO waitlist (token, email, passcode, user_id, login_attempt, created_at, last_login)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(entry.token)
        .bind(&entry.email)
        .bind(&entry.passcode)
        .bind(entry.link.user_id())
        .bind(entry.login_attempt)
        .bind(entry.created_at)
        .bind(entry.last_login)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }

    async fn link_user(&self, token: Uuid, user_id: Uuid) -> AppResult<Uuid> {
        // Conditional update: only an unlinked entry accepts a user id, so
        // concurrent verifications cannot overwrite each other.
        let result = sqlx::query(
            "UPDATE waitlist SET user_id = $2 WHERE token = $1 AND user_id IS NULL",
        )
        .bind(token)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 1 {
            return Ok(user_id);
        }

        // Lost the race (or the entry was linked all along): read back the
        // id that won.
        let row: Option<(Option<Uuid>,)> =
            sqlx::query_as("SELECT user_id FROM waitlist WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from)?;

        match row {
            Some((Some(linked),)) => Ok(linked),
            Some((None,)) => Err(AppError::Internal(
                "conditional link matched no row yet entry is unlinked".into(),
            )),
            None => Err(AppError::NotFound),
        }
    }

    async fn record_login(&self, token: Uuid, at: NaiveDateTime) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE waitlist SET login_attempt = login_attempt + 1, last_login = $2 WHERE token = $1",
        )
        .bind(token)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
