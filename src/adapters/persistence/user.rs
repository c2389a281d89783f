use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{UserRecord, UserRepo},
};

// User as stored in the db.
#[derive(sqlx::FromRow, Debug)]
struct UserRow {
    id: Uuid,
    email: String,
    waitlist_id: Uuid,
    created_at: NaiveDateTime,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id,
            email: row.email,
            waitlist_id: row.waitlist_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create(&self, email: &str, waitlist_id: Uuid) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, email, waitlist_id, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, email, waitlist_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(waitlist_id)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.into())
    }
}
