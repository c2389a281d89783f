pub mod user;
pub mod waitlist;

use sqlx::PgPool;

/// Postgres-backed implementation of the repository traits.
#[derive(Clone)]
pub struct PostgresPersistence {
    pub pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
