use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::adapters::persistence::PostgresPersistence;

pub async fn postgres_persistence() -> anyhow::Result<PostgresPersistence> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    Ok(PostgresPersistence::new(pool))
}
