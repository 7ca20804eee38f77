use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseSettings;

pub type DbPool = sqlx::PgPool;

/// Build the process-wide pool. Constructed once at startup and handed to
/// handlers through `web::Data`.
pub async fn init_pool(settings: &DatabaseSettings) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await
}
