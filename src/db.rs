use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::store::records::CREATE_RECORDS_TABLE;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to connect to database");

    // Idempotent schema bootstrap; there are no migrations.
    sqlx::query(CREATE_RECORDS_TABLE)
        .execute(&pool)
        .await
        .expect("Failed to create records table");

    pool
}
