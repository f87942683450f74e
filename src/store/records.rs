use sqlx::SqlitePool;

use crate::model::record::Record;

pub const RECORDS_TABLE: &str = "records";

// PRIMARY KEY implies NOT NULL and UNIQUE; time_out and hours stay null
// while the record is open.
pub const CREATE_RECORDS_TABLE: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    time_in TEXT NOT NULL,
    time_out TEXT,
    hours REAL,
    date TEXT NOT NULL
)";

/// Insert a new open record (null time_out/hours) and return its id.
pub async fn create_open_record(
    pool: &SqlitePool,
    name: &str,
    time_in: &str,
    date: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO records (name, time_in, date) VALUES (?, ?, ?)")
        .bind(name)
        .bind(time_in)
        .bind(date)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Most recent (highest id) record for `name` that has not been closed yet.
pub async fn find_latest_open_record(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Record>, sqlx::Error> {
    sqlx::query_as::<_, Record>(
        "SELECT * FROM records WHERE name = ? AND time_out IS NULL ORDER BY id DESC LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Set time_out and hours on one record. Closed records are never touched
/// again by any exposed operation.
pub async fn close_record(
    pool: &SqlitePool,
    id: i64,
    time_out: &str,
    hours: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE records SET time_out = ?, hours = ? WHERE id = ?")
        .bind(time_out)
        .bind(hours)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_by_name_and_date(
    pool: &SqlitePool,
    name: &str,
    date: &str,
) -> Result<Vec<Record>, sqlx::Error> {
    sqlx::query_as::<_, Record>("SELECT * FROM records WHERE name = ? AND date = ?")
        .bind(name)
        .bind(date)
        .fetch_all(pool)
        .await
}

/// Records for `name` whose date falls within the last `days_ago` days.
/// The comparison is lexicographic on the ISO date string, which matches
/// calendar order because the format is zero-padded and fixed-width.
pub async fn list_by_name_since(
    pool: &SqlitePool,
    name: &str,
    days_ago: i64,
) -> Result<Vec<Record>, sqlx::Error> {
    sqlx::query_as::<_, Record>("SELECT * FROM records WHERE name = ? AND date >= date('now', ?)")
        .bind(name)
        .bind(format!("-{} days", days_ago))
        .fetch_all(pool)
        .await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Record>, sqlx::Error> {
    sqlx::query_as::<_, Record>("SELECT * FROM records")
        .fetch_all(pool)
        .await
}
