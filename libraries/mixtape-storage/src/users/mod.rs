//! User account queries
use chrono::{DateTime, Utc};
use mixtape_core::error::Result;
use mixtape_core::types::{User, UserId};
use mixtape_core::MixtapeError;
use sqlx::{Row, SqlitePool};

fn db_err(e: sqlx::Error) -> MixtapeError {
    MixtapeError::Database(e.to_string())
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    let created_at: i64 = row.get("created_at");
    User {
        id: UserId::new(row.get::<String, _>("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        created_at: DateTime::<Utc>::from_timestamp_millis(created_at).unwrap_or_default(),
    }
}

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, username, password_hash, created_at";

/// Look up a user by id
pub async fn find_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;

    Ok(row.as_ref().map(row_to_user))
}

/// Look up a user by email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;

    Ok(row.as_ref().map(row_to_user))
}

/// Look up a user by display name
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(db_err)?;

    Ok(row.as_ref().map(row_to_user))
}

/// Insert a new user
pub async fn insert(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, first_name, last_name, email, username, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id.as_str())
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.created_at.timestamp_millis())
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

/// All registered users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY username"
    ))
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    Ok(rows.iter().map(row_to_user).collect())
}
