//! Playlist document queries
use mixtape_core::error::Result;
use mixtape_core::types::{Playlist, PlaylistId};
use mixtape_core::MixtapeError;
use sqlx::{Row, SqlitePool};

fn db_err(e: sqlx::Error) -> MixtapeError {
    MixtapeError::Database(e.to_string())
}

fn parse_document(row: &sqlx::sqlite::SqliteRow) -> Result<Playlist> {
    let document: String = row.get("document");
    Ok(serde_json::from_str(&document)?)
}

/// Look up a playlist document by id
pub async fn find_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT document FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;

    row.as_ref().map(parse_document).transpose()
}

/// All playlists owned by `owner_email`, drafts included
pub async fn find_by_owner(pool: &SqlitePool, owner_email: &str) -> Result<Vec<Playlist>> {
    let rows = sqlx::query("SELECT document FROM playlists WHERE owner_email = ?")
        .bind(owner_email)
        .fetch_all(pool)
        .await
        .map_err(db_err)?;

    rows.iter().map(parse_document).collect()
}

/// All published playlists
pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query("SELECT document FROM playlists WHERE published >= 0")
        .fetch_all(pool)
        .await
        .map_err(db_err)?;

    rows.iter().map(parse_document).collect()
}

/// Published playlists owned by the user with display name `username`
pub async fn find_published_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT document FROM playlists WHERE published >= 0 AND owner_username = ?",
    )
    .bind(username)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    rows.iter().map(parse_document).collect()
}

/// Whether `owner_email` already owns a playlist named `name`, optionally
/// excluding one playlist id (for renames)
pub async fn name_exists(
    pool: &SqlitePool,
    owner_email: &str,
    name: &str,
    exclude: Option<&PlaylistId>,
) -> Result<bool> {
    let row = match exclude {
        Some(id) => {
            sqlx::query(
                "SELECT 1 FROM playlists WHERE owner_email = ? AND name = ? AND id != ? LIMIT 1",
            )
            .bind(owner_email)
            .bind(name)
            .bind(id.as_str())
            .fetch_optional(pool)
            .await
        }
        None => {
            sqlx::query("SELECT 1 FROM playlists WHERE owner_email = ? AND name = ? LIMIT 1")
                .bind(owner_email)
                .bind(name)
                .fetch_optional(pool)
                .await
        }
    }
    .map_err(db_err)?;

    Ok(row.is_some())
}

/// Insert or replace a playlist document
pub async fn save(pool: &SqlitePool, playlist: &Playlist) -> Result<()> {
    let document = serde_json::to_string(playlist)?;

    sqlx::query(
        r#"
        INSERT INTO playlists (id, owner_email, owner_username, name, published, document, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            owner_email = excluded.owner_email,
            owner_username = excluded.owner_username,
            name = excluded.name,
            published = excluded.published,
            document = excluded.document,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(playlist.id.as_str())
    .bind(&playlist.owner_email)
    .bind(&playlist.owner_username)
    .bind(&playlist.name)
    .bind(playlist.published.as_millis())
    .bind(document)
    .bind(playlist.updated_at.timestamp_millis())
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

/// Delete a playlist document
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await
        .map_err(db_err)?;

    Ok(())
}
