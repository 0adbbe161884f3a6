/// Database implementation
use crate::error::{Result, StorageError};
use async_trait::async_trait;
use mixtape_core::{Playlist, PlaylistId, PlaylistStore, User, UserId, UserStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// SQLite-backed document store for Mixtape
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives and dies with its connection, so it
        // must stay pinned to a single long-lived one.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        // Run migrations manually for reliability across different execution contexts
        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create database from an existing pool (for testing)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Embedded migrations for reliability
        const MIGRATIONS: &[&str] = &[
            include_str!("../migrations/20250601000001_create_users.sql"),
            include_str!("../migrations/20250601000002_create_playlists.sql"),
        ];

        for migration in MIGRATIONS {
            for statement in migration.split(';').filter(|s| !s.trim().is_empty()) {
                sqlx::query(statement)
                    .execute(pool)
                    .await
                    .map_err(|e| StorageError::Migration(e.to_string()))?;
            }
        }

        tracing::debug!("Applied {} migrations", MIGRATIONS.len());

        Ok(())
    }
}

#[async_trait]
impl PlaylistStore for Database {
    async fn find_by_id(&self, id: &PlaylistId) -> mixtape_core::Result<Option<Playlist>> {
        crate::playlists::find_by_id(&self.pool, id).await
    }

    async fn find_by_owner(&self, owner_email: &str) -> mixtape_core::Result<Vec<Playlist>> {
        crate::playlists::find_by_owner(&self.pool, owner_email).await
    }

    async fn find_published(&self) -> mixtape_core::Result<Vec<Playlist>> {
        crate::playlists::find_published(&self.pool).await
    }

    async fn find_published_by_username(
        &self,
        username: &str,
    ) -> mixtape_core::Result<Vec<Playlist>> {
        crate::playlists::find_published_by_username(&self.pool, username).await
    }

    async fn name_exists(
        &self,
        owner_email: &str,
        name: &str,
        exclude: Option<&PlaylistId>,
    ) -> mixtape_core::Result<bool> {
        crate::playlists::name_exists(&self.pool, owner_email, name, exclude).await
    }

    async fn save(&self, playlist: &Playlist) -> mixtape_core::Result<()> {
        crate::playlists::save(&self.pool, playlist).await
    }

    async fn delete(&self, id: &PlaylistId) -> mixtape_core::Result<()> {
        crate::playlists::delete(&self.pool, id).await
    }
}

#[async_trait]
impl UserStore for Database {
    async fn find_by_id(&self, id: &UserId) -> mixtape_core::Result<Option<User>> {
        crate::users::find_by_id(&self.pool, id).await
    }

    async fn find_by_email(&self, email: &str) -> mixtape_core::Result<Option<User>> {
        crate::users::find_by_email(&self.pool, email).await
    }

    async fn find_by_username(&self, username: &str) -> mixtape_core::Result<Option<User>> {
        crate::users::find_by_username(&self.pool, username).await
    }

    async fn insert(&self, user: &User) -> mixtape_core::Result<()> {
        crate::users::insert(&self.pool, user).await
    }

    async fn all(&self) -> mixtape_core::Result<Vec<User>> {
        crate::users::get_all(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixtape_core::types::{Playlist, Song};

    async fn database() -> Database {
        Database::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn playlist_documents_round_trip() {
        let db = database().await;
        let songs = vec![Song::new("Africa", "Toto", "FTQbiNvZqaY")];
        let mut playlist = Playlist::new("Road Trip", "alice@example.com", "alice", songs);
        playlist.toggle_like("bob@example.com");

        PlaylistStore::save(&db, &playlist).await.unwrap();

        let loaded = PlaylistStore::find_by_id(&db, &playlist.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, playlist);
    }

    #[tokio::test]
    async fn save_replaces_existing_document() {
        let db = database().await;
        let mut playlist = Playlist::new("Mix", "alice@example.com", "alice", Vec::new());
        PlaylistStore::save(&db, &playlist).await.unwrap();

        playlist.songs.push(Song::placeholder());
        playlist.publish(1_000);
        PlaylistStore::save(&db, &playlist).await.unwrap();

        let loaded = PlaylistStore::find_by_id(&db, &playlist.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.songs.len(), 1);
        assert!(loaded.is_published());

        let published = PlaylistStore::find_published(&db).await.unwrap();
        assert_eq!(published.len(), 1);
    }

    #[tokio::test]
    async fn published_queries_exclude_drafts() {
        let db = database().await;
        let draft = Playlist::new("Draft", "alice@example.com", "alice", Vec::new());
        let mut public = Playlist::new("Public", "alice@example.com", "alice", Vec::new());
        public.publish(5);

        PlaylistStore::save(&db, &draft).await.unwrap();
        PlaylistStore::save(&db, &public).await.unwrap();

        let published = PlaylistStore::find_published(&db).await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].name, "Public");

        let by_user = PlaylistStore::find_published_by_username(&db, "alice")
            .await
            .unwrap();
        assert_eq!(by_user.len(), 1);

        let owned = PlaylistStore::find_by_owner(&db, "alice@example.com")
            .await
            .unwrap();
        assert_eq!(owned.len(), 2);
    }

    #[tokio::test]
    async fn name_exists_honors_owner_scope_and_exclusion() {
        let db = database().await;
        let playlist = Playlist::new("Mix", "alice@example.com", "alice", Vec::new());
        PlaylistStore::save(&db, &playlist).await.unwrap();

        assert!(db
            .name_exists("alice@example.com", "Mix", None)
            .await
            .unwrap());
        assert!(!db
            .name_exists("bob@example.com", "Mix", None)
            .await
            .unwrap());
        assert!(!db
            .name_exists("alice@example.com", "Mix", Some(&playlist.id))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn users_round_trip_and_enforce_unique_email() {
        let db = database().await;
        let user = User::new("Alice", "Smith", "alice@example.com", "alice", "hash");
        UserStore::insert(&db, &user).await.unwrap();

        let loaded = db.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(loaded.username, "alice");

        let duplicate = User::new("Alice2", "Smith", "alice@example.com", "alice2", "hash");
        assert!(UserStore::insert(&db, &duplicate).await.is_err());
    }
}
