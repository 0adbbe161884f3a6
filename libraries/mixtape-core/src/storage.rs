/// Storage traits consumed by the server and implemented by mixtape-storage
use crate::error::Result;
use crate::types::{Playlist, PlaylistId, User, UserId};
use async_trait::async_trait;

/// Persistence collaborator for playlist documents.
///
/// The core issues read-modify-write sequences against this interface; it
/// does not implement concurrency control (last save wins).
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Look up a playlist by id
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// All playlists owned by `owner_email`, drafts included
    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Playlist>>;

    /// All published playlists
    async fn find_published(&self) -> Result<Vec<Playlist>>;

    /// Published playlists owned by the user with display name `username`
    async fn find_published_by_username(&self, username: &str) -> Result<Vec<Playlist>>;

    /// Whether `owner_email` already owns a playlist named `name`,
    /// excluding `exclude` (for renames)
    async fn name_exists(
        &self,
        owner_email: &str,
        name: &str,
        exclude: Option<&PlaylistId>,
    ) -> Result<bool>;

    /// Insert or replace a playlist document
    async fn save(&self, playlist: &Playlist) -> Result<()>;

    /// Delete a playlist document
    async fn delete(&self, id: &PlaylistId) -> Result<()>;
}

/// Persistence collaborator for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by id
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>>;

    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up a user by display name
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Insert a new user
    async fn insert(&self, user: &User) -> Result<()>;

    /// All registered users
    async fn all(&self) -> Result<Vec<User>>;
}

/// Resolve a playlist name that is unique within `owner_email`'s playlists.
///
/// Collisions get an incrementing numeric suffix: `"Name"`, `"Name 1"`,
/// `"Name 2"`, ... The loop terminates because each probe either finds a
/// free name or consumes one of the finitely many colliding playlists.
pub async fn resolve_unique_name(
    store: &dyn PlaylistStore,
    owner_email: &str,
    base_name: &str,
    exclude: Option<&PlaylistId>,
) -> Result<String> {
    if !store.name_exists(owner_email, base_name, exclude).await? {
        return Ok(base_name.to_string());
    }

    let mut counter = 1u64;
    loop {
        let candidate = format!("{} {}", base_name, counter);
        if !store.name_exists(owner_email, &candidate, exclude).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Playlist;
    use std::sync::Mutex;

    /// Minimal in-memory store, enough to exercise the naming loop
    #[derive(Default)]
    struct MemoryPlaylistStore {
        playlists: Mutex<Vec<Playlist>>,
    }

    #[async_trait]
    impl PlaylistStore for MemoryPlaylistStore {
        async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
            Ok(self
                .playlists
                .lock()
                .unwrap()
                .iter()
                .find(|p| &p.id == id)
                .cloned())
        }

        async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Playlist>> {
            Ok(self
                .playlists
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.owner_email == owner_email)
                .cloned()
                .collect())
        }

        async fn find_published(&self) -> Result<Vec<Playlist>> {
            Ok(self
                .playlists
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.is_published())
                .cloned()
                .collect())
        }

        async fn find_published_by_username(&self, username: &str) -> Result<Vec<Playlist>> {
            Ok(self
                .playlists
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.is_published() && p.owner_username == username)
                .cloned()
                .collect())
        }

        async fn name_exists(
            &self,
            owner_email: &str,
            name: &str,
            exclude: Option<&PlaylistId>,
        ) -> Result<bool> {
            Ok(self.playlists.lock().unwrap().iter().any(|p| {
                p.owner_email == owner_email && p.name == name && Some(&p.id) != exclude
            }))
        }

        async fn save(&self, playlist: &Playlist) -> Result<()> {
            let mut playlists = self.playlists.lock().unwrap();
            if let Some(slot) = playlists.iter_mut().find(|p| p.id == playlist.id) {
                *slot = playlist.clone();
            } else {
                playlists.push(playlist.clone());
            }
            Ok(())
        }

        async fn delete(&self, id: &PlaylistId) -> Result<()> {
            self.playlists.lock().unwrap().retain(|p| &p.id != id);
            Ok(())
        }
    }

    async fn create_named(store: &MemoryPlaylistStore, name: &str) -> String {
        let unique = resolve_unique_name(store, "owner@example.com", name, None)
            .await
            .unwrap();
        let playlist = Playlist::new(unique.clone(), "owner@example.com", "olive", Vec::new());
        store.save(&playlist).await.unwrap();
        unique
    }

    #[tokio::test]
    async fn repeated_names_get_numeric_suffixes() {
        let store = MemoryPlaylistStore::default();
        assert_eq!(create_named(&store, "Road Trip").await, "Road Trip");
        assert_eq!(create_named(&store, "Road Trip").await, "Road Trip 1");
        assert_eq!(create_named(&store, "Road Trip").await, "Road Trip 2");
    }

    #[tokio::test]
    async fn names_unique_per_owner_not_globally() {
        let store = MemoryPlaylistStore::default();
        create_named(&store, "Mix").await;

        let other = resolve_unique_name(&store, "someone@else.com", "Mix", None)
            .await
            .unwrap();
        assert_eq!(other, "Mix");
    }

    #[tokio::test]
    async fn rename_excludes_the_playlist_itself() {
        let store = MemoryPlaylistStore::default();
        create_named(&store, "Mix").await;
        let id = store.find_by_owner("owner@example.com").await.unwrap()[0]
            .id
            .clone();

        // Saving under its own current name must not trigger a suffix.
        let name = resolve_unique_name(&store, "owner@example.com", "Mix", Some(&id))
            .await
            .unwrap();
        assert_eq!(name, "Mix");
    }
}
