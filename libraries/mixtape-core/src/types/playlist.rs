/// Playlist domain type and the visibility & rating rules
use crate::types::{Comment, PlaylistId, Song, Viewer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Wire sentinel for an unpublished playlist
pub const DRAFT_SENTINEL: i64 = -1;

/// Publication lifecycle of a playlist.
///
/// The only transition is `Draft -> Published`; there is no way back.
/// Serialized as a plain number: -1 for drafts, Unix milliseconds otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    /// Visible to the owner only
    Draft,
    /// Visible to everyone since the contained Unix-ms timestamp
    Published(i64),
}

impl PublishState {
    /// Whether this state is `Published`
    pub fn is_published(&self) -> bool {
        matches!(self, PublishState::Published(_))
    }

    /// The wire value: -1 for drafts, the publish timestamp otherwise
    pub fn as_millis(&self) -> i64 {
        match self {
            PublishState::Draft => DRAFT_SENTINEL,
            PublishState::Published(ms) => *ms,
        }
    }

    /// Build from the wire value
    pub fn from_millis(ms: i64) -> Self {
        if ms < 0 {
            PublishState::Draft
        } else {
            PublishState::Published(ms)
        }
    }
}

impl Serialize for PublishState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_millis())
    }
}

impl<'de> Deserialize<'de> for PublishState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        Ok(PublishState::from_millis(ms))
    }
}

/// Aggregate rating counters.
///
/// Always recomputed from the reaction sets, never incremented in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub likes: u64,
    pub dislikes: u64,
    pub listens: u64,
}

/// Named, owned, ordered collection of songs with a publish state and
/// aggregate ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name, unique per owner
    pub name: String,

    /// Owner email, the durable identity key
    pub owner_email: String,

    /// Owner display name
    pub owner_username: String,

    /// Ordered songs; insertion order is meaningful
    pub songs: Vec<Song>,

    /// Publication state
    pub published: PublishState,

    /// Aggregate counters, kept consistent with the sets below
    pub ratings: Ratings,

    /// Emails of viewers who liked this playlist
    pub liked_by: BTreeSet<String>,

    /// Emails of viewers who disliked this playlist; disjoint from `liked_by`
    pub disliked_by: BTreeSet<String>,

    /// Emails of viewers whose playback has been counted
    pub listened_by: BTreeSet<String>,

    /// Ordered comments
    pub comments: Vec<Comment>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new draft playlist
    pub fn new(
        name: impl Into<String>,
        owner_email: impl Into<String>,
        owner_username: impl Into<String>,
        songs: Vec<Song>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            owner_email: owner_email.into(),
            owner_username: owner_username.into(),
            songs,
            published: PublishState::Draft,
            ratings: Ratings::default(),
            liked_by: BTreeSet::new(),
            disliked_by: BTreeSet::new(),
            listened_by: BTreeSet::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this playlist has been published
    pub fn is_published(&self) -> bool {
        self.published.is_published()
    }

    /// Whether `viewer` is the owner of this playlist
    pub fn is_owned_by(&self, viewer: &Viewer) -> bool {
        !viewer.is_guest && viewer.email == self.owner_email
    }

    /// Whether `viewer` may read this playlist.
    ///
    /// Drafts are owner-only; published playlists are readable by anyone,
    /// guests included.
    pub fn can_view(&self, viewer: &Viewer) -> bool {
        self.is_published() || self.is_owned_by(viewer)
    }

    /// Whether `viewer` may update or delete this playlist (owner only)
    pub fn can_modify(&self, viewer: &Viewer) -> bool {
        self.is_owned_by(viewer)
    }

    /// Transition `Draft -> Published` at `timestamp_ms`.
    ///
    /// Returns whether the transition happened; publishing an already
    /// published playlist is a no-op. The transition is irreversible.
    pub fn publish(&mut self, timestamp_ms: i64) -> bool {
        match self.published {
            PublishState::Draft => {
                self.published = PublishState::Published(timestamp_ms.max(0));
                self.touch();
                true
            }
            PublishState::Published(_) => false,
        }
    }

    /// Toggle a like from `viewer_email`.
    ///
    /// Liking twice removes the reaction; liking while in `disliked_by`
    /// moves the viewer over. Counters are recomputed in the same step.
    pub fn toggle_like(&mut self, viewer_email: &str) {
        if !self.liked_by.remove(viewer_email) {
            self.disliked_by.remove(viewer_email);
            self.liked_by.insert(viewer_email.to_string());
        }
        self.recompute_ratings();
        self.touch();
    }

    /// Toggle a dislike from `viewer_email`; symmetric to [`toggle_like`].
    ///
    /// [`toggle_like`]: Playlist::toggle_like
    pub fn toggle_dislike(&mut self, viewer_email: &str) {
        if !self.disliked_by.remove(viewer_email) {
            self.liked_by.remove(viewer_email);
            self.disliked_by.insert(viewer_email.to_string());
        }
        self.recompute_ratings();
        self.touch();
    }

    /// Register one playback by `viewer_email`, at most once per viewer.
    ///
    /// Returns whether the listen counted. Owners never count.
    pub fn register_listen(&mut self, viewer_email: &str) -> bool {
        if viewer_email == self.owner_email {
            return false;
        }
        let counted = self.listened_by.insert(viewer_email.to_string());
        if counted {
            self.recompute_ratings();
            self.touch();
        }
        counted
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn recompute_ratings(&mut self) {
        self.ratings = Ratings {
            likes: self.liked_by.len() as u64,
            dislikes: self.disliked_by.len() as u64,
            listens: self.listened_by.len() as u64,
        };
    }
}

/// Sort orders for playlist listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive name, ascending
    #[default]
    Name,
    /// Most recently published first; drafts last
    Published,
    /// Most listens first
    Listens,
    /// Most likes first
    Likes,
    /// Most dislikes first
    Dislikes,
}

/// Sort playlists in place by `key`, ties broken by name.
pub fn sort_playlists(playlists: &mut [Playlist], key: SortKey) {
    let by_name = |a: &Playlist, b: &Playlist| {
        a.name.to_lowercase().cmp(&b.name.to_lowercase())
    };
    match key {
        SortKey::Name => playlists.sort_by(by_name),
        SortKey::Published => playlists.sort_by(|a, b| {
            b.published
                .as_millis()
                .cmp(&a.published.as_millis())
                .then_with(|| by_name(a, b))
        }),
        SortKey::Listens => playlists.sort_by(|a, b| {
            b.ratings
                .listens
                .cmp(&a.ratings.listens)
                .then_with(|| by_name(a, b))
        }),
        SortKey::Likes => playlists.sort_by(|a, b| {
            b.ratings
                .likes
                .cmp(&a.ratings.likes)
                .then_with(|| by_name(a, b))
        }),
        SortKey::Dislikes => playlists.sort_by(|a, b| {
            b.ratings
                .dislikes
                .cmp(&a.ratings.dislikes)
                .then_with(|| by_name(a, b))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{User, Viewer};

    fn owner() -> Viewer {
        Viewer::for_user(&User::new(
            "Olive",
            "Owner",
            "owner@example.com",
            "olive",
            "hash",
        ))
    }

    fn other() -> Viewer {
        Viewer::for_user(&User::new(
            "Vic",
            "Viewer",
            "vic@example.com",
            "vic",
            "hash",
        ))
    }

    fn playlist() -> Playlist {
        Playlist::new("Road Trip", "owner@example.com", "olive", Vec::new())
    }

    #[test]
    fn new_playlist_starts_as_draft() {
        let list = playlist();
        assert!(!list.is_published());
        assert_eq!(list.published.as_millis(), DRAFT_SENTINEL);
    }

    #[test]
    fn draft_readable_by_owner_only() {
        let list = playlist();
        assert!(list.can_view(&owner()));
        assert!(!list.can_view(&other()));
        assert!(!list.can_view(&Viewer::guest()));
    }

    #[test]
    fn published_readable_by_everyone_but_modifiable_by_owner_only() {
        let mut list = playlist();
        assert!(list.publish(1_700_000_000_000));
        assert!(list.can_view(&other()));
        assert!(list.can_view(&Viewer::guest()));
        assert!(list.can_modify(&owner()));
        assert!(!list.can_modify(&other()));
        assert!(!list.can_modify(&Viewer::guest()));
    }

    #[test]
    fn publish_is_one_way_and_idempotent() {
        let mut list = playlist();
        assert!(list.publish(1_000));
        assert!(!list.publish(2_000));
        assert_eq!(list.published, PublishState::Published(1_000));
    }

    #[test]
    fn like_toggles_on_and_off() {
        let mut list = playlist();
        list.toggle_like("vic@example.com");
        assert_eq!(list.ratings.likes, 1);
        assert!(list.liked_by.contains("vic@example.com"));

        list.toggle_like("vic@example.com");
        assert_eq!(list.ratings.likes, 0);
        assert!(!list.liked_by.contains("vic@example.com"));
    }

    #[test]
    fn like_after_dislike_moves_viewer_and_updates_both_counters() {
        let mut list = playlist();
        list.toggle_dislike("vic@example.com");
        assert_eq!(list.ratings.dislikes, 1);

        list.toggle_like("vic@example.com");
        assert!(list.liked_by.contains("vic@example.com"));
        assert!(!list.disliked_by.contains("vic@example.com"));
        assert_eq!(list.ratings.likes, 1);
        assert_eq!(list.ratings.dislikes, 0);
    }

    #[test]
    fn reaction_sets_stay_disjoint() {
        let mut list = playlist();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            list.toggle_like(email);
        }
        list.toggle_dislike("a@x.com");
        list.toggle_dislike("b@x.com");
        assert!(list.liked_by.is_disjoint(&list.disliked_by));
        assert_eq!(list.ratings.likes, list.liked_by.len() as u64);
        assert_eq!(list.ratings.dislikes, list.disliked_by.len() as u64);
    }

    #[test]
    fn listen_counts_once_per_viewer() {
        let mut list = playlist();
        assert!(list.register_listen("vic@example.com"));
        assert!(!list.register_listen("vic@example.com"));
        assert_eq!(list.ratings.listens, 1);
    }

    #[test]
    fn owner_listen_never_counts() {
        let mut list = playlist();
        assert!(!list.register_listen("owner@example.com"));
        assert_eq!(list.ratings.listens, 0);
    }

    #[test]
    fn publish_state_round_trips_as_number() {
        let json = serde_json::to_value(PublishState::Draft).unwrap();
        assert_eq!(json, serde_json::json!(-1));

        let state: PublishState = serde_json::from_value(serde_json::json!(1_700_000_000_000i64)).unwrap();
        assert_eq!(state, PublishState::Published(1_700_000_000_000));
    }

    #[test]
    fn sort_by_published_puts_drafts_last() {
        let mut a = playlist();
        a.name = "alpha".to_string();
        let mut b = playlist();
        b.name = "beta".to_string();
        b.publish(10);
        let mut c = playlist();
        c.name = "gamma".to_string();
        c.publish(20);

        let mut lists = vec![a, b, c];
        sort_playlists(&mut lists, SortKey::Published);
        let names: Vec<_> = lists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["gamma", "beta", "alpha"]);
    }

    #[test]
    fn sort_by_likes_breaks_ties_by_name() {
        let mut a = playlist();
        a.name = "Zebra".to_string();
        let mut b = playlist();
        b.name = "apple".to_string();
        let mut c = playlist();
        c.name = "Mango".to_string();
        c.toggle_like("vic@example.com");

        let mut lists = vec![a, b, c];
        sort_playlists(&mut lists, SortKey::Likes);
        let names: Vec<_> = lists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Mango", "apple", "Zebra"]);
    }
}
