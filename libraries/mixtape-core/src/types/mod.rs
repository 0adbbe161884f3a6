/// Domain types for Mixtape
mod comment;
mod ids;
mod playlist;
mod song;
mod user;

pub use comment::Comment;
pub use ids::{CommentId, PlaylistId, UserId};
pub use playlist::{
    sort_playlists, Playlist, PublishState, Ratings, SortKey, DRAFT_SENTINEL,
};
pub use song::{
    Song, DEFAULT_SONG_ARTIST, DEFAULT_SONG_TITLE, DEFAULT_SONG_VIDEO_ID,
};
pub use user::{User, Viewer, GUEST_USERNAME};
