/// Comment domain type
use crate::types::{CommentId, Viewer};
use serde::{Deserialize, Serialize};

/// A comment on a published playlist.
///
/// `author_email` is the implicit identity used for edit/delete
/// authorization; it is part of the stored document but is never exposed on
/// the wire (the server builds viewer-facing shapes separately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,

    /// Author display name
    pub author: String,

    /// Author email, for authorization
    pub author_email: String,

    /// Comment text, already sanitized at write time
    pub text: String,
}

impl Comment {
    /// Create a new comment authored by `viewer`
    pub fn new(viewer: &Viewer, text: impl Into<String>) -> Self {
        Self {
            id: CommentId::generate(),
            author: viewer.username.clone(),
            author_email: viewer.email.clone(),
            text: text.into(),
        }
    }

    /// Whether `viewer` wrote this comment
    pub fn authored_by(&self, viewer: &Viewer) -> bool {
        !viewer.is_guest && viewer.email == self.author_email
    }

    /// Whether `viewer` may edit this comment (author only)
    pub fn can_edit(&self, viewer: &Viewer) -> bool {
        self.authored_by(viewer)
    }

    /// Whether `viewer` may delete this comment (author or playlist owner)
    pub fn can_delete(&self, viewer: &Viewer, playlist_owner_email: &str) -> bool {
        self.authored_by(viewer) || (!viewer.is_guest && viewer.email == playlist_owner_email)
    }
}
