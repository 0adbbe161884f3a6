/// Comment API routes
use crate::{
    api::playlists::{load_playlist, playlist_response, reject_guest, PlaylistResponse},
    error::{Result, ServerError},
    middleware::AuthenticatedViewer,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use mixtape_core::{Comment, Playlist, PlaylistStore};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Validate and sanitize comment text; severe content rejects the write.
fn clean_text(app_state: &AppState, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServerError::BadRequest(
            "Comment text must not be empty.".to_string(),
        ));
    }

    let analysis = app_state.sanitizer.sanitize(trimmed);
    if analysis.contains_severe {
        return Err(ServerError::BadRequest(
            "Comment contains inappropriate language.".to_string(),
        ));
    }
    Ok(analysis.sanitized_text)
}

fn check_published(playlist: &Playlist) -> Result<()> {
    if !playlist.is_published() {
        return Err(ServerError::Unauthorized(
            "This playlist has not been published.".to_string(),
        ));
    }
    Ok(())
}

fn find_comment_index(playlist: &Playlist, comment_id: &str) -> Result<usize> {
    playlist
        .comments
        .iter()
        .position(|c| c.id.as_str() == comment_id)
        .ok_or_else(|| ServerError::NotFound("Comment not found".to_string()))
}

/// GET /api/playlists/:id/comments
pub async fn list_comments(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    let playlist = load_playlist(&app_state, &id).await?;

    if !playlist.can_view(viewer) {
        return Err(ServerError::Unauthorized(
            "This playlist has not been published.".to_string(),
        ));
    }

    Ok(Json(playlist_response(&playlist, viewer)))
}

/// POST /api/playlists/:id/comments
pub async fn create_comment(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
    Json(req): Json<CommentRequest>,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "comment on playlists")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    check_published(&playlist)?;

    let text = clean_text(&app_state, &req.text)?;
    playlist.comments.push(Comment::new(viewer, text));
    playlist.touch();

    app_state.db.save(&playlist).await?;
    Ok(Json(playlist_response(&playlist, viewer)))
}

/// PUT /api/playlists/:id/comments/:comment_id
/// Author only
pub async fn update_comment(
    Path((id, comment_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
    Json(req): Json<CommentRequest>,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "update comments")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    check_published(&playlist)?;

    let index = find_comment_index(&playlist, &comment_id)?;
    if !playlist.comments[index].can_edit(viewer) {
        return Err(ServerError::Unauthorized(
            "Only the author may edit this comment.".to_string(),
        ));
    }

    playlist.comments[index].text = clean_text(&app_state, &req.text)?;
    playlist.touch();

    app_state.db.save(&playlist).await?;
    Ok(Json(playlist_response(&playlist, viewer)))
}

/// DELETE /api/playlists/:id/comments/:comment_id
/// Author or playlist owner
pub async fn delete_comment(
    Path((id, comment_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "delete comments")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    check_published(&playlist)?;

    let index = find_comment_index(&playlist, &comment_id)?;
    if !playlist.comments[index].can_delete(viewer, &playlist.owner_email) {
        return Err(ServerError::Unauthorized(
            "Only the author or the playlist owner may delete this comment.".to_string(),
        ));
    }

    playlist.comments.remove(index);
    playlist.touch();

    app_state.db.save(&playlist).await?;
    Ok(Json(playlist_response(&playlist, viewer)))
}
