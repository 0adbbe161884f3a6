/// Reaction API routes: like, dislike, listen
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
use mixtape_core::{Playlist, PlaylistStore, Viewer};

/// Reactions require a published playlist; drafts reject everyone,
/// including the owner. Whether an owner may rate their own published
/// playlist is a deployment choice.
fn check_reaction_allowed(
    app_state: &AppState,
    playlist: &Playlist,
    viewer: &Viewer,
) -> Result<()> {
    if !playlist.is_published() {
        return Err(ServerError::Unauthorized(
            "This playlist has not been published.".to_string(),
        ));
    }
    if playlist.is_owned_by(viewer) && !app_state.community.allow_owner_reactions {
        return Err(ServerError::Unauthorized(
            "Owners cannot rate their own playlist.".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/playlists/:id/like
pub async fn like_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "rate playlists")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    check_reaction_allowed(&app_state, &playlist, viewer)?;

    playlist.toggle_like(&viewer.email);
    app_state.db.save(&playlist).await?;

    Ok(Json(playlist_response(&playlist, viewer)))
}

/// POST /api/playlists/:id/dislike
pub async fn dislike_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "rate playlists")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    check_reaction_allowed(&app_state, &playlist, viewer)?;

    playlist.toggle_dislike(&viewer.email);
    app_state.db.save(&playlist).await?;

    Ok(Json(playlist_response(&playlist, viewer)))
}

/// POST /api/playlists/:id/listen
///
/// Counts once per non-owner viewer; repeats and owner playbacks are
/// accepted but do not change the counter.
pub async fn register_listen(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "register listens")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    if !playlist.is_published() {
        return Err(ServerError::Unauthorized(
            "This playlist has not been published.".to_string(),
        ));
    }

    if playlist.register_listen(&viewer.email) {
        app_state.db.save(&playlist).await?;
    }

    Ok(Json(playlist_response(&playlist, viewer)))
}
