/// Playlists API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedViewer,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use mixtape_core::{
    resolve_unique_name, sort_playlists, Playlist, PlaylistId, PlaylistStore, PublishState,
    Ratings, Song, SortKey, Viewer,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub songs: Vec<Song>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: String,
    pub songs: Vec<Song>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub author: String,
    pub comment: String,
}

/// The playlist shape exposed to callers; reaction fields are relative to
/// the requesting viewer, and the owner email is only present for the owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub songs: Vec<Song>,
    pub published: PublishState,
    pub ratings: Ratings,
    pub owned_by_current_user: bool,
    pub viewer_has_liked: bool,
    pub viewer_has_disliked: bool,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
}

pub(crate) fn playlist_response(playlist: &Playlist, viewer: &Viewer) -> PlaylistResponse {
    let owned = playlist.is_owned_by(viewer);
    PlaylistResponse {
        id: playlist.id.as_str().to_string(),
        name: playlist.name.clone(),
        username: playlist.owner_username.clone(),
        songs: playlist.songs.clone(),
        published: playlist.published,
        ratings: playlist.ratings,
        owned_by_current_user: owned,
        viewer_has_liked: playlist.liked_by.contains(&viewer.email),
        viewer_has_disliked: playlist.disliked_by.contains(&viewer.email),
        comments: playlist
            .comments
            .iter()
            .map(|c| CommentResponse {
                id: c.id.as_str().to_string(),
                author: c.author.clone(),
                comment: c.text.clone(),
            })
            .collect(),
        owner_email: owned.then(|| playlist.owner_email.clone()),
    }
}

/// Load a playlist or report not-found distinctly from authorization
/// failures.
pub(crate) async fn load_playlist(app_state: &AppState, id: &str) -> Result<Playlist> {
    PlaylistStore::find_by_id(&*app_state.db, &PlaylistId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))
}

pub(crate) fn reject_guest(viewer: &Viewer, action: &str) -> Result<()> {
    if viewer.is_guest {
        return Err(ServerError::Unauthorized(format!(
            "Guest users cannot {action}."
        )));
    }
    Ok(())
}

/// Validate and sanitize a playlist name before it is stored
fn clean_name(app_state: &AppState, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServerError::BadRequest(
            "Playlist name must not be empty.".to_string(),
        ));
    }

    let analysis = app_state.sanitizer.sanitize(trimmed);
    if analysis.contains_severe {
        return Err(ServerError::BadRequest(
            "Playlist name contains inappropriate language.".to_string(),
        ));
    }
    Ok(analysis.sanitized_text)
}

fn sorted_responses(
    mut playlists: Vec<Playlist>,
    sort: SortKey,
    viewer: &Viewer,
) -> Vec<PlaylistResponse> {
    sort_playlists(&mut playlists, sort);
    playlists
        .iter()
        .map(|p| playlist_response(p, viewer))
        .collect()
}

/// GET /api/playlists/home
/// The viewer's own playlists, drafts included
pub async fn list_home(
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PlaylistResponse>>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "view a personal library")?;

    let playlists = app_state.db.find_by_owner(&viewer.email).await?;
    Ok(Json(sorted_responses(playlists, query.sort, viewer)))
}

/// GET /api/playlists/community
/// All published playlists
pub async fn list_community(
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PlaylistResponse>>> {
    let playlists = app_state.db.find_published().await?;
    Ok(Json(sorted_responses(playlists, query.sort, auth.viewer())))
}

/// GET /api/playlists/user/:username
/// Published playlists of a named user
pub async fn list_by_user(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PlaylistResponse>>> {
    let playlists = app_state.db.find_published_by_username(&username).await?;
    Ok(Json(sorted_responses(playlists, query.sort, auth.viewer())))
}

/// POST /api/playlists
/// Create a new draft playlist; colliding names get a numeric suffix
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<PlaylistResponse>)> {
    let viewer = auth.viewer();
    reject_guest(viewer, "create playlists")?;

    let base_name = clean_name(&app_state, &req.name)?;
    let name = resolve_unique_name(&*app_state.db, &viewer.email, &base_name, None).await?;

    let playlist = Playlist::new(name, &viewer.email, &viewer.username, req.songs);
    app_state.db.save(&playlist).await?;

    tracing::info!(playlist_id = %playlist.id, owner = %viewer.username, "Created playlist");

    Ok((
        StatusCode::CREATED,
        Json(playlist_response(&playlist, viewer)),
    ))
}

/// GET /api/playlists/:id
pub async fn get_playlist(
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

/// PUT /api/playlists/:id
/// Replace name and songs; owner only. Publication is a separate transition.
pub async fn update_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
    Json(req): Json<UpdatePlaylistRequest>,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "update playlists")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    if !playlist.can_modify(viewer) {
        return Err(ServerError::Unauthorized(
            "Only the owner may update this playlist.".to_string(),
        ));
    }

    let base_name = clean_name(&app_state, &req.name)?;
    if base_name != playlist.name {
        playlist.name =
            resolve_unique_name(&*app_state.db, &viewer.email, &base_name, Some(&playlist.id))
                .await?;
    }
    playlist.songs = req.songs;
    playlist.touch();

    app_state.db.save(&playlist).await?;
    Ok(Json(playlist_response(&playlist, viewer)))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
) -> Result<Json<serde_json::Value>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "delete playlists")?;

    let playlist = load_playlist(&app_state, &id).await?;
    if !playlist.can_modify(viewer) {
        return Err(ServerError::Unauthorized(
            "Only the owner may delete this playlist.".to_string(),
        ));
    }

    app_state.db.delete(&playlist.id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/playlists/:id/publish
/// Owner-only, irreversible `Draft -> Published` transition
pub async fn publish_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedViewer,
) -> Result<Json<PlaylistResponse>> {
    let viewer = auth.viewer();
    reject_guest(viewer, "publish playlists")?;

    let mut playlist = load_playlist(&app_state, &id).await?;
    if !playlist.can_modify(viewer) {
        return Err(ServerError::Unauthorized(
            "Only the owner may publish this playlist.".to_string(),
        ));
    }

    if playlist.publish(Utc::now().timestamp_millis()) {
        app_state.db.save(&playlist).await?;
        tracing::info!(playlist_id = %playlist.id, "Published playlist");
    }

    Ok(Json(playlist_response(&playlist, viewer)))
}
