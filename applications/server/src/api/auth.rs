/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedViewer,
    state::AppState,
};
use axum::{extract::State, Json};
use mixtape_core::{User, UserStore, Viewer};
use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_verify: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerResponse {
    pub email: String,
    pub username: String,
    pub is_guest: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: ViewerResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

impl ViewerResponse {
    fn from_viewer(viewer: &Viewer) -> Self {
        Self {
            email: viewer.email.clone(),
            username: viewer.username.clone(),
            is_guest: viewer.is_guest,
        }
    }
}

fn session_response(app_state: &AppState, viewer: &Viewer) -> Result<SessionResponse> {
    Ok(SessionResponse {
        access_token: app_state.auth_service.create_access_token(viewer)?,
        refresh_token: app_state.auth_service.create_refresh_token(viewer)?,
        token_type: "Bearer".to_string(),
        user: ViewerResponse::from_viewer(viewer),
    })
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>> {
    let first_name = req.first_name.trim();
    let last_name = req.last_name.trim();
    let email = req.email.trim();
    let username = req.username.trim();

    if first_name.is_empty()
        || last_name.is_empty()
        || email.is_empty()
        || username.is_empty()
        || req.password.is_empty()
    {
        return Err(ServerError::BadRequest(
            "Please enter all required fields.".to_string(),
        ));
    }
    if req.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ServerError::BadRequest(format!(
            "Please enter a password of at least {MIN_PASSWORD_LENGTH} characters."
        )));
    }
    if req.password != req.password_verify {
        return Err(ServerError::BadRequest(
            "Please enter the same password twice.".to_string(),
        ));
    }

    if app_state.db.find_by_email(email).await?.is_some() {
        return Err(ServerError::BadRequest(
            "An account with this email address already exists.".to_string(),
        ));
    }
    if app_state.db.find_by_username(username).await?.is_some() {
        return Err(ServerError::BadRequest(
            "An account with this username already exists.".to_string(),
        ));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user = User::new(first_name, last_name, email, username, password_hash);
    app_state.db.insert(&user).await?;

    tracing::info!(username = %user.username, "Registered new user");

    let viewer = Viewer::for_user(&user);
    Ok(Json(session_response(&app_state, &viewer)?))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    // One failure message for unknown email and wrong password alike.
    let invalid = || ServerError::Auth("Wrong email or password provided.".to_string());

    let user = app_state
        .db
        .find_by_email(req.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &user.password_hash)?
    {
        return Err(invalid());
    }

    let viewer = Viewer::for_user(&user);
    Ok(Json(session_response(&app_state, &viewer)?))
}

/// POST /api/auth/guest
///
/// Issues tokens for the shared guest identity; no account is created.
pub async fn guest(State(app_state): State<AppState>) -> Result<Json<SessionResponse>> {
    let viewer = Viewer::guest();
    Ok(Json(session_response(&app_state, &viewer)?))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let viewer = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    Ok(Json(RefreshResponse {
        access_token: app_state.auth_service.create_access_token(&viewer)?,
        token_type: "Bearer".to_string(),
    }))
}

/// GET /api/auth/me
pub async fn me(auth: AuthenticatedViewer) -> Json<ViewerResponse> {
    Json(ViewerResponse::from_viewer(auth.viewer()))
}
