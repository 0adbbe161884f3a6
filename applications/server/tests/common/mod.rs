/// Common test utilities and fixtures
use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use mixtape_server::{
    config::{CommunitySettings, RateLimitSettings},
    services::{AuthService, Sanitizer},
    state::AppState,
};
use mixtape_storage::Database;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Create a test database with migrations applied
pub async fn create_test_database() -> Result<Arc<Database>> {
    // Create in-memory database for tests
    let db = Database::new("sqlite::memory:").await?;
    Ok(Arc::new(db))
}

/// Rate limits high enough to stay out of the way of functional tests
pub fn generous_rate_limits() -> RateLimitSettings {
    RateLimitSettings {
        write_max: 1000,
        write_window_secs: 60,
        reaction_max: 1000,
        reaction_window_secs: 60,
        listen_max: 1000,
        listen_window_secs: 60,
    }
}

/// Build the full application router against an in-memory database
pub async fn create_test_app() -> (Router, Arc<Database>) {
    create_test_app_with(
        CommunitySettings {
            allow_owner_reactions: false,
        },
        generous_rate_limits(),
    )
    .await
}

/// Build the router with explicit community and rate limit settings
pub async fn create_test_app_with(
    community: CommunitySettings,
    limits: RateLimitSettings,
) -> (Router, Arc<Database>) {
    let db = create_test_database().await.unwrap();

    let auth_service = Arc::new(AuthService::new(
        "test-secret-key".to_string(),
        1, // 1 hour access
        1, // 1 day refresh
    ));
    let sanitizer = Arc::new(Sanitizer::new());

    let app_state = AppState::new(
        db.clone(),
        Arc::clone(&auth_service),
        sanitizer,
        community,
    );

    let app = mixtape_server::create_router(app_state, auth_service, &limits);
    (app, db)
}

/// Issue a request and return status plus parsed JSON body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri).method(method);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Register a user and return their access token
pub async fn register_user(app: &Router, username: &str) -> String {
    let body = serde_json::json!({
        "firstName": "Test",
        "lastName": "User",
        "email": format!("{username}@example.com"),
        "username": username,
        "password": "TestPassword123!",
        "passwordVerify": "TestPassword123!",
    });

    let (status, json) = send(app, "POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "registration failed: {json}");
    json["accessToken"].as_str().unwrap().to_string()
}

/// Obtain an access token for the shared guest identity
pub async fn guest_token(app: &Router) -> String {
    let (status, json) = send(app, "POST", "/api/auth/guest", None, None).await;
    assert_eq!(status, StatusCode::OK);
    json["accessToken"].as_str().unwrap().to_string()
}

/// Create a playlist and return its id
pub async fn create_playlist(app: &Router, token: &str, name: &str) -> String {
    let body = serde_json::json!({ "name": name, "songs": [] });
    let (status, json) = send(app, "POST", "/api/playlists", Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json["_id"].as_str().unwrap().to_string()
}

/// Publish a playlist owned by `token`'s user
pub async fn publish_playlist(app: &Router, token: &str, id: &str) {
    let (status, json) = send(
        app,
        "POST",
        &format!("/api/playlists/{id}/publish"),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "publish failed: {json}");
}
