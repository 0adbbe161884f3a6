/// Router construction, shared between the binary and the test suites
use crate::{
    api,
    config::RateLimitSettings,
    middleware::{auth_middleware, rate_limit_middleware, RateLimiter},
    services::AuthService,
    state::AppState,
};
use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn create_router(
    app_state: AppState,
    auth_service: Arc<AuthService>,
    limits: &RateLimitSettings,
) -> Router {
    let write_limiter = RateLimiter::new(
        Duration::from_secs(limits.write_window_secs),
        limits.write_max,
        "Too many playlist updates detected. Please try again in a few minutes.",
    );
    let reaction_limiter = RateLimiter::scoped_by_path(
        Duration::from_secs(limits.reaction_window_secs),
        limits.reaction_max,
        "Too many interactions with this playlist. Please slow down.",
    );
    let listen_limiter = RateLimiter::scoped_by_path(
        Duration::from_secs(limits.listen_window_secs),
        limits.listen_max,
        "Playback limit reached for this playlist. Please try again later.",
    );

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/guest", post(api::auth::guest))
        .route("/auth/refresh", post(api::auth::refresh));

    // Reads carry no rate limit
    let read_routes = Router::new()
        .route("/auth/me", get(api::auth::me))
        .route("/playlists/home", get(api::playlists::list_home))
        .route("/playlists/community", get(api::playlists::list_community))
        .route(
            "/playlists/user/:username",
            get(api::playlists::list_by_user),
        )
        .route("/playlists/:id", get(api::playlists::get_playlist))
        .route(
            "/playlists/:id/comments",
            get(api::comments::list_comments),
        );

    // Mutating playlist and comment routes share the write limiter
    let write_routes = Router::new()
        .route("/playlists", post(api::playlists::create_playlist))
        .route(
            "/playlists/:id",
            put(api::playlists::update_playlist).delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/publish",
            post(api::playlists::publish_playlist),
        )
        .route("/playlists/:id/comments", post(api::comments::create_comment))
        .route(
            "/playlists/:id/comments/:comment_id",
            put(api::comments::update_comment).delete(api::comments::delete_comment),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            write_limiter,
            rate_limit_middleware,
        ));

    // Reactions and listens get per-playlist budgets
    let reaction_routes = Router::new()
        .route("/playlists/:id/like", post(api::reactions::like_playlist))
        .route(
            "/playlists/:id/dislike",
            post(api::reactions::dislike_playlist),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            reaction_limiter,
            rate_limit_middleware,
        ));

    let listen_routes = Router::new()
        .route(
            "/playlists/:id/listen",
            post(api::reactions::register_listen),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            listen_limiter,
            rate_limit_middleware,
        ));

    // The auth layer wraps every protected route and runs first, so the
    // limiters can key by viewer.
    let protected_routes = read_routes
        .merge(write_routes)
        .merge(reaction_routes)
        .merge(listen_routes)
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
