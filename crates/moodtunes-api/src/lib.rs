pub mod auth;
pub mod catalog;
pub mod comments;
pub mod error;
pub mod health;
pub mod middleware;
pub mod saved;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::auth::AppState;
use crate::middleware::{attach_identity, require_auth};

/// All REST routes. Transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/moods", get(catalog::list_moods))
        .route("/moods/{mood}/artists", get(catalog::mood_artists))
        .route("/artists", get(catalog::list_artists))
        .route("/artists/{artist_id}/songs", get(catalog::artist_songs));

    let comment_routes = Router::new()
        .route(
            "/moods/{mood}/comments",
            get(comments::list).post(comments::add).delete(comments::clear),
        )
        .route(
            "/moods/{mood}/comments/{comment_id}",
            patch(comments::update).delete(comments::remove),
        )
        .layer(axum_middleware::from_fn_with_state(state.clone(), attach_identity));

    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route(
            "/users/{user_id}/saved-items",
            get(saved::list).post(saved::add).delete(saved::clear),
        )
        .route(
            "/users/{user_id}/saved-items/{item_id}",
            patch(saved::update).delete(saved::remove),
        )
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(comment_routes)
        .merge(protected_routes)
        .with_state(state)
}
