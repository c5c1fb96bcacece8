use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod testing;

use middleware::{cors_middleware, CorsPolicy};
use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(list_routes())
        .merge(mutating_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn list_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/functions/v1/list-users", post(admin::list_users))
        .layer(from_fn_with_state(CorsPolicy::read_only(), cors_middleware))
}

fn mutating_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/functions/v1/invite-user", post(admin::invite_user))
        .route("/functions/v1/delete-user", post(admin::delete_user))
        .layer(from_fn_with_state(CorsPolicy::with_credentials(), cors_middleware))
}
