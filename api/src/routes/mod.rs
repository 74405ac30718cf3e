use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;

pub mod assignments;
pub mod authorize;
pub mod health;
pub mod users;

/// Builds the complete application router, nesting each feature group
/// under its base path (spec §6: everything under `/api/v1`).
pub fn routes(db: DatabaseConnection) -> Router {
    Router::new()
        .nest("/health", health::routes())
        .nest("/api/v1/authorize", authorize::routes())
        .nest("/api/v1/assignments", assignments::routes())
        .nest("/api/v1/users", users::routes())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
