use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;

use crate::response::ApiResponse;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new().route("/", get(health_check))
}

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "health check passed"))
}

#[cfg(test)]
mod tests {
    use super::health_check;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;
    use serde_json::Value;

    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let response = health_check().await.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["message"], "health check passed");
    }
}
