use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::io::Write;

use db::models::user::{self, Role};
use services::auth::Scope;
use services::users::{self, NewUser, SheetRowOutcome};
use services::ServiceError;

use crate::auth::AuthUser;
use crate::error::service_error_response;
use crate::response::ApiResponse;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new()
        .route("/register", post(register))
        .route("/register/multiple", post(register_multiple))
        .route("/all", get(list_all))
        .route("/delete", post(delete))
}

#[derive(Deserialize)]
struct RegisterRequest {
    user_id: String,
    username: String,
    email: String,
    #[serde(default)]
    password: Option<String>,
    role: Role,
    active_start_date: DateTime<Utc>,
    active_end_date: DateTime<Utc>,
}

#[derive(Serialize)]
struct RegisterResponse {
    user: user::Model,
    password: String,
}

async fn register(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Account])
        .map_err(service_error_response)?;

    let (created, password) = users::register_user(
        &db,
        NewUser {
            user_id: body.user_id,
            username: body.username,
            email: body.email,
            password: body.password,
            role: body.role,
            active_start_date: body.active_start_date,
            active_end_date: body.active_end_date,
        },
    )
    .await
    .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(
        RegisterResponse {
            user: created,
            password,
        },
        "user registered",
    )))
}

#[derive(Serialize)]
struct RowOutcome {
    row: usize,
    user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<SheetRowOutcome> for RowOutcome {
    fn from(outcome: SheetRowOutcome) -> Self {
        match outcome.outcome {
            Ok(password) => RowOutcome {
                row: outcome.row,
                user_id: outcome.user_id,
                password: Some(password),
                error: None,
            },
            Err(error) => RowOutcome {
                row: outcome.row,
                user_id: outcome.user_id,
                password: None,
                error: Some(error),
            },
        }
    }
}

async fn register_multiple(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Vec<RowOutcome>>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Account])
        .map_err(service_error_response)?;

    let mut sheet_bytes = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        service_error_response(ServiceError::BadRequest(format!(
            "invalid multipart body: {e}"
        )))
    })? {
        if field.name() == Some("file") {
            sheet_bytes = Some(field.bytes().await.map_err(|e| {
                service_error_response(ServiceError::BadRequest(format!(
                    "failed reading upload: {e}"
                )))
            })?);
        }
    }
    let bytes = sheet_bytes
        .ok_or_else(|| service_error_response(ServiceError::BadRequest("missing file field".into())))?;

    let mut tmp = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .map_err(|e| {
            service_error_response(ServiceError::Internal(format!(
                "failed creating temp file: {e}"
            )))
        })?;
    tmp.write_all(&bytes).map_err(|e| {
        service_error_response(ServiceError::Internal(format!(
            "failed writing temp file: {e}"
        )))
    })?;

    let outcomes = users::register_users_from_sheet(&db, tmp.path())
        .await
        .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(
        outcomes.into_iter().map(RowOutcome::from).collect(),
        "roster processed",
    )))
}

async fn list_all(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<Vec<user::Model>>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Account])
        .or_else(|_| auth_user.require(&[Scope::ViewUsers]))
        .map_err(service_error_response)?;

    let all = users::list_users(&db).await.map_err(service_error_response)?;
    Ok(Json(ApiResponse::success(all, "users listed")))
}

#[derive(Deserialize)]
struct DeleteRequest {
    user_ids: Vec<String>,
}

async fn delete(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Json(body): Json<DeleteRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Account])
        .map_err(service_error_response)?;

    users::delete_users(&db, body.user_ids)
        .await
        .map_err(service_error_response)?;
    Ok(Json(ApiResponse::success((), "users deleted")))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};
    use db::test_utils::test_db;
    use sea_orm::DatabaseConnection;
    use serde_json::Value;
    use tower::ServiceExt;

    use services::auth::Scope;
    use services::users::{register_user, NewUser};

    use super::Role;

    async fn seed_admin(db: &DatabaseConnection) -> (String, String) {
        let now = Utc::now();
        let (created, password) = register_user(
            db,
            NewUser {
                user_id: "admin001".into(),
                username: "root".into(),
                email: "root@example.edu".into(),
                password: Some("supersecret1".into()),
                role: Role::Admin,
                active_start_date: now - Duration::days(1),
                active_end_date: now + Duration::days(365),
            },
        )
        .await
        .unwrap();
        (created.user_id, password)
    }

    async fn token_for(db: &DatabaseConnection, email: &str, password: &str) -> String {
        services::auth::TokenService::new(db.clone())
            .login(email, password, &[Scope::Account])
            .await
            .unwrap()
            .access_token
    }

    #[tokio::test]
    async fn register_requires_account_scope() {
        let db = test_db().await;
        seed_admin(&db).await;
        let token = token_for(&db, "root@example.edu", "supersecret1").await;
        let app = crate::routes::routes(db);

        let now = Utc::now();
        let body = serde_json::json!({
            "user_id": "u100",
            "username": "student",
            "email": "student@example.edu",
            "role": "student",
            "active_start_date": now,
            "active_end_date": now + Duration::days(100),
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/users/register")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["user"]["user_id"], "u100");
    }

    #[tokio::test]
    async fn register_without_token_is_unauthenticated() {
        let db = test_db().await;
        let app = crate::routes::routes(db);

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/users/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
