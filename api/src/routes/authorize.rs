use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use services::auth::{Scope, TokenService};
use services::ServiceError;

use crate::error::service_error_response;
use crate::response::ApiResponse;

const REFRESH_COOKIE: &str = "refresh_token";

pub fn routes() -> Router<DatabaseConnection> {
    Router::new()
        .route("/token", post(issue_token))
        .route("/token/update", get(refresh_token))
        .route("/token/validate", post(validate_token))
        .route("/logout", post(logout))
}

#[derive(Deserialize)]
struct TokenRequest {
    email: String,
    password: String,
    #[serde(default)]
    scopes: Vec<Scope>,
}

#[derive(Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
}

fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .path("/")
        .build()
}

fn bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// `POST /authorize/token` (spec §4.C): OAuth2 password grant. Mints an
/// access/refresh pair and records a LoginHistory row.
async fn issue_token(
    State(db): State<DatabaseConnection>,
    jar: CookieJar,
    Json(body): Json<TokenRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let result = TokenService::new(db)
        .login(&body.email, &body.password, &body.scopes)
        .await
        .map_err(service_error_response)?;

    let jar = jar.add(refresh_cookie(result.refresh_token));
    Ok((
        jar,
        Json(ApiResponse::success(
            TokenResponse {
                access_token: result.access_token,
                token_type: "bearer",
            },
            "login succeeded",
        )),
    ))
}

/// `GET /authorize/token/update`: rotate the token pair when the access
/// token is expired, anchored to its prior `expire` (spec §4.C).
async fn refresh_token(
    State(db): State<DatabaseConnection>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(CookieJar, Json<ApiResponse<TokenResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let access_token = bearer_from_headers(&headers).ok_or_else(|| {
        service_error_response(ServiceError::Unauthenticated(
            "missing access token".into(),
        ))
    })?;
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| {
            service_error_response(ServiceError::Unauthenticated(
                "missing refresh cookie".into(),
            ))
        })?;

    let result = TokenService::new(db)
        .refresh(&access_token, &refresh_token)
        .await
        .map_err(service_error_response)?;

    let jar = jar.add(refresh_cookie(result.refresh_token));
    Ok((
        jar,
        Json(ApiResponse::success(
            TokenResponse {
                access_token: result.access_token,
                token_type: "bearer",
            },
            "token refreshed",
        )),
    ))
}

#[derive(Serialize)]
struct ValidateResponse {
    is_valid: bool,
}

async fn validate_token(
    State(db): State<DatabaseConnection>,
    headers: HeaderMap,
) -> Json<ApiResponse<ValidateResponse>> {
    let is_valid = bearer_from_headers(&headers)
        .map(|token| TokenService::new(db).validate(&token))
        .unwrap_or(false);
    Json(ApiResponse::success(
        ValidateResponse { is_valid },
        "token validated",
    ))
}

/// `POST /authorize/logout`: deletes the LoginHistory row and clears the
/// refresh cookie. A missing/garbage bearer token is a no-op, not an error
/// — logout is idempotent.
async fn logout(
    State(db): State<DatabaseConnection>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(CookieJar, Json<ApiResponse<()>>), (StatusCode, Json<ApiResponse<()>>)> {
    if let Some(token) = bearer_from_headers(&headers) {
        TokenService::new(db)
            .logout(&token)
            .await
            .map_err(service_error_response)?;
    }
    let jar = jar.remove(Cookie::from(REFRESH_COOKIE));
    Ok((jar, Json(ApiResponse::success((), "logged out"))))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};
    use db::models::user::Role;
    use db::test_utils::test_db;
    use sea_orm::DatabaseConnection;
    use serde_json::Value;
    use tower::ServiceExt;

    use services::users::{register_user, NewUser};

    async fn seed(db: &DatabaseConnection) {
        let now = Utc::now();
        register_user(
            db,
            NewUser {
                user_id: "u001".into(),
                username: "alice".into(),
                email: "alice@example.edu".into(),
                password: Some("hunter22".into()),
                role: Role::Student,
                active_start_date: now - Duration::days(1),
                active_end_date: now + Duration::days(365),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn token_then_validate_round_trip() {
        let db = test_db().await;
        seed(&db).await;
        let app = crate::routes::routes(db);

        let login_body = serde_json::json!({
            "email": "alice@example.edu",
            "password": "hunter22",
            "scopes": ["me"],
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/authorize/token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(login_body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        let access_token = json["data"]["access_token"].as_str().unwrap().to_string();

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/authorize/token/validate")
            .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["is_valid"], true);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthenticated() {
        let db = test_db().await;
        seed(&db).await;
        let app = crate::routes::routes(db);

        let login_body = serde_json::json!({
            "email": "alice@example.edu",
            "password": "wrong",
            "scopes": ["me"],
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/authorize/token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(login_body.to_string()))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn validate_rejects_garbage_token() {
        let db = test_db().await;
        let app = crate::routes::routes(db);

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/authorize/token/validate")
            .header(header::AUTHORIZATION, "Bearer not-a-real-token")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["is_valid"], false);
    }
}
