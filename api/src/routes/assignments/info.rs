use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use db::models::lecture;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use services::auth::Scope;
use services::catalog::{self, ProblemDetail};

use crate::auth::AuthUser;
use crate::error::service_error_response;
use crate::response::ApiResponse;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new()
        .route("/info", get(list_lectures))
        .route(
            "/info/{lecture_id}/{assignment_id}/detail",
            get(problem_detail),
        )
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    all: bool,
}

async fn list_lectures(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<lecture::Model>>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;

    let lectures = catalog::list_lectures(&db, &auth_user.user, query.all)
        .await
        .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(lectures, "lectures listed")))
}

#[derive(Deserialize)]
struct DetailQuery {
    #[serde(default)]
    eval: bool,
}

async fn problem_detail(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path((lecture_id, assignment_id)): Path<(i64, i64)>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<ApiResponse<ProblemDetail>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;

    let detail = catalog::problem_detail(
        &db,
        &auth_user.user,
        lecture_id,
        assignment_id,
        query.eval,
    )
    .await
    .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(detail, "problem detail")))
}
