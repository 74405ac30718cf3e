use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use db::models::{batch_submission, submission};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use services::auth::Scope;
use services::results::{
    get_batch, get_submission, list_batches, list_submissions, submission_file_bundle,
    BundleKind, SubmissionListQuery,
};
use services::ServiceError;
use util::pagination::Page;

use crate::auth::AuthUser;
use crate::error::service_error_response;
use crate::response::ApiResponse;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new()
        .route("/status/submissions/view", get(submissions_view))
        .route("/status/submissions/id/{id}", get(submission_status))
        .route(
            "/status/submissions/id/{id}/files/zip",
            get(submission_bundle),
        )
        .route("/status/batch/all", get(batches_view))
        .route("/status/batch/id/{batch_id}", get(batch_status))
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default)]
    include_eval: bool,
    #[serde(default)]
    all: bool,
}

fn default_page() -> i64 {
    1
}

async fn submissions_view(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<submission::Model>>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;

    let page = util::pagination::validate_page(query.page)
        .map_err(|e| service_error_response(ServiceError::BadRequest(e.into())))?;

    let result = list_submissions(
        &db,
        &auth_user.user,
        SubmissionListQuery {
            page,
            include_eval: query.include_eval,
            all: query.all,
        },
    )
    .await
    .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(result, "submissions listed")))
}

async fn submission_status(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<submission::Model>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;

    let submission = get_submission(&db, &auth_user.user, id)
        .await
        .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(submission, "submission status")))
}

#[derive(Deserialize)]
struct BundleQuery {
    #[serde(rename = "type")]
    kind: String,
}

async fn submission_bundle(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    Query(query): Query<BundleQuery>,
) -> Result<Response, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;

    // Ownership-checked: Forbidden for non-owners before any file is built.
    get_submission(&db, &auth_user.user, id)
        .await
        .map_err(service_error_response)?;

    let kind = match query.kind.as_str() {
        "uploaded" => BundleKind::Uploaded,
        "arranged" => BundleKind::Arranged,
        other => {
            return Err(service_error_response(ServiceError::BadRequest(format!(
                "invalid type: {other}"
            ))))
        }
    };

    let bundle = submission_file_bundle(&db, id, kind)
        .await
        .map_err(service_error_response)?;

    let bytes = tokio::fs::read(&bundle.path).await.map_err(|e| {
        service_error_response(ServiceError::Internal(format!(
            "failed reading bundle: {e}"
        )))
    })?;

    Ok(([(axum::http::header::CONTENT_TYPE, "application/zip")], bytes).into_response())
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "default_page")]
    page: i64,
}

async fn batches_view(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<batch_submission::Model>>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Batch])
        .map_err(service_error_response)?;

    let page = util::pagination::validate_page(query.page)
        .map_err(|e| service_error_response(ServiceError::BadRequest(e.into())))?;

    let result = list_batches(&db, page).await.map_err(service_error_response)?;
    Ok(Json(ApiResponse::success(result, "batches listed")))
}

async fn batch_status(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path(batch_id): Path<i64>,
) -> Result<Json<ApiResponse<batch_submission::Model>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Batch])
        .map_err(service_error_response)?;

    let batch = get_batch(&db, batch_id)
        .await
        .map_err(service_error_response)?;
    Ok(Json(ApiResponse::success(batch, "batch status")))
}
