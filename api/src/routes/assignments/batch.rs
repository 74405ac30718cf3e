use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use db::models::batch_submission;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::io::Write;

use services::auth::Scope;
use services::batch::run_batch_orchestration;
use services::ServiceError;

use crate::auth::AuthUser;
use crate::error::service_error_response;
use crate::response::ApiResponse;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new().route("/batch/{lecture_id}", post(submit_batch))
}

#[derive(Deserialize)]
struct EvalQuery {
    #[serde(default)]
    eval: bool,
}

/// `POST /assignments/batch/{lecture_id}` (spec §4.F). The orchestrator
/// reads its grader ZIP from disk, so the uploaded bytes are staged to a
/// temp file first and cleaned up once orchestration returns.
async fn submit_batch(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path(lecture_id): Path<i64>,
    Query(query): Query<EvalQuery>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<batch_submission::Model>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Batch])
        .map_err(service_error_response)?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| service_error_response(ServiceError::BadRequest(format!("invalid multipart body: {e}"))))?
        .ok_or_else(|| service_error_response(ServiceError::BadRequest("missing zip field".into())))?;
    let bytes = field
        .bytes()
        .await
        .map_err(|e| service_error_response(ServiceError::BadRequest(format!("failed reading upload: {e}"))))?;

    let mut tmp = tempfile::Builder::new()
        .suffix(".zip")
        .tempfile()
        .map_err(|e| service_error_response(ServiceError::Internal(format!("failed creating temp file: {e}"))))?;
    tmp.write_all(&bytes)
        .map_err(|e| service_error_response(ServiceError::Internal(format!("failed writing temp file: {e}"))))?;

    let batch = run_batch_orchestration(&db, &auth_user.user, lecture_id, query.eval, tmp.path())
        .await
        .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(batch, "batch accepted")))
}
