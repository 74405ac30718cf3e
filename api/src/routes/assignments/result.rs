use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;

use services::auth::Scope;
use services::results::{
    batch_detail, batch_student_file, batch_user_detail, submission_detail, BatchDetail,
    EvaluationStatusDetail, SubmissionDetail,
};
use services::ServiceError;

use crate::auth::AuthUser;
use crate::error::service_error_response;
use crate::response::ApiResponse;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new()
        .route("/result/submissions/id/{id}", get(submission_result))
        .route("/result/batch/id/{batch_id}", get(batch_result))
        .route(
            "/result/batch/id/{batch_id}/user/{user_id}",
            get(batch_user_result),
        )
        .route(
            "/result/batch/{batch_id}/files/{kind}/{user_id}",
            get(batch_file),
        )
}

async fn submission_result(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SubmissionDetail>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;

    let detail = submission_detail(&db, &auth_user.user, id)
        .await
        .map_err(service_error_response)?;
    Ok(Json(ApiResponse::success(detail, "submission result")))
}

async fn batch_result(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path(batch_id): Path<i64>,
) -> Result<Json<ApiResponse<BatchDetail>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Batch])
        .map_err(service_error_response)?;

    let detail = batch_detail(&db, batch_id)
        .await
        .map_err(service_error_response)?;
    Ok(Json(ApiResponse::success(detail, "batch result")))
}

async fn batch_user_result(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path((batch_id, user_id)): Path<(i64, String)>,
) -> Result<Json<ApiResponse<EvaluationStatusDetail>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Batch])
        .map_err(service_error_response)?;

    let detail = batch_user_detail(&db, batch_id, &user_id)
        .await
        .map_err(service_error_response)?;
    Ok(Json(ApiResponse::success(detail, "student evaluation")))
}

async fn batch_file(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path((batch_id, kind, user_id)): Path<(i64, String, String)>,
) -> Result<Response, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Batch])
        .map_err(service_error_response)?;

    let report = match kind.as_str() {
        "uploaded" => false,
        "report" => true,
        other => {
            return Err(service_error_response(ServiceError::BadRequest(format!(
                "invalid file kind: {other}"
            ))))
        }
    };

    let path = batch_student_file(&db, batch_id, &user_id, report)
        .await
        .map_err(service_error_response)?;

    if report {
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            service_error_response(ServiceError::NotFound(format!("failed reading file: {e}")))
        })?;
        return Ok(([(axum::http::header::CONTENT_TYPE, "application/pdf")], bytes).into_response());
    }

    // "uploaded" names a flat expanded-submission directory (unfold never
    // leaves subdirectories behind); zip it on demand the same way
    // submission_file_bundle does.
    let guard = tempfile::tempdir().map_err(|e| {
        service_error_response(ServiceError::Internal(format!(
            "failed creating temp dir: {e}"
        )))
    })?;
    let zip_path = guard.path().join("upload.zip");
    let entries: Vec<(String, std::path::PathBuf)> = std::fs::read_dir(&path)
        .map_err(|e| {
            service_error_response(ServiceError::NotFound(format!(
                "failed reading upload dir: {e}"
            )))
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| (entry.file_name().to_string_lossy().to_string(), entry.path()))
        .collect();

    util::archive::build_zip(&zip_path, &entries).map_err(|e| {
        service_error_response(ServiceError::Internal(format!(
            "failed assembling bundle: {e}"
        )))
    })?;

    let bytes = tokio::fs::read(&zip_path).await.map_err(|e| {
        service_error_response(ServiceError::Internal(format!(
            "failed reading assembled bundle: {e}"
        )))
    })?;
    drop(guard);

    Ok(([(axum::http::header::CONTENT_TYPE, "application/zip")], bytes).into_response())
}
