use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use db::models::submission;
use db::models::user::Role;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use services::auth::Scope;
use services::ingestion::self_check::ingest_self_check;
use services::ingestion::{ingest_single_submission, UploadedBytes};
use services::ServiceError;

use crate::auth::AuthUser;
use crate::error::service_error_response;
use crate::response::ApiResponse;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new()
        .route("/judge/{lecture_id}/{assignment_id}", post(judge_single))
        .route("/judge/{lecture_id}", post(judge_self_check))
}

#[derive(Deserialize)]
struct EvalQuery {
    #[serde(default)]
    eval: bool,
}

async fn collect_files(multipart: &mut Multipart) -> Result<Vec<UploadedBytes>, ServiceError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::BadRequest(format!("failed reading upload: {e}")))?;
        files.push(UploadedBytes {
            filename,
            bytes: bytes.to_vec(),
        });
    }
    Ok(files)
}

/// `POST /assignments/judge/{lecture_id}/{assignment_id}` (spec §4.D).
async fn judge_single(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path((lecture_id, assignment_id)): Path<(i64, i64)>,
    Query(query): Query<EvalQuery>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<submission::Model>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;

    let files = collect_files(&mut multipart)
        .await
        .map_err(service_error_response)?;

    let created = ingest_single_submission(
        &db,
        &auth_user.user,
        lecture_id,
        assignment_id,
        query.eval,
        files,
    )
    .await
    .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(created, "submission queued")))
}

/// `POST /assignments/judge/{lecture_id}` (spec §4.E): whole-lecture
/// self-check, admin/manager only regardless of the `eval` flag's value.
async fn judge_self_check(
    State(db): State<DatabaseConnection>,
    auth_user: AuthUser,
    Path(lecture_id): Path<i64>,
    Query(query): Query<EvalQuery>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Vec<submission::Model>>>, (StatusCode, Json<ApiResponse<()>>)> {
    auth_user
        .require(&[Scope::Me])
        .map_err(service_error_response)?;
    if !matches!(auth_user.user.role, Role::Admin | Role::Manager) {
        return Err(service_error_response(ServiceError::Forbidden(
            "self-check ingestion requires admin or manager".into(),
        )));
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|e| service_error_response(ServiceError::BadRequest(format!("invalid multipart body: {e}"))))?
        .ok_or_else(|| service_error_response(ServiceError::BadRequest("missing zip field".into())))?;
    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .ok_or_else(|| service_error_response(ServiceError::BadRequest("missing filename".into())))?;
    let bytes = field
        .bytes()
        .await
        .map_err(|e| service_error_response(ServiceError::BadRequest(format!("failed reading upload: {e}"))))?;

    let created = ingest_self_check(&db, &auth_user.user, lecture_id, query.eval, &filename, &bytes)
        .await
        .map_err(service_error_response)?;

    Ok(Json(ApiResponse::success(created, "self-check submitted")))
}
