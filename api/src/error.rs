use axum::http::StatusCode;
use axum::Json;
use services::ServiceError;

use crate::response::ApiResponse;

/// Maps a `ServiceError` to its HTTP status and envelope (spec §7). Store
/// integrity/internal failures are logged with full detail and given a
/// generic message; everything else is safe to echo back verbatim.
pub fn service_error_response(err: ServiceError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, message) = match err {
        ServiceError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
        ServiceError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        ServiceError::Conflict(msg) => {
            log::error!("conflict treated as internal: {msg}");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
        }
        ServiceError::Internal(msg) => {
            log::error!("internal error: {msg}");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
        }
    };
    (status, Json(ApiResponse::error(message)))
}
