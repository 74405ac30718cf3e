use db::DbError;
use thiserror::Error;

/// Error kinds surfaced by the core (spec §7): the API layer maps each
/// variant to an HTTP status without inspecting the message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => ServiceError::NotFound("entity not found".into()),
            DbError::Conflict(msg) => ServiceError::Conflict(msg),
            DbError::Integrity(msg) => ServiceError::Internal(msg),
            DbError::Internal(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        ServiceError::from(DbError::from_sea_orm(err))
    }
}
