use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("internal db error: {0}")]
    Internal(#[from] sea_orm::DbErr),
}

impl DbError {
    pub fn from_sea_orm(err: sea_orm::DbErr) -> Self {
        match &err {
            sea_orm::DbErr::RecordNotFound(_) => DbError::NotFound,
            sea_orm::DbErr::Exec(sea_orm::RuntimeErr::SqlxError(sqlx_err)) => {
                if let Some(db_err) = sqlx_err.as_database_error() {
                    if db_err.is_unique_violation() {
                        return DbError::Conflict(db_err.message().to_string());
                    }
                    if db_err.is_foreign_key_violation() {
                        return DbError::Integrity(db_err.message().to_string());
                    }
                }
                DbError::Internal(err)
            }
            _ => DbError::Internal(err),
        }
    }
}
