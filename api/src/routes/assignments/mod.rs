use axum::Router;
use sea_orm::DatabaseConnection;

pub mod batch;
pub mod info;
pub mod judge;
pub mod result;
pub mod status;

pub fn routes() -> Router<DatabaseConnection> {
    Router::new()
        .merge(info::routes())
        .merge(judge::routes())
        .merge(batch::routes())
        .merge(status::routes())
        .merge(result::routes())
}
