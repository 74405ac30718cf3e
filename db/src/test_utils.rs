use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// In-memory sqlite database with every migration applied. Each call opens
/// a fresh, isolated database. `max_connections(1)` is required: a second
/// pooled connection would open a second, empty `:memory:` database.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None).await.expect("failed to run migrations");
    db
}
