use chrono::{Duration, Utc};
use db::models::login_history;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Deletes LoginHistory rows whose `logout_at` is more than `retention_hours`
/// in the past (spec §4.C / §4.H). Returns the number of rows removed.
pub async fn prune_expired_sessions(
    db: &DatabaseConnection,
    retention_hours: i64,
) -> Result<u64, sea_orm::DbErr> {
    let cutoff = Utc::now() - Duration::hours(retention_hours);
    let result = login_history::Entity::delete_many()
        .filter(login_history::Column::LogoutAt.lt(cutoff))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::user;
    use db::repositories::login_history_repository::LoginHistoryRepository;
    use db::repositories::repository::Repository;
    use db::repositories::user_repository::UserRepository;
    use db::test_utils::test_db;
    use sea_orm::Set;

    #[tokio::test]
    async fn prunes_only_rows_past_retention() {
        let db = test_db().await;
        let now = Utc::now();

        UserRepository::new(db.clone())
            .create(user::ActiveModel {
                user_id: Set("u900".into()),
                username: Set("dana".into()),
                email: Set("dana@example.edu".into()),
                password_hash: Set("placeholder".into()),
                role: Set(user::Role::Student),
                disabled: Set(false),
                active_start_date: Set(now - Duration::days(1)),
                active_end_date: Set(now + Duration::days(365)),
                ..Default::default()
            })
            .await
            .unwrap();

        let history = LoginHistoryRepository::new(db.clone());
        history
            .create(login_history::ActiveModel {
                user_id: Set("u900".into()),
                login_at: Set(now - Duration::hours(30)),
                logout_at: Set(now - Duration::hours(26)),
                refresh_count: Set(0),
                current_access_token: Set("a".into()),
                current_refresh_token: Set("r".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let removed = prune_expired_sessions(&db, 24).await.unwrap();
        assert_eq!(removed, 1);
    }
}
