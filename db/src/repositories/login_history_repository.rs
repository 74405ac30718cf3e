use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::LoginHistoryFilter;
use crate::models::login_history;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct LoginHistoryRepository {
    db: DatabaseConnection,
}

impl LoginHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<login_history::Entity, LoginHistoryFilter> for LoginHistoryRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<login_history::Entity>,
        filter: &LoginHistoryFilter,
    ) -> Select<login_history::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(login_history::Column::Id.eq(id));
        }
        if let Some(ref user_id) = filter.user_id {
            condition = condition.add(login_history::Column::UserId.eq(user_id.clone()));
        }
        if let Some(login_at) = filter.login_at {
            if let Some(dt) = chrono::DateTime::from_timestamp(login_at, 0) {
                condition = condition.add(login_history::Column::LoginAt.eq(dt));
            }
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<login_history::Entity>,
        _sort_by: Option<String>,
    ) -> Select<login_history::Entity> {
        query.order_by_desc(login_history::Column::LoginAt)
    }
}

impl LoginHistoryRepository {
    /// The single live session for a user, if any. The spec's
    /// single-session-per-user rule means this should never find more than
    /// one row, but `find_one` naturally returns the most recent by
    /// `apply_sorting` if duplicates ever existed transiently.
    pub async fn find_active_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<login_history::Model>, sea_orm::DbErr> {
        self.find_one(LoginHistoryFilter::new().with_user_id(user_id.to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{self, Role};
    use crate::repositories::user_repository::UserRepository;
    use crate::test_utils::test_db;
    use chrono::{Duration, Utc};
    use sea_orm::Set;

    #[tokio::test]
    async fn find_active_for_user_returns_the_row() {
        let db = test_db().await;
        let now = Utc::now();

        UserRepository::new(db.clone())
            .create(user::ActiveModel {
                user_id: Set("u100".into()),
                username: Set("alice".into()),
                email: Set("alice@example.edu".into()),
                password_hash: Set("placeholder".into()),
                role: Set(Role::Student),
                disabled: Set(false),
                active_start_date: Set(now - Duration::days(1)),
                active_end_date: Set(now + Duration::days(365)),
                ..Default::default()
            })
            .await
            .unwrap();

        let repo = LoginHistoryRepository::new(db);
        repo.create(login_history::ActiveModel {
            user_id: Set("u100".into()),
            login_at: Set(now),
            logout_at: Set(now + Duration::hours(2)),
            refresh_count: Set(0),
            current_access_token: Set("access".into()),
            current_refresh_token: Set("refresh".into()),
            ..Default::default()
        })
        .await
        .unwrap();

        let active = repo.find_active_for_user("u100").await.unwrap();
        assert!(active.is_some());
    }
}
