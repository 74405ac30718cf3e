use sea_orm::{prelude::Expr, ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::UserFilter;
use crate::models::user;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<user::Entity, UserFilter> for UserRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(query: Select<user::Entity>, filter: &UserFilter) -> Select<user::Entity> {
        let mut condition = Condition::all();

        if let Some(ref user_id) = filter.user_id {
            condition = condition.add(user::Column::UserId.eq(user_id.clone()));
        }
        if let Some(ref email) = filter.email {
            condition = condition.add(user::Column::Email.eq(email.clone()));
        }
        if let Some(role) = filter.role {
            condition = condition.add(user::Column::Role.eq(role));
        }
        if let Some(disabled) = filter.disabled {
            condition = condition.add(user::Column::Disabled.eq(disabled));
        }
        if let Some(ref query_text) = filter.query {
            let pattern = format!("%{}%", query_text.to_lowercase());
            let search = Condition::any()
                .add(Expr::cust("LOWER(username)").like(&pattern))
                .add(Expr::cust("LOWER(email)").like(&pattern));
            condition = condition.add(search);
        }

        query.filter(condition)
    }

    fn apply_sorting(query: Select<user::Entity>, sort_by: Option<String>) -> Select<user::Entity> {
        match sort_by.as_deref() {
            Some("-username") => query.order_by_desc(user::Column::Username),
            Some("username") => query.order_by_asc(user::Column::Username),
            _ => query.order_by_asc(user::Column::UserId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::test_utils::test_db;
    use chrono::{Duration, Utc};
    use sea_orm::Set;

    fn sample(user_id: &str) -> user::ActiveModel {
        let now = Utc::now();
        user::ActiveModel {
            user_id: Set(user_id.into()),
            username: Set(format!("student-{user_id}")),
            email: Set(format!("{user_id}@example.edu")),
            password_hash: Set("placeholder".into()),
            role: Set(Role::Student),
            disabled: Set(false),
            active_start_date: Set(now - Duration::days(1)),
            active_end_date: Set(now + Duration::days(365)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn unique_email_conflict_surfaces_as_db_error() {
        let db = test_db().await;
        let repo = UserRepository::new(db);

        repo.create(sample("u001")).await.unwrap();

        let mut dup = sample("u002");
        dup.email = Set("u001@example.edu".into());
        let result = repo.create(dup).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn find_by_user_id() {
        let db = test_db().await;
        let repo = UserRepository::new(db);
        repo.create(sample("u010")).await.unwrap();

        let found = repo
            .find_one(UserFilter::new().with_user_id("u010".into()))
            .await
            .unwrap();
        assert!(found.is_some());
    }
}
