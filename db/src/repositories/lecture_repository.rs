use sea_orm::{prelude::Expr, ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::LectureFilter;
use crate::models::lecture;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct LectureRepository {
    db: DatabaseConnection,
}

impl LectureRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<lecture::Entity, LectureFilter> for LectureRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(query: Select<lecture::Entity>, filter: &LectureFilter) -> Select<lecture::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(lecture::Column::Id.eq(id));
        }
        if let Some(ref title) = filter.title {
            condition = condition.add(lecture::Column::Title.eq(title.clone()));
        }
        if let Some(ref query_text) = filter.query {
            let pattern = format!("%{}%", query_text.to_lowercase());
            condition = condition.add(Expr::cust("LOWER(title)").like(&pattern));
        }

        query.filter(condition)
    }

    fn apply_sorting(mut query: Select<lecture::Entity>, sort_by: Option<String>) -> Select<lecture::Entity> {
        if let Some(sort_param) = sort_by {
            for sort in sort_param.split(',') {
                let (field, asc) = if let Some(stripped) = sort.strip_prefix('-') {
                    (stripped, false)
                } else {
                    (sort, true)
                };

                query = match field {
                    "title" if asc => query.order_by_asc(lecture::Column::Title),
                    "title" => query.order_by_desc(lecture::Column::Title),
                    "start_date" if asc => query.order_by_asc(lecture::Column::StartDate),
                    "start_date" => query.order_by_desc(lecture::Column::StartDate),
                    _ if asc => query.order_by_asc(lecture::Column::Id),
                    _ => query.order_by_desc(lecture::Column::Id),
                };
            }
        } else {
            query = query.order_by_asc(lecture::Column::Id);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_db;
    use chrono::Utc;
    use sea_orm::Set;

    #[tokio::test]
    async fn create_and_find_by_id() {
        let db = test_db().await;
        let repo = LectureRepository::new(db);

        let now = Utc::now();
        let created = repo
            .create(lecture::ActiveModel {
                title: Set("Intro to Rust".into()),
                start_date: Set(now),
                end_date: Set(now),
                ..Default::default()
            })
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found.unwrap().title, "Intro to Rust");
    }

    #[tokio::test]
    async fn query_filter_matches_substring() {
        let db = test_db().await;
        let repo = LectureRepository::new(db);
        let now = Utc::now();

        repo.create(lecture::ActiveModel {
            title: Set("Algorithms".into()),
            start_date: Set(now),
            end_date: Set(now),
            ..Default::default()
        })
        .await
        .unwrap();

        let found = repo
            .find_all(LectureFilter::new().with_query("algo".into()))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
