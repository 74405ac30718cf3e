use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::ProblemFilter;
use crate::models::problem;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct ProblemRepository {
    db: DatabaseConnection,
}

impl ProblemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<problem::Entity, ProblemFilter> for ProblemRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(query: Select<problem::Entity>, filter: &ProblemFilter) -> Select<problem::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(problem::Column::Id.eq(id));
        }
        if let Some(lecture_id) = filter.lecture_id {
            condition = condition.add(problem::Column::LectureId.eq(lecture_id));
        }
        if let Some(assignment_id) = filter.assignment_id {
            condition = condition.add(problem::Column::AssignmentId.eq(assignment_id));
        }

        query.filter(condition)
    }

    fn apply_sorting(query: Select<problem::Entity>, sort_by: Option<String>) -> Select<problem::Entity> {
        match sort_by.as_deref() {
            Some("-id") => query.order_by_desc(problem::Column::Id),
            _ => query.order_by_asc(problem::Column::Id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::lecture_repository::LectureRepository;
    use crate::test_utils::test_db;
    use chrono::Utc;
    use sea_orm::Set;

    #[tokio::test]
    async fn find_by_lecture_and_assignment() {
        let db = test_db().await;
        let lectures = LectureRepository::new(db.clone());
        let now = Utc::now();
        let lecture = lectures
            .create(crate::models::lecture::ActiveModel {
                title: Set("Data Structures".into()),
                start_date: Set(now),
                end_date: Set(now),
                ..Default::default()
            })
            .await
            .unwrap();

        let repo = ProblemRepository::new(db);
        repo.create(problem::ActiveModel {
            lecture_id: Set(lecture.id),
            assignment_id: Set(1),
            description_path: Set("problems/1/spec.md".into()),
            time_ms: Set(2000),
            memory_mb: Set(256),
            ..Default::default()
        })
        .await
        .unwrap();

        let found = repo
            .find_one(
                ProblemFilter::new()
                    .with_lecture_id(lecture.id)
                    .with_assignment_id(1),
            )
            .await
            .unwrap();
        assert!(found.is_some());
    }
}
