use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::BatchSubmissionFilter;
use crate::models::batch_submission;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct BatchSubmissionRepository {
    db: DatabaseConnection,
}

impl BatchSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<batch_submission::Entity, BatchSubmissionFilter> for BatchSubmissionRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<batch_submission::Entity>,
        filter: &BatchSubmissionFilter,
    ) -> Select<batch_submission::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(batch_submission::Column::Id.eq(id));
        }
        if let Some(lecture_id) = filter.lecture_id {
            condition = condition.add(batch_submission::Column::LectureId.eq(lecture_id));
        }
        if let Some(ref user_id) = filter.user_id {
            condition = condition.add(batch_submission::Column::UserId.eq(user_id.clone()));
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<batch_submission::Entity>,
        _sort_by: Option<String>,
    ) -> Select<batch_submission::Entity> {
        query.order_by_desc(batch_submission::Column::Ts)
    }
}
