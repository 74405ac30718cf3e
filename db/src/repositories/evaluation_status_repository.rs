use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::EvaluationStatusFilter;
use crate::models::evaluation_status;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct EvaluationStatusRepository {
    db: DatabaseConnection,
}

impl EvaluationStatusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<evaluation_status::Entity, EvaluationStatusFilter> for EvaluationStatusRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<evaluation_status::Entity>,
        filter: &EvaluationStatusFilter,
    ) -> Select<evaluation_status::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(evaluation_status::Column::Id.eq(id));
        }
        if let Some(batch_id) = filter.batch_id {
            condition = condition.add(evaluation_status::Column::BatchId.eq(batch_id));
        }
        if let Some(ref user_id) = filter.user_id {
            condition = condition.add(evaluation_status::Column::UserId.eq(user_id.clone()));
        }
        if let Some(status) = filter.status {
            condition = condition.add(evaluation_status::Column::Status.eq(status));
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<evaluation_status::Entity>,
        _sort_by: Option<String>,
    ) -> Select<evaluation_status::Entity> {
        query.order_by_asc(evaluation_status::Column::Id)
    }
}
