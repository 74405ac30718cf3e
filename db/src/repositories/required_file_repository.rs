use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::RequiredFileFilter;
use crate::models::required_file;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct RequiredFileRepository {
    db: DatabaseConnection,
}

impl RequiredFileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<required_file::Entity, RequiredFileFilter> for RequiredFileRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<required_file::Entity>,
        filter: &RequiredFileFilter,
    ) -> Select<required_file::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(required_file::Column::Id.eq(id));
        }
        if let Some(problem_id) = filter.problem_id {
            condition = condition.add(required_file::Column::ProblemId.eq(problem_id));
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<required_file::Entity>,
        _sort_by: Option<String>,
    ) -> Select<required_file::Entity> {
        query.order_by_asc(required_file::Column::Id)
    }
}
