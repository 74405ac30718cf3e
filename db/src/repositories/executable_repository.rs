use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::ExecutableFilter;
use crate::models::executable;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct ExecutableRepository {
    db: DatabaseConnection,
}

impl ExecutableRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<executable::Entity, ExecutableFilter> for ExecutableRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<executable::Entity>,
        filter: &ExecutableFilter,
    ) -> Select<executable::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(executable::Column::Id.eq(id));
        }
        if let Some(problem_id) = filter.problem_id {
            condition = condition.add(executable::Column::ProblemId.eq(problem_id));
        }
        if let Some(eval) = filter.eval {
            condition = condition.add(executable::Column::Eval.eq(eval));
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<executable::Entity>,
        _sort_by: Option<String>,
    ) -> Select<executable::Entity> {
        query.order_by_asc(executable::Column::Id)
    }
}
