use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::ArrangedFileFilter;
use crate::models::arranged_file;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct ArrangedFileRepository {
    db: DatabaseConnection,
}

impl ArrangedFileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<arranged_file::Entity, ArrangedFileFilter> for ArrangedFileRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<arranged_file::Entity>,
        filter: &ArrangedFileFilter,
    ) -> Select<arranged_file::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(arranged_file::Column::Id.eq(id));
        }
        if let Some(problem_id) = filter.problem_id {
            condition = condition.add(arranged_file::Column::ProblemId.eq(problem_id));
        }
        if let Some(eval) = filter.eval {
            condition = condition.add(arranged_file::Column::Eval.eq(eval));
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<arranged_file::Entity>,
        _sort_by: Option<String>,
    ) -> Select<arranged_file::Entity> {
        query.order_by_asc(arranged_file::Column::Id)
    }
}
