use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::UploadedFileFilter;
use crate::models::uploaded_file;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct UploadedFileRepository {
    db: DatabaseConnection,
}

impl UploadedFileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<uploaded_file::Entity, UploadedFileFilter> for UploadedFileRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<uploaded_file::Entity>,
        filter: &UploadedFileFilter,
    ) -> Select<uploaded_file::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(uploaded_file::Column::Id.eq(id));
        }
        if let Some(submission_id) = filter.submission_id {
            condition = condition.add(uploaded_file::Column::SubmissionId.eq(submission_id));
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<uploaded_file::Entity>,
        _sort_by: Option<String>,
    ) -> Select<uploaded_file::Entity> {
        query.order_by_asc(uploaded_file::Column::Id)
    }
}
