use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::SubmissionFilter;
use crate::models::submission;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct SubmissionRepository {
    db: DatabaseConnection,
}

impl SubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<submission::Entity, SubmissionFilter> for SubmissionRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(query: Select<submission::Entity>, filter: &SubmissionFilter) -> Select<submission::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(submission::Column::Id.eq(id));
        }
        if let Some(ref user_id) = filter.user_id {
            condition = condition.add(submission::Column::UserId.eq(user_id.clone()));
        }
        if let Some(lecture_id) = filter.lecture_id {
            condition = condition.add(submission::Column::LectureId.eq(lecture_id));
        }
        if let Some(assignment_id) = filter.assignment_id {
            condition = condition.add(submission::Column::AssignmentId.eq(assignment_id));
        }
        if let Some(evaluation_status_id) = filter.evaluation_status_id {
            condition = condition.add(submission::Column::EvaluationStatusId.eq(evaluation_status_id));
        }
        if let Some(progress) = filter.progress {
            condition = condition.add(submission::Column::Progress.eq(progress));
        }
        if let Some(eval) = filter.eval {
            condition = condition.add(submission::Column::Eval.eq(eval));
        }

        query.filter(condition)
    }

    fn apply_sorting(query: Select<submission::Entity>, sort_by: Option<String>) -> Select<submission::Entity> {
        match sort_by.as_deref() {
            Some("-ts") => query.order_by_desc(submission::Column::Ts),
            Some("ts") => query.order_by_asc(submission::Column::Ts),
            _ => query.order_by_desc(submission::Column::Id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{self, Role};
    use crate::repositories::user_repository::UserRepository;
    use crate::test_utils::test_db;
    use crate::verdict::Progress;
    use chrono::{Duration, Utc};
    use sea_orm::Set;

    #[tokio::test]
    async fn unbatched_submission_has_no_evaluation_status() {
        let db = test_db().await;
        let now = Utc::now();

        UserRepository::new(db.clone())
            .create(user::ActiveModel {
                user_id: Set("u200".into()),
                username: Set("bob".into()),
                email: Set("bob@example.edu".into()),
                password_hash: Set("placeholder".into()),
                role: Set(Role::Student),
                disabled: Set(false),
                active_start_date: Set(now - Duration::days(1)),
                active_end_date: Set(now + Duration::days(365)),
                ..Default::default()
            })
            .await
            .unwrap();

        let repo = SubmissionRepository::new(db);
        let created = repo
            .create(submission::ActiveModel {
                ts: Set(now),
                evaluation_status_id: Set(None),
                user_id: Set("u200".into()),
                lecture_id: Set(1),
                assignment_id: Set(1),
                eval: Set(true),
                progress: Set(Progress::Queued),
                total_task: Set(3),
                completed_task: Set(0),
                message: Set(String::new()),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!created.is_batched());
    }
}
