use db::filters::{EvaluationStatusFilter, SubmissionFilter};
use db::repositories::batch_submission_repository::BatchSubmissionRepository;
use db::repositories::evaluation_status_repository::EvaluationStatusRepository;
use db::repositories::repository::Repository;
use db::repositories::submission_repository::SubmissionRepository;
use db::verdict::aggregate;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};

use crate::ServiceError;

/// Batch result aggregation (spec §4.G): once a batch's judge counters agree
/// (it is complete), fill in any EvaluationStatus whose `result` is still
/// null with the max severity verdict across its child Submissions.
pub async fn reconcile_batch_results(db: &DatabaseConnection, batch_id: i64) -> Result<(), ServiceError> {
    let batches = BatchSubmissionRepository::new(db.clone());
    let batch = batches
        .find_by_id(batch_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("batch not found".into()))?;

    let is_complete = matches!(
        (batch.complete_judge, batch.total_judge),
        (Some(c), Some(t)) if c == t
    );
    if !is_complete {
        return Ok(());
    }

    let statuses = EvaluationStatusRepository::new(db.clone());
    let submissions = SubmissionRepository::new(db.clone());

    for status in statuses
        .find_all(EvaluationStatusFilter::new().with_batch_id(batch_id))
        .await?
    {
        if status.result.is_some() {
            continue;
        }
        let children = submissions
            .find_all(SubmissionFilter::new().with_evaluation_status_id(status.id))
            .await?;
        let results: Vec<_> = children.iter().filter_map(|s| s.result).collect();
        let aggregated = aggregate(&results);

        let mut active_model = status.into_active_model();
        active_model.result = Set(aggregated);
        statuses.update(active_model).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::{evaluation_status, submission, user};
    use db::repositories::user_repository::UserRepository;
    use db::test_utils::test_db;
    use db::verdict::{Progress, Verdict};
    use chrono::{Duration, Utc};

    async fn seed_student(db: &DatabaseConnection, user_id: &str) {
        let now = Utc::now();
        UserRepository::new(db.clone())
            .create(user::ActiveModel {
                user_id: Set(user_id.into()),
                username: Set("student".into()),
                email: Set(format!("{user_id}@example.edu")),
                password_hash: Set("placeholder".into()),
                role: Set(user::Role::Student),
                disabled: Set(false),
                active_start_date: Set(now - Duration::days(1)),
                active_end_date: Set(now + Duration::days(365)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn fills_null_result_from_child_submissions_on_completed_batch() {
        let db = test_db().await;
        seed_student(&db, "s1").await;

        let batches = BatchSubmissionRepository::new(db.clone());
        let batch = batches
            .create(db::models::batch_submission::ActiveModel {
                ts: Set(Utc::now()),
                user_id: Set("s1".into()),
                lecture_id: Set(1),
                message: Set(String::new()),
                complete_judge: Set(Some(2)),
                total_judge: Set(Some(2)),
                ..Default::default()
            })
            .await
            .unwrap();

        let statuses = EvaluationStatusRepository::new(db.clone());
        let status = statuses
            .create(evaluation_status::ActiveModel {
                batch_id: Set(batch.id),
                user_id: Set("s1".into()),
                status: Set(db::verdict::EvaluationStatusKind::Submitted),
                result: Set(None),
                upload_dir: Set(None),
                report_path: Set(None),
                submit_date: Set(None),
                ..Default::default()
            })
            .await
            .unwrap();

        let submissions = SubmissionRepository::new(db.clone());
        for verdict in [Verdict::Ac, Verdict::Wa] {
            submissions
                .create(submission::ActiveModel {
                    ts: Set(Utc::now()),
                    evaluation_status_id: Set(Some(status.id)),
                    user_id: Set("s1".into()),
                    lecture_id: Set(1),
                    assignment_id: Set(1),
                    eval: Set(false),
                    progress: Set(Progress::Done),
                    total_task: Set(0),
                    completed_task: Set(0),
                    result: Set(Some(verdict)),
                    message: Set(String::new()),
                    detail: Set(String::new()),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        reconcile_batch_results(&db, batch.id).await.unwrap();

        let updated = statuses.find_by_id(status.id).await.unwrap().unwrap();
        assert_eq!(updated.result, Some(Verdict::Wa));
    }

    #[tokio::test]
    async fn leaves_incomplete_batch_untouched() {
        let db = test_db().await;
        seed_student(&db, "s1").await;

        let batches = BatchSubmissionRepository::new(db.clone());
        let batch = batches
            .create(db::models::batch_submission::ActiveModel {
                ts: Set(Utc::now()),
                user_id: Set("s1".into()),
                lecture_id: Set(1),
                message: Set(String::new()),
                complete_judge: Set(Some(0)),
                total_judge: Set(Some(2)),
                ..Default::default()
            })
            .await
            .unwrap();

        reconcile_batch_results(&db, batch.id).await.unwrap();

        let statuses = EvaluationStatusRepository::new(db.clone())
            .find_all(EvaluationStatusFilter::new().with_batch_id(batch.id))
            .await
            .unwrap();
        assert!(statuses.is_empty());
    }
}
