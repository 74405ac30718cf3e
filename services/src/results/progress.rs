use db::filters::{EvaluationStatusFilter, SubmissionFilter};
use db::models::{batch_submission, submission};
use db::repositories::batch_submission_repository::BatchSubmissionRepository;
use db::repositories::evaluation_status_repository::EvaluationStatusRepository;
use db::repositories::repository::Repository;
use db::repositories::submission_repository::SubmissionRepository;
use db::verdict::Progress;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};

use crate::ServiceError;

/// Recomputes `(complete_judge, total_judge)` on a batch from a fresh count
/// of its child Submissions, but only when the stored pair disagrees with
/// itself — an already-consistent batch is left untouched (spec §4.G).
pub async fn recompute_batch_progress(
    db: &DatabaseConnection,
    batch: batch_submission::Model,
) -> Result<batch_submission::Model, ServiceError> {
    if batch.complete_judge == batch.total_judge {
        return Ok(batch);
    }

    let statuses = EvaluationStatusRepository::new(db.clone())
        .find_all(EvaluationStatusFilter::new().with_batch_id(batch.id))
        .await?;
    let submissions = SubmissionRepository::new(db.clone());

    let mut total: i64 = 0;
    let mut complete: i64 = 0;
    for status in &statuses {
        let children = submissions
            .find_all(SubmissionFilter::new().with_evaluation_status_id(status.id))
            .await?;
        total += children.len() as i64;
        complete += children
            .iter()
            .filter(|s| s.progress == Progress::Done)
            .count() as i64;
    }

    let mut active_model = batch.into_active_model();
    active_model.complete_judge = Set(Some(complete));
    active_model.total_judge = Set(Some(total));
    Ok(BatchSubmissionRepository::new(db.clone())
        .update(active_model)
        .await?)
}

/// Submission progress read (spec §4.G): if this submission belongs to a
/// batch, reconcile that batch's progress pair before returning. Returns
/// the submission unchanged — `Submission.progress` is authoritative as
/// written by the worker, only the batch-level totals are derived.
pub async fn recompute_submission_progress(
    db: &DatabaseConnection,
    submission: submission::Model,
) -> Result<submission::Model, ServiceError> {
    if let Some(evaluation_status_id) = submission.evaluation_status_id {
        let statuses = EvaluationStatusRepository::new(db.clone());
        if let Some(status) = statuses.find_by_id(evaluation_status_id).await? {
            let batches = BatchSubmissionRepository::new(db.clone());
            if let Some(batch) = batches.find_by_id(status.batch_id).await? {
                recompute_batch_progress(db, batch).await?;
            }
        }
    }
    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::{evaluation_status, user};
    use db::repositories::user_repository::UserRepository;
    use db::test_utils::test_db;
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
    async fn recomputes_disagreeing_batch_totals_from_child_count() {
        let db = test_db().await;
        seed_student(&db, "s1").await;

        let batches = BatchSubmissionRepository::new(db.clone());
        let batch = batches
            .create(batch_submission::ActiveModel {
                ts: Set(Utc::now()),
                user_id: Set("s1".into()),
                lecture_id: Set(1),
                message: Set(String::new()),
                complete_judge: Set(Some(0)),
                total_judge: Set(Some(99)),
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
                message: Set(String::new()),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        let recomputed = recompute_batch_progress(&db, batch).await.unwrap();
        assert_eq!(recomputed.complete_judge, Some(1));
        assert_eq!(recomputed.total_judge, Some(1));
    }

    #[tokio::test]
    async fn agreeing_totals_are_left_alone() {
        let db = test_db().await;
        seed_student(&db, "s1").await;

        let batches = BatchSubmissionRepository::new(db.clone());
        let batch = batches
            .create(batch_submission::ActiveModel {
                ts: Set(Utc::now()),
                user_id: Set("s1".into()),
                lecture_id: Set(1),
                message: Set(String::new()),
                complete_judge: Set(Some(3)),
                total_judge: Set(Some(3)),
                ..Default::default()
            })
            .await
            .unwrap();

        let recomputed = recompute_batch_progress(&db, batch.clone()).await.unwrap();
        assert_eq!(recomputed.id, batch.id);
        assert_eq!(recomputed.complete_judge, batch.complete_judge);
    }
}
