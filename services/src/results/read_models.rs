use db::filters::{
    ArrangedFileFilter, BatchSubmissionFilter, EvaluationStatusFilter, JudgeResultFilter,
    SubmissionFilter, UploadedFileFilter,
};
use db::models::{batch_submission, evaluation_status, judge_result, submission, user};
use db::repositories::arranged_file_repository::ArrangedFileRepository;
use db::repositories::batch_submission_repository::BatchSubmissionRepository;
use db::repositories::evaluation_status_repository::EvaluationStatusRepository;
use db::repositories::judge_result_repository::JudgeResultRepository;
use db::repositories::repository::Repository;
use db::repositories::submission_repository::SubmissionRepository;
use db::repositories::uploaded_file_repository::UploadedFileRepository;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::path::PathBuf;

use crate::ServiceError;
use util::pagination::Page;
use util::{config, paths};

fn is_privileged(caller: &user::Model) -> bool {
    matches!(caller.role, user::Role::Admin | user::Role::Manager)
}

pub struct SubmissionListQuery {
    pub page: u64,
    pub include_eval: bool,
    pub all: bool,
}

/// Paginated submission list, ordered `id desc`, restricted to the
/// caller's own rows unless they're privileged and asked for `all=true`.
/// `include_eval=false` filters out eval-only submissions for callers who
/// aren't allowed to see them.
pub async fn list_submissions(
    db: &DatabaseConnection,
    caller: &user::Model,
    query: SubmissionListQuery,
) -> Result<Page<submission::Model>, ServiceError> {
    let is_privileged = matches!(caller.role, user::Role::Admin | user::Role::Manager);

    let mut filter = SubmissionFilter::new();
    if !(is_privileged && query.all) {
        filter = filter.with_user_id(caller.user_id.clone());
    }
    if !query.include_eval || !is_privileged {
        filter = filter.with_eval(false);
    }

    let page_size = config::page_size();
    let page = query.page.max(1);

    let repo = SubmissionRepository::new(db.clone());
    let total = repo.count(filter.clone()).await?;
    let items = repo.filter(filter, page, page_size, None).await?;

    Ok(Page::new(items, page, page_size, total))
}

/// `GET /assignments/status/submissions/id/{id}` (spec §4.G): ownership-
/// checked single-submission progress read, non-owner access is Forbidden.
pub async fn get_submission(
    db: &DatabaseConnection,
    caller: &user::Model,
    id: i64,
) -> Result<submission::Model, ServiceError> {
    let submission = SubmissionRepository::new(db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("submission not found".into()))?;

    if submission.user_id != caller.user_id && !is_privileged(caller) {
        return Err(ServiceError::Forbidden("not the submission owner".into()));
    }

    crate::results::recompute_submission_progress(db, submission).await
}

#[derive(Debug, Serialize)]
pub struct SubmissionDetail {
    pub submission: submission::Model,
    pub judge_results: Vec<judge_result::Model>,
}

/// `GET /assignments/result/submissions/id/{id}` (spec §4.G): submission
/// plus its per-testcase JudgeResults.
pub async fn submission_detail(
    db: &DatabaseConnection,
    caller: &user::Model,
    id: i64,
) -> Result<SubmissionDetail, ServiceError> {
    let submission = get_submission(db, caller, id).await?;
    let judge_results = JudgeResultRepository::new(db.clone())
        .find_all(JudgeResultFilter::new().with_submission_id(submission.id))
        .await?;
    Ok(SubmissionDetail {
        submission,
        judge_results,
    })
}

/// `GET /assignments/status/batch/all?page=` (spec §6, `batch` scope).
pub async fn list_batches(
    db: &DatabaseConnection,
    page: u64,
) -> Result<Page<batch_submission::Model>, ServiceError> {
    let page_size = config::page_size();
    let page = page.max(1);
    let repo = BatchSubmissionRepository::new(db.clone());
    let total = repo.count(BatchSubmissionFilter::new()).await?;
    let items = repo
        .filter(BatchSubmissionFilter::new(), page, page_size, None)
        .await?;
    Ok(Page::new(items, page, page_size, total))
}

/// `GET /assignments/status/batch/id/{batch_id}` (spec §4.G): reconciles
/// the batch's judge counters from a fresh child count before returning.
pub async fn get_batch(
    db: &DatabaseConnection,
    batch_id: i64,
) -> Result<batch_submission::Model, ServiceError> {
    let batch = BatchSubmissionRepository::new(db.clone())
        .find_by_id(batch_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("batch not found".into()))?;
    crate::results::recompute_batch_progress(db, batch).await
}

#[derive(Debug, Serialize)]
pub struct EvaluationStatusDetail {
    pub status: evaluation_status::Model,
    pub submissions: Vec<submission::Model>,
}

#[derive(Debug, Serialize)]
pub struct BatchDetail {
    pub batch: batch_submission::Model,
    pub students: Vec<EvaluationStatusDetail>,
}

/// `GET /assignments/result/batch/id/{batch_id}` (spec §6): the full
/// BatchSubmission → EvaluationStatus → Submission tree.
pub async fn batch_detail(db: &DatabaseConnection, batch_id: i64) -> Result<BatchDetail, ServiceError> {
    let batch = get_batch(db, batch_id).await?;
    crate::results::reconcile_batch_results(db, batch_id).await?;

    let statuses = EvaluationStatusRepository::new(db.clone())
        .find_all(EvaluationStatusFilter::new().with_batch_id(batch_id))
        .await?;
    let submissions_repo = SubmissionRepository::new(db.clone());

    let mut students = Vec::with_capacity(statuses.len());
    for status in statuses {
        let submissions = submissions_repo
            .find_all(SubmissionFilter::new().with_evaluation_status_id(status.id))
            .await?;
        students.push(EvaluationStatusDetail {
            status,
            submissions,
        });
    }

    Ok(BatchDetail { batch, students })
}

/// `GET /assignments/result/batch/id/{batch_id}/user/{user_id}` (spec §6):
/// one student's evaluation within a batch.
pub async fn batch_user_detail(
    db: &DatabaseConnection,
    batch_id: i64,
    user_id: &str,
) -> Result<EvaluationStatusDetail, ServiceError> {
    crate::results::reconcile_batch_results(db, batch_id).await?;

    let status = EvaluationStatusRepository::new(db.clone())
        .find_one(
            EvaluationStatusFilter::new()
                .with_batch_id(batch_id)
                .with_user_id(user_id.to_string()),
        )
        .await?
        .ok_or_else(|| ServiceError::NotFound("evaluation status not found".into()))?;

    let submissions = SubmissionRepository::new(db.clone())
        .find_all(SubmissionFilter::new().with_evaluation_status_id(status.id))
        .await?;

    Ok(EvaluationStatusDetail {
        status,
        submissions,
    })
}

/// `GET /assignments/result/batch/{batch_id}/files/{uploaded|report}/{user_id}`
/// (spec §6): the student's raw upload directory or their report PDF, as a
/// path relative to `UPLOAD_DIR` for the caller to stream.
pub async fn batch_student_file(
    db: &DatabaseConnection,
    batch_id: i64,
    user_id: &str,
    report: bool,
) -> Result<PathBuf, ServiceError> {
    let status = EvaluationStatusRepository::new(db.clone())
        .find_one(
            EvaluationStatusFilter::new()
                .with_batch_id(batch_id)
                .with_user_id(user_id.to_string()),
        )
        .await?
        .ok_or_else(|| ServiceError::NotFound("evaluation status not found".into()))?;

    let relative = if report {
        status.report_path
    } else {
        status.upload_dir
    };
    let relative = relative.ok_or_else(|| ServiceError::NotFound("file not available".into()))?;
    Ok(paths::resolve(&relative))
}

pub enum BundleKind {
    Uploaded,
    Arranged,
}

/// A ZIP built in a fresh temp directory. Keeping `_guard` alive keeps the
/// directory on disk; dropping it removes the directory and everything in
/// it (spec §4.G: lifecycle scoped to the response that streams `path`).
pub struct TempZipBundle {
    pub path: PathBuf,
    _guard: tempfile::TempDir,
}

/// Assembles either the uploaded or the arranged file set of a submission
/// into a ZIP on demand (spec §4.G).
pub async fn submission_file_bundle(
    db: &DatabaseConnection,
    submission_id: i64,
    kind: BundleKind,
) -> Result<TempZipBundle, ServiceError> {
    let entries = match kind {
        BundleKind::Uploaded => {
            let relative_paths: Vec<String> = UploadedFileRepository::new(db.clone())
                .find_all(UploadedFileFilter::new().with_submission_id(submission_id))
                .await?
                .into_iter()
                .map(|f| f.path)
                .collect();
            relative_paths
                .iter()
                .map(|rel| {
                    let archive_name = rel.rsplit('/').next().unwrap_or(rel).to_string();
                    (archive_name, paths::resolve(rel))
                })
                .collect::<Vec<_>>()
        }
        BundleKind::Arranged => {
            let submission = SubmissionRepository::new(db.clone())
                .find_by_id(submission_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("submission not found".into()))?;
            let problem = db::repositories::problem_repository::ProblemRepository::new(db.clone())
                .find_one(
                    db::filters::ProblemFilter::new()
                        .with_lecture_id(submission.lecture_id)
                        .with_assignment_id(submission.assignment_id),
                )
                .await?
                .ok_or_else(|| ServiceError::NotFound("problem not found".into()))?;
            let arranged_dir = paths::problem_arranged_dir(problem.id);

            ArrangedFileRepository::new(db.clone())
                .find_all(
                    ArrangedFileFilter::new()
                        .with_problem_id(problem.id)
                        .with_eval(submission.eval),
                )
                .await?
                .into_iter()
                .map(|f| {
                    let source = arranged_dir.join(&f.filename);
                    (f.filename, source)
                })
                .collect::<Vec<_>>()
        }
    };

    let guard =
        tempfile::tempdir().map_err(|e| ServiceError::Internal(format!("failed creating temp dir: {e}")))?;
    let zip_path = guard.path().join("bundle.zip");

    util::archive::build_zip(&zip_path, &entries)
        .map_err(|e| ServiceError::Internal(format!("failed assembling bundle: {e}")))?;

    Ok(TempZipBundle {
        path: zip_path,
        _guard: guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::repositories::user_repository::UserRepository;
    use db::test_utils::test_db;
    use db::verdict::Progress;
    use chrono::{Duration, Utc};
    use sea_orm::Set;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    async fn seed_user(db: &DatabaseConnection, user_id: &str, role: user::Role) {
        let now = Utc::now();
        UserRepository::new(db.clone())
            .create(db::models::user::ActiveModel {
                user_id: Set(user_id.into()),
                username: Set(user_id.into()),
                email: Set(format!("{user_id}@example.edu")),
                password_hash: Set("placeholder".into()),
                role: Set(role),
                disabled: Set(false),
                active_start_date: Set(now - Duration::days(1)),
                active_end_date: Set(now + Duration::days(365)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    async fn seed_submission(db: &DatabaseConnection, user_id: &str, eval: bool) {
        SubmissionRepository::new(db.clone())
            .create(submission::ActiveModel {
                ts: Set(Utc::now()),
                evaluation_status_id: Set(None),
                user_id: Set(user_id.into()),
                lecture_id: Set(1),
                assignment_id: Set(1),
                eval: Set(eval),
                progress: Set(Progress::Done),
                total_task: Set(0),
                completed_task: Set(0),
                message: Set(String::new()),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn student_only_sees_own_non_eval_submissions() {
        let db = test_db().await;
        seed_user(&db, "s1", user::Role::Student).await;
        seed_user(&db, "s2", user::Role::Student).await;
        seed_submission(&db, "s1", false).await;
        seed_submission(&db, "s1", true).await;
        seed_submission(&db, "s2", false).await;

        let caller = UserRepository::new(db.clone())
            .find_by_id("s1".into())
            .await
            .unwrap()
            .unwrap();

        let page = list_submissions(
            &db,
            &caller,
            SubmissionListQuery {
                page: 1,
                include_eval: false,
                all: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].user_id, "s1");
    }

    #[tokio::test]
    async fn privileged_caller_with_all_sees_every_submission() {
        let db = test_db().await;
        seed_user(&db, "s1", user::Role::Student).await;
        seed_user(&db, "admin1", user::Role::Admin).await;
        seed_submission(&db, "s1", false).await;
        seed_submission(&db, "s1", true).await;

        let caller = UserRepository::new(db.clone())
            .find_by_id("admin1".into())
            .await
            .unwrap()
            .unwrap();

        let page = list_submissions(
            &db,
            &caller,
            SubmissionListQuery {
                page: 1,
                include_eval: true,
                all: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    #[serial]
    async fn uploaded_bundle_contains_the_submissions_files() {
        let td = TempDir::new().unwrap();
        unsafe {
            std::env::set_var("UPLOAD_DIR", td.path().to_str().unwrap());
        }

        let db = test_db().await;
        seed_user(&db, "s1", user::Role::Student).await;
        let created = SubmissionRepository::new(db.clone())
            .create(submission::ActiveModel {
                ts: Set(Utc::now()),
                evaluation_status_id: Set(None),
                user_id: Set("s1".into()),
                lecture_id: Set(1),
                assignment_id: Set(1),
                eval: Set(false),
                progress: Set(Progress::Done),
                total_task: Set(1),
                completed_task: Set(1),
                message: Set(String::new()),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        let rel_dir = td.path().join("s1").join("upload");
        fs::create_dir_all(&rel_dir).unwrap();
        fs::write(rel_dir.join("main.c"), b"int main(){}").unwrap();

        UploadedFileRepository::new(db.clone())
            .create(db::models::uploaded_file::ActiveModel {
                submission_id: Set(created.id),
                path: Set("s1/upload/main.c".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let bundle = submission_file_bundle(&db, created.id, BundleKind::Uploaded)
            .await
            .unwrap();
        assert!(bundle.path.exists());
    }
}
