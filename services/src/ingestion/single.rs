use chrono::Utc;
use db::filters::ProblemFilter;
use db::models::{submission, user};
use db::repositories::problem_repository::ProblemRepository;
use db::repositories::repository::Repository;
use db::repositories::submission_repository::SubmissionRepository;
use db::repositories::uploaded_file_repository::UploadedFileRepository;
use db::verdict::Progress;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};
use std::fs;

use crate::ServiceError;
use util::paths;

/// A file handed in by the caller before it's written to disk.
pub struct UploadedBytes {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Single-submission ingestion (spec §4.D).
pub async fn ingest_single_submission(
    db: &DatabaseConnection,
    caller: &user::Model,
    lecture_id: i64,
    assignment_id: i64,
    eval: bool,
    files: Vec<UploadedBytes>,
) -> Result<submission::Model, ServiceError> {
    let is_privileged = matches!(caller.role, user::Role::Admin | user::Role::Manager);
    if !is_privileged {
        if eval {
            return Err(ServiceError::Forbidden(
                "students may not submit against eval-only resources".into(),
            ));
        }
        let lectures = db::repositories::lecture_repository::LectureRepository::new(db.clone());
        let lecture = lectures
            .find_by_id(lecture_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("lecture not found".into()))?;
        if !lecture.is_public(Utc::now()) {
            return Err(ServiceError::NotFound("lecture not found".into()));
        }
    }

    let problems = ProblemRepository::new(db.clone());
    let problem = problems
        .find_one(
            ProblemFilter::new()
                .with_lecture_id(lecture_id)
                .with_assignment_id(assignment_id),
        )
        .await?
        .ok_or_else(|| ServiceError::NotFound("problem not found".into()))?;

    let submissions = SubmissionRepository::new(db.clone());
    let now = Utc::now();
    let created = submissions
        .create(submission::ActiveModel {
            ts: Set(now),
            evaluation_status_id: Set(None),
            user_id: Set(caller.user_id.clone()),
            lecture_id: Set(problem.lecture_id),
            assignment_id: Set(problem.assignment_id),
            eval: Set(eval),
            progress: Set(Progress::Pending),
            total_task: Set(files.len() as i32),
            completed_task: Set(0),
            message: Set(String::new()),
            detail: Set(String::new()),
            ..Default::default()
        })
        .await?;

    let dest = paths::single_submission_dir(&caller.user_id, now, created.id);
    if dest.exists() {
        fs::remove_dir_all(&dest)
            .map_err(|e| ServiceError::Internal(format!("failed clearing stale upload dir: {e}")))?;
    }
    paths::ensure_dir(&dest)
        .map_err(|e| ServiceError::Internal(format!("failed creating upload dir: {e}")))?;

    let uploaded_files = UploadedFileRepository::new(db.clone());
    for file in &files {
        let target = dest.join(&file.filename);
        fs::write(&target, &file.bytes)
            .map_err(|e| ServiceError::Internal(format!("failed writing {}: {e}", file.filename)))?;
        let relative = paths::to_relative(&target)
            .map_err(|e| ServiceError::Internal(format!("path outside upload root: {e}")))?;
        uploaded_files
            .create(db::models::uploaded_file::ActiveModel {
                submission_id: Set(created.id),
                path: Set(relative),
                ..Default::default()
            })
            .await?;
    }

    let mut active_model = created.into_active_model();
    active_model.progress = Set(Progress::Queued);
    let queued = submissions.update(active_model).await?;
    Ok(queued)
}
