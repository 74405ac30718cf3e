use chrono::Utc;
use db::filters::ProblemFilter;
use db::models::{problem, submission, uploaded_file, user};
use db::repositories::problem_repository::ProblemRepository;
use db::repositories::repository::Repository;
use db::repositories::required_file_repository::RequiredFileRepository;
use db::repositories::submission_repository::SubmissionRepository;
use db::repositories::uploaded_file_repository::UploadedFileRepository;
use db::verdict::{Progress, Verdict};
use sea_orm::{DatabaseConnection, Set};
use std::fs;
use std::path::Path;

use crate::ServiceError;
use util::{config, paths};

/// Whole-lecture self-check ingestion (spec §4.E). Only callers already
/// authorized for `eval=true` resources should reach this — the scope
/// check happens one layer up, in the route handler.
pub async fn ingest_self_check(
    db: &DatabaseConnection,
    caller: &user::Model,
    lecture_id: i64,
    eval: bool,
    zip_filename: &str,
    zip_bytes: &[u8],
) -> Result<Vec<submission::Model>, ServiceError> {
    let expected_name = format!("class{lecture_id}.zip");
    if zip_filename != expected_name {
        return Err(ServiceError::BadRequest(format!(
            "expected filename {expected_name}, got {zip_filename}"
        )));
    }

    let now = Utc::now();
    let staging_dir = paths::self_check_dir(&caller.user_id, lecture_id, now);
    paths::ensure_dir(&staging_dir)
        .map_err(|e| ServiceError::Internal(format!("failed creating staging dir: {e}")))?;

    let temp_zip = staging_dir.with_extension("incoming.zip");
    fs::write(&temp_zip, zip_bytes)
        .map_err(|e| ServiceError::Internal(format!("failed writing staged zip: {e}")))?;

    let unfold_result = util::archive::unfold(&temp_zip, &staging_dir, config::max_archive_bytes());
    let _ = fs::remove_file(&temp_zip);
    if let Err(reason) = unfold_result {
        let _ = fs::remove_dir_all(&staging_dir);
        return Err(ServiceError::BadRequest(reason.to_string()));
    }

    let problems = ProblemRepository::new(db.clone())
        .find_all(ProblemFilter::new().with_lecture_id(lecture_id))
        .await?;
    if problems.is_empty() {
        return Err(ServiceError::NotFound("lecture has no problems".into()));
    }

    let report_name = format!("report{lecture_id}.pdf");
    let report_path = staging_dir.join(&report_name);

    let submissions = SubmissionRepository::new(db.clone());
    let uploaded_files = UploadedFileRepository::new(db.clone());

    if !report_path.exists() {
        let first = &problems[0];
        let created = submissions
            .create(submission::ActiveModel {
                ts: Set(now),
                evaluation_status_id: Set(None),
                user_id: Set(caller.user_id.clone()),
                lecture_id: Set(first.lecture_id),
                assignment_id: Set(first.assignment_id),
                eval: Set(eval),
                progress: Set(Progress::Done),
                total_task: Set(0),
                completed_task: Set(0),
                result: Set(Some(Verdict::Fn)),
                message: Set(format!("missing required report: {report_name}")),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await?;
        return Ok(vec![created]);
    }

    let mut created_submissions = Vec::with_capacity(problems.len());
    for p in &problems {
        let created = submissions
            .create(submission::ActiveModel {
                ts: Set(now),
                evaluation_status_id: Set(None),
                user_id: Set(caller.user_id.clone()),
                lecture_id: Set(p.lecture_id),
                assignment_id: Set(p.assignment_id),
                eval: Set(eval),
                progress: Set(Progress::Pending),
                total_task: Set(0),
                completed_task: Set(0),
                message: Set(String::new()),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await?;

        register_required_files(db, &staging_dir, p, created.id).await?;
        register_report(&staging_dir, &report_name, created.id, &uploaded_files).await?;

        let mut active_model = sea_orm::IntoActiveModel::into_active_model(created);
        active_model.progress = Set(Progress::Queued);
        created_submissions.push(submissions.update(active_model).await?);
    }

    Ok(created_submissions)
}

async fn register_required_files(
    db: &DatabaseConnection,
    staging_dir: &Path,
    p: &problem::Model,
    submission_id: i64,
) -> Result<(), ServiceError> {
    let required = RequiredFileRepository::new(db.clone())
        .find_all(db::filters::RequiredFileFilter::new().with_problem_id(p.id))
        .await?;
    let uploaded_files = UploadedFileRepository::new(db.clone());

    for file in required {
        let candidate = staging_dir.join(&file.filename);
        if !candidate.exists() {
            continue;
        }
        let relative = paths::to_relative(&candidate)
            .map_err(|e| ServiceError::Internal(format!("path outside upload root: {e}")))?;
        uploaded_files
            .create(uploaded_file::ActiveModel {
                submission_id: Set(submission_id),
                path: Set(relative),
                ..Default::default()
            })
            .await?;
    }
    Ok(())
}

async fn register_report(
    staging_dir: &Path,
    report_name: &str,
    submission_id: i64,
    uploaded_files: &UploadedFileRepository,
) -> Result<(), ServiceError> {
    let report_path = staging_dir.join(report_name);
    let relative = paths::to_relative(&report_path)
        .map_err(|e| ServiceError::Internal(format!("path outside upload root: {e}")))?;
    uploaded_files
        .create(uploaded_file::ActiveModel {
            submission_id: Set(submission_id),
            path: Set(relative),
            ..Default::default()
        })
        .await?;
    Ok(())
}
