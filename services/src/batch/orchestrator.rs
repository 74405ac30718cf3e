use chrono::Utc;
use db::filters::{ProblemFilter, UserFilter};
use db::models::{batch_submission, evaluation_status, submission, uploaded_file, user};
use db::repositories::batch_submission_repository::BatchSubmissionRepository;
use db::repositories::evaluation_status_repository::EvaluationStatusRepository;
use db::repositories::problem_repository::ProblemRepository;
use db::repositories::repository::Repository;
use db::repositories::required_file_repository::RequiredFileRepository;
use db::repositories::submission_repository::SubmissionRepository;
use db::repositories::uploaded_file_repository::UploadedFileRepository;
use db::repositories::user_repository::UserRepository;
use db::verdict::{EvaluationStatusKind, Progress};
use regex::Regex;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::roster::walk_roster;
use crate::ServiceError;
use util::{config, paths};

const __MACOSX: &str = "__MACOSX";

fn student_folder_pattern() -> Regex {
    Regex::new(r"^(\d{9})@\d{13}$").expect("static regex is valid")
}

/// Batch orchestrator (spec §4.F). Registers the BatchSubmission row first
/// so callers can begin polling before expansion finishes.
pub async fn run_batch_orchestration(
    db: &DatabaseConnection,
    grader: &user::Model,
    lecture_id: i64,
    eval: bool,
    grader_zip_path: &Path,
) -> Result<batch_submission::Model, ServiceError> {
    let now = Utc::now();
    let batches = BatchSubmissionRepository::new(db.clone());
    let batch = batches
        .create(batch_submission::ActiveModel {
            ts: Set(now),
            user_id: Set(grader.user_id.clone()),
            lecture_id: Set(lecture_id),
            message: Set(String::new()),
            complete_judge: Set(None),
            total_judge: Set(None),
            ..Default::default()
        })
        .await?;

    let mut messages: Vec<String> = Vec::new();
    let dest_dir = paths::batch_dir(now, batch.id);
    paths::ensure_dir(&dest_dir)
        .map_err(|e| ServiceError::Internal(format!("failed creating batch dir: {e}")))?;

    let extracted = extract_grader_zip(grader_zip_path, &dest_dir)?;
    let workspace_root = descend_to_content_root(&extracted)?;

    let roster_path = locate_roster(&workspace_root, &dest_dir)
        .ok_or_else(|| ServiceError::BadRequest("reportlist.xlsx/.xls not found".into()))?;

    let total_judge = expand_student_zips(
        db,
        &workspace_root,
        &dest_dir,
        lecture_id,
        now,
        batch.id,
        eval,
        &mut messages,
    )
    .await?;

    let mut active_model = batch.into_active_model();
    active_model.message = Set(messages.join("\n"));
    active_model.total_judge = Set(Some(total_judge as i64));
    active_model.complete_judge = Set(Some(0));
    let finalised = batches.update(active_model).await?;

    let _ = roster_path;
    Ok(finalised)
}

fn extract_grader_zip(zip_path: &Path, dest_dir: &Path) -> Result<PathBuf, ServiceError> {
    let scratch = dest_dir.join("_workspace");
    util::archive::extract_tree(zip_path, &scratch, config::max_archive_bytes())
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?;
    Ok(scratch)
}

/// Descends past a single wrapping directory, or past an archive-named
/// directory that sits alongside metadata siblings like `__MACOSX`.
fn descend_to_content_root(extracted: &Path) -> Result<PathBuf, ServiceError> {
    let entries: Vec<_> = fs::read_dir(extracted)
        .map_err(|e| ServiceError::Internal(format!("failed reading workspace: {e}")))?
        .filter_map(|e| e.ok())
        .collect();

    let real_entries: Vec<_> = entries
        .iter()
        .filter(|e| e.file_name().to_string_lossy() != __MACOSX)
        .collect();

    if real_entries.len() == 1 && real_entries[0].path().is_dir() {
        return Ok(real_entries[0].path());
    }
    Ok(extracted.to_path_buf())
}

fn locate_roster(workspace_root: &Path, dest_dir: &Path) -> Option<PathBuf> {
    for ext in ["xlsx", "xls"] {
        let candidate = workspace_root.join(format!("reportlist.{ext}"));
        if candidate.exists() {
            let target = dest_dir.join(format!("reportlist.{ext}"));
            let _ = fs::copy(&candidate, &target);
            return Some(target);
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
async fn expand_student_zips(
    db: &DatabaseConnection,
    workspace_root: &Path,
    dest_dir: &Path,
    lecture_id: i64,
    ts: chrono::DateTime<Utc>,
    batch_id: i64,
    eval: bool,
    messages: &mut Vec<String>,
) -> Result<u64, ServiceError> {
    let pattern = student_folder_pattern();
    let users = UserRepository::new(db.clone());
    let evaluation_statuses = EvaluationStatusRepository::new(db.clone());

    let roster_path = ["xlsx", "xls"]
        .iter()
        .map(|ext| dest_dir.join(format!("reportlist.{ext}")))
        .find(|p| p.exists());
    let roster_rows = roster_path
        .as_deref()
        .and_then(util::roster::parse_roster)
        .unwrap_or_default();
    let walked = walk_roster(&roster_rows);

    let mut expanded_dirs: Vec<(String, PathBuf)> = Vec::new();
    if let Ok(entries) = fs::read_dir(workspace_root) {
        for entry in entries.filter_map(|e| e.ok()) {
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(caps) = pattern.captures(&name) else {
                continue;
            };
            let student_id = caps[1].to_string();

            if users
                .find_one(UserFilter::new().with_user_id(student_id.clone()))
                .await?
                .is_none()
            {
                messages.push(format!("{student_id}: no matching user account, skipped"));
                continue;
            }

            let inner_zip = entry.path().join(format!("class{lecture_id}.zip"));
            if !inner_zip.exists() {
                messages.push(format!("{student_id}: class{lecture_id}.zip not found"));
                continue;
            }

            let student_dir = paths::batch_student_dir(ts, batch_id, &student_id);
            if let Err(e) = util::archive::unfold(&inner_zip, &student_dir, config::max_archive_bytes()) {
                messages.push(format!("{student_id}: {e}"));
                continue;
            }
            expanded_dirs.push((student_id, student_dir));
        }
    }

    let mut total_judge: u64 = 0;
    for row in walked {
        if let Some(reason) = row.skip_reason {
            messages.push(reason);
            continue;
        }

        let expanded = expanded_dirs
            .iter()
            .find(|(id, _)| *id == row.student_id)
            .map(|(_, dir)| dir.clone());

        let upload_dir_rel = expanded
            .as_deref()
            .map(paths::to_relative)
            .transpose()
            .map_err(|e| ServiceError::Internal(format!("path outside upload root: {e}")))?;

        let report_candidate = expanded
            .as_ref()
            .map(|dir| dir.join(format!("report{lecture_id}.pdf")));
        let report_path_rel = match report_candidate.filter(|p| p.exists()) {
            Some(p) => Some(
                paths::to_relative(&p)
                    .map_err(|e| ServiceError::Internal(format!("path outside upload root: {e}")))?,
            ),
            None => None,
        };

        let status = evaluation_statuses
            .create(evaluation_status::ActiveModel {
                batch_id: Set(batch_id),
                user_id: Set(row.student_id.clone()),
                status: Set(row.status),
                result: Set(None),
                upload_dir: Set(upload_dir_rel),
                report_path: Set(report_path_rel),
                submit_date: Set(row
                    .submit_date
                    .as_deref()
                    .and_then(parse_submit_date)),
                ..Default::default()
            })
            .await?;

        if status.status == EvaluationStatusKind::NonSubmitted {
            continue;
        }
        if status.upload_dir.is_none() {
            let mut flip = status.clone().into_active_model();
            flip.status = Set(EvaluationStatusKind::NonSubmitted);
            evaluation_statuses.update(flip).await?;
            continue;
        }

        total_judge += fan_out_submissions(db, lecture_id, eval, &status, expanded.as_deref()).await?;
    }

    Ok(total_judge)
}

fn parse_submit_date(raw: &str) -> Option<chrono::DateTime<Utc>> {
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

async fn fan_out_submissions(
    db: &DatabaseConnection,
    lecture_id: i64,
    eval: bool,
    status: &evaluation_status::Model,
    expanded_dir: Option<&Path>,
) -> Result<u64, ServiceError> {
    let problems = ProblemRepository::new(db.clone())
        .find_all(ProblemFilter::new().with_lecture_id(lecture_id))
        .await?;

    let submissions = SubmissionRepository::new(db.clone());
    let required_files = RequiredFileRepository::new(db.clone());
    let uploaded_files = UploadedFileRepository::new(db.clone());

    let mut count = 0u64;
    for problem in problems {
        let created = submissions
            .create(submission::ActiveModel {
                ts: Set(Utc::now()),
                evaluation_status_id: Set(Some(status.id)),
                user_id: Set(status.user_id.clone()),
                lecture_id: Set(problem.lecture_id),
                assignment_id: Set(problem.assignment_id),
                eval: Set(eval),
                progress: Set(Progress::Pending),
                total_task: Set(0),
                completed_task: Set(0),
                message: Set(String::new()),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await?;

        if let Some(dir) = expanded_dir {
            let required = required_files
                .find_all(db::filters::RequiredFileFilter::new().with_problem_id(problem.id))
                .await?;
            for file in required {
                let candidate = dir.join(&file.filename);
                if !candidate.exists() {
                    continue;
                }
                let relative = paths::to_relative(&candidate)
                    .map_err(|e| ServiceError::Internal(format!("path outside upload root: {e}")))?;
                uploaded_files
                    .create(uploaded_file::ActiveModel {
                        submission_id: Set(created.id),
                        path: Set(relative),
                        ..Default::default()
                    })
                    .await?;
            }
        }

        let mut active_model = created.into_active_model();
        active_model.progress = Set(Progress::Queued);
        submissions.update(active_model).await?;
        count += 1;
    }

    Ok(count)
}
