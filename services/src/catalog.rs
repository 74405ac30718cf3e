//! Lecture/problem read models for `GET /assignments/info*` (spec §6).
//! No writes live here — lectures and problems are seeded, not created
//! through this HTTP surface.

use chrono::Utc;
use db::filters::{ArrangedFileFilter, ExecutableFilter, LectureFilter, ProblemFilter, TestCaseFilter};
use db::models::{arranged_file, executable, lecture, problem, required_file, test_case, user};
use db::repositories::arranged_file_repository::ArrangedFileRepository;
use db::repositories::executable_repository::ExecutableRepository;
use db::repositories::lecture_repository::LectureRepository;
use db::repositories::problem_repository::ProblemRepository;
use db::repositories::repository::Repository;
use db::repositories::required_file_repository::RequiredFileRepository;
use db::repositories::test_case_repository::TestCaseRepository;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::ServiceError;

fn is_privileged(caller: &user::Model) -> bool {
    matches!(caller.role, user::Role::Admin | user::Role::Manager)
}

/// `GET /assignments/info?all=`. `all=true` is rejected for non-privileged
/// callers; otherwise the list is restricted to currently-public lectures.
pub async fn list_lectures(
    db: &DatabaseConnection,
    caller: &user::Model,
    all: bool,
) -> Result<Vec<lecture::Model>, ServiceError> {
    if all && !is_privileged(caller) {
        return Err(ServiceError::Forbidden(
            "all=true requires admin or manager".into(),
        ));
    }

    let lectures = LectureRepository::new(db.clone())
        .find_all(LectureFilter::new())
        .await?;

    if all {
        return Ok(lectures);
    }

    let now = Utc::now();
    Ok(lectures
        .into_iter()
        .filter(|l| l.is_public(now))
        .collect())
}

#[derive(Debug, Serialize)]
pub struct ProblemDetail {
    pub problem: problem::Model,
    pub required_files: Vec<required_file::Model>,
    pub arranged_files: Vec<arranged_file::Model>,
    pub executables: Vec<executable::Model>,
    pub test_cases: Vec<test_case::Model>,
}

/// `GET /assignments/info/{lecture_id}/{assignment_id}/detail?eval=`.
/// `eval=true` is only available to admin/manager; a non-public lecture is
/// hidden from non-privileged callers behind `NotFound`, per spec §7.
pub async fn problem_detail(
    db: &DatabaseConnection,
    caller: &user::Model,
    lecture_id: i64,
    assignment_id: i64,
    eval: bool,
) -> Result<ProblemDetail, ServiceError> {
    let privileged = is_privileged(caller);
    if eval && !privileged {
        return Err(ServiceError::Forbidden(
            "eval=true requires admin or manager".into(),
        ));
    }

    let lecture = LectureRepository::new(db.clone())
        .find_one(LectureFilter::new().with_id(lecture_id))
        .await?
        .ok_or_else(|| ServiceError::NotFound("lecture not found".into()))?;
    if !privileged && !lecture.is_public(Utc::now()) {
        return Err(ServiceError::NotFound("lecture not found".into()));
    }

    let problem = ProblemRepository::new(db.clone())
        .find_one(
            ProblemFilter::new()
                .with_lecture_id(lecture_id)
                .with_assignment_id(assignment_id),
        )
        .await?
        .ok_or_else(|| ServiceError::NotFound("problem not found".into()))?;

    let required_files = RequiredFileRepository::new(db.clone())
        .find_all(db::filters::RequiredFileFilter::new().with_problem_id(problem.id))
        .await?;

    let mut arranged_filter = ArrangedFileFilter::new().with_problem_id(problem.id);
    let mut executable_filter = ExecutableFilter::new().with_problem_id(problem.id);
    let mut test_case_filter = TestCaseFilter::new().with_problem_id(problem.id);
    if !eval {
        arranged_filter = arranged_filter.with_eval(false);
        executable_filter = executable_filter.with_eval(false);
        test_case_filter = test_case_filter.with_eval(false);
    }

    let arranged_files = ArrangedFileRepository::new(db.clone())
        .find_all(arranged_filter)
        .await?;
    let executables = ExecutableRepository::new(db.clone())
        .find_all(executable_filter)
        .await?;
    let test_cases = TestCaseRepository::new(db.clone())
        .find_all(test_case_filter)
        .await?;

    Ok(ProblemDetail {
        problem,
        required_files,
        arranged_files,
        executables,
        test_cases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use db::repositories::lecture_repository::LectureRepository as LectureRepo;
    use db::test_utils::test_db;
    use sea_orm::Set;

    async fn seed_lecture(db: &DatabaseConnection, public: bool) -> lecture::Model {
        let now = Utc::now();
        let (start, end) = if public {
            (now - Duration::days(1), now + Duration::days(1))
        } else {
            (now + Duration::days(1), now + Duration::days(2))
        };
        LectureRepo::new(db.clone())
            .create(lecture::ActiveModel {
                title: Set("Data Structures".into()),
                start_date: Set(start),
                end_date: Set(end),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    fn student(user_id: &str) -> user::Model {
        let now = Utc::now();
        user::Model {
            user_id: user_id.into(),
            username: user_id.into(),
            email: format!("{user_id}@example.edu"),
            password_hash: "x".into(),
            role: user::Role::Student,
            disabled: false,
            active_start_date: now - Duration::days(1),
            active_end_date: now + Duration::days(365),
        }
    }

    #[tokio::test]
    async fn student_all_true_is_forbidden() {
        let db = test_db().await;
        let caller = student("s1");
        let result = list_lectures(&db, &caller, true).await;
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn student_sees_only_public_lectures() {
        let db = test_db().await;
        seed_lecture(&db, true).await;
        seed_lecture(&db, false).await;
        let caller = student("s1");
        let lectures = list_lectures(&db, &caller, false).await.unwrap();
        assert_eq!(lectures.len(), 1);
    }

    fn manager(user_id: &str) -> user::Model {
        let mut m = student(user_id);
        m.role = user::Role::Manager;
        m
    }

    async fn seed_problem(db: &DatabaseConnection) -> problem::Model {
        use db::repositories::problem_repository::ProblemRepository;
        let lecture = seed_lecture(db, true).await;
        ProblemRepository::new(db.clone())
            .create(problem::ActiveModel {
                lecture_id: Set(lecture.id),
                assignment_id: Set(1),
                description_path: Set("description.pdf".into()),
                time_ms: Set(1000),
                memory_mb: Set(256),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    /// `eval=true` must expand visibility (both eval rows), never restrict
    /// to only the eval-only ones.
    #[tokio::test]
    async fn eval_true_includes_both_eval_rows() {
        let db = test_db().await;
        let problem = seed_problem(&db).await;

        ArrangedFileRepository::new(db.clone())
            .create(arranged_file::ActiveModel {
                problem_id: Set(problem.id),
                filename: Set("public.txt".into()),
                eval: Set(false),
                ..Default::default()
            })
            .await
            .unwrap();
        ArrangedFileRepository::new(db.clone())
            .create(arranged_file::ActiveModel {
                problem_id: Set(problem.id),
                filename: Set("eval_only.txt".into()),
                eval: Set(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let caller = manager("m1");
        let detail = problem_detail(&db, &caller, problem.lecture_id, problem.assignment_id, true)
            .await
            .unwrap();
        assert_eq!(detail.arranged_files.len(), 2);

        let restricted =
            problem_detail(&db, &caller, problem.lecture_id, problem.assignment_id, false)
                .await
                .unwrap();
        assert_eq!(restricted.arranged_files.len(), 1);
        assert_eq!(restricted.arranged_files[0].filename, "public.txt");
    }
}
