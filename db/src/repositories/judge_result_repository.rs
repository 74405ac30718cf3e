use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::JudgeResultFilter;
use crate::models::judge_result;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct JudgeResultRepository {
    db: DatabaseConnection,
}

impl JudgeResultRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<judge_result::Entity, JudgeResultFilter> for JudgeResultRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(
        query: Select<judge_result::Entity>,
        filter: &JudgeResultFilter,
    ) -> Select<judge_result::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(judge_result::Column::Id.eq(id));
        }
        if let Some(submission_id) = filter.submission_id {
            condition = condition.add(judge_result::Column::SubmissionId.eq(submission_id));
        }

        query.filter(condition)
    }

    fn apply_sorting(
        query: Select<judge_result::Entity>,
        _sort_by: Option<String>,
    ) -> Select<judge_result::Entity> {
        query.order_by_asc(judge_result::Column::Id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_db;
    use crate::verdict::Verdict;
    use sea_orm::Set;

    #[tokio::test]
    async fn aggregate_over_fetched_results_matches_max() {
        use crate::models::{lecture, problem, submission, test_case, user};
        use crate::repositories::lecture_repository::LectureRepository;
        use crate::repositories::problem_repository::ProblemRepository;
        use crate::repositories::submission_repository::SubmissionRepository;
        use crate::repositories::test_case_repository::TestCaseRepository;
        use crate::repositories::user_repository::UserRepository;
        use crate::verdict::Progress;
        use chrono::{Duration, Utc};

        let db = test_db().await;
        let now = Utc::now();

        UserRepository::new(db.clone())
            .create(user::ActiveModel {
                user_id: Set("u300".into()),
                username: Set("carol".into()),
                email: Set("carol@example.edu".into()),
                password_hash: Set("placeholder".into()),
                role: Set(user::Role::Student),
                disabled: Set(false),
                active_start_date: Set(now - Duration::days(1)),
                active_end_date: Set(now + Duration::days(365)),
                ..Default::default()
            })
            .await
            .unwrap();

        let lecture = LectureRepository::new(db.clone())
            .create(lecture::ActiveModel {
                title: Set("Networks".into()),
                start_date: Set(now),
                end_date: Set(now),
                ..Default::default()
            })
            .await
            .unwrap();

        let problem = ProblemRepository::new(db.clone())
            .create(problem::ActiveModel {
                lecture_id: Set(lecture.id),
                assignment_id: Set(1),
                description_path: Set("spec.md".into()),
                time_ms: Set(1000),
                memory_mb: Set(128),
                ..Default::default()
            })
            .await
            .unwrap();

        let tc_repo = TestCaseRepository::new(db.clone());
        let tc1 = tc_repo
            .create(test_case::ActiveModel {
                problem_id: Set(problem.id),
                eval: Set(true),
                scoring_type: Set("exact".into()),
                score: Set(10),
                command: Set("./run".into()),
                args_json: Set("[]".into()),
                expected_exit_code: Set(0),
                ..Default::default()
            })
            .await
            .unwrap();
        let tc2 = tc_repo
            .create(test_case::ActiveModel {
                problem_id: Set(problem.id),
                eval: Set(true),
                scoring_type: Set("exact".into()),
                score: Set(10),
                command: Set("./run".into()),
                args_json: Set("[]".into()),
                expected_exit_code: Set(0),
                ..Default::default()
            })
            .await
            .unwrap();

        let submission = SubmissionRepository::new(db.clone())
            .create(submission::ActiveModel {
                ts: Set(now),
                evaluation_status_id: Set(None),
                user_id: Set("u300".into()),
                lecture_id: Set(lecture.id),
                assignment_id: Set(1),
                eval: Set(true),
                progress: Set(Progress::Running),
                total_task: Set(2),
                completed_task: Set(2),
                message: Set(String::new()),
                detail: Set(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        let repo = JudgeResultRepository::new(db);
        repo.create(judge_result::ActiveModel {
            submission_id: Set(submission.id),
            test_case_id: Set(tc1.id),
            result: Set(Verdict::Ac),
            time_ms: Set(10),
            memory_kb: Set(1024),
            exit_code: Set(0),
            stdout: Set(String::new()),
            stderr: Set(String::new()),
            expected_exit_code: Set(0),
            ..Default::default()
        })
        .await
        .unwrap();
        repo.create(judge_result::ActiveModel {
            submission_id: Set(submission.id),
            test_case_id: Set(tc2.id),
            result: Set(Verdict::Wa),
            time_ms: Set(10),
            memory_kb: Set(1024),
            exit_code: Set(1),
            stdout: Set(String::new()),
            stderr: Set(String::new()),
            expected_exit_code: Set(0),
            ..Default::default()
        })
        .await
        .unwrap();

        let rows = repo
            .find_all(JudgeResultFilter::new().with_submission_id(submission.id))
            .await
            .unwrap();
        let verdicts: Vec<Verdict> = rows.iter().map(|r| r.result).collect();
        assert_eq!(crate::verdict::aggregate(&verdicts), Some(Verdict::Wa));
    }
}
