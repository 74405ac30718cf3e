use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter, QueryOrder, Select};

use crate::filters::TestCaseFilter;
use crate::models::test_case;
use crate::repositories::repository::Repository;

#[derive(Clone)]
pub struct TestCaseRepository {
    db: DatabaseConnection,
}

impl TestCaseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository<test_case::Entity, TestCaseFilter> for TestCaseRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn apply_filter(query: Select<test_case::Entity>, filter: &TestCaseFilter) -> Select<test_case::Entity> {
        let mut condition = Condition::all();

        if let Some(id) = filter.id {
            condition = condition.add(test_case::Column::Id.eq(id));
        }
        if let Some(problem_id) = filter.problem_id {
            condition = condition.add(test_case::Column::ProblemId.eq(problem_id));
        }
        if let Some(eval) = filter.eval {
            condition = condition.add(test_case::Column::Eval.eq(eval));
        }

        query.filter(condition)
    }

    fn apply_sorting(query: Select<test_case::Entity>, _sort_by: Option<String>) -> Select<test_case::Entity> {
        query.order_by_asc(test_case::Column::Id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{lecture, problem};
    use crate::repositories::lecture_repository::LectureRepository;
    use crate::repositories::problem_repository::ProblemRepository;
    use crate::test_utils::test_db;
    use chrono::Utc;
    use sea_orm::Set;

    #[tokio::test]
    async fn student_view_excludes_eval_only_cases() {
        let db = test_db().await;
        let now = Utc::now();

        let lecture = LectureRepository::new(db.clone())
            .create(lecture::ActiveModel {
                title: Set("OS".into()),
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

        let repo = TestCaseRepository::new(db);
        repo.create(test_case::ActiveModel {
            problem_id: Set(problem.id),
            eval: Set(false),
            scoring_type: Set("exact".into()),
            score: Set(10),
            command: Set("./run".into()),
            args_json: Set("[]".into()),
            expected_exit_code: Set(0),
            ..Default::default()
        })
        .await
        .unwrap();
        repo.create(test_case::ActiveModel {
            problem_id: Set(problem.id),
            eval: Set(true),
            scoring_type: Set("exact".into()),
            score: Set(20),
            command: Set("./run".into()),
            args_json: Set("[]".into()),
            expected_exit_code: Set(0),
            ..Default::default()
        })
        .await
        .unwrap();

        let visible = repo
            .find_all(
                TestCaseFilter::new()
                    .with_problem_id(problem.id)
                    .with_eval(false),
            )
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].score, 10);
    }
}
