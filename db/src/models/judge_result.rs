//! One row per test case judged for a submission, written by the worker.
//! `result` is a `SingleVerdict` — never `FN`, which only the core emits.

use sea_orm::entity::prelude::*;

use crate::verdict::SingleVerdict;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "judge_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub test_case_id: i64,
    pub result: SingleVerdict,
    pub time_ms: i64,
    pub memory_kb: i64,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub expected_stdin_path: Option<String>,
    pub expected_stdout_path: Option<String>,
    pub expected_stderr_path: Option<String>,
    pub expected_exit_code: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submission::Entity",
        from = "Column::SubmissionId",
        to = "super::submission::Column::Id"
    )]
    Submission,
    #[sea_orm(
        belongs_to = "super::test_case::Entity",
        from = "Column::TestCaseId",
        to = "super::test_case::Column::Id"
    )]
    TestCase,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::test_case::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestCase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
