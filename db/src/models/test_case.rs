//! A single judged case: a command, its arguments, and the expected
//! stdin/stdout/stderr/exit_code the worker diffs against.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "test_cases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub problem_id: i64,
    pub eval: bool,
    pub scoring_type: String,
    pub score: i32,
    pub command: String,
    pub args_json: String,
    pub expected_stdin_path: Option<String>,
    pub expected_stdout_path: Option<String>,
    pub expected_stderr_path: Option<String>,
    pub expected_exit_code: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::problem::Entity",
        from = "Column::ProblemId",
        to = "super::problem::Column::Id"
    )]
    Problem,
    #[sea_orm(has_many = "super::judge_result::Entity")]
    JudgeResult,
}

impl Related<super::problem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problem.def()
    }
}

impl Related<super::judge_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JudgeResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
