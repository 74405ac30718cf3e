//! One judge request. Owns UploadedFiles and JudgeResult rows. `batched`
//! (per the spec vocabulary) is derived, not stored: `evaluation_status_id`
//! being `Some` is exactly the `batched` condition.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::verdict::{Progress, Verdict};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ts: DateTime<Utc>,
    pub evaluation_status_id: Option<i64>,
    pub user_id: String,
    pub lecture_id: i64,
    pub assignment_id: i64,
    pub eval: bool,
    pub progress: Progress,
    pub total_task: i32,
    pub completed_task: i32,
    pub result: Option<Verdict>,
    pub message: String,
    pub detail: String,
    pub score: Option<i32>,
    pub time_ms: Option<i64>,
    pub memory_kb: Option<i64>,
}

impl Model {
    pub fn is_batched(&self) -> bool {
        self.evaluation_status_id.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluation_status::Entity",
        from = "Column::EvaluationStatusId",
        to = "super::evaluation_status::Column::Id"
    )]
    EvaluationStatus,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId"
    )]
    User,
    #[sea_orm(has_many = "super::uploaded_file::Entity")]
    UploadedFile,
    #[sea_orm(has_many = "super::judge_result::Entity")]
    JudgeResult,
}

impl Related<super::evaluation_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationStatus.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::uploaded_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadedFile.def()
    }
}

impl Related<super::judge_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JudgeResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
