//! Per-student standing within a batch evaluation. `status=non-submitted`
//! rows never gain child Submissions.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::verdict::{EvaluationStatusKind, Verdict};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "evaluation_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub batch_id: i64,
    pub user_id: String,
    pub status: EvaluationStatusKind,
    pub result: Option<Verdict>,
    pub upload_dir: Option<String>,
    pub report_path: Option<String>,
    pub submit_date: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::batch_submission::Entity",
        from = "Column::BatchId",
        to = "super::batch_submission::Column::Id"
    )]
    BatchSubmission,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId"
    )]
    User,
    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::batch_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchSubmission.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
