//! A grader's single ZIP-of-ZIPs upload; owns one EvaluationStatus row per
//! enrolled student.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "batch_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ts: DateTime<Utc>,
    pub user_id: String,
    pub lecture_id: i64,
    pub message: String,
    pub complete_judge: Option<i64>,
    pub total_judge: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::lecture::Entity",
        from = "Column::LectureId",
        to = "super::lecture::Column::Id"
    )]
    Lecture,
    #[sea_orm(has_many = "super::evaluation_status::Entity")]
    EvaluationStatus,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecture.def()
    }
}

impl Related<super::evaluation_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
