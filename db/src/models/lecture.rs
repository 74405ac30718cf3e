//! A lecture is the top of the ownership tree: it owns problems, which own
//! everything needed to judge a submission against them.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "lectures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::problem::Entity")]
    Problem,
    #[sea_orm(has_many = "super::batch_submission::Entity")]
    BatchSubmission,
}

impl Related<super::problem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problem.def()
    }
}

impl Related<super::batch_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchSubmission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A lecture is public iff `now` falls in `[start_date, end_date)`.
    pub fn is_public(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now < self.end_date
    }
}
