//! Users are referenced by every write path but never owned by anything;
//! `user_id` (the institution-issued student/staff number) is the primary
//! key, not a synthetic row id.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub disabled: bool,
    pub active_start_date: DateTime<Utc>,
    pub active_end_date: DateTime<Utc>,
}

/// The three-way role vocabulary driving the scope matrix.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "student")]
    Student,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::login_history::Entity")]
    LoginHistory,
}

impl Related<super::login_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoginHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.disabled && self.active_start_date <= now && now < self.active_end_date
    }
}
