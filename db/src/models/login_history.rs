//! One row per live session. A new login overwrites rather than inserts
//! once a session exists for a user (`(user_id, login_at)` is unique, but
//! the service layer enforces single-session by updating this row on
//! refresh rather than creating a second one).

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "login_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub login_at: DateTime<Utc>,
    pub logout_at: DateTime<Utc>,
    pub refresh_count: i32,
    pub current_access_token: String,
    pub current_refresh_token: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
