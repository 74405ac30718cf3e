//! One judged problem within a lecture. `(lecture_id, assignment_id)` is the
//! externally visible identifier pair; `id` is the internal row key.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "problems")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub lecture_id: i64,
    pub assignment_id: i64,
    pub description_path: String,
    pub time_ms: i64,
    pub memory_mb: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lecture::Entity",
        from = "Column::LectureId",
        to = "super::lecture::Column::Id"
    )]
    Lecture,
    #[sea_orm(has_many = "super::required_file::Entity")]
    RequiredFile,
    #[sea_orm(has_many = "super::arranged_file::Entity")]
    ArrangedFile,
    #[sea_orm(has_many = "super::executable::Entity")]
    Executable,
    #[sea_orm(has_many = "super::test_case::Entity")]
    TestCase,
}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecture.def()
    }
}

impl Related<super::required_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequiredFile.def()
    }
}

impl Related<super::arranged_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArrangedFile.def()
    }
}

impl Related<super::executable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Executable.def()
    }
}

impl Related<super::test_case::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestCase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
