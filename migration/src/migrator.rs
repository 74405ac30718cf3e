use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m20260101_000001_create_lectures::Migration),
            Box::new(migrations::m20260101_000002_create_problems::Migration),
            Box::new(migrations::m20260101_000003_create_required_files::Migration),
            Box::new(migrations::m20260101_000004_create_arranged_files::Migration),
            Box::new(migrations::m20260101_000005_create_executables::Migration),
            Box::new(migrations::m20260101_000006_create_test_cases::Migration),
            Box::new(migrations::m20260101_000007_create_users::Migration),
            Box::new(migrations::m20260101_000008_create_login_history::Migration),
            Box::new(migrations::m20260101_000009_create_batch_submissions::Migration),
            Box::new(migrations::m20260101_000010_create_evaluation_statuses::Migration),
            Box::new(migrations::m20260101_000011_create_submissions::Migration),
            Box::new(migrations::m20260101_000012_create_uploaded_files::Migration),
            Box::new(migrations::m20260101_000013_create_judge_results::Migration),
        ]
    }
}
