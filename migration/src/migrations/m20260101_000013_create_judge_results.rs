use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260101_000013_create_judge_results"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("judge_results"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("submission_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("test_case_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("result")).string().not_null())
                    .col(ColumnDef::new(Alias::new("time_ms")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("memory_kb")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("exit_code")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("stdout")).text().not_null())
                    .col(ColumnDef::new(Alias::new("stderr")).text().not_null())
                    .col(ColumnDef::new(Alias::new("expected_stdin_path")).string())
                    .col(ColumnDef::new(Alias::new("expected_stdout_path")).string())
                    .col(ColumnDef::new(Alias::new("expected_stderr_path")).string())
                    .col(ColumnDef::new(Alias::new("expected_exit_code")).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("judge_results"), Alias::new("submission_id"))
                            .to(Alias::new("submissions"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("judge_results"), Alias::new("test_case_id"))
                            .to(Alias::new("test_cases"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("judge_results")).to_owned())
            .await
    }
}
