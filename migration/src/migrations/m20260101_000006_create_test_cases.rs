use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260101_000006_create_test_cases"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("test_cases"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("problem_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("eval")).boolean().not_null())
                    .col(ColumnDef::new(Alias::new("scoring_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("score")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("command")).string().not_null())
                    .col(ColumnDef::new(Alias::new("args_json")).text().not_null())
                    .col(ColumnDef::new(Alias::new("expected_stdin_path")).string())
                    .col(ColumnDef::new(Alias::new("expected_stdout_path")).string())
                    .col(ColumnDef::new(Alias::new("expected_stderr_path")).string())
                    .col(ColumnDef::new(Alias::new("expected_exit_code")).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("test_cases"), Alias::new("problem_id"))
                            .to(Alias::new("problems"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("test_cases")).to_owned())
            .await
    }
}
