use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260101_000011_create_submissions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("submissions"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("ts")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("evaluation_status_id")).big_integer())
                    .col(ColumnDef::new(Alias::new("user_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("lecture_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("assignment_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("eval")).boolean().not_null())
                    .col(ColumnDef::new(Alias::new("progress")).string().not_null())
                    .col(ColumnDef::new(Alias::new("total_task")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("completed_task")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("result")).string())
                    .col(ColumnDef::new(Alias::new("message")).text().not_null())
                    .col(ColumnDef::new(Alias::new("detail")).text().not_null())
                    .col(ColumnDef::new(Alias::new("score")).integer())
                    .col(ColumnDef::new(Alias::new("time_ms")).big_integer())
                    .col(ColumnDef::new(Alias::new("memory_kb")).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("submissions"), Alias::new("evaluation_status_id"))
                            .to(Alias::new("evaluation_statuses"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("submissions"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("user_id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("submissions")).to_owned())
            .await
    }
}
