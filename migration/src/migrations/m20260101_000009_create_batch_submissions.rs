use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260101_000009_create_batch_submissions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("batch_submissions"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("ts")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("lecture_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("message")).text().not_null())
                    .col(ColumnDef::new(Alias::new("complete_judge")).big_integer())
                    .col(ColumnDef::new(Alias::new("total_judge")).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("batch_submissions"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("user_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("batch_submissions"), Alias::new("lecture_id"))
                            .to(Alias::new("lectures"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("batch_submissions")).to_owned())
            .await
    }
}
