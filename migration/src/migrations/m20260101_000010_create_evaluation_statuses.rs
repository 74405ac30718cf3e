use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260101_000010_create_evaluation_statuses"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("evaluation_statuses"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("batch_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("status")).string().not_null())
                    .col(ColumnDef::new(Alias::new("result")).string())
                    .col(ColumnDef::new(Alias::new("upload_dir")).string())
                    .col(ColumnDef::new(Alias::new("report_path")).string())
                    .col(ColumnDef::new(Alias::new("submit_date")).timestamp())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("evaluation_statuses"), Alias::new("batch_id"))
                            .to(Alias::new("batch_submissions"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("evaluation_statuses"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("user_id")),
                    )
                    .index(
                        Index::create()
                            .name("idx_evaluation_statuses_batch_user")
                            .table(Alias::new("evaluation_statuses"))
                            .col(Alias::new("batch_id"))
                            .col(Alias::new("user_id"))
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("evaluation_statuses")).to_owned())
            .await
    }
}
