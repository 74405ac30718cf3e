use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260101_000002_create_problems"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("problems"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("lecture_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("assignment_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("description_path")).string().not_null())
                    .col(ColumnDef::new(Alias::new("time_ms")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("memory_mb")).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("problems"), Alias::new("lecture_id"))
                            .to(Alias::new("lectures"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_problems_lecture_assignment")
                            .table(Alias::new("problems"))
                            .col(Alias::new("lecture_id"))
                            .col(Alias::new("assignment_id"))
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("problems")).to_owned())
            .await
    }
}
