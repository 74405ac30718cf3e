use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260101_000008_create_login_history"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("login_history"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("user_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("login_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("logout_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("refresh_count")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("current_access_token")).text().not_null())
                    .col(ColumnDef::new(Alias::new("current_refresh_token")).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("login_history"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("user_id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_login_history_user_login_at")
                            .table(Alias::new("login_history"))
                            .col(Alias::new("user_id"))
                            .col(Alias::new("login_at"))
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("login_history")).to_owned())
            .await
    }
}
