//! Create user table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Name).string_len(64).not_null())
                    .col(ColumnDef::new(User::Description).text().not_null())
                    .col(ColumnDef::new(User::Mbti).string_len(16).not_null())
                    .col(ColumnDef::new(User::Enneagram).string_len(16).not_null())
                    .col(ColumnDef::new(User::Variant).string_len(16).not_null())
                    .col(ColumnDef::new(User::Tritype).integer().not_null())
                    .col(ColumnDef::new(User::Socionics).string_len(16).not_null())
                    .col(ColumnDef::new(User::Sloan).string_len(16).not_null())
                    .col(ColumnDef::new(User::Psyche).string_len(16).not_null())
                    .col(ColumnDef::new(User::Image).string_len(512).not_null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    Name,
    Description,
    Mbti,
    Enneagram,
    Variant,
    Tritype,
    Socionics,
    Sloan,
    Psyche,
    Image,
    CreatedAt,
}
