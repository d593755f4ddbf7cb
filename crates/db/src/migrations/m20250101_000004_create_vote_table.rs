//! Create vote table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vote::CommentId).string_len(32).not_null())
                    .col(ColumnDef::new(Vote::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Vote::PersonalityType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vote::PersonalityTypeTag)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_comment")
                            .from(Vote::Table, Vote::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_user")
                            .from(Vote::Table, Vote::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (comment_id, user_id, personality_type) - one vote
        // per user per comment per system.
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_comment_user_type")
                    .table(Vote::Table)
                    .col(Vote::CommentId)
                    .col(Vote::UserId)
                    .col(Vote::PersonalityType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (comment_id, user_id) (for the per-pair vote cap)
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_comment_user")
                    .table(Vote::Table)
                    .col(Vote::CommentId)
                    .col(Vote::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vote {
    Table,
    Id,
    CommentId,
    UserId,
    PersonalityType,
    PersonalityTypeTag,
    CreatedAt,
}

#[derive(Iden)]
enum Comment {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
