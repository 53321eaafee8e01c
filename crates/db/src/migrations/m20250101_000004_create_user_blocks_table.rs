//! Create user_blocks table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserBlocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserBlocks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserBlocks::RequestorId).integer().not_null())
                    .col(ColumnDef::new(UserBlocks::TargetId).integer().not_null())
                    .col(
                        ColumnDef::new(UserBlocks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(UserBlocks::RequestorId).ne(Expr::col(UserBlocks::TargetId)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_blocks_requestor")
                            .from(UserBlocks::Table, UserBlocks::RequestorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_blocks_target")
                            .from(UserBlocks::Table, UserBlocks::TargetId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A block in either direction covers the pair, so one row per unordered pair
        manager
            .get_connection()
            .execute_unprepared(
                r"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_user_blocks_pair
                ON user_blocks (LEAST(requestor_id, target_id), GREATEST(requestor_id, target_id));
                ",
            )
            .await?;

        // Index: requestor_id
        manager
            .create_index(
                Index::create()
                    .name("idx_user_blocks_requestor_id")
                    .table(UserBlocks::Table)
                    .col(UserBlocks::RequestorId)
                    .to_owned(),
            )
            .await?;

        // Index: target_id
        manager
            .create_index(
                Index::create()
                    .name("idx_user_blocks_target_id")
                    .table(UserBlocks::Table)
                    .col(UserBlocks::TargetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserBlocks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserBlocks {
    Table,
    Id,
    RequestorId,
    TargetId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
