//! Create friends table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Friends::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Friends::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Friends::UserId).integer().not_null())
                    .col(ColumnDef::new(Friends::FriendId).integer().not_null())
                    .col(
                        ColumnDef::new(Friends::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Friends::UserId).ne(Expr::col(Friends::FriendId)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friends_user")
                            .from(Friends::Table, Friends::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friends_friend")
                            .from(Friends::Table, Friends::FriendId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: friend_id (friendships are looked up from either side)
        manager
            .create_index(
                Index::create()
                    .name("idx_friends_friend_id")
                    .table(Friends::Table)
                    .col(Friends::FriendId)
                    .to_owned(),
            )
            .await?;

        // Unique index on the unordered pair: (a, b) and (b, a) are the same friendship
        manager
            .get_connection()
            .execute_unprepared(
                r"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_friends_pair
                ON friends (LEAST(user_id, friend_id), GREATEST(user_id, friend_id));
                ",
            )
            .await?;

        // Index: user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_friends_user_id")
                    .table(Friends::Table)
                    .col(Friends::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friends::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Friends {
    Table,
    Id,
    UserId,
    FriendId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
