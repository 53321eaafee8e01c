//! Create subscriptions table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::RequestorId).integer().not_null())
                    .col(ColumnDef::new(Subscriptions::TargetId).integer().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(
                        Expr::col(Subscriptions::RequestorId)
                            .ne(Expr::col(Subscriptions::TargetId)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_requestor")
                            .from(Subscriptions::Table, Subscriptions::RequestorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_target")
                            .from(Subscriptions::Table, Subscriptions::TargetId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (requestor_id, target_id) - prevent duplicate subscriptions
        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_requestor_target")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::RequestorId)
                    .col(Subscriptions::TargetId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: target_id (for finding a user's subscribers)
        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_target_id")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::TargetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Subscriptions {
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
