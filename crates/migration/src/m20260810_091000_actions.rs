use sea_orm_migration::prelude::*;

use crate::m20260810_090500_goals::Goals;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum Actions {
    Table,
    Id,
    UserId,
    GoalId,
    Content,
    CompletedAt,
    RecurrencePattern,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Actions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Actions::UserId).string().not_null())
                    .col(ColumnDef::new(Actions::GoalId).string().not_null())
                    .col(ColumnDef::new(Actions::Content).string().not_null())
                    .col(ColumnDef::new(Actions::CompletedAt).timestamp())
                    .col(ColumnDef::new(Actions::RecurrencePattern).text())
                    .col(ColumnDef::new(Actions::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Actions::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-actions-goal_id")
                            .from(Actions::Table, Actions::GoalId)
                            .to(Goals::Table, Goals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-actions-user_id")
                    .table(Actions::Table)
                    .col(Actions::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-actions-goal_id-created_at")
                    .table(Actions::Table)
                    .col(Actions::GoalId)
                    .col(Actions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Actions::Table).to_owned())
            .await?;
        Ok(())
    }
}
