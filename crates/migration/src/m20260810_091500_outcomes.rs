use sea_orm_migration::prelude::*;

use crate::m20260810_091000_actions::Actions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Gains {
    Table,
    Id,
    UserId,
    ActionId,
    Kind,
    Description,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Losses {
    Table,
    Id,
    UserId,
    ActionId,
    Kind,
    Description,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gains::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Gains::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Gains::UserId).string().not_null())
                    .col(ColumnDef::new(Gains::ActionId).string().not_null())
                    .col(ColumnDef::new(Gains::Kind).string().not_null())
                    .col(ColumnDef::new(Gains::Description).string().not_null())
                    .col(ColumnDef::new(Gains::Position).integer().not_null())
                    .col(ColumnDef::new(Gains::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Gains::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-gains-action_id")
                            .from(Gains::Table, Gains::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-gains-action_id-position")
                    .table(Gains::Table)
                    .col(Gains::ActionId)
                    .col(Gains::Position)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Losses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Losses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Losses::UserId).string().not_null())
                    .col(ColumnDef::new(Losses::ActionId).string().not_null())
                    .col(ColumnDef::new(Losses::Kind).string().not_null())
                    .col(ColumnDef::new(Losses::Description).string().not_null())
                    .col(ColumnDef::new(Losses::Position).integer().not_null())
                    .col(ColumnDef::new(Losses::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Losses::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-losses-action_id")
                            .from(Losses::Table, Losses::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-losses-action_id-position")
                    .table(Losses::Table)
                    .col(Losses::ActionId)
                    .col(Losses::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Losses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Gains::Table).to_owned())
            .await?;
        Ok(())
    }
}
