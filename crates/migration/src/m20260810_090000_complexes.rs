use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum Complexes {
    Table,
    Id,
    UserId,
    Content,
    Category,
    TriggerEpisode,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complexes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complexes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complexes::UserId).string().not_null())
                    .col(ColumnDef::new(Complexes::Content).string().not_null())
                    .col(ColumnDef::new(Complexes::Category).string().not_null())
                    .col(ColumnDef::new(Complexes::TriggerEpisode).string())
                    .col(ColumnDef::new(Complexes::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Complexes::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-complexes-user_id")
                    .table(Complexes::Table)
                    .col(Complexes::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complexes::Table).to_owned())
            .await?;
        Ok(())
    }
}
