//! 预存（pre-save）活动表迁移

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Presaves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Presaves::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Presaves::OwnerId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Presaves::Slug)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Presaves::ArtistName).string().not_null())
                    .col(ColumnDef::new(Presaves::Title).string().not_null())
                    .col(
                        ColumnDef::new(Presaves::ReleaseDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Presaves::CoverUrl).text().null())
                    .col(ColumnDef::new(Presaves::SpotifyUrl).text().null())
                    .col(
                        ColumnDef::new(Presaves::Template)
                            .string_len(32)
                            .not_null()
                            .default("classic"),
                    )
                    .col(
                        ColumnDef::new(Presaves::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Presaves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Presaves::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_presaves_owner_id")
                    .table(Presaves::Table)
                    .col(Presaves::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_presaves_owner_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Presaves::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Presaves {
    #[sea_orm(iden = "presaves")]
    Table,
    Id,
    OwnerId,
    Slug,
    ArtistName,
    Title,
    ReleaseDate,
    CoverUrl,
    SpotifyUrl,
    Template,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}
