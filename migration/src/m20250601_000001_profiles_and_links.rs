use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 profiles 表
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::DisplayName).string().not_null())
                    .col(ColumnDef::new(Profiles::Email).string().null())
                    .col(ColumnDef::new(Profiles::AvatarUrl).text().null())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 smart_links 表
        manager
            .create_table(
                Table::create()
                    .table(SmartLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SmartLinks::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SmartLinks::OwnerId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(SmartLinks::Slug)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SmartLinks::ArtistName).string().not_null())
                    .col(ColumnDef::new(SmartLinks::Title).string().not_null())
                    .col(ColumnDef::new(SmartLinks::Bio).text().not_null())
                    .col(ColumnDef::new(SmartLinks::AvatarUrl).text().null())
                    .col(ColumnDef::new(SmartLinks::CoverUrl).text().null())
                    .col(ColumnDef::new(SmartLinks::PlayerUrl).text().null())
                    .col(ColumnDef::new(SmartLinks::Platforms).text().not_null())
                    .col(ColumnDef::new(SmartLinks::Socials).text().not_null())
                    .col(ColumnDef::new(SmartLinks::ContactText).string().null())
                    .col(ColumnDef::new(SmartLinks::ContactUrl).text().null())
                    .col(
                        ColumnDef::new(SmartLinks::Template)
                            .string_len(32)
                            .not_null()
                            .default("classic"),
                    )
                    .col(
                        ColumnDef::new(SmartLinks::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SmartLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SmartLinks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // owner 查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_smart_links_owner_id")
                    .table(SmartLinks::Table)
                    .col(SmartLinks::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_smart_links_owner_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SmartLinks::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Profiles {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
    DisplayName,
    Email,
    AvatarUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SmartLinks {
    #[sea_orm(iden = "smart_links")]
    Table,
    Id,
    OwnerId,
    Slug,
    ArtistName,
    Title,
    Bio,
    AvatarUrl,
    CoverUrl,
    PlayerUrl,
    Platforms,
    Socials,
    ContactText,
    ContactUrl,
    Template,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}
