//! 点击日志表迁移
//!
//! all_clicks 只追加不修改，记录：
//! - 页面浏览 (view)
//! - 平台按钮点击 (click)
//! - Spotify 预存完成 (presave)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AllClicks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AllClicks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AllClicks::LinkId).string_len(64).not_null())
                    .col(ColumnDef::new(AllClicks::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(AllClicks::PlatformId).string_len(64).null())
                    .col(ColumnDef::new(AllClicks::Referrer).string_len(255).null())
                    .col(
                        ColumnDef::new(AllClicks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 复合索引（按链接 + 时间窗口查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_all_clicks_link_time")
                    .table(AllClicks::Table)
                    .col(AllClicks::LinkId)
                    .col(AllClicks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_all_clicks_link_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AllClicks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AllClicks {
    #[sea_orm(iden = "all_clicks")]
    Table,
    Id,
    LinkId,
    Kind,
    PlatformId,
    Referrer,
    CreatedAt,
}
