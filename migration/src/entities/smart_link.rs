use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "smart_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub artist_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub avatar_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub player_url: Option<String>,
    /// JSON 数组：[{"platform_id": "...", "url": "..."}]
    #[sea_orm(column_type = "Text")]
    pub platforms: String,
    /// JSON 数组：[{"platform_id": "...", "url": "..."}]
    #[sea_orm(column_type = "Text")]
    pub socials: String,
    pub contact_text: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub contact_url: Option<String>,
    pub template: String,
    pub is_public: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
