//! Page-view / click log entity (append-only)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "all_clicks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// smart_links.id 或 presaves.id
    pub link_id: String,
    /// view | click | presave
    pub kind: String,
    pub platform_id: Option<String>,
    pub referrer: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
