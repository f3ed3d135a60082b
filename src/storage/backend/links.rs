//! Smart link 读写操作

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::OnConflict};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{link_to_active_model, model_to_link};
use super::retry;
use crate::errors::{Result, SmartlinkError};
use crate::storage::LinkRecord;

use migration::entities::smart_link;

impl SeaOrmStorage {
    pub async fn get_link(&self, id: &str) -> Result<Option<LinkRecord>> {
        let db = self.get_db();
        let model = retry::with_retry(&format!("get_link({})", id), self.retry_config(), || async {
            smart_link::Entity::find_by_id(id.to_string()).one(db).await
        })
        .await?;

        Ok(model.map(model_to_link))
    }

    pub async fn get_link_by_slug(&self, slug: &str) -> Result<Option<LinkRecord>> {
        let db = self.get_db();
        let model = retry::with_retry(
            &format!("get_link_by_slug({})", slug),
            self.retry_config(),
            || async {
                smart_link::Entity::find()
                    .filter(smart_link::Column::Slug.eq(slug))
                    .one(db)
                    .await
            },
        )
        .await?;

        Ok(model.map(model_to_link))
    }

    /// 某个账户的全部 smart link，按创建时间倒序
    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<LinkRecord>> {
        let db = self.get_db();
        let models = retry::with_retry(
            &format!("list_links({})", owner_id),
            self.retry_config(),
            || async {
                smart_link::Entity::find()
                    .filter(smart_link::Column::OwnerId.eq(owner_id))
                    .order_by_desc(smart_link::Column::CreatedAt)
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// 使用 ON CONFLICT 的原子 upsert（created_at 保持首次写入的值）
    pub async fn upsert_link(&self, link: &LinkRecord) -> Result<()> {
        let db = self.get_db();
        let active_model = link_to_active_model(link)?;

        retry::with_retry(&format!("upsert_link({})", link.id), self.retry_config(), || {
            let am = active_model.clone();
            async move {
                smart_link::Entity::insert(am)
                    .on_conflict(
                        OnConflict::column(smart_link::Column::Id)
                            .update_columns([
                                smart_link::Column::OwnerId,
                                smart_link::Column::Slug,
                                smart_link::Column::ArtistName,
                                smart_link::Column::Title,
                                smart_link::Column::Bio,
                                smart_link::Column::AvatarUrl,
                                smart_link::Column::CoverUrl,
                                smart_link::Column::PlayerUrl,
                                smart_link::Column::Platforms,
                                smart_link::Column::Socials,
                                smart_link::Column::ContactText,
                                smart_link::Column::ContactUrl,
                                smart_link::Column::Template,
                                smart_link::Column::IsPublic,
                                smart_link::Column::UpdatedAt,
                            ])
                            .to_owned(),
                    )
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| {
            SmartlinkError::database_operation(format!(
                "Upsert smart link '{}' (slug: {}) failed: {}",
                link.id, link.slug, e
            ))
        })?;

        info!("Smart link upserted: {} ({})", link.id, link.slug);
        Ok(())
    }

    pub async fn delete_link(&self, id: &str) -> Result<()> {
        let db = self.get_db();
        let result = retry::with_retry(&format!("delete_link({})", id), self.retry_config(), || async {
            smart_link::Entity::delete_by_id(id.to_string()).exec(db).await
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(SmartlinkError::not_found(format!("Smart link not found: {}", id)));
        }

        info!("Smart link deleted: {}", id);
        Ok(())
    }

    /// 只取 id（指标聚合使用）
    pub async fn link_ids_for_owner(&self, owner_id: &str) -> Result<Vec<String>> {
        let db = self.get_db();
        let ids = retry::with_retry(
            &format!("link_ids_for_owner({})", owner_id),
            self.retry_config(),
            || async {
                smart_link::Entity::find()
                    .select_only()
                    .column(smart_link::Column::Id)
                    .filter(smart_link::Column::OwnerId.eq(owner_id))
                    .into_tuple::<String>()
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(ids)
    }
}
