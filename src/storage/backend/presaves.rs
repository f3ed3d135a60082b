use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::OnConflict};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_presave, presave_to_active_model};
use super::retry;
use crate::errors::{Result, SmartlinkError};
use crate::storage::Presave;

use migration::entities::presave;

impl SeaOrmStorage {
    pub async fn get_presave(&self, id: &str) -> Result<Option<Presave>> {
        let db = self.get_db();
        let model = retry::with_retry(&format!("get_presave({})", id), self.retry_config(), || async {
            presave::Entity::find_by_id(id.to_string()).one(db).await
        })
        .await?;

        Ok(model.map(model_to_presave))
    }

    pub async fn get_presave_by_slug(&self, slug: &str) -> Result<Option<Presave>> {
        let db = self.get_db();
        let model = retry::with_retry(
            &format!("get_presave_by_slug({})", slug),
            self.retry_config(),
            || async {
                presave::Entity::find()
                    .filter(presave::Column::Slug.eq(slug))
                    .one(db)
                    .await
            },
        )
        .await?;

        Ok(model.map(model_to_presave))
    }

    pub async fn list_presaves(&self, owner_id: &str) -> Result<Vec<Presave>> {
        let db = self.get_db();
        let models = retry::with_retry(
            &format!("list_presaves({})", owner_id),
            self.retry_config(),
            || async {
                presave::Entity::find()
                    .filter(presave::Column::OwnerId.eq(owner_id))
                    .order_by_desc(presave::Column::CreatedAt)
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(models.into_iter().map(model_to_presave).collect())
    }

    pub async fn upsert_presave(&self, p: &Presave) -> Result<()> {
        let db = self.get_db();
        let active_model = presave_to_active_model(p);

        retry::with_retry(&format!("upsert_presave({})", p.id), self.retry_config(), || {
            let am = active_model.clone();
            async move {
                presave::Entity::insert(am)
                    .on_conflict(
                        OnConflict::column(presave::Column::Id)
                            .update_columns([
                                presave::Column::OwnerId,
                                presave::Column::Slug,
                                presave::Column::ArtistName,
                                presave::Column::Title,
                                presave::Column::ReleaseDate,
                                presave::Column::CoverUrl,
                                presave::Column::SpotifyUrl,
                                presave::Column::Template,
                                presave::Column::IsPublic,
                                presave::Column::UpdatedAt,
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
                "Upsert presave '{}' (slug: {}) failed: {}",
                p.id, p.slug, e
            ))
        })?;

        info!("Presave upserted: {} ({})", p.id, p.slug);
        Ok(())
    }

    pub async fn delete_presave(&self, id: &str) -> Result<()> {
        let db = self.get_db();
        let result = retry::with_retry(
            &format!("delete_presave({})", id),
            self.retry_config(),
            || async { presave::Entity::delete_by_id(id.to_string()).exec(db).await },
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(SmartlinkError::not_found(format!("Presave not found: {}", id)));
        }
        info!("Presave deleted: {}", id);
        Ok(())
    }

    pub async fn presave_ids_for_owner(&self, owner_id: &str) -> Result<Vec<String>> {
        let db = self.get_db();
        let ids = retry::with_retry(
            &format!("presave_ids_for_owner({})", owner_id),
            self.retry_config(),
            || async {
                presave::Entity::find()
                    .select_only()
                    .column(presave::Column::Id)
                    .filter(presave::Column::OwnerId.eq(owner_id))
                    .into_tuple::<String>()
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(ids)
    }
}
