use sea_orm::{EntityTrait, sea_query::OnConflict};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_profile, profile_to_active_model};
use super::retry;
use crate::errors::{Result, SmartlinkError};
use crate::storage::Profile;

use migration::entities::profile;

impl SeaOrmStorage {
    pub async fn get_profile(&self, id: &str) -> Result<Option<Profile>> {
        let db = self.get_db();
        let model = retry::with_retry(&format!("get_profile({})", id), self.retry_config(), || async {
            profile::Entity::find_by_id(id.to_string()).one(db).await
        })
        .await?;

        Ok(model.map(model_to_profile))
    }

    pub async fn upsert_profile(&self, p: &Profile) -> Result<()> {
        let db = self.get_db();
        let active_model = profile_to_active_model(p);

        retry::with_retry(&format!("upsert_profile({})", p.id), self.retry_config(), || {
            let am = active_model.clone();
            async move {
                profile::Entity::insert(am)
                    .on_conflict(
                        OnConflict::column(profile::Column::Id)
                            .update_columns([
                                profile::Column::DisplayName,
                                profile::Column::Email,
                                profile::Column::AvatarUrl,
                                profile::Column::UpdatedAt,
                            ])
                            .to_owned(),
                    )
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| {
            SmartlinkError::database_operation(format!("Upsert profile '{}' failed: {}", p.id, e))
        })?;

        info!("Profile upserted: {}", p.id);
        Ok(())
    }

    pub async fn delete_profile(&self, id: &str) -> Result<()> {
        let db = self.get_db();
        let result = retry::with_retry(
            &format!("delete_profile({})", id),
            self.retry_config(),
            || async { profile::Entity::delete_by_id(id.to_string()).exec(db).await },
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(SmartlinkError::not_found(format!("Profile not found: {}", id)));
        }
        info!("Profile deleted: {}", id);
        Ok(())
    }
}
