use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::{Result, SmartlinkError};
use crate::storage::{Profile, SeaOrmStorage};
use crate::utils::url_validator::validate_url;

pub struct ProfileService {
    storage: Arc<SeaOrmStorage>,
}

impl ProfileService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn get_profile(&self, id: &str) -> Result<Profile> {
        self.storage
            .get_profile(id)
            .await?
            .ok_or_else(|| SmartlinkError::not_found(format!("Profile '{}' not found", id)))
    }

    /// 创建或更新资料；created_at 保持首次写入的值
    pub async fn put_profile(
        &self,
        id: &str,
        display_name: String,
        email: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Profile> {
        if id.trim().is_empty() {
            return Err(SmartlinkError::validation("profile id is required"));
        }
        if let Some(ref avatar) = avatar_url
            && !avatar.trim().is_empty()
        {
            validate_url(avatar)
                .map_err(|e| SmartlinkError::validation(format!("avatar_url: {}", e)))?;
        }

        let now = Utc::now();
        let created_at = self
            .storage
            .get_profile(id)
            .await?
            .map(|p| p.created_at)
            .unwrap_or(now);

        let profile = Profile {
            id: id.to_string(),
            display_name: display_name.trim().to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
            avatar_url: avatar_url.filter(|a| !a.trim().is_empty()),
            created_at,
            updated_at: now,
        };
        self.storage.upsert_profile(&profile).await?;
        info!("ProfileService: saved profile '{}'", id);
        Ok(profile)
    }

    pub async fn delete_profile(&self, id: &str) -> Result<()> {
        self.storage.delete_profile(id).await
    }
}
