//! 预存活动业务逻辑

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::link_service::{normalize_optional, validate_optional_url};
use crate::errors::{Result, SmartlinkError};
use crate::storage::{Presave, SeaOrmStorage};
use crate::utils::{generate_id, validate_slug};

pub fn validate_presave(presave: &Presave) -> Result<()> {
    validate_slug(&presave.slug).map_err(SmartlinkError::validation)?;
    if presave.owner_id.trim().is_empty() {
        return Err(SmartlinkError::validation("owner_id is required"));
    }
    if presave.artist_name.trim().is_empty() {
        return Err(SmartlinkError::validation("artist_name is required"));
    }
    if presave.title.trim().is_empty() {
        return Err(SmartlinkError::validation("title is required"));
    }
    validate_optional_url("cover_url", presave.cover_url.as_deref())?;
    validate_optional_url("spotify_url", presave.spotify_url.as_deref())?;
    Ok(())
}

pub struct PresaveService {
    storage: Arc<SeaOrmStorage>,
}

impl PresaveService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn save_presave(&self, mut presave: Presave) -> Result<Presave> {
        presave.slug = presave.slug.trim().to_string();
        presave.artist_name = presave.artist_name.trim().to_string();
        presave.title = presave.title.trim().to_string();
        if presave.template.trim().is_empty() {
            presave.template = "classic".to_string();
        }
        normalize_optional(&mut presave.cover_url);
        normalize_optional(&mut presave.spotify_url);
        validate_presave(&presave)?;

        if let Some(other) = self.storage.get_presave_by_slug(&presave.slug).await?
            && other.id != presave.id
        {
            return Err(SmartlinkError::conflict(format!(
                "Slug '{}' is already used by another presave",
                presave.slug
            )));
        }

        let existing = self.storage.get_presave(&presave.id).await?;
        if let Some(ref existing) = existing {
            presave.created_at = existing.created_at;
        }
        presave.updated_at = Utc::now();

        self.storage.upsert_presave(&presave).await?;
        info!(
            "PresaveService: {} presave '{}' ({})",
            if existing.is_some() { "updated" } else { "created" },
            presave.slug,
            presave.id
        );
        Ok(presave)
    }

    pub async fn create_presave(&self, mut presave: Presave) -> Result<Presave> {
        presave.id = generate_id();
        presave.created_at = Utc::now();
        self.save_presave(presave).await
    }

    pub async fn update_presave(&self, id: &str, mut presave: Presave) -> Result<Presave> {
        let existing = self.get_presave(id).await?;
        presave.id = existing.id;
        presave.owner_id = existing.owner_id;
        self.save_presave(presave).await
    }

    pub async fn get_presave(&self, id: &str) -> Result<Presave> {
        self.storage
            .get_presave(id)
            .await?
            .ok_or_else(|| SmartlinkError::not_found(format!("Presave '{}' not found", id)))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Presave>> {
        self.storage.get_presave_by_slug(slug).await
    }

    pub async fn list_presaves(&self, owner_id: &str) -> Result<Vec<Presave>> {
        self.storage.list_presaves(owner_id).await
    }

    pub async fn delete_presave(&self, id: &str) -> Result<()> {
        self.storage.delete_presave(id).await
    }
}
