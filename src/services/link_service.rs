//! Smart link 业务逻辑
//!
//! HTTP 处理器、向导提交和 CLI 共用：校验、slug 冲突检测、公开页面的 slug 缓存。

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use tracing::{debug, info};

use crate::errors::{Result, SmartlinkError};
use crate::storage::{LinkRecord, SeaOrmStorage};
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_id, validate_slug};

/// 校验可选 URL 字段（空值视为未设置）
pub(crate) fn validate_optional_url(field: &str, value: Option<&str>) -> Result<()> {
    match value.map(str::trim) {
        Some(url) if !url.is_empty() => validate_url(url)
            .map_err(|e| SmartlinkError::validation(format!("{}: {}", field, e))),
        _ => Ok(()),
    }
}

pub(crate) fn normalize_optional(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    } else if let Some(v) = value {
        *v = v.trim().to_string();
    }
}

/// 保存前的完整校验
pub fn validate_link(record: &LinkRecord) -> Result<()> {
    validate_slug(&record.slug).map_err(SmartlinkError::validation)?;

    if record.owner_id.trim().is_empty() {
        return Err(SmartlinkError::validation("owner_id is required"));
    }
    if record.artist_name.trim().is_empty() {
        return Err(SmartlinkError::validation("artist_name is required"));
    }

    validate_optional_url("avatar_url", record.avatar_url.as_deref())?;
    validate_optional_url("cover_url", record.cover_url.as_deref())?;
    validate_optional_url("player_url", record.player_url.as_deref())?;
    validate_optional_url("contact_url", record.contact_url.as_deref())?;

    for (i, p) in record.platforms.iter().enumerate() {
        if p.platform_id.trim().is_empty() {
            return Err(SmartlinkError::validation(format!(
                "platforms[{}]: platform_id is required",
                i
            )));
        }
        validate_optional_url(&format!("platforms[{}].url", i), Some(&p.url))?;
    }
    for (i, s) in record.socials.iter().enumerate() {
        if s.platform_id.trim().is_empty() {
            return Err(SmartlinkError::validation(format!(
                "socials[{}]: platform_id is required",
                i
            )));
        }
        validate_optional_url(&format!("socials[{}].url", i), Some(&s.url))?;
    }

    Ok(())
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    /// slug -> 记录（None 作为负缓存）
    slug_cache: Cache<String, Option<LinkRecord>>,
    default_template: String,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>, cache_ttl_secs: u64, cache_capacity: u64) -> Self {
        let slug_cache = Cache::builder()
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .max_capacity(cache_capacity)
            .build();

        Self {
            storage,
            slug_cache,
            default_template: "classic".to_string(),
        }
    }

    pub fn from_config(storage: Arc<SeaOrmStorage>) -> Self {
        let config = crate::config::get_config();
        Self::new(storage, config.cache.default_ttl, config.cache.max_capacity)
            .with_default_template(&config.pages.default_template)
    }

    pub fn with_default_template(mut self, template: &str) -> Self {
        if !template.trim().is_empty() {
            self.default_template = template.trim().to_string();
        }
        self
    }

    pub fn storage(&self) -> &Arc<SeaOrmStorage> {
        &self.storage
    }

    fn normalize(&self, record: &mut LinkRecord) {
        record.slug = record.slug.trim().to_string();
        record.artist_name = record.artist_name.trim().to_string();
        record.title = record.title.trim().to_string();
        if record.template.trim().is_empty() {
            record.template = self.default_template.clone();
        }
        normalize_optional(&mut record.avatar_url);
        normalize_optional(&mut record.cover_url);
        normalize_optional(&mut record.player_url);
        normalize_optional(&mut record.contact_text);
        normalize_optional(&mut record.contact_url);
        for p in record.platforms.iter_mut() {
            p.platform_id = p.platform_id.trim().to_string();
            p.url = p.url.trim().to_string();
        }
        for s in record.socials.iter_mut() {
            s.platform_id = s.platform_id.trim().to_string();
            s.url = s.url.trim().to_string();
        }
    }

    async fn invalidate_slug(&self, slug: &str) {
        self.slug_cache.invalidate(slug).await;
        debug!("Slug cache invalidated: {}", slug);
    }

    /// 校验并 upsert；已存在的记录保留 created_at
    pub async fn save_link(&self, mut record: LinkRecord) -> Result<LinkRecord> {
        self.normalize(&mut record);
        validate_link(&record)?;

        if let Some(other) = self.storage.get_link_by_slug(&record.slug).await?
            && other.id != record.id
        {
            return Err(SmartlinkError::conflict(format!(
                "Slug '{}' is already used by another smart link",
                record.slug
            )));
        }

        let existing = self.storage.get_link(&record.id).await?;
        if let Some(ref existing) = existing {
            record.created_at = existing.created_at;
        }
        record.updated_at = Utc::now();

        self.storage.upsert_link(&record).await?;

        if let Some(ref existing) = existing
            && existing.slug != record.slug
        {
            self.invalidate_slug(&existing.slug).await;
        }
        self.invalidate_slug(&record.slug).await;

        info!(
            "LinkService: {} smart link '{}' ({})",
            if existing.is_some() { "updated" } else { "created" },
            record.slug,
            record.id
        );
        Ok(record)
    }

    /// 新建记录，总是分配新 id
    pub async fn create_link(&self, mut record: LinkRecord) -> Result<LinkRecord> {
        record.id = generate_id();
        record.created_at = Utc::now();
        self.save_link(record).await
    }

    /// 更新已有记录；owner 不随请求改变
    pub async fn update_link(&self, id: &str, mut record: LinkRecord) -> Result<LinkRecord> {
        let existing = self
            .storage
            .get_link(id)
            .await?
            .ok_or_else(|| SmartlinkError::not_found(format!("Smart link '{}' not found", id)))?;
        record.id = existing.id;
        record.owner_id = existing.owner_id;
        self.save_link(record).await
    }

    pub async fn get_link(&self, id: &str) -> Result<LinkRecord> {
        self.storage
            .get_link(id)
            .await?
            .ok_or_else(|| SmartlinkError::not_found(format!("Smart link '{}' not found", id)))
    }

    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<LinkRecord>> {
        self.storage.list_links(owner_id).await
    }

    pub async fn delete_link(&self, id: &str) -> Result<()> {
        let existing = self.get_link(id).await?;
        self.storage.delete_link(id).await?;
        self.invalidate_slug(&existing.slug).await;
        info!("LinkService: deleted '{}' ({})", existing.slug, id);
        Ok(())
    }

    /// 公开页面查询（经过 slug 缓存）
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<LinkRecord>> {
        if let Some(cached) = self.slug_cache.get(slug).await {
            debug!("Slug cache hit: {}", slug);
            return Ok(cached);
        }

        let record = self.storage.get_link_by_slug(slug).await?;
        self.slug_cache
            .insert(slug.to_string(), record.clone())
            .await;
        Ok(record)
    }
}
