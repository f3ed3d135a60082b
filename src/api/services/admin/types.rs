//! Admin API 类型定义

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::registry::PlatformInfo;
use crate::render::Template;
use crate::services::TimeRange;
use crate::storage::{LinkRecord, PlatformLink, Presave, SocialLink};
use crate::wizard::DraftPatch;

/// 输出目录常量
pub const TS_EXPORT_PATH: &str = "../dashboard/src/services/types.generated.ts";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// 创建 / 更新 smart link 的请求体
#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct LinkPayload {
    pub owner_id: String,
    pub slug: String,
    pub artist_name: String,
    pub title: String,
    pub bio: String,
    #[ts(optional)]
    pub avatar_url: Option<String>,
    #[ts(optional)]
    pub cover_url: Option<String>,
    #[ts(optional)]
    pub player_url: Option<String>,
    pub platforms: Vec<PlatformLink>,
    pub socials: Vec<SocialLink>,
    #[ts(optional)]
    pub contact_text: Option<String>,
    #[ts(optional)]
    pub contact_url: Option<String>,
    #[ts(optional)]
    pub template: Option<String>,
    #[ts(optional)]
    pub is_public: Option<bool>,
}

impl LinkPayload {
    /// 空模板由服务层补默认值
    pub fn into_record(self, id: &str) -> LinkRecord {
        let mut record = LinkRecord::new(id, self.owner_id);
        record.slug = self.slug;
        record.artist_name = self.artist_name;
        record.title = self.title;
        record.bio = self.bio;
        record.avatar_url = self.avatar_url;
        record.cover_url = self.cover_url;
        record.player_url = self.player_url;
        record.platforms = self.platforms;
        record.socials = self.socials;
        record.contact_text = self.contact_text;
        record.contact_url = self.contact_url;
        record.template = self.template.unwrap_or_default();
        record.is_public = self.is_public.unwrap_or(true);
        record
    }
}

/// 创建 / 更新预存活动的请求体
#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct PresavePayload {
    pub owner_id: String,
    pub slug: String,
    pub artist_name: String,
    pub title: String,
    /// RFC3339
    #[ts(optional)]
    pub release_date: Option<String>,
    #[ts(optional)]
    pub cover_url: Option<String>,
    #[ts(optional)]
    pub spotify_url: Option<String>,
    #[ts(optional)]
    pub template: Option<String>,
    #[ts(optional)]
    pub is_public: Option<bool>,
}

impl PresavePayload {
    pub fn into_presave(self, id: &str) -> Result<Presave, crate::errors::SmartlinkError> {
        let release_date = match self.release_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                chrono::DateTime::parse_from_rfc3339(raw)
                    .map(|d| d.with_timezone(&chrono::Utc))
                    .map_err(|e| {
                        crate::errors::SmartlinkError::date_parse(format!(
                            "Invalid release_date '{}': {}",
                            raw, e
                        ))
                    })?,
            ),
        };
        let now = chrono::Utc::now();
        Ok(Presave {
            id: id.to_string(),
            owner_id: self.owner_id,
            slug: self.slug,
            artist_name: self.artist_name,
            title: self.title,
            release_date,
            cover_url: self.cover_url,
            spotify_url: self.spotify_url,
            template: self.template.unwrap_or_default(),
            is_public: self.is_public.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct ProfilePayload {
    pub display_name: String,
    #[ts(optional)]
    pub email: Option<String>,
    #[ts(optional)]
    pub avatar_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct OwnerQuery {
    pub owner_id: String,
}

#[derive(Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct MetricsQuery {
    pub owner_id: String,
    /// RFC3339 或相对窗口（如 7d、24h、1M）
    #[ts(optional)]
    pub since: Option<String>,
}

/// 新建草稿；带 link_id 时从已有记录开始编辑
#[derive(Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct CreateDraftRequest {
    pub owner_id: String,
    #[ts(optional)]
    pub link_id: Option<String>,
    #[ts(optional)]
    pub patch: Option<DraftPatch>,
}

#[derive(Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SpotifyTopQuery {
    #[ts(optional)]
    pub limit: Option<u32>,
    #[ts(optional)]
    pub time_range: Option<TimeRange>,
}

/// 注册表条目（平台 / 社交）
#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RegistryEntry {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: String,
}

impl From<&PlatformInfo> for RegistryEntry {
    fn from(info: &PlatformInfo) -> Self {
        Self {
            id: info.id.to_string(),
            name: info.name.to_string(),
            icon: info.icon.map(str::to_string),
            color: info.color.to_string(),
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TemplateEntry {
    pub id: Template,
    pub description: String,
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}
