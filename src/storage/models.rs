use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;

/// 平台链接（platform_id 对应 Platform Registry）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PlatformLink {
    pub platform_id: String,
    pub url: String,
}

/// 社交链接（platform_id 对应 Social Registry）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SocialLink {
    pub platform_id: String,
    pub url: String,
}

/// Smart link 页面记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LinkRecord {
    pub id: String,
    pub owner_id: String,
    pub slug: String,
    pub artist_name: String,
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub player_url: Option<String>,
    #[serde(default)]
    pub platforms: Vec<PlatformLink>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub contact_text: Option<String>,
    #[serde(default)]
    pub contact_url: Option<String>,
    pub template: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkRecord {
    /// 创建一条空记录（表单向导和测试使用）
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            slug: String::new(),
            artist_name: String::new(),
            title: String::new(),
            bio: String::new(),
            avatar_url: None,
            cover_url: None,
            player_url: None,
            platforms: Vec::new(),
            socials: Vec::new(),
            contact_text: None,
            contact_url: None,
            template: "classic".to_string(),
            is_public: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 账户资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 预存活动
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Presave {
    pub id: String,
    pub owner_id: String,
    pub slug: String,
    pub artist_name: String,
    pub title: String,
    pub release_date: Option<DateTime<Utc>>,
    pub cover_url: Option<String>,
    pub spotify_url: Option<String>,
    pub template: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 点击事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
pub enum ClickKind {
    View,
    Click,
    Presave,
}

impl ClickKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Click => "click",
            Self::Presave => "presave",
        }
    }
}

impl std::fmt::Display for ClickKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClickKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "click" => Ok(Self::Click),
            "presave" => Ok(Self::Presave),
            _ => Err(format!("Unknown click kind: {}", s)),
        }
    }
}

/// 点击日志记录（只追加）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub link_id: String,
    pub kind: ClickKind,
    pub platform_id: Option<String>,
    pub referrer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClickEvent {
    pub fn view(link_id: impl Into<String>) -> Self {
        Self {
            link_id: link_id.into(),
            kind: ClickKind::View,
            platform_id: None,
            referrer: None,
            created_at: Utc::now(),
        }
    }

    pub fn click(link_id: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self {
            link_id: link_id.into(),
            kind: ClickKind::Click,
            platform_id: Some(platform_id.into()),
            referrer: None,
            created_at: Utc::now(),
        }
    }

    /// 预存授权完成
    pub fn presave(presave_id: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self {
            link_id: presave_id.into(),
            kind: ClickKind::Presave,
            platform_id: Some(platform_id.into()),
            referrer: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_referrer(mut self, referrer: Option<String>) -> Self {
        self.referrer = referrer;
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
