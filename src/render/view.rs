//! 记录 -> 页面视图：过滤、注册表关联、嵌入播放器解析、Spotify 去重

use chrono::{DateTime, Utc};

use super::embed::{is_spotify_url, resolve_spotify_embed};
use super::template::Template;
use crate::registry::{self, PlatformInfo};
use crate::storage::{LinkRecord, PlatformLink, Presave, SocialLink};

/// 关联注册表后的按钮
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub platform_id: String,
    pub url: String,
    pub name: &'static str,
    pub icon: Option<&'static str>,
    pub color: &'static str,
}

impl LinkButton {
    fn new(info: &'static PlatformInfo, url: &str) -> Self {
        Self {
            platform_id: info.id.to_string(),
            url: url.trim().to_string(),
            name: info.name,
            icon: info.icon,
            color: info.color,
        }
    }
}

/// 页面主视觉
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    /// Spotify 嵌入播放器地址
    Embed(String),
    /// 是 Spotify 链接但无法解析
    InvalidEmbed,
    Cover(String),
    None,
}

impl Media {
    /// 播放器地址优先；非 Spotify 或没有播放器时回退到封面
    pub fn select(player_url: Option<&str>, cover_url: Option<&str>) -> Self {
        if let Some(player) = player_url.map(str::trim).filter(|p| !p.is_empty())
            && is_spotify_url(player)
        {
            return match resolve_spotify_embed(player) {
                Some(embed) => Media::Embed(embed),
                None => Media::InvalidEmbed,
            };
        }

        match cover_url.map(str::trim).filter(|c| !c.is_empty()) {
            Some(cover) => Media::Cover(cover.to_string()),
            None => Media::None,
        }
    }

    pub fn is_embed(&self) -> bool {
        matches!(self, Media::Embed(_))
    }
}

/// 保留 URL 非空且标识符已注册的平台链接，顺序不变
pub fn filter_platforms(links: &[PlatformLink]) -> Vec<LinkButton> {
    links
        .iter()
        .filter(|l| !l.url.trim().is_empty())
        .filter_map(|l| registry::platform(&l.platform_id).map(|info| LinkButton::new(info, &l.url)))
        .collect()
}

/// `/{slug}/go/{platform_id}?n=` 的跳转目标：渲染列表中该平台的第 nth 个按钮
pub fn platform_target(links: &[PlatformLink], platform_id: &str, nth: usize) -> Option<String> {
    filter_platforms(links)
        .into_iter()
        .filter(|b| b.platform_id == platform_id)
        .nth(nth)
        .map(|b| b.url)
}

pub fn filter_socials(links: &[SocialLink]) -> Vec<LinkButton> {
    links
        .iter()
        .filter(|l| !l.url.trim().is_empty())
        .filter_map(|l| registry::social(&l.platform_id).map(|info| LinkButton::new(info, &l.url)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub slug: String,
    pub artist_name: String,
    pub title: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub media: Media,
    pub platforms: Vec<LinkButton>,
    pub socials: Vec<LinkButton>,
    pub contact: Option<(String, String)>,
    pub template: Template,
}

impl PageView {
    pub fn build(record: &LinkRecord) -> Self {
        let media = Media::select(record.player_url.as_deref(), record.cover_url.as_deref());

        let mut platforms = filter_platforms(&record.platforms);
        if media.is_embed() {
            platforms.retain(|p| p.platform_id != "spotify");
        }

        let contact = match (&record.contact_text, &record.contact_url) {
            (Some(text), Some(url)) if !text.trim().is_empty() && !url.trim().is_empty() => {
                Some((text.trim().to_string(), url.trim().to_string()))
            }
            _ => None,
        };

        Self {
            slug: record.slug.clone(),
            artist_name: record.artist_name.clone(),
            title: record.title.clone(),
            bio: record.bio.clone(),
            avatar_url: record
                .avatar_url
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            media,
            platforms,
            socials: filter_socials(&record.socials),
            contact,
            template: Template::resolve(&record.template),
        }
    }
}

/// 预存页面上的 OAuth 回调结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresaveStatus {
    Pending,
    Saved,
    Failed,
}

#[derive(Debug, Clone)]
pub struct PresaveView {
    pub slug: String,
    pub artist_name: String,
    pub title: String,
    pub release_date: Option<DateTime<Utc>>,
    pub media: Media,
    pub template: Template,
    pub status: PresaveStatus,
}

impl PresaveView {
    pub fn build(presave: &Presave, status: PresaveStatus) -> Self {
        Self {
            slug: presave.slug.clone(),
            artist_name: presave.artist_name.clone(),
            title: presave.title.clone(),
            release_date: presave.release_date,
            media: Media::select(presave.spotify_url.as_deref(), presave.cover_url.as_deref()),
            template: Template::resolve(&presave.template),
            status,
        }
    }
}
