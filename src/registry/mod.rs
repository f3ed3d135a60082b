//! 平台 / 社交注册表
//!
//! 静态查找表：标识符 -> 显示名、图标、品牌色。记录中的未知标识符保留在存储里，渲染时丢弃。

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// 图标 slug；None 时渲染为纯文字按钮
    pub icon: Option<&'static str>,
    pub color: &'static str,
}

const fn entry(
    id: &'static str,
    name: &'static str,
    icon: Option<&'static str>,
    color: &'static str,
) -> PlatformInfo {
    PlatformInfo {
        id,
        name,
        icon,
        color,
    }
}

pub static PLATFORMS: &[PlatformInfo] = &[
    entry("spotify", "Spotify", Some("spotify"), "#1DB954"),
    entry("apple_music", "Apple Music", Some("applemusic"), "#FA243C"),
    entry("youtube_music", "YouTube Music", Some("youtubemusic"), "#FF0000"),
    entry("amazon_music", "Amazon Music", Some("amazonmusic"), "#25D1DA"),
    entry("deezer", "Deezer", Some("deezer"), "#A238FF"),
    entry("tidal", "TIDAL", Some("tidal"), "#000000"),
    entry("soundcloud", "SoundCloud", Some("soundcloud"), "#FF5500"),
    entry("bandcamp", "Bandcamp", Some("bandcamp"), "#629AA9"),
    entry("pandora", "Pandora", Some("pandora"), "#224099"),
    entry("audiomack", "Audiomack", Some("audiomack"), "#FFA200"),
    entry("napster", "Napster", None, "#2259FF"),
    entry("beatport", "Beatport", None, "#01FF95"),
];

pub static SOCIALS: &[PlatformInfo] = &[
    entry("instagram", "Instagram", Some("instagram"), "#E4405F"),
    entry("tiktok", "TikTok", Some("tiktok"), "#000000"),
    entry("youtube", "YouTube", Some("youtube"), "#FF0000"),
    entry("x", "X", Some("x"), "#000000"),
    entry("facebook", "Facebook", Some("facebook"), "#1877F2"),
    entry("threads", "Threads", Some("threads"), "#000000"),
    entry("twitch", "Twitch", Some("twitch"), "#9146FF"),
    entry("discord", "Discord", Some("discord"), "#5865F2"),
    entry("website", "Website", None, "#444444"),
];

fn find(table: &'static [PlatformInfo], id: &str) -> Option<&'static PlatformInfo> {
    table.iter().find(|p| p.id == id)
}

pub fn platform(id: &str) -> Option<&'static PlatformInfo> {
    find(PLATFORMS, id)
}

pub fn social(id: &str) -> Option<&'static PlatformInfo> {
    find(SOCIALS, id)
}
