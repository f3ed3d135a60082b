//! Spotify 嵌入播放器地址解析

use url::Url;

const EMBED_TYPES: &[&str] = &["track", "album", "playlist"];

/// 是否为 Spotify 域名（用于决定走嵌入播放器还是封面）
pub fn is_spotify_url(input: &str) -> bool {
    Url::parse(input.trim())
        .ok()
        .and_then(|u| u.host_str().map(is_spotify_host))
        .unwrap_or(false)
}

fn is_spotify_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "open.spotify.com" || host == "spotify.com" || host == "www.spotify.com"
}

/// 将 Spotify 链接转为嵌入地址，任何无法识别的输入返回 None
///
/// `https://open.spotify.com/intl-de/track/ID?si=x`
/// -> `https://open.spotify.com/embed/track/ID?utm_source=generator&theme=0`
pub fn resolve_spotify_embed(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || !is_spotify_host(url.host_str()?) {
        return None;
    }

    let mut segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    // 跳过一个 intl-xx 区域段
    if segments.first().is_some_and(|s| s.starts_with("intl-")) {
        segments.remove(0);
    }

    match segments.as_slice() {
        [kind, id, ..] if EMBED_TYPES.contains(kind) && is_spotify_id(id) => Some(format!(
            "https://open.spotify.com/embed/{}/{}?utm_source=generator&theme=0",
            kind, id
        )),
        _ => None,
    }
}

fn is_spotify_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_url_with_query() {
        assert_eq!(
            resolve_spotify_embed("https://open.spotify.com/track/3Qm86XLflmIXVm1wcwkgDK?si=abc"),
            Some(
                "https://open.spotify.com/embed/track/3Qm86XLflmIXVm1wcwkgDK?utm_source=generator&theme=0"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_album_and_playlist() {
        assert_eq!(
            resolve_spotify_embed("https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3"),
            Some(
                "https://open.spotify.com/embed/album/1DFixLWuPkv3KT3TnV35m3?utm_source=generator&theme=0"
                    .to_string()
            )
        );
        assert!(
            resolve_spotify_embed("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M#top")
                .is_some_and(|u| u.starts_with("https://open.spotify.com/embed/playlist/37i9dQZF1DXcBWIGoYBM5M?"))
        );
    }

    #[test]
    fn test_locale_segment_is_skipped() {
        assert_eq!(
            resolve_spotify_embed("https://open.spotify.com/intl-de/track/abc123"),
            Some("https://open.spotify.com/embed/track/abc123?utm_source=generator&theme=0".to_string())
        );
    }

    #[test]
    fn test_unsupported_inputs() {
        assert_eq!(resolve_spotify_embed("https://example.com/not-spotify"), None);
        assert_eq!(resolve_spotify_embed("https://example.com/track/abc"), None);
        assert_eq!(resolve_spotify_embed("https://open.spotify.com/artist/abc"), None);
        assert_eq!(resolve_spotify_embed("https://open.spotify.com/track"), None);
        assert_eq!(resolve_spotify_embed("https://open.spotify.com/track/<script>"), None);
        assert_eq!(resolve_spotify_embed("not a url"), None);
        assert_eq!(resolve_spotify_embed(""), None);
        assert_eq!(resolve_spotify_embed("spotify:track:abc"), None);
    }

    #[test]
    fn test_is_spotify_url() {
        assert!(is_spotify_url("https://open.spotify.com/artist/abc"));
        assert!(!is_spotify_url("https://soundcloud.com/band/song"));
        assert!(!is_spotify_url("garbage"));
    }
}
