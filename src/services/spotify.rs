//! Spotify Web API 客户端
//!
//! ureq 是同步客户端：共享一个全局 Agent，在 spawn_blocking 中调用。
//! 只读接口使用调用方提供的 access token；预存页面只做一次授权码换 token，不重试。

use std::sync::OnceLock;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::{debug, warn};
use ts_rs::TS;
use ureq::Agent;

use crate::api::services::admin::TS_EXPORT_PATH;
use crate::config::SpotifyConfig;
use crate::errors::{Result, SmartlinkError};
use crate::render::resolve_spotify_embed;

/// 预存授权请求的 scope
pub const PRESAVE_SCOPE: &str = "user-library-modify user-read-private";

static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent(timeout_secs: u64) -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .into()
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS, AsRefStr)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    #[default]
    MediumTerm,
    LongTerm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct SpotifyImage {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    pub images: Vec<SpotifyImage>,
    pub followers: Followers,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub images: Vec<SpotifyImage>,
    pub followers: Followers,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct SimpleArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct SimpleAlbum {
    pub id: String,
    pub name: String,
    pub images: Vec<SpotifyImage>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<SimpleArtist>,
    pub album: SimpleAlbum,
    pub popularity: u32,
    pub duration_ms: u64,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// 授权码换来的 token（只在回调中短暂使用，不持久化）
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client_id: String,
    client_secret: String,
    api_base: String,
    accounts_base: String,
    redirect_uri: String,
    timeout_secs: u64,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig, base_url: &str) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            accounts_base: config.accounts_base.trim_end_matches('/').to_string(),
            redirect_uri: format!("{}/presave/callback", base_url.trim_end_matches('/')),
            timeout_secs: config.timeout_secs,
        }
    }

    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(&config.spotify, &config.pages.base_url)
    }

    /// 预存授权需要 client_id / client_secret
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// 预存授权跳转地址，state 携带 slug
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}&state={}",
            self.accounts_base,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(PRESAVE_SCOPE),
            urlencoding::encode(state)
        )
    }

    fn basic_auth(&self) -> String {
        format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", self.client_id, self.client_secret))
        )
    }

    async fn blocking<T, F>(&self, what: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&'static Agent) -> Result<T> + Send + 'static,
    {
        let agent = get_agent(self.timeout_secs);
        tokio::task::spawn_blocking(move || f(agent))
            .await
            .map_err(|e| {
                warn!("Spotify {} task failed: {}", what, e);
                SmartlinkError::external_api(format!("Spotify {} task failed", what))
            })?
    }

    fn get_json<T: DeserializeOwned>(
        agent: &Agent,
        url: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", token));
        for (k, v) in query {
            request = request.query(k, v);
        }
        let response = request.call().map_err(|e| map_ureq_error(url, e))?;
        response
            .into_body()
            .read_json::<T>()
            .map_err(|e| SmartlinkError::external_api(format!("Invalid response from {}: {}", url, e)))
    }

    /// GET /v1/me
    pub async fn me(&self, token: &str) -> Result<SpotifyUser> {
        let url = format!("{}/v1/me", self.api_base);
        let token = token.to_string();
        self.blocking("me", move |agent| Self::get_json(agent, &url, &token, &[]))
            .await
    }

    /// GET /v1/me/top/artists
    pub async fn top_artists(
        &self,
        token: &str,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<Paging<SpotifyArtist>> {
        let url = format!("{}/v1/me/top/artists", self.api_base);
        let token = token.to_string();
        let query = top_query(limit, time_range)?;
        self.blocking("top_artists", move |agent| {
            Self::get_json(agent, &url, &token, &query)
        })
        .await
    }

    /// GET /v1/me/top/tracks
    pub async fn top_tracks(
        &self,
        token: &str,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<Paging<SpotifyTrack>> {
        let url = format!("{}/v1/me/top/tracks", self.api_base);
        let token = token.to_string();
        let query = top_query(limit, time_range)?;
        self.blocking("top_tracks", move |agent| {
            Self::get_json(agent, &url, &token, &query)
        })
        .await
    }

    /// 授权码换 access token（单次请求）
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        if !self.is_configured() {
            return Err(SmartlinkError::external_api("Spotify client is not configured"));
        }
        let url = format!("{}/api/token", self.accounts_base);
        let auth = self.basic_auth();
        let code = code.to_string();
        let redirect_uri = self.redirect_uri.clone();

        self.blocking("exchange_code", move |agent| {
            let response = agent
                .post(&url)
                .header("Authorization", &auth)
                .send_form([
                    ("grant_type", "authorization_code"),
                    ("code", code.as_str()),
                    ("redirect_uri", redirect_uri.as_str()),
                ])
                .map_err(|e| map_ureq_error(&url, e))?;
            response.into_body().read_json::<TokenResponse>().map_err(|e| {
                SmartlinkError::external_api(format!("Invalid token response: {}", e))
            })
        })
        .await
    }

    /// 把预存的曲目 / 专辑保存到用户曲库（PUT /v1/me/tracks|albums）
    pub async fn save_to_library(&self, token: &str, spotify_url: &str) -> Result<()> {
        let (kind, id) = library_target(spotify_url).ok_or_else(|| {
            SmartlinkError::validation(format!(
                "Not a Spotify track or album URL: {}",
                spotify_url
            ))
        })?;
        let url = format!("{}/v1/me/{}", self.api_base, kind);
        let token = token.to_string();

        self.blocking("save_to_library", move |agent| {
            agent
                .put(&url)
                .header("Authorization", &format!("Bearer {}", token))
                .query("ids", &id)
                .send_empty()
                .map_err(|e| map_ureq_error(&url, e))?;
            debug!("Saved {} to Spotify library", id);
            Ok(())
        })
        .await
    }
}

fn top_query(limit: u32, time_range: TimeRange) -> Result<Vec<(&'static str, String)>> {
    if !(1..=50).contains(&limit) {
        return Err(SmartlinkError::validation("limit must be between 1 and 50"));
    }
    Ok(vec![
        ("limit", limit.to_string()),
        ("time_range", time_range.as_ref().to_string()),
    ])
}

/// 从 Spotify 链接得到曲库接口的类型和 id（只支持 track / album）
pub fn library_target(spotify_url: &str) -> Option<(&'static str, String)> {
    let embed = resolve_spotify_embed(spotify_url)?;
    let path = embed
        .strip_prefix("https://open.spotify.com/embed/")?
        .split('?')
        .next()?;
    let (kind, id) = path.split_once('/')?;
    match kind {
        "track" => Some(("tracks", id.to_string())),
        "album" => Some(("albums", id.to_string())),
        _ => None,
    }
}

fn map_ureq_error(url: &str, err: ureq::Error) -> SmartlinkError {
    match err {
        ureq::Error::StatusCode(401) => {
            SmartlinkError::external_api("Spotify rejected the access token (401)")
        }
        ureq::Error::StatusCode(code) => {
            SmartlinkError::external_api(format!("Spotify returned HTTP {} for {}", code, url))
        }
        other => {
            warn!("Spotify request to {} failed: {}", url, other);
            SmartlinkError::external_api(format!("Spotify request failed: {}", other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SpotifyClient {
        let config = SpotifyConfig {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            api_base: "https://api.spotify.com/".to_string(),
            accounts_base: "https://accounts.spotify.com".to_string(),
            timeout_secs: 5,
        };
        SpotifyClient::new(&config, "https://links.example.com/")
    }

    #[test]
    fn test_authorize_url() {
        let url = client().authorize_url("new-single");
        assert!(url.starts_with("https://accounts.spotify.com/authorize?client_id=cid&response_type=code"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Flinks.example.com%2Fpresave%2Fcallback"));
        assert!(url.contains("scope=user-library-modify%20user-read-private"));
        assert!(url.ends_with("&state=new-single"));
    }

    #[test]
    fn test_basic_auth() {
        assert_eq!(client().basic_auth(), "Basic Y2lkOnNlY3JldA==");
    }

    #[test]
    fn test_top_query_limits() {
        assert!(top_query(0, TimeRange::ShortTerm).is_err());
        assert!(top_query(51, TimeRange::ShortTerm).is_err());
        let q = top_query(50, TimeRange::LongTerm).unwrap();
        assert_eq!(q[1], ("time_range", "long_term".to_string()));
    }

    #[test]
    fn test_library_target() {
        assert_eq!(
            library_target("https://open.spotify.com/track/abc?si=1"),
            Some(("tracks", "abc".to_string()))
        );
        assert_eq!(
            library_target("https://open.spotify.com/album/xyz"),
            Some(("albums", "xyz".to_string()))
        );
        assert_eq!(library_target("https://open.spotify.com/playlist/p1"), None);
    }

    #[test]
    fn test_user_parses_partial_json() {
        let user: SpotifyUser =
            serde_json::from_str(r#"{"id":"u1","display_name":"Fan","followers":{"total":3}}"#)
                .unwrap();
        assert_eq!(user.followers.total, 3);
        assert!(user.images.is_empty());
    }

    #[tokio::test]
    async fn test_exchange_requires_credentials() {
        let config = SpotifyConfig {
            client_id: String::new(),
            client_secret: String::new(),
            api_base: "http://127.0.0.1:9".to_string(),
            accounts_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        };
        let client = SpotifyClient::new(&config, "http://localhost");
        assert!(matches!(
            client.exchange_code("code").await,
            Err(SmartlinkError::ExternalApi(_))
        ));
    }
}
