//! 公开页面：smart link、平台跳转、预存页与 Spotify 授权回调
//!
//! 访问记录都交给 ClickRecorder 在后台写入。

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{debug, error, info, trace, warn};

use crate::config::PagesConfig;
use crate::render::{
    PageAssets, PresaveStatus, platform_target, render_link, render_not_found,
    render_presave_page, render_unavailable,
};
use crate::services::{ClickRecorder, LinkService, PresaveService, SpotifyClient};
use crate::storage::{ClickEvent, LinkRecord, Presave};
use crate::utils::url_validator::{is_safe_http_url, referrer_host};

const SPOTIFY_PLATFORM: &str = "spotify";

/// 查找失败时直接返回的响应（404 或 503）
type Lookup<T> = Result<T, HttpResponse>;

#[derive(Debug, Deserialize, Default)]
pub struct GoQuery {
    /// 同一平台的第几个按钮，从 0 开始
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PresavePageQuery {
    pub saved: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// 授权时写入的 slug
    pub state: Option<String>,
    pub error: Option<String>,
}

pub struct PageService;

impl PageService {
    /// `/` 跳转到配置的默认地址
    pub async fn handle_root(pages: web::Data<PagesConfig>) -> impl Responder {
        trace!("Root requested, redirecting to {}", pages.default_url);
        Self::temporary_redirect(&pages.default_url)
    }

    pub async fn handle_link_page(
        req: HttpRequest,
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
        recorder: web::Data<ClickRecorder>,
    ) -> impl Responder {
        let slug = path.into_inner();
        let record = match Self::public_link(&slug, &links).await {
            Ok(record) => record,
            Err(resp) => return resp,
        };

        recorder.record(ClickEvent::view(&record.id).with_referrer(Self::referrer(&req)));
        Self::html(render_link(&record))
    }

    /// HEAD 只探测页面是否存在，不计入浏览
    pub async fn handle_link_head(
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        match Self::public_link(&path, &links).await {
            Ok(_) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .finish(),
            Err(resp) => resp,
        }
    }

    /// `/{slug}/go/{platform_id}?n=`：记录点击后 307 到平台链接
    ///
    /// 目标取自页面渲染出的按钮列表，`n` 区分同一平台的多个按钮。
    pub async fn handle_platform_redirect(
        req: HttpRequest,
        path: web::Path<(String, String)>,
        query: web::Query<GoQuery>,
        links: web::Data<Arc<LinkService>>,
        recorder: web::Data<ClickRecorder>,
    ) -> impl Responder {
        let (slug, platform_id) = path.into_inner();
        let record = match Self::public_link(&slug, &links).await {
            Ok(record) => record,
            Err(resp) => return resp,
        };

        let target = platform_target(&record.platforms, &platform_id, query.n.unwrap_or(0));

        match target {
            Some(url) if is_safe_http_url(&url) => {
                recorder.record(
                    ClickEvent::click(&record.id, &platform_id).with_referrer(Self::referrer(&req)),
                );
                debug!("Redirecting {} -> {} ({})", slug, platform_id, url);
                Self::temporary_redirect(&url)
            }
            Some(url) => {
                warn!(
                    "Refusing to redirect {} / {} to unsafe URL {}",
                    slug, platform_id, url
                );
                Self::not_found_response()
            }
            None => {
                debug!("No {} link on {}", platform_id, slug);
                Self::not_found_response()
            }
        }
    }

    pub async fn handle_presave_page(
        req: HttpRequest,
        path: web::Path<String>,
        query: web::Query<PresavePageQuery>,
        presaves: web::Data<Arc<PresaveService>>,
        recorder: web::Data<ClickRecorder>,
    ) -> impl Responder {
        let slug = path.into_inner();
        let presave = match Self::public_presave(&slug, &presaves).await {
            Ok(presave) => presave,
            Err(resp) => return resp,
        };

        let status = if query.saved.is_some() {
            PresaveStatus::Saved
        } else if query.error.is_some() {
            PresaveStatus::Failed
        } else {
            recorder.record(ClickEvent::view(&presave.id).with_referrer(Self::referrer(&req)));
            PresaveStatus::Pending
        };
        Self::html(render_presave_page(&presave, status))
    }

    /// 跳转到 Spotify 授权页，state 携带 slug
    pub async fn handle_presave_authorize(
        path: web::Path<String>,
        presaves: web::Data<Arc<PresaveService>>,
        spotify: web::Data<Arc<SpotifyClient>>,
    ) -> impl Responder {
        let slug = path.into_inner();
        let presave = match Self::public_presave(&slug, &presaves).await {
            Ok(presave) => presave,
            Err(resp) => return resp,
        };

        if !spotify.is_configured() {
            warn!("Presave authorize for '{}' but Spotify is not configured", slug);
            return Self::presave_redirect(&presave.slug, "error");
        }
        Self::temporary_redirect(&spotify.authorize_url(&presave.slug))
    }

    /// `/presave/callback?code=..&state={slug}`
    ///
    /// 授权码只兑换一次，不重试；成功后把曲目 / 专辑存入用户曲库。
    pub async fn handle_presave_callback(
        query: web::Query<CallbackQuery>,
        presaves: web::Data<Arc<PresaveService>>,
        spotify: web::Data<Arc<SpotifyClient>>,
        recorder: web::Data<ClickRecorder>,
    ) -> impl Responder {
        let query = query.into_inner();
        let Some(slug) = query.state.filter(|s| !s.trim().is_empty()) else {
            debug!("Presave callback without state");
            return Self::not_found_response();
        };
        let presave = match Self::public_presave(&slug, &presaves).await {
            Ok(presave) => presave,
            Err(resp) => return resp,
        };

        if let Some(err) = query.error {
            info!("Spotify authorization for '{}' denied: {}", slug, err);
            return Self::presave_redirect(&presave.slug, "error");
        }
        let Some(code) = query.code.filter(|c| !c.is_empty()) else {
            warn!("Presave callback for '{}' without code", slug);
            return Self::presave_redirect(&presave.slug, "error");
        };

        match Self::complete_presave(&presave, &code, &spotify).await {
            Ok(()) => {
                recorder.record(ClickEvent::presave(&presave.id, SPOTIFY_PLATFORM));
                info!("Presave completed for '{}'", presave.slug);
                Self::presave_redirect(&presave.slug, "saved")
            }
            Err(e) => {
                error!("Presave for '{}' failed: {}", presave.slug, e);
                Self::presave_redirect(&presave.slug, "error")
            }
        }
    }

    /// 内嵌资源（主题 CSS 等）
    pub async fn handle_asset(path: web::Path<String>) -> impl Responder {
        let path = path.into_inner();
        trace!("Serving embedded asset: {}", path);

        // 页面骨架不对外提供
        if path.ends_with(".html") {
            return HttpResponse::NotFound().body("File not found");
        }
        match PageAssets::get(&path) {
            Some(content) => HttpResponse::Ok()
                .content_type(Self::get_content_type(&path))
                .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
                .body(content.data.into_owned()),
            None => {
                debug!("Asset not found: {}", path);
                HttpResponse::NotFound().body("File not found")
            }
        }
    }

    async fn complete_presave(
        presave: &Presave,
        code: &str,
        spotify: &SpotifyClient,
    ) -> crate::errors::Result<()> {
        let token = spotify.exchange_code(code).await?;
        match presave.spotify_url.as_deref() {
            Some(url) => spotify.save_to_library(&token.access_token, url).await,
            None => {
                debug!("Presave '{}' has no Spotify URL, nothing to save", presave.slug);
                Ok(())
            }
        }
    }

    async fn public_link(slug: &str, links: &LinkService) -> Lookup<LinkRecord> {
        match links.find_by_slug(slug).await {
            Ok(Some(record)) if record.is_public => Ok(record),
            Ok(Some(_)) => {
                debug!("Smart link '{}' is private", slug);
                Err(Self::not_found_response())
            }
            Ok(None) => {
                debug!("Smart link '{}' not found", slug);
                Err(Self::not_found_response())
            }
            Err(e) => {
                error!("Lookup for '{}' failed: {}", slug, e);
                Err(Self::unavailable_response())
            }
        }
    }

    async fn public_presave(slug: &str, presaves: &PresaveService) -> Lookup<Presave> {
        match presaves.find_by_slug(slug).await {
            Ok(Some(presave)) if presave.is_public => Ok(presave),
            Ok(_) => {
                debug!("Presave '{}' not found or private", slug);
                Err(Self::not_found_response())
            }
            Err(e) => {
                error!("Presave lookup for '{}' failed: {}", slug, e);
                Err(Self::unavailable_response())
            }
        }
    }

    fn referrer(req: &HttpRequest) -> Option<String> {
        req.headers()
            .get(header::REFERER)
            .and_then(|h| h.to_str().ok())
            .and_then(referrer_host)
    }

    fn presave_redirect(slug: &str, flag: &str) -> HttpResponse {
        Self::temporary_redirect(&format!(
            "/presave/{}?{}=1",
            urlencoding::encode(slug),
            flag
        ))
    }

    fn temporary_redirect(location: &str) -> HttpResponse {
        HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, location))
            .finish()
    }

    fn html(body: String) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body)
    }

    fn not_found_response() -> HttpResponse {
        HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(render_not_found())
    }

    fn unavailable_response() -> HttpResponse {
        HttpResponse::ServiceUnavailable()
            .content_type("text/html; charset=utf-8")
            .insert_header((header::RETRY_AFTER, "30"))
            .body(render_unavailable())
    }

    /// 根据文件扩展名确定 Content-Type
    fn get_content_type(path: &str) -> &'static str {
        match path.split('.').next_back() {
            Some("css") => "text/css; charset=utf-8",
            Some("js") => "application/javascript",
            Some("svg") => "image/svg+xml",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("ico") => "image/x-icon",
            Some("woff2") => "font/woff2",
            _ => "application/octet-stream",
        }
    }
}

/// 公开页面路由；放在最后注册，`/{slug}` 会匹配所有单段路径
pub fn page_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(PageService::handle_root))
        .route("/assets/{path:.*}", web::get().to(PageService::handle_asset))
        .route(
            "/presave/callback",
            web::get().to(PageService::handle_presave_callback),
        )
        .route(
            "/presave/{slug}/authorize",
            web::get().to(PageService::handle_presave_authorize),
        )
        .route(
            "/presave/{slug}",
            web::get().to(PageService::handle_presave_page),
        )
        .route(
            "/{slug}/go/{platform_id}",
            web::get().to(PageService::handle_platform_redirect),
        )
        .route("/{slug}", web::get().to(PageService::handle_link_page))
        .route("/{slug}", web::head().to(PageService::handle_link_head))
}
