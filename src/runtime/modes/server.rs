//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{AdminAuth, RequestIdMiddleware};
use crate::api::services::{AppStartTime, admin::admin_v1_routes, health_routes, page_routes};
use crate::config::{PagesConfig, StaticConfig};
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::StartupContext;

/// 路由和鉴权相关设置
#[derive(Clone, Debug)]
pub struct RouteSettings {
    pub admin_prefix: String,
    pub health_prefix: String,
    pub admin_token: String,
    pub pages: PagesConfig,
}

impl RouteSettings {
    pub fn from_config(config: &StaticConfig) -> Self {
        Self {
            admin_prefix: config.routes.admin_prefix.clone(),
            health_prefix: config.routes.health_prefix.clone(),
            admin_token: config.api.admin_token.clone(),
            pages: config.pages.clone(),
        }
    }
}

#[derive(Clone, Debug)]
struct CorsSettings {
    allowed_origins: Vec<String>,
    max_age: u64,
}

impl CorsSettings {
    fn from_config(config: &StaticConfig) -> Self {
        Self {
            allowed_origins: config.api.cors_allowed_origins.clone(),
            max_age: config.api.cors_max_age,
        }
    }
}

/// Build CORS middleware from configuration
///
/// 空列表时保持浏览器默认的同源策略
fn build_cors_middleware(cors_config: &CorsSettings) -> Cors {
    if cors_config.allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::ACCEPT,
        ])
        .allowed_header("X-Spotify-Token")
        .max_age(cors_config.max_age as usize);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}

/// 注册共享服务和全部路由；公开页面最后注册
pub fn configure_routes(
    cfg: &mut web::ServiceConfig,
    ctx: &StartupContext,
    routes: &RouteSettings,
    app_start_time: &AppStartTime,
) {
    cfg.app_data(web::Data::new(ctx.storage.clone()))
        .app_data(web::Data::new(ctx.link_service.clone()))
        .app_data(web::Data::new(ctx.presave_service.clone()))
        .app_data(web::Data::new(ctx.profile_service.clone()))
        .app_data(web::Data::new(ctx.metrics_service.clone()))
        .app_data(web::Data::new(ctx.draft_service.clone()))
        .app_data(web::Data::new(ctx.spotify.clone()))
        .app_data(web::Data::new(ctx.click_recorder.clone()))
        .app_data(web::Data::new(routes.pages.clone()))
        .app_data(web::Data::new(app_start_time.clone()))
        .app_data(web::JsonConfig::default().limit(256 * 1024))
        .service(
            web::scope(&routes.admin_prefix)
                .wrap(AdminAuth::new(routes.admin_token.clone()))
                .service(admin_v1_routes()),
        )
        .service(web::scope(&routes.health_prefix).service(health_routes()))
        .service(page_routes());
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();
    let routes = RouteSettings::from_config(&config);
    let cors_config = CorsSettings::from_config(&config);

    if routes.admin_token.is_empty() {
        warn!("api.admin_token is not set, the admin API is disabled");
    }

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    // Clone db reference before storage moves into HttpServer closure
    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);
        let startup = startup.clone();
        let routes = routes.clone();
        let app_start_time = app_start_time.clone();

        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .configure(move |cfg| configure_routes(cfg, &startup, &routes, &app_start_time))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
