//! Admin API 路由配置

use actix_web::web;

use super::{drafts, links, metrics, presaves, profiles, registry, spotify};

/// 账户资料路由 `/profiles`
pub fn profiles_routes() -> actix_web::Scope {
    web::scope("/profiles")
        .route("/{owner_id}", web::get().to(profiles::get_profile))
        .route("/{owner_id}", web::put().to(profiles::put_profile))
        .route("/{owner_id}", web::delete().to(profiles::delete_profile))
}

/// Smart link 路由 `/links`
///
/// 包含：
/// - GET /links?owner_id= - 列表
/// - POST /links - 创建
/// - GET /links/{id}/preview - 预览 HTML（忽略 is_public）
/// - GET|PUT|DELETE /links/{id}
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(links::list_links))
        .route("", web::post().to(links::create_link))
        .route("/{id}/preview", web::get().to(links::preview_link))
        .route("/{id}", web::get().to(links::get_link))
        .route("/{id}", web::put().to(links::update_link))
        .route("/{id}", web::delete().to(links::delete_link))
}

/// 预存活动路由 `/presaves`
pub fn presaves_routes() -> actix_web::Scope {
    web::scope("/presaves")
        .route("", web::get().to(presaves::list_presaves))
        .route("", web::post().to(presaves::create_presave))
        .route("/{id}", web::get().to(presaves::get_presave))
        .route("/{id}", web::put().to(presaves::update_presave))
        .route("/{id}", web::delete().to(presaves::delete_presave))
}

/// 指标路由 `/metrics`
pub fn metrics_routes() -> actix_web::Scope {
    web::scope("/metrics").route("", web::get().to(metrics::owner_metrics))
}

/// 注册表路由 `/registry`
pub fn registry_routes() -> actix_web::Scope {
    web::scope("/registry")
        .route("/platforms", web::get().to(registry::list_platforms))
        .route("/socials", web::get().to(registry::list_socials))
        .route("/templates", web::get().to(registry::list_templates))
}

/// 表单向导路由 `/drafts`
///
/// 包含：
/// - POST /drafts - 新建草稿（可带 link_id 编辑已有记录）
/// - GET|PUT|DELETE /drafts/{id}
/// - POST /drafts/{id}/next - 前进（当前步骤必须有效）
/// - POST /drafts/{id}/back - 后退
/// - POST /drafts/{id}/submit - 保存为 smart link
pub fn drafts_routes() -> actix_web::Scope {
    web::scope("/drafts")
        .route("", web::post().to(drafts::create_draft))
        .route("/{id}/next", web::post().to(drafts::next_step))
        .route("/{id}/back", web::post().to(drafts::previous_step))
        .route("/{id}/submit", web::post().to(drafts::submit_draft))
        .route("/{id}", web::get().to(drafts::get_draft))
        .route("/{id}", web::put().to(drafts::update_draft))
        .route("/{id}", web::delete().to(drafts::delete_draft))
}

/// Spotify 代理路由 `/spotify`
pub fn spotify_routes() -> actix_web::Scope {
    web::scope("/spotify")
        .route("/me", web::get().to(spotify::me))
        .route("/top/artists", web::get().to(spotify::top_artists))
        .route("/top/tracks", web::get().to(spotify::top_tracks))
}

/// Admin API v1 路由
///
/// 组合所有子模块路由
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(profiles_routes())
        .service(links_routes())
        .service(presaves_routes())
        .service(metrics_routes())
        .service(registry_routes())
        .service(drafts_routes())
        .service(spotify_routes())
}
