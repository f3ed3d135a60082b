//! Admin API smart link CRUD + 预览

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace};

use crate::render::render_link;
use crate::services::LinkService;

use super::helpers::{api_result, error_from_smartlink};
use super::types::{DeletedResponse, LinkPayload, OwnerQuery};

/// 列出某个账户的全部 smart link
pub async fn list_links(
    query: web::Query<OwnerQuery>,
    links: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list links for owner {}", query.owner_id);
    Ok(api_result(links.list_links(&query.owner_id).await))
}

pub async fn create_link(
    payload: web::Json<LinkPayload>,
    links: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();
    info!(
        "Admin API: create smart link '{}' for owner {}",
        payload.slug, payload.owner_id
    );
    let record = payload.into_record("");
    Ok(api_result(links.create_link(record).await))
}

pub async fn get_link(
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(links.get_link(&path).await))
}

pub async fn update_link(
    path: web::Path<String>,
    payload: web::Json<LinkPayload>,
    links: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: update smart link {}", id);
    let record = payload.into_inner().into_record(&id);
    Ok(api_result(links.update_link(&id, record).await))
}

pub async fn delete_link(
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = links.delete_link(&id).await.map(|_| DeletedResponse {
        id: id.clone(),
        deleted: true,
    });
    Ok(api_result(result))
}

/// 渲染页面 HTML，不检查 is_public
pub async fn preview_link(
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    match links.get_link(&path).await {
        Ok(record) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(render_link(&record))),
        Err(e) => Ok(error_from_smartlink(&e)),
    }
}
