//! Admin API 表单向导草稿
//!
//! 草稿只保存在内存里（moka），submit 成功后才写入存储。

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::info;

use crate::services::DraftService;
use crate::wizard::DraftPatch;

use super::helpers::api_result;
use super::types::{CreateDraftRequest, DeletedResponse};

pub async fn create_draft(
    payload: web::Json<CreateDraftRequest>,
    drafts: web::Data<Arc<DraftService>>,
) -> ActixResult<impl Responder> {
    let req = payload.into_inner();
    let result = match req.link_id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(link_id) => {
            info!("Admin API: open draft for existing link {}", link_id);
            drafts.edit(link_id).await
        }
        None => drafts.create(&req.owner_id, req.patch),
    };
    Ok(api_result(result))
}

pub async fn get_draft(
    path: web::Path<String>,
    drafts: web::Data<Arc<DraftService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(drafts.get(&path)))
}

pub async fn update_draft(
    path: web::Path<String>,
    patch: web::Json<DraftPatch>,
    drafts: web::Data<Arc<DraftService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(drafts.update(&path, patch.into_inner())))
}

pub async fn delete_draft(
    path: web::Path<String>,
    drafts: web::Data<Arc<DraftService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = drafts.discard(&id).map(|_| DeletedResponse {
        id: id.clone(),
        deleted: true,
    });
    Ok(api_result(result))
}

pub async fn next_step(
    path: web::Path<String>,
    drafts: web::Data<Arc<DraftService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(drafts.next(&path)))
}

pub async fn previous_step(
    path: web::Path<String>,
    drafts: web::Data<Arc<DraftService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(drafts.back(&path)))
}

pub async fn submit_draft(
    path: web::Path<String>,
    drafts: web::Data<Arc<DraftService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(drafts.submit(&path).await))
}
