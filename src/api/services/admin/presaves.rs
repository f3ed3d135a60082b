//! Admin API 预存活动 CRUD

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::{info, trace};

use crate::services::PresaveService;

use super::helpers::{api_result, error_from_smartlink};
use super::types::{DeletedResponse, OwnerQuery, PresavePayload};

pub async fn list_presaves(
    query: web::Query<OwnerQuery>,
    presaves: web::Data<Arc<PresaveService>>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list presaves for owner {}", query.owner_id);
    Ok(api_result(presaves.list_presaves(&query.owner_id).await))
}

pub async fn create_presave(
    payload: web::Json<PresavePayload>,
    presaves: web::Data<Arc<PresaveService>>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();
    info!(
        "Admin API: create presave '{}' for owner {}",
        payload.slug, payload.owner_id
    );
    let presave = match payload.into_presave("") {
        Ok(p) => p,
        Err(e) => return Ok(error_from_smartlink(&e)),
    };
    Ok(api_result(presaves.create_presave(presave).await))
}

pub async fn get_presave(
    path: web::Path<String>,
    presaves: web::Data<Arc<PresaveService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(presaves.get_presave(&path).await))
}

pub async fn update_presave(
    path: web::Path<String>,
    payload: web::Json<PresavePayload>,
    presaves: web::Data<Arc<PresaveService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: update presave {}", id);
    let presave = match payload.into_inner().into_presave(&id) {
        Ok(p) => p,
        Err(e) => return Ok(error_from_smartlink(&e)),
    };
    Ok(api_result(presaves.update_presave(&id, presave).await))
}

pub async fn delete_presave(
    path: web::Path<String>,
    presaves: web::Data<Arc<PresaveService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = presaves.delete_presave(&id).await.map(|_| DeletedResponse {
        id: id.clone(),
        deleted: true,
    });
    Ok(api_result(result))
}
