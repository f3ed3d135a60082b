//! Admin API 账户资料

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::info;

use crate::services::ProfileService;

use super::helpers::api_result;
use super::types::{DeletedResponse, ProfilePayload};

pub async fn get_profile(
    path: web::Path<String>,
    profiles: web::Data<Arc<ProfileService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(profiles.get_profile(&path).await))
}

pub async fn put_profile(
    path: web::Path<String>,
    payload: web::Json<ProfilePayload>,
    profiles: web::Data<Arc<ProfileService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    info!("Admin API: put profile {}", id);
    Ok(api_result(
        profiles
            .put_profile(&id, payload.display_name, payload.email, payload.avatar_url)
            .await,
    ))
}

pub async fn delete_profile(
    path: web::Path<String>,
    profiles: web::Data<Arc<ProfileService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = profiles.delete_profile(&id).await.map(|_| DeletedResponse {
        id: id.clone(),
        deleted: true,
    });
    Ok(api_result(result))
}
