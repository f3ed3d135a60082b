//! 注册表只读端点（仪表盘下拉框使用）

use actix_web::{Responder, Result as ActixResult};
use strum::{EnumMessage, IntoEnumIterator};

use crate::registry::{PLATFORMS, SOCIALS};
use crate::render::Template;

use super::helpers::success_response;
use super::types::{RegistryEntry, TemplateEntry};

pub async fn list_platforms() -> ActixResult<impl Responder> {
    let entries: Vec<RegistryEntry> = PLATFORMS.iter().map(RegistryEntry::from).collect();
    Ok(success_response(entries))
}

pub async fn list_socials() -> ActixResult<impl Responder> {
    let entries: Vec<RegistryEntry> = SOCIALS.iter().map(RegistryEntry::from).collect();
    Ok(success_response(entries))
}

pub async fn list_templates() -> ActixResult<impl Responder> {
    let entries: Vec<TemplateEntry> = Template::iter()
        .map(|t| TemplateEntry {
            id: t,
            description: t.get_message().unwrap_or_default().to_string(),
        })
        .collect();
    Ok(success_response(entries))
}
