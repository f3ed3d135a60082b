use tracing::warn;

use crate::errors::Result;
use crate::storage::{LinkRecord, PlatformLink, Presave, Profile, SocialLink};
use migration::entities::{presave, profile, smart_link};

/// JSON 列解析失败时降级为空数组（页面照常渲染）
fn parse_link_array<T: serde::de::DeserializeOwned>(raw: &str, column: &str, id: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Malformed {} JSON on smart link {}: {}", column, id, e);
            Vec::new()
        }
    }
}

/// 将 Sea-ORM Model 转换为 LinkRecord
pub fn model_to_link(model: smart_link::Model) -> LinkRecord {
    let platforms: Vec<PlatformLink> = parse_link_array(&model.platforms, "platforms", &model.id);
    let socials: Vec<SocialLink> = parse_link_array(&model.socials, "socials", &model.id);

    LinkRecord {
        id: model.id,
        owner_id: model.owner_id,
        slug: model.slug,
        artist_name: model.artist_name,
        title: model.title,
        bio: model.bio,
        avatar_url: model.avatar_url,
        cover_url: model.cover_url,
        player_url: model.player_url,
        platforms,
        socials,
        contact_text: model.contact_text,
        contact_url: model.contact_url,
        template: model.template,
        is_public: model.is_public,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 LinkRecord 转换为 ActiveModel（用于 upsert）
pub fn link_to_active_model(link: &LinkRecord) -> Result<smart_link::ActiveModel> {
    use sea_orm::ActiveValue::*;

    Ok(smart_link::ActiveModel {
        id: Set(link.id.clone()),
        owner_id: Set(link.owner_id.clone()),
        slug: Set(link.slug.clone()),
        artist_name: Set(link.artist_name.clone()),
        title: Set(link.title.clone()),
        bio: Set(link.bio.clone()),
        avatar_url: Set(link.avatar_url.clone()),
        cover_url: Set(link.cover_url.clone()),
        player_url: Set(link.player_url.clone()),
        platforms: Set(serde_json::to_string(&link.platforms)?),
        socials: Set(serde_json::to_string(&link.socials)?),
        contact_text: Set(link.contact_text.clone()),
        contact_url: Set(link.contact_url.clone()),
        template: Set(link.template.clone()),
        is_public: Set(link.is_public),
        created_at: Set(link.created_at),
        updated_at: Set(link.updated_at),
    })
}

pub fn model_to_profile(model: profile::Model) -> Profile {
    Profile {
        id: model.id,
        display_name: model.display_name,
        email: model.email,
        avatar_url: model.avatar_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn profile_to_active_model(p: &Profile) -> profile::ActiveModel {
    use sea_orm::ActiveValue::*;

    profile::ActiveModel {
        id: Set(p.id.clone()),
        display_name: Set(p.display_name.clone()),
        email: Set(p.email.clone()),
        avatar_url: Set(p.avatar_url.clone()),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

pub fn model_to_presave(model: presave::Model) -> Presave {
    Presave {
        id: model.id,
        owner_id: model.owner_id,
        slug: model.slug,
        artist_name: model.artist_name,
        title: model.title,
        release_date: model.release_date,
        cover_url: model.cover_url,
        spotify_url: model.spotify_url,
        template: model.template,
        is_public: model.is_public,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn presave_to_active_model(p: &Presave) -> presave::ActiveModel {
    use sea_orm::ActiveValue::*;

    presave::ActiveModel {
        id: Set(p.id.clone()),
        owner_id: Set(p.owner_id.clone()),
        slug: Set(p.slug.clone()),
        artist_name: Set(p.artist_name.clone()),
        title: Set(p.title.clone()),
        release_date: Set(p.release_date),
        cover_url: Set(p.cover_url.clone()),
        spotify_url: Set(p.spotify_url.clone()),
        template: Set(p.template.clone()),
        is_public: Set(p.is_public),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}
