use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::step::WizardStep;
use crate::api::services::admin::TS_EXPORT_PATH;
use crate::storage::{LinkRecord, PlatformLink, SocialLink};
use crate::utils::generate_id;

/// 向导中正在编辑的 smart link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Draft {
    /// 编辑模式下为已有记录的 id
    pub record_id: Option<String>,
    pub owner_id: String,
    // artist
    pub artist_name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    // release
    pub title: String,
    pub slug: String,
    pub cover_url: Option<String>,
    pub player_url: Option<String>,
    pub template: String,
    pub is_public: bool,
    // platforms
    pub platforms: Vec<PlatformLink>,
    // socials
    pub socials: Vec<SocialLink>,
    pub contact_text: Option<String>,
    pub contact_url: Option<String>,
    #[serde(skip)]
    #[ts(skip)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            template: "classic".to_string(),
            is_public: true,
            ..Default::default()
        }
    }

    /// 从已有记录开始编辑
    pub fn from_record(record: &LinkRecord) -> Self {
        Self {
            record_id: Some(record.id.clone()),
            owner_id: record.owner_id.clone(),
            artist_name: record.artist_name.clone(),
            bio: record.bio.clone(),
            avatar_url: record.avatar_url.clone(),
            title: record.title.clone(),
            slug: record.slug.clone(),
            cover_url: record.cover_url.clone(),
            player_url: record.player_url.clone(),
            template: record.template.clone(),
            is_public: record.is_public,
            platforms: record.platforms.clone(),
            socials: record.socials.clone(),
            contact_text: record.contact_text.clone(),
            contact_url: record.contact_url.clone(),
            created_at: Some(record.created_at),
        }
    }

    /// 生成待保存的记录；新草稿分配新 id
    pub fn to_record(&self) -> LinkRecord {
        let now = Utc::now();
        LinkRecord {
            id: self.record_id.clone().unwrap_or_else(generate_id),
            owner_id: self.owner_id.clone(),
            slug: self.slug.trim().to_string(),
            artist_name: self.artist_name.trim().to_string(),
            title: self.title.trim().to_string(),
            bio: self.bio.clone(),
            avatar_url: self.avatar_url.clone(),
            cover_url: self.cover_url.clone(),
            player_url: self.player_url.clone(),
            platforms: self.platforms.clone(),
            socials: self.socials.clone(),
            contact_text: self.contact_text.clone(),
            contact_url: self.contact_url.clone(),
            template: self.template.clone(),
            is_public: self.is_public,
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

/// 部分更新；只有出现的字段会被修改
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct DraftPatch {
    #[ts(optional)]
    pub artist_name: Option<String>,
    #[ts(optional)]
    pub bio: Option<String>,
    #[ts(optional)]
    pub avatar_url: Option<String>,
    #[ts(optional)]
    pub title: Option<String>,
    #[ts(optional)]
    pub slug: Option<String>,
    #[ts(optional)]
    pub cover_url: Option<String>,
    #[ts(optional)]
    pub player_url: Option<String>,
    #[ts(optional)]
    pub template: Option<String>,
    #[ts(optional)]
    pub is_public: Option<bool>,
    #[ts(optional)]
    pub platforms: Option<Vec<PlatformLink>>,
    #[ts(optional)]
    pub socials: Option<Vec<SocialLink>>,
    #[ts(optional)]
    pub contact_text: Option<String>,
    #[ts(optional)]
    pub contact_url: Option<String>,
}

/// 空字符串清空可选字段
fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl DraftPatch {
    pub fn apply(self, draft: &mut Draft) {
        if let Some(v) = self.artist_name {
            draft.artist_name = v;
        }
        if let Some(v) = self.bio {
            draft.bio = v;
        }
        if let Some(v) = self.avatar_url {
            draft.avatar_url = optional(v);
        }
        if let Some(v) = self.title {
            draft.title = v;
        }
        if let Some(v) = self.slug {
            draft.slug = v;
        }
        if let Some(v) = self.cover_url {
            draft.cover_url = optional(v);
        }
        if let Some(v) = self.player_url {
            draft.player_url = optional(v);
        }
        if let Some(v) = self.template {
            draft.template = v;
        }
        if let Some(v) = self.is_public {
            draft.is_public = v;
        }
        if let Some(v) = self.platforms {
            draft.platforms = v;
        }
        if let Some(v) = self.socials {
            draft.socials = v;
        }
        if let Some(v) = self.contact_text {
            draft.contact_text = optional(v);
        }
        if let Some(v) = self.contact_url {
            draft.contact_url = optional(v);
        }
    }

    /// 本次修改涉及的步骤
    pub fn touched_steps(&self) -> Vec<WizardStep> {
        let mut steps = Vec::new();
        if self.artist_name.is_some() || self.bio.is_some() || self.avatar_url.is_some() {
            steps.push(WizardStep::Artist);
        }
        if self.title.is_some()
            || self.slug.is_some()
            || self.cover_url.is_some()
            || self.player_url.is_some()
            || self.template.is_some()
            || self.is_public.is_some()
        {
            steps.push(WizardStep::Release);
        }
        if self.platforms.is_some() {
            steps.push(WizardStep::Platforms);
        }
        if self.socials.is_some() || self.contact_text.is_some() || self.contact_url.is_some() {
            steps.push(WizardStep::Socials);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut draft = Draft::new("o1");
        draft.title = "Keep".to_string();
        DraftPatch {
            artist_name: Some("Band".to_string()),
            cover_url: Some("".to_string()),
            ..Default::default()
        }
        .apply(&mut draft);
        assert_eq!(draft.artist_name, "Band");
        assert_eq!(draft.title, "Keep");
        assert_eq!(draft.cover_url, None);
        assert_eq!(draft.template, "classic");
    }

    #[test]
    fn test_touched_steps() {
        let patch = DraftPatch {
            slug: Some("x".to_string()),
            contact_url: Some("https://x.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            patch.touched_steps(),
            vec![WizardStep::Release, WizardStep::Socials]
        );
    }

    #[test]
    fn test_record_round_trip_keeps_id_and_created_at() {
        let mut record = LinkRecord::new("existing", "o1");
        record.slug = "band".to_string();
        let draft = Draft::from_record(&record);
        let saved = draft.to_record();
        assert_eq!(saved.id, "existing");
        assert_eq!(saved.created_at, record.created_at);
        assert_eq!(saved.slug, "band");
    }

    #[test]
    fn test_new_draft_gets_fresh_id() {
        let draft = Draft::new("o1");
        assert_ne!(draft.to_record().id, draft.to_record().id);
    }
}
