use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use ts_rs::TS;

use super::draft::Draft;
use crate::api::services::admin::TS_EXPORT_PATH;

/// 表单向导步骤，顺序即导航顺序
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS, EnumIter, AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Artist,
    Release,
    Platforms,
    Socials,
    Review,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Artist;
    pub const LAST: WizardStep = WizardStep::Review;

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Artist => Some(Self::Release),
            Self::Release => Some(Self::Platforms),
            Self::Platforms => Some(Self::Socials),
            Self::Socials => Some(Self::Review),
            Self::Review => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            Self::Artist => None,
            Self::Release => Some(Self::Artist),
            Self::Platforms => Some(Self::Release),
            Self::Socials => Some(Self::Platforms),
            Self::Review => Some(Self::Socials),
        }
    }

    /// 当前步骤缺少的内容；None 表示可以前进
    pub fn missing(self, draft: &Draft) -> Option<&'static str> {
        match self {
            Self::Artist => draft
                .artist_name
                .trim()
                .is_empty()
                .then_some("artist_name is required"),
            Self::Release => {
                if draft.title.trim().is_empty() {
                    Some("title is required")
                } else if draft.slug.trim().is_empty() {
                    Some("slug is required")
                } else {
                    None
                }
            }
            Self::Platforms => {
                if draft.platforms.is_empty() {
                    Some("at least one platform link is required")
                } else if draft
                    .platforms
                    .iter()
                    .any(|p| p.platform_id.trim().is_empty() || p.url.trim().is_empty())
                {
                    Some("every platform link needs a platform and a URL")
                } else {
                    None
                }
            }
            Self::Socials => draft
                .socials
                .iter()
                .any(|s| s.platform_id.trim().is_empty() || s.url.trim().is_empty())
                .then_some("every social link needs a platform and a URL"),
            Self::Review => None,
        }
    }

    pub fn is_valid(self, draft: &Draft) -> bool {
        self.missing(draft).is_none()
    }

    /// 第一个不满足条件的步骤
    pub fn first_invalid(draft: &Draft) -> Option<Self> {
        Self::iter().find(|step| !step.is_valid(draft))
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}
