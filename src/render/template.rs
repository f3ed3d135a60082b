use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumMessage};
use tracing::warn;
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;

/// 页面主题，只影响内嵌 CSS
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    TS,
    EnumIter,
    AsRefStr,
    EnumMessage,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Template {
    #[default]
    #[strum(message = "Light card on a soft gradient")]
    Classic,
    #[strum(message = "Dark background with muted accents")]
    Midnight,
    #[strum(message = "Dark background with glowing brand-coloured buttons")]
    Neon,
    #[strum(message = "Warm orange-to-pink gradient")]
    Sunset,
    #[strum(message = "Plain white page, outline buttons")]
    Minimal,
    #[strum(message = "Cream paper, monospace type, hard shadows")]
    Retro,
    #[strum(message = "Frosted translucent card over the cover art")]
    Glass,
    #[strum(message = "Black record sleeve with a spinning cover")]
    Vinyl,
}

impl Template {
    /// 按记录中的模板 id 选择主题；未知或空 id 回退到 classic
    pub fn resolve(id: &str) -> Self {
        match id.parse() {
            Ok(template) => template,
            Err(_) => {
                if !id.trim().is_empty() {
                    warn!("Unknown template '{}', falling back to classic", id);
                } else {
                    warn!("Empty template id, falling back to classic");
                }
                Self::Classic
            }
        }
    }

    pub fn id(&self) -> &str {
        self.as_ref()
    }

    /// 主题 CSS 在内嵌资源中的路径
    pub fn stylesheet(&self) -> String {
        format!("themes/{}.css", self.id())
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for Template {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "midnight" => Ok(Self::Midnight),
            "neon" => Ok(Self::Neon),
            "sunset" => Ok(Self::Sunset),
            "minimal" => Ok(Self::Minimal),
            "retro" => Ok(Self::Retro),
            "glass" => Ok(Self::Glass),
            "vinyl" => Ok(Self::Vinyl),
            _ => Err(format!("Unknown template: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(Template::resolve("neon"), Template::Neon);
        assert_eq!(Template::resolve(" Vinyl "), Template::Vinyl);
        assert_eq!(Template::resolve("holographic"), Template::Classic);
        assert_eq!(Template::resolve(""), Template::Classic);
    }

    #[test]
    fn test_every_template_round_trips_through_its_id() {
        for template in Template::iter() {
            assert_eq!(template.id().parse::<Template>().unwrap(), template);
            assert!(template.get_message().is_some());
        }
    }
}
