//! 点击 / 浏览指标聚合

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;
use crate::errors::{Result, SmartlinkError};
use crate::storage::{ClickEvent, ClickKind, SeaOrmStorage};
use crate::utils::TimeParser;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ItemMetrics {
    pub link_id: String,
    pub views: u64,
    pub clicks: u64,
    pub click_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PlatformCount {
    pub platform_id: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct MetricsSummary {
    pub total_views: u64,
    pub total_clicks: u64,
    pub click_rate: f64,
    pub items: Vec<ItemMetrics>,
    pub platforms: Vec<PlatformCount>,
    pub since: Option<String>,
}

/// clicks / views * 100，views 为 0 时为 0
pub fn click_rate(clicks: u64, views: u64) -> f64 {
    if views == 0 {
        0.0
    } else {
        clicks as f64 / views as f64 * 100.0
    }
}

/// 单遍聚合；`link_ids` 中没有任何事件的条目也会以 0 出现
pub fn aggregate(link_ids: &[String], events: &[ClickEvent]) -> MetricsSummary {
    let mut per_item: BTreeMap<&str, (u64, u64)> =
        link_ids.iter().map(|id| (id.as_str(), (0, 0))).collect();
    let mut per_platform: HashMap<&str, u64> = HashMap::new();
    let mut total_views = 0u64;
    let mut total_clicks = 0u64;

    for event in events {
        let entry = per_item.entry(event.link_id.as_str()).or_insert((0, 0));
        if event.kind == ClickKind::View {
            total_views += 1;
            entry.0 += 1;
        } else {
            total_clicks += 1;
            entry.1 += 1;
            if let Some(platform) = event.platform_id.as_deref().filter(|p| !p.is_empty()) {
                *per_platform.entry(platform).or_insert(0) += 1;
            }
        }
    }

    let items = per_item
        .into_iter()
        .map(|(link_id, (views, clicks))| ItemMetrics {
            link_id: link_id.to_string(),
            views,
            clicks,
            click_rate: click_rate(clicks, views),
        })
        .collect();

    let mut platforms: Vec<PlatformCount> = per_platform
        .into_iter()
        .map(|(platform_id, clicks)| PlatformCount {
            platform_id: platform_id.to_string(),
            clicks,
        })
        .collect();
    platforms.sort_by(|a, b| {
        b.clicks
            .cmp(&a.clicks)
            .then_with(|| a.platform_id.cmp(&b.platform_id))
    });

    MetricsSummary {
        total_views,
        total_clicks,
        click_rate: click_rate(total_clicks, total_views),
        items,
        platforms,
        since: None,
    }
}

pub struct MetricsService {
    storage: Arc<SeaOrmStorage>,
}

impl MetricsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 解析时间窗口起点：RFC3339 或相对时长（从现在往前推）
    pub fn parse_since(since: Option<&str>) -> Result<Option<DateTime<Utc>>> {
        match since.map(str::trim) {
            Some(s) if !s.is_empty() => TimeParser::parse_since(s)
                .map(Some)
                .map_err(SmartlinkError::date_parse),
            _ => Ok(None),
        }
    }

    /// 某个账户名下所有 smart link 和预存活动的指标
    pub async fn owner_metrics(&self, owner_id: &str, since: Option<&str>) -> Result<MetricsSummary> {
        if owner_id.trim().is_empty() {
            return Err(SmartlinkError::validation("owner_id is required"));
        }
        let since = Self::parse_since(since)?;

        let mut ids = self.storage.link_ids_for_owner(owner_id).await?;
        ids.extend(self.storage.presave_ids_for_owner(owner_id).await?);

        let events = self.storage.load_clicks(&ids, since).await?;
        debug!(
            "Aggregating {} click rows over {} items for owner {}",
            events.len(),
            ids.len(),
            owner_id
        );

        let mut summary = aggregate(&ids, &events);
        summary.since = since.map(|s| s.to_rfc3339());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(link: &str, kind: ClickKind, platform: Option<&str>) -> ClickEvent {
        ClickEvent {
            link_id: link.to_string(),
            kind,
            platform_id: platform.map(str::to_string),
            referrer: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_zero_views_gives_zero_rate() {
        let events: Vec<_> = (0..5)
            .map(|_| ev("a", ClickKind::Click, Some("spotify")))
            .collect();
        let summary = aggregate(&[], &events);
        assert_eq!(summary.total_clicks, 5);
        assert_eq!(summary.total_views, 0);
        assert_eq!(summary.click_rate, 0.0);
        assert!(summary.click_rate.is_finite());
        assert_eq!(summary.items[0].click_rate, 0.0);
    }

    #[test]
    fn test_grouping_and_ordering() {
        let events = vec![
            ev("b", ClickKind::View, None),
            ev("b", ClickKind::View, None),
            ev("b", ClickKind::Click, Some("deezer")),
            ev("a", ClickKind::View, None),
            ev("a", ClickKind::Click, Some("spotify")),
            ev("a", ClickKind::Click, Some("spotify")),
            ev("a", ClickKind::Presave, Some("spotify")),
            ev("a", ClickKind::Click, Some("apple_music")),
        ];
        let ids = vec!["c".to_string()];
        let summary = aggregate(&ids, &events);

        assert_eq!(summary.total_views, 3);
        assert_eq!(summary.total_clicks, 5);
        assert!((summary.click_rate - 500.0 / 3.0).abs() < 1e-9);

        let item_ids: Vec<_> = summary.items.iter().map(|i| i.link_id.as_str()).collect();
        assert_eq!(item_ids, vec!["a", "b", "c"]);
        assert_eq!(summary.items[0].clicks, 4);
        assert_eq!(summary.items[0].click_rate, 400.0);
        assert_eq!(summary.items[1].click_rate, 50.0);
        assert_eq!(summary.items[2].views, 0);

        assert_eq!(
            summary.platforms,
            vec![
                PlatformCount { platform_id: "spotify".to_string(), clicks: 3 },
                PlatformCount { platform_id: "apple_music".to_string(), clicks: 1 },
                PlatformCount { platform_id: "deezer".to_string(), clicks: 1 },
            ]
        );
    }

    #[test]
    fn test_views_with_platform_do_not_count_as_platform_clicks() {
        let summary = aggregate(&[], &[ev("a", ClickKind::View, Some("spotify"))]);
        assert!(summary.platforms.is_empty());
    }

    #[test]
    fn test_parse_since() {
        assert_eq!(MetricsService::parse_since(None).unwrap(), None);
        assert_eq!(MetricsService::parse_since(Some("  ")).unwrap(), None);
        assert!(MetricsService::parse_since(Some("7d")).unwrap().is_some());
        assert!(matches!(
            MetricsService::parse_since(Some("soon")),
            Err(SmartlinkError::DateParse(_))
        ));
    }
}
