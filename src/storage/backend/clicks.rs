//! 点击日志（all_clicks 只追加）

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::*, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, warn};

use super::SeaOrmStorage;
use super::retry;
use crate::errors::Result;
use crate::storage::{ClickEvent, ClickKind};

use migration::entities::click;

impl SeaOrmStorage {
    pub async fn record_click(&self, event: &ClickEvent) -> Result<()> {
        let db = self.get_db();
        let active_model = click::ActiveModel {
            id: NotSet,
            link_id: Set(event.link_id.clone()),
            kind: Set(event.kind.as_str().to_string()),
            platform_id: Set(event.platform_id.clone()),
            referrer: Set(event.referrer.clone()),
            created_at: Set(event.created_at),
        };

        retry::with_retry(
            &format!("record_click({})", event.link_id),
            self.retry_config(),
            || {
                let am = active_model.clone();
                async move { click::Entity::insert(am).exec(db).await }
            },
        )
        .await?;

        debug!(
            "Click recorded: link={} kind={} platform={:?}",
            event.link_id, event.kind, event.platform_id
        );
        Ok(())
    }

    /// 加载一组 link 的点击日志，可选起始时间
    pub async fn load_clicks(
        &self,
        link_ids: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ClickEvent>> {
        if link_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut condition =
            Condition::all().add(click::Column::LinkId.is_in(link_ids.iter().cloned()));
        if let Some(since) = since {
            condition = condition.add(click::Column::CreatedAt.gte(since));
        }

        let db = self.get_db();
        let models = retry::with_retry("load_clicks", self.retry_config(), || async {
            click::Entity::find()
                .filter(condition.clone())
                .order_by_asc(click::Column::CreatedAt)
                .all(db)
                .await
        })
        .await?;

        let events = models
            .into_iter()
            .filter_map(|m| match m.kind.parse::<ClickKind>() {
                Ok(kind) => Some(ClickEvent {
                    link_id: m.link_id,
                    kind,
                    platform_id: m.platform_id,
                    referrer: m.referrer,
                    created_at: m.created_at,
                }),
                Err(e) => {
                    warn!("Skipping click row {}: {}", m.id, e);
                    None
                }
            })
            .collect();

        Ok(events)
    }
}
