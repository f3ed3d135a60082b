//! 访问记录写入
//!
//! 写入放在后台任务里执行，失败只记日志，不影响访客请求。

use std::sync::Arc;

use tracing::warn;

use crate::storage::{ClickEvent, SeaOrmStorage};

#[derive(Clone)]
pub struct ClickRecorder {
    storage: Arc<SeaOrmStorage>,
}

impl ClickRecorder {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 后台写入，立即返回
    pub fn record(&self, event: ClickEvent) -> tokio::task::JoinHandle<()> {
        let storage = self.storage.clone();
        tokio::spawn(async move {
            if let Err(e) = storage.record_click(&event).await {
                warn!(
                    "Failed to record {} for {}: {}",
                    event.kind, event.link_id, e
                );
            }
        })
    }
}
