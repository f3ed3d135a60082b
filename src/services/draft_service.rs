//! 表单向导草稿服务
//!
//! 草稿锁只在同步代码里持有；提交时先复制草稿，保存成功后才从存储中移除。

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use ts_rs::TS;

use super::LinkService;
use crate::api::services::admin::TS_EXPORT_PATH;
use crate::errors::{Result, SmartlinkError};
use crate::storage::LinkRecord;
use crate::wizard::{Draft, DraftPatch, DraftStore, SharedWizard, Wizard, WizardState};

/// 提交成功的结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SubmitResult {
    pub link: LinkRecord,
    /// 公开页面路径
    pub redirect: String,
}

pub struct DraftService {
    store: DraftStore,
    links: Arc<LinkService>,
}

impl DraftService {
    pub fn new(store: DraftStore, links: Arc<LinkService>) -> Self {
        Self { store, links }
    }

    fn shared(&self, id: &str) -> Result<SharedWizard> {
        self.store
            .get(id)
            .ok_or_else(|| SmartlinkError::draft_not_found(format!("Draft '{}' not found", id)))
    }

    /// 新建空草稿
    pub fn create(&self, owner_id: &str, patch: Option<DraftPatch>) -> Result<WizardState> {
        if owner_id.trim().is_empty() {
            return Err(SmartlinkError::validation("owner_id is required"));
        }
        let mut wizard = Wizard::new(Draft::new(owner_id.trim()));
        if let Some(patch) = patch {
            wizard.update(patch);
        }
        let state = wizard.state();
        self.store.insert(wizard);
        info!("Draft {} created for owner {}", state.id, owner_id);
        Ok(state)
    }

    /// 从已有记录开始编辑
    pub async fn edit(&self, link_id: &str) -> Result<WizardState> {
        let record = self.links.get_link(link_id).await?;
        let wizard = Wizard::new(Draft::from_record(&record));
        let state = wizard.state();
        self.store.insert(wizard);
        info!("Draft {} opened for smart link {}", state.id, link_id);
        Ok(state)
    }

    pub fn get(&self, id: &str) -> Result<WizardState> {
        Ok(self.shared(id)?.lock().state())
    }

    pub fn update(&self, id: &str, patch: DraftPatch) -> Result<WizardState> {
        let shared = self.shared(id)?;
        let mut wizard = shared.lock();
        wizard.update(patch);
        Ok(wizard.state())
    }

    pub fn next(&self, id: &str) -> Result<WizardState> {
        let shared = self.shared(id)?;
        let mut wizard = shared.lock();
        wizard.next()?;
        Ok(wizard.state())
    }

    pub fn back(&self, id: &str) -> Result<WizardState> {
        let shared = self.shared(id)?;
        let mut wizard = shared.lock();
        wizard.back();
        Ok(wizard.state())
    }

    pub fn discard(&self, id: &str) -> Result<()> {
        self.store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SmartlinkError::draft_not_found(format!("Draft '{}' not found", id)))
    }

    /// 保存草稿；失败时草稿保持原样
    pub async fn submit(&self, id: &str) -> Result<SubmitResult> {
        let shared = self.shared(id)?;
        let record = {
            let wizard = shared.lock();
            wizard.ensure_complete()?;
            wizard.draft.to_record()
        };

        let saved = match self.links.save_link(record).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Draft {} submit failed: {}", id, e);
                return Err(e);
            }
        };

        {
            let mut wizard = shared.lock();
            wizard.draft = Draft::new(saved.owner_id.clone());
        }
        self.store.remove(id);

        info!("Draft {} submitted as smart link {}", id, saved.id);
        Ok(SubmitResult {
            redirect: format!("/{}", saved.slug),
            link: saved,
        })
    }
}
