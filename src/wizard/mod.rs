//! 多步骤表单向导
//!
//! 草稿在服务端保存；每一步都有独立的校验谓词，前进需要当前步骤有效，后退总是允许。

mod draft;
mod step;
mod store;

pub use draft::{Draft, DraftPatch};
pub use step::WizardStep;
pub use store::{DraftStore, SharedWizard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;
use crate::errors::{Result, SmartlinkError};
use crate::utils::generate_id;

#[derive(Debug, Clone)]
pub struct Wizard {
    pub id: String,
    pub step: WizardStep,
    pub draft: Draft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 单个步骤的校验状态
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct StepState {
    pub step: WizardStep,
    pub valid: bool,
    pub missing: Option<String>,
}

/// API 返回的向导快照
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct WizardState {
    pub id: String,
    pub step: WizardStep,
    pub can_advance: bool,
    pub steps: Vec<StepState>,
    pub draft: Draft,
    pub updated_at: String,
}

impl Wizard {
    pub fn new(draft: Draft) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            step: WizardStep::FIRST,
            draft,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        step.is_valid(&self.draft)
    }

    pub fn can_advance(&self) -> bool {
        self.is_step_valid(self.step)
    }

    pub fn update(&mut self, patch: DraftPatch) {
        patch.apply(&mut self.draft);
        self.updated_at = Utc::now();
    }

    /// 前进一步；当前步骤无效时拒绝，最后一步保持不动
    pub fn next(&mut self) -> Result<WizardStep> {
        if let Some(missing) = self.step.missing(&self.draft) {
            return Err(SmartlinkError::wizard_step_invalid(format!(
                "step '{}' is incomplete: {}",
                self.step, missing
            )));
        }
        if let Some(next) = self.step.next() {
            self.step = next;
            self.updated_at = Utc::now();
        }
        Ok(self.step)
    }

    /// 后退一步；第一步保持不动
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            self.updated_at = Utc::now();
        }
        self.step
    }

    /// 提交前检查所有步骤
    pub fn ensure_complete(&self) -> Result<()> {
        match WizardStep::first_invalid(&self.draft) {
            Some(step) => Err(SmartlinkError::wizard_step_invalid(format!(
                "step '{}' is incomplete: {}",
                step,
                step.missing(&self.draft).unwrap_or("invalid")
            ))),
            None => Ok(()),
        }
    }

    pub fn state(&self) -> WizardState {
        WizardState {
            id: self.id.clone(),
            step: self.step,
            can_advance: self.can_advance(),
            steps: WizardStep::iter()
                .map(|step| {
                    let missing = step.missing(&self.draft);
                    StepState {
                        step,
                        valid: missing.is_none(),
                        missing: missing.map(str::to_string),
                    }
                })
                .collect(),
            draft: self.draft.clone(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }
}
