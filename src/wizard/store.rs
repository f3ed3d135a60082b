use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use parking_lot::Mutex;
use tracing::debug;

use super::Wizard;

pub type SharedWizard = Arc<Mutex<Wizard>>;

/// 内存草稿存储，空闲超时后自动过期
#[derive(Clone)]
pub struct DraftStore {
    cache: Cache<String, SharedWizard>,
}

impl DraftStore {
    pub fn new(idle_ttl_secs: u64, max_drafts: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_drafts)
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();
        Self { cache }
    }

    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(config.wizard.draft_ttl_secs, config.wizard.max_drafts)
    }

    pub fn insert(&self, wizard: Wizard) -> SharedWizard {
        let id = wizard.id.clone();
        let shared = Arc::new(Mutex::new(wizard));
        self.cache.insert(id.clone(), shared.clone());
        debug!("Draft {} stored", id);
        shared
    }

    pub fn get(&self, id: &str) -> Option<SharedWizard> {
        self.cache.get(id)
    }

    pub fn remove(&self, id: &str) -> Option<SharedWizard> {
        let removed = self.cache.remove(id);
        if removed.is_some() {
            debug!("Draft {} removed", id);
        }
        removed
    }

    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Draft;

    #[test]
    fn test_insert_get_remove() {
        let store = DraftStore::new(60, 100);
        let wizard = Wizard::new(Draft::new("o1"));
        let id = wizard.id.clone();
        store.insert(wizard);

        let shared = store.get(&id).unwrap();
        shared.lock().draft.artist_name = "Band".to_string();
        assert_eq!(store.get(&id).unwrap().lock().draft.artist_name, "Band");

        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_drafts_expire() {
        let store = DraftStore::new(1, 100);
        let wizard = Wizard::new(Draft::new("o1"));
        let id = wizard.id.clone();
        store.insert(wizard);
        std::thread::sleep(Duration::from_millis(1200));
        assert!(store.get(&id).is_none());
    }
}
