use crate::config::StaticConfig;
use crate::services::{
    ClickRecorder, DraftService, LinkService, MetricsService, PresaveService, ProfileService,
    SpotifyClient,
};
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::wizard::DraftStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// 服务器运行需要的全部共享服务
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub presave_service: Arc<PresaveService>,
    pub profile_service: Arc<ProfileService>,
    pub metrics_service: Arc<MetricsService>,
    pub draft_service: Arc<DraftService>,
    pub spotify: Arc<SpotifyClient>,
    pub click_recorder: ClickRecorder,
}

impl StartupContext {
    /// 在已有存储上组装服务（集成测试也走这里）
    pub fn from_storage(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let link_service = Arc::new(
            LinkService::new(
                storage.clone(),
                config.cache.default_ttl,
                config.cache.max_capacity,
            )
            .with_default_template(&config.pages.default_template),
        );
        let draft_store = DraftStore::new(config.wizard.draft_ttl_secs, config.wizard.max_drafts);

        Self {
            presave_service: Arc::new(PresaveService::new(storage.clone())),
            profile_service: Arc::new(ProfileService::new(storage.clone())),
            metrics_service: Arc::new(MetricsService::new(storage.clone())),
            draft_service: Arc::new(DraftService::new(draft_store, link_service.clone())),
            spotify: Arc::new(SpotifyClient::new(&config.spotify, &config.pages.base_url)),
            click_recorder: ClickRecorder::new(storage.clone()),
            link_service,
            storage,
        }
    }
}

/// CLI 模式只需要存储
pub async fn prepare_cli_storage() -> Result<Arc<SeaOrmStorage>> {
    install_crypto_provider();
    StorageFactory::create()
        .await
        .context("Failed to create storage backend")
}

fn install_crypto_provider() {
    // 重复安装返回 Err，只在第一次生效
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    install_crypto_provider();

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let config = crate::config::get_config();
    let context = StartupContext::from_storage(storage, &config);

    if !context.spotify.is_configured() {
        info!("Spotify client id/secret not set, presave authorization is disabled");
    }

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
