use std::sync::Arc;

use crate::adapters::{FixtureSetupRouter, HttpSetupRouter, LocalStorage, LogStore};
use crate::core::{ConfigProvider, Result, SetupRouter, SubmissionStore};
use crate::web::pages::SiteMetadata;

pub struct AppState {
    pub router: Arc<dyn SetupRouter>,
    pub store: Arc<dyn SubmissionStore>,
    pub site: SiteMetadata,
}

impl AppState {
    pub fn new(
        router: Arc<dyn SetupRouter>,
        store: Arc<dyn SubmissionStore>,
        site: SiteMetadata,
    ) -> Arc<Self> {
        Arc::new(Self {
            router,
            store,
            site,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Arc<Self>> {
        let router: Arc<dyn SetupRouter> = match config.fixture_path() {
            Some(path) => {
                tracing::info!("📁 Serving setups from fixture {}", path);
                Arc::new(FixtureSetupRouter::new(path))
            }
            None => {
                tracing::info!("🔌 Using RPC endpoint {}", config.rpc_endpoint());
                Arc::new(HttpSetupRouter::new(
                    config.rpc_endpoint(),
                    config.rpc_timeout(),
                )?)
            }
        };

        let store: Arc<dyn SubmissionStore> = match config.submissions_path() {
            Some(path) => {
                tracing::info!("💾 Recording submissions under {}", path);
                Arc::new(LocalStorage::new(path.to_string()))
            }
            None => Arc::new(LogStore),
        };

        let site = SiteMetadata::new(config.environment(), config.port());

        Ok(Self::new(router, store, site))
    }
}
