use crate::config::AppConfig;
use crate::store::{PgStore, Store};
use crate::vision::{GeminiClient, VisionClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub vision: Arc<dyn VisionClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = PgStore::connect(&config.database_url).await?;
        if let Err(e) = store.migrate().await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let vision = Arc::new(GeminiClient::new(config.gemini.clone())) as Arc<dyn VisionClient>;

        Ok(Self {
            config,
            store: Arc::new(store),
            vision,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn Store>,
        vision: Arc<dyn VisionClient>,
    ) -> Self {
        Self {
            config,
            store,
            vision,
        }
    }
}
