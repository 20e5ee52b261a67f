use std::sync::Arc;

use anyhow::Context;
use bleco_config::Config;
use bleco_lang_chinese::Engine;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub engine: Engine,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let engine = Engine::new(config.display.mode);
        Self {
            config: Arc::new(RwLock::new(config)),
            engine,
        }
    }

    /// Loads the dictionary named by the config
    pub async fn load_dictionary(&self) -> anyhow::Result<()> {
        let path = self.config.read().await.dictionary.path.clone();
        self.engine
            .load_file(&path)
            .with_context(|| format!("Failed to load dictionary {}", path.display()))
    }
}
