use std::env;

use bleco_core::DisplayMode;
use serde::{Deserialize, Serialize};

fn default_max_results() -> usize {
    50
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub mode: DisplayMode,
    /// Cap on printed results per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl DisplayConfig {
    pub fn new() -> Self {
        let mode = env::var("BLECO_DISPLAY_MODE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let max_results = env::var("BLECO_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_results);

        Self { mode, max_results }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            max_results: default_max_results(),
        }
    }
}
