use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("bleco.dict")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Binary dictionary loaded at startup
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let path = env::var("BLECO_DICT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_path());

        Self { path }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
