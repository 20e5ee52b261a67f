use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::display::DisplayConfig;

pub mod dictionary;
pub mod display;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Builds the config from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            dictionary: DictionaryConfig::new(),
            display: DisplayConfig::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bleco_core::DisplayMode;
    use std::path::Path;

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"display": {"mode": "traditional"}}"#).unwrap();
        assert_eq!(config.display.mode, DisplayMode::Traditional);
        assert_eq!(config.display.max_results, 50);
        assert_eq!(config.dictionary.path, Path::new("bleco.dict"));
    }

    #[test]
    fn empty_object_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.display.mode, DisplayMode::Simplified);
    }
}
