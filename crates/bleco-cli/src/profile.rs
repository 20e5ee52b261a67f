use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use bleco_config::Config;

const DEFAULT_CONFIG_FILE: &str = "config.json";

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Loads an explicit config file, else `config.json` if present, else
/// the environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return read_config_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()));
    }

    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.exists() {
        read_config_file(default).context("Failed to read config.json")
    } else {
        tracing::debug!("No config file, using environment");
        Ok(Config::new())
    }
}
