use std::path::PathBuf;

use bleco_config::Config;
use bleco_core::DisplayMode;
use clap::{Parser, Subcommand};

/// Bleco - Chinese-English dictionary
#[derive(Parser)]
#[command(name = "bleco", version, about)]
pub struct Cli {
    /// JSON config file. Defaults to ./config.json when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Binary dictionary to load, overriding the config.
    #[arg(long, global = true)]
    pub dict: Option<PathBuf>,

    /// Show traditional characters.
    #[arg(long, global = true)]
    pub traditional: bool,

    /// Maximum results printed per query.
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search by pinyin, characters, English or a whole sentence.
    Search {
        query: String,
    },
    /// Search English definitions only.
    English {
        query: String,
    },
    /// Identify the word at a char position in a sentence.
    Word {
        sentence: String,
        index: usize,
    },
    /// Split a Chinese sentence into dictionary words.
    Split {
        sentence: String,
    },
    /// Build a binary dictionary from a CC-CEDICT source file.
    Build {
        input: PathBuf,
        output: PathBuf,
    },
    /// Start an interactive search session.
    Repl,
}

impl Cli {
    /// Command line flags take precedence over file and env config
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.dict {
            config.dictionary.path = path.clone();
        }
        if self.traditional {
            config.display.mode = DisplayMode::Traditional;
        }
        if let Some(limit) = self.limit {
            config.display.max_results = limit;
        }
    }
}
