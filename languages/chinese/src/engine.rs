use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use bleco_core::{DisplayMode, DisplayModeCell, LoadError, SearchError};

use crate::dictionary::Dictionary;

/// Load lifecycle around a [`Dictionary`], plus the shared display mode.
///
/// Searches run on an `Arc` snapshot, so a reload never disturbs results
/// that are still being read.
#[derive(Default)]
pub struct Engine {
    state: RwLock<Option<Arc<Dictionary>>>,
    display_mode: DisplayModeCell,
}

impl Engine {
    pub fn new(display_mode: DisplayMode) -> Self {
        Self {
            state: RwLock::new(None),
            display_mode: DisplayModeCell::new(display_mode),
        }
    }

    /// Replaces the loaded dictionary. The engine reads as unloaded
    /// while parsing and stays that way if parsing fails.
    pub fn load(&self, reader: impl Read) -> Result<(), LoadError> {
        self.unload();
        let dictionary = Dictionary::from_reader(reader)?;
        tracing::info!("Loaded {} dictionary entries", dictionary.entry_count());
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(dictionary));
        Ok(())
    }

    pub fn load_file(&self, path: &Path) -> Result<(), LoadError> {
        tracing::info!("Loading dictionary from file: {}", path.display());
        self.unload();
        let file = File::open(path)?;
        self.load(file)
    }

    pub fn unload(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Snapshot of the loaded dictionary
    pub fn dictionary(&self) -> Result<Arc<Dictionary>, SearchError> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SearchError::NotLoaded)
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode.get()
    }

    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.display_mode.set(mode);
    }
}
