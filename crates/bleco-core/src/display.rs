use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Which Chinese script entries are presented in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Simplified,
    Traditional,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Simplified => "simplified",
            DisplayMode::Traditional => "traditional",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            DisplayMode::Simplified => 0,
            DisplayMode::Traditional => 1,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => DisplayMode::Traditional,
            _ => DisplayMode::Simplified,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown display mode: {0} (expected \"simplified\" or \"traditional\")")]
pub struct ParseDisplayModeError(String);

impl FromStr for DisplayMode {
    type Err = ParseDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simplified" | "s" | "zh-hans" => Ok(DisplayMode::Simplified),
            "traditional" | "t" | "zh-hant" => Ok(DisplayMode::Traditional),
            _ => Err(ParseDisplayModeError(s.to_string())),
        }
    }
}

/// Shared, atomically updated display mode.
///
/// Readers may observe a stale value while a writer is switching modes.
/// The mode only affects presentation, never which entries match.
#[derive(Debug, Default)]
pub struct DisplayModeCell(AtomicU8);

impl DisplayModeCell {
    pub fn new(mode: DisplayMode) -> Self {
        Self(AtomicU8::new(mode.to_u8()))
    }

    pub fn get(&self) -> DisplayMode {
        DisplayMode::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, mode: DisplayMode) {
        self.0.store(mode.to_u8(), Ordering::Release);
    }
}
