use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Segments in a freshly spawned snake; the score counts growth beyond it.
pub const INITIAL_SNAKE_LENGTH: usize = 2;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

pub const GLYPH_SNAKE_HEAD: &str = "@";
pub const GLYPH_SNAKE_BODY: &str = "#";
pub const GLYPH_FOOD: &str = "+";

/// Colours food is drawn in. The snake inherits the colour of what it eats.
pub const FOOD_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Yellow,
];

pub const INITIAL_FOOD_COLOR: Color = Color::Blue;
pub const INITIAL_SNAKE_COLOR: Color = Color::Green;
pub const HUD_SCORE_COLOR: Color = Color::Red;
pub const GAME_OVER_COLOR: Color = Color::Cyan;

const APP_DIR_NAME: &str = "cursed-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";
const LOG_FILE_NAME: &str = "cursed-snake.log";

/// Failures while reading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings: {0}")]
    Io(#[from] io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User-tunable options, read from `settings.json` and overridden by CLI flags.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    /// Grid width; the terminal width when unset.
    pub width: Option<u16>,
    /// Grid height; the terminal height when unset.
    pub height: Option<u16>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            width: None,
            height: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Loads settings from the platform config directory.
    ///
    /// Returns defaults when the file does not exist yet.
    pub fn load() -> Result<Self, SettingsError> {
        match settings_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    /// Frame interval, never shorter than [`MIN_TICK_INTERVAL_MS`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }

    /// Log destination, defaulting to a file in the temp directory.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}
