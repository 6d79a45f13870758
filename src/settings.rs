//! Game settings and preferences
//!
//! Read from an optional JSON file. Missing fields take their defaults and an
//! unreadable file falls back to `Settings::default()`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::StageLayout;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Cap on catch-up ticks per frame
    pub max_substeps: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// Background music file; no music when unset
    pub music_path: Option<PathBuf>,

    // === Stage ===
    /// External layout file; the built-in stage when unset
    pub layout_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            tick_rate: TICK_RATE,
            max_substeps: MAX_SUBSTEPS,

            master_volume: 1.0,
            music_volume: 0.25,
            muted: false,
            music_path: None,

            layout_path: None,
        }
    }
}

impl Settings {
    pub fn screen(&self) -> IVec2 {
        IVec2::new(self.screen_width, self.screen_height)
    }

    /// Wall-clock length of one simulation tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate.max(1)))
    }

    /// Music level after the master volume; mute is applied by the mixer
    pub fn music_level(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log::warn!("{e} - using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// The configured stage layout, or the built-in one if the file is
    /// missing, malformed or doesn't fit the screen
    pub fn stage_layout(&self) -> StageLayout {
        let Some(path) = &self.layout_path else {
            return StageLayout::classic();
        };

        let loaded = StageLayout::load(path).and_then(|layout| {
            layout.validate(self.screen_width)?;
            Ok(layout)
        });
        match loaded {
            Ok(layout) => {
                log::info!("Loaded stage layout from {:?}", path);
                layout
            }
            Err(e) => {
                log::warn!("Stage layout {:?} rejected: {e} - using built-in stage", path);
                StageLayout::classic()
            }
        }
    }
}
