//! Game settings and preferences
//!
//! Persisted as pretty JSON next to the executable.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::RESCUE_LIFETIME_SECS;
use crate::error::SettingsError;
use crate::sim::RescueConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Draw the gravity direction arrow
    pub show_gravity_arrow: bool,
    /// Text color (RGB)
    pub hud_color: [u8; 3],

    // === Rescue container ===
    /// Spawn point in display pixels
    pub rescue_spawn: [f32; 2],
    pub rescue_width: f32,
    pub rescue_height: f32,
    pub rescue_needed_sugar: u32,
    /// Seconds before the container self-destructs
    pub rescue_lifetime_secs: f32,
    /// Pixels moved per nudge
    pub rescue_nudge_px: f32,
    /// Whether the container may be nudged back up
    pub rescue_allow_upward: bool,

    // === Sugar flow ===
    /// Spawn point in display pixels
    pub flow_origin: [f32; 2],
    /// Grains per second
    pub flow_rate: f32,
    /// Total grains released per level
    pub flow_total: u32,
    /// Horizontal jitter in display pixels
    pub flow_spread: f32,
    pub flow_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.8,
            muted: false,

            // HUD
            show_gravity_arrow: true,
            hud_color: [255, 255, 255],

            // Rescue container
            rescue_spawn: [512.0, 200.0],
            rescue_width: 100.0,
            rescue_height: 100.0,
            rescue_needed_sugar: 30,
            rescue_lifetime_secs: RESCUE_LIFETIME_SECS,
            rescue_nudge_px: 5.0,
            rescue_allow_upward: false,

            // Sugar flow
            flow_origin: [512.0, 40.0],
            flow_rate: 20.0,
            flow_total: 200,
            flow_spread: 6.0,
            flow_seed: 5,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.sanitize();
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults if the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_path(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}): {}",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Clamp volumes into range
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    /// Rescue container placement from these settings
    pub fn rescue_config(&self) -> RescueConfig {
        RescueConfig::new(
            Vec2::from(self.rescue_spawn),
            self.rescue_width,
            self.rescue_height,
            self.rescue_needed_sugar,
        )
    }
}
