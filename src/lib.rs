//! Sugar Rescue - rescue-bucket mechanics for a falling-sugar puzzle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rescue container, walls, blast, host tick)
//! - `hud`: Status board model (labels and gravity arrow for a renderer)
//! - `audio`: Event-to-channel sound playback
//! - `settings`: Data-driven tuning and preferences

pub mod audio;
pub mod error;
pub mod hud;
pub mod settings;
pub mod sim;

pub use error::{RescueError, SettingsError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display width in pixels
    pub const SCREEN_WIDTH: f32 = 1024.0;
    /// Display height in pixels
    pub const SCREEN_HEIGHT: f32 = 800.0;
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Pixels per simulation unit
    pub const SCALE: f32 = 30.0;

    /// Rescue container walls (simulation units)
    pub const WALL_THICKNESS: f32 = 0.2;
    pub const WALL_FRICTION: f32 = 0.5;
    pub const WALL_ELASTICITY: f32 = 0.5;

    /// Blast radius around the container center (simulation units)
    pub const BLAST_RADIUS: f32 = 2.0;
    /// Numerator of the blast decay law `strength / (distance + softening)`
    pub const BLAST_STRENGTH: f32 = 20.0;
    pub const BLAST_SOFTENING: f32 = 0.1;

    /// Seconds before a summoned rescue container self-destructs
    pub const RESCUE_LIFETIME_SECS: f32 = 30.0;

    /// Sugar grain body (simulation units)
    pub const GRAIN_RADIUS: f32 = 0.08;
    pub const GRAIN_FRICTION: f32 = 0.5;
    pub const GRAIN_ELASTICITY: f32 = 0.2;
    /// Grain mass, so a blast impulse of `BLAST_STRENGTH` gives ~20 units/s
    pub const GRAIN_MASS: f32 = 1.0;

    /// Default gravity (simulation units/s², Y up)
    pub const GRAVITY: (f32, f32) = (0.0, -9.8);
}

/// Convert a length in display pixels to simulation units
#[inline]
pub fn pixels_to_units(px: f32) -> f32 {
    px / consts::SCALE
}

/// Convert a display-space point (Y down) to physics space (Y up)
#[inline]
pub fn display_to_physics(p: Vec2) -> Vec2 {
    Vec2::new(p.x / consts::SCALE, (consts::SCREEN_HEIGHT - p.y) / consts::SCALE)
}

/// Convert a physics-space point (Y up) to display space (Y down)
#[inline]
pub fn physics_to_display(p: Vec2) -> Vec2 {
    Vec2::new(p.x * consts::SCALE, consts::SCREEN_HEIGHT - p.y * consts::SCALE)
}

/// Convert a display-space delta to a physics-space delta (no origin shift)
#[inline]
pub fn delta_to_physics(d: Vec2) -> Vec2 {
    Vec2::new(d.x / consts::SCALE, -d.y / consts::SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_physics_roundtrip() {
        let p = Vec2::new(100.0, 100.0);
        let phys = display_to_physics(p);
        assert!((phys.x - 100.0 / 30.0).abs() < 1e-5);
        assert!((phys.y - 700.0 / 30.0).abs() < 1e-5);
        assert!((physics_to_display(phys) - p).length() < 1e-3);
    }

    #[test]
    fn test_delta_flips_vertical_axis() {
        let d = delta_to_physics(Vec2::new(30.0, 60.0));
        assert!((d.x - 1.0).abs() < 1e-6);
        assert!((d.y + 2.0).abs() < 1e-6);
    }
}
