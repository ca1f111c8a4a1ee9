//! Game settings
//!
//! Gameplay constants, loadable from JSON. Missing fields fall back to the
//! defaults in [`crate::consts`]. Read from LocalStorage on the web, or
//! from the file named by `ORBIT_SHOOTER_SETTINGS` natively.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::FixedClock;
use crate::consts::*;
use crate::error::SetupError;
use crate::sim::Tuning;

/// Environment variable naming a JSON settings file (native only)
pub const SETTINGS_ENV_VAR: &str = "ORBIT_SHOOTER_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Simulation ticks per second
    pub frame_rate: u32,
    /// Wall-clock period between enemy spawns (ms)
    pub spawn_interval_ms: f64,
    /// Catch-up cap for slow frames
    pub max_substeps: u32,

    // === Entities (per-tick speeds, pixel radii) ===
    pub player_radius: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub enemy_speed: f32,
    pub enemy_radius: f32,

    // === Headless runs ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,

            player_radius: PLAYER_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            enemy_speed: ENEMY_SPEED,
            enemy_radius: ENEMY_RADIUS,

            arena_width: HEADLESS_ARENA_WIDTH,
            arena_height: HEADLESS_ARENA_HEIGHT,
            seed: None,
        }
    }
}

impl Settings {
    /// Entity speeds and sizes for the simulation
    pub fn tuning(&self) -> Tuning {
        Tuning {
            player_radius: self.player_radius,
            bullet_speed: self.bullet_speed,
            bullet_radius: self.bullet_radius,
            enemy_speed: self.enemy_speed,
            enemy_radius: self.enemy_radius,
        }
    }

    /// Tick/spawn scheduler for these settings
    pub fn clock(&self) -> FixedClock {
        FixedClock::new(self.frame_rate, self.spawn_interval_ms, self.max_substeps)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if !(1..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(SetupError::setting(
                "frame_rate",
                format!("must be between 1 and {MAX_FRAME_RATE}, got {}", self.frame_rate),
            ));
        }
        if self.max_substeps == 0 {
            return Err(SetupError::setting("max_substeps", "must be at least 1"));
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Err(SetupError::setting(
                "spawn_interval_ms",
                format!("must be finite and positive, got {}", self.spawn_interval_ms),
            ));
        }
        let tick_ms = 1000.0 / self.frame_rate as f64;
        if self.spawn_interval_ms < tick_ms {
            return Err(SetupError::setting(
                "spawn_interval_ms",
                format!(
                    "must be at least one tick ({tick_ms:.3} ms), got {}",
                    self.spawn_interval_ms
                ),
            ));
        }
        self.tuning().validate()
    }

    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SetupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "orbit_shooter_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `ORBIT_SHOOTER_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Ignoring settings file {}: {}",
                    Path::new(&path).display(),
                    e
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.spawn_interval_ms, 2000.0);
        assert_eq!(settings.tuning(), Tuning::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "enemy_speed": 2.5, "seed": 7 }"#).unwrap();
        assert_eq!(settings.enemy_speed, 2.5);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.bullet_speed, BULLET_SPEED);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            frame_rate: 30,
            seed: Some(1234),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "frame_rate": 0 }"#),
            Err(SetupError::InvalidSettings {
                name: "frame_rate",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "bullet_radius": -1.0 }"#),
            Err(SetupError::InvalidSettings {
                name: "bullet_radius",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "frame_rate": 100000 }"#),
            Err(SetupError::InvalidSettings {
                name: "frame_rate",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "spawn_interval_ms": 0.0001 }"#),
            Err(SetupError::InvalidSettings {
                name: "spawn_interval_ms",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SetupError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from_path("/nonexistent/orbit-shooter.json").unwrap_err();
        assert!(matches!(err, SetupError::Io(_)));
    }
}
