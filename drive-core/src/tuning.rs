use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;
use thiserror::Error;

/// All the constants that vary between car setups, in one place.
///
/// Speeds are km/h, angles radians, distances scene units (1 unit = 1 cm
/// with the default `unit_scale`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct VehicleTuning {
    /// Speed gained per tick while the forward key is held.
    #[serde(default = "default_accel_delta")]
    pub accel_delta: f32,
    /// Speed shed per tick while the backward key is held.
    #[serde(default = "default_brake_delta")]
    pub brake_delta: f32,
    /// Speed decay per tick while coasting, toward zero from either side.
    #[serde(default = "default_roll_down_delta")]
    pub roll_down_delta: f32,
    /// Coasting speeds at or below this magnitude snap to exactly zero.
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f32,
    /// Steering angle change per tick while a turn key is held.
    #[serde(default = "default_steer_step")]
    pub steer_step: f32,
    /// Hard ceiling on the steering angle magnitude.
    #[serde(default = "default_max_steer")]
    pub max_steer: f32,
    /// Steer back toward zero at `steer_step` when no turn key is held.
    #[serde(default)]
    pub self_center: bool,
    /// Scene units per metre.
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f32,
    /// Advertised top speed. Not enforced during integration.
    #[serde(default = "default_max_speed_kph")]
    pub max_speed_kph: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            accel_delta: default_accel_delta(),
            brake_delta: default_brake_delta(),
            roll_down_delta: default_roll_down_delta(),
            snap_threshold: default_snap_threshold(),
            steer_step: default_steer_step(),
            max_steer: default_max_steer(),
            self_center: false,
            unit_scale: default_unit_scale(),
            max_speed_kph: default_max_speed_kph(),
        }
    }
}

fn default_accel_delta() -> f32 {
    0.5
}

fn default_brake_delta() -> f32 {
    0.5
}

fn default_roll_down_delta() -> f32 {
    0.1
}

fn default_snap_threshold() -> f32 {
    0.1
}

fn default_steer_step() -> f32 {
    0.001
}

fn default_max_steer() -> f32 {
    PI / 6.0
}

fn default_unit_scale() -> f32 {
    100.0
}

fn default_max_speed_kph() -> f32 {
    180.0
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize tuning: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl VehicleTuning {
    /// Load a tuning file from TOML. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| TuningError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Save this tuning to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), TuningError> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::VehicleTuning;
    use std::f32::consts::PI;

    #[test]
    fn empty_toml_yields_defaults() {
        let tuning: VehicleTuning = toml::from_str("").expect("empty tuning should parse");
        assert_eq!(tuning.accel_delta, 0.5);
        assert_eq!(tuning.brake_delta, 0.5);
        assert_eq!(tuning.roll_down_delta, 0.1);
        assert_eq!(tuning.max_steer, PI / 6.0);
        assert_eq!(tuning.unit_scale, 100.0);
        assert_eq!(tuning.max_speed_kph, 180.0);
        assert!(!tuning.self_center);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let tuning: VehicleTuning =
            toml::from_str("steer_step = 0.03\nself_center = true").expect("tuning should parse");
        assert_eq!(tuning.steer_step, 0.03);
        assert!(tuning.self_center);
        assert_eq!(tuning.accel_delta, 0.5);
    }

    #[test]
    fn round_trips_through_toml() {
        let tuning = VehicleTuning {
            accel_delta: 0.7,
            ..VehicleTuning::default()
        };
        let text = toml::to_string_pretty(&tuning).expect("tuning should serialize");
        let back: VehicleTuning = toml::from_str(&text).expect("tuning should parse back");
        assert_eq!(back.accel_delta, 0.7);
        assert_eq!(back.max_steer, tuning.max_steer);
    }
}
