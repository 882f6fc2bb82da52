//! Configuration management for the particle morph pipeline

use crate::{
    color::Rgb,
    constants::{
        DEFAULT_POINT_COUNT, DEFAULT_SMOOTHING_ALPHA, DEFAULT_TARGET_FPS, EXPANDING_LERP,
        EXPANSION_DISTANCE_OFFSET, EXPANSION_DISTANCE_RANGE, EXPANSION_SCALE, POINT_SIZE_BASE,
        POINT_SIZE_SCALE, POSITION_SCALE_X, POSITION_SCALE_Y, SCATTER_SCALE, SETTLING_LERP,
    },
    filters::create_filter,
    templates::Template,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Particle cloud configuration
    pub particles: ParticleSettings,

    /// Gesture signal configuration
    pub gesture: GestureSettings,

    /// Morph animation configuration
    pub animation: AnimationSettings,

    /// Tick loop configuration
    pub session: SessionSettings,
}

/// Particle cloud appearance and size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Number of particles, fixed for the lifetime of a session
    pub point_count: usize,

    /// Initial template
    pub template: Template,

    /// Initial tint
    pub color: Rgb,
}

/// Gesture signal processing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Smoothing filter (`exponential`, `exponential:<alpha>` or `none`)
    pub filter: String,

    /// Alpha used when the filter name carries no parameter
    pub smoothing_alpha: f32,

    /// Average fingertip distance that maps to expansion 0
    pub distance_offset: f32,

    /// Distance span mapped onto expansion [0, 1]
    pub distance_range: f32,

    /// World units per normalized palm offset on X
    pub position_scale_x: f32,

    /// World units per normalized palm offset on Y
    pub position_scale_y: f32,
}

/// Morph animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Lerp factor while expansion increases
    pub expanding_lerp: f32,

    /// Lerp factor while expansion holds or decreases
    pub settling_lerp: f32,

    /// Jitter amplitude per unit of expansion while expanding
    pub scatter_scale: f32,

    /// Cloud scale gained per unit of expansion
    pub expansion_scale: f32,

    /// Point size at expansion 0
    pub point_size_base: f32,

    /// Point size gained per unit of expansion
    pub point_size_scale: f32,
}

/// Tick loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Target ticks per second
    pub target_fps: u32,

    /// Stop after this many ticks (run until stopped when absent)
    pub max_frames: Option<u64>,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            template: Template::Sphere,
            color: Rgb::default(),
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            filter: "exponential".to_string(),
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            distance_offset: EXPANSION_DISTANCE_OFFSET,
            distance_range: EXPANSION_DISTANCE_RANGE,
            position_scale_x: POSITION_SCALE_X,
            position_scale_y: POSITION_SCALE_Y,
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            expanding_lerp: EXPANDING_LERP,
            settling_lerp: SETTLING_LERP,
            scatter_scale: SCATTER_SCALE,
            expansion_scale: EXPANSION_SCALE,
            point_size_base: POINT_SIZE_BASE,
            point_size_scale: POINT_SIZE_SCALE,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            max_frames: None,
        }
    }
}

impl GestureSettings {
    /// Validate gesture parameters
    pub fn validate(&self) -> Result<()> {
        create_filter(&self.filter, self.smoothing_alpha)
            .map_err(|e| Error::ConfigError(format!("Invalid gesture filter: {e}")))?;

        if !(self.distance_range.is_finite() && self.distance_range > 0.0) {
            return Err(Error::ConfigError(
                "Distance range must be greater than 0".to_string(),
            ));
        }
        if !self.distance_offset.is_finite()
            || !self.position_scale_x.is_finite()
            || !self.position_scale_y.is_finite()
        {
            return Err(Error::ConfigError(
                "Gesture offsets and scales must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

impl AnimationSettings {
    /// Validate animation parameters
    pub fn validate(&self) -> Result<()> {
        for (name, lerp) in [
            ("Expanding lerp", self.expanding_lerp),
            ("Settling lerp", self.settling_lerp),
        ] {
            if !(lerp > 0.0 && lerp <= 1.0) {
                return Err(Error::ConfigError(format!(
                    "{name} must be in (0, 1], got {lerp}"
                )));
            }
        }

        for (name, value) in [
            ("Scatter scale", self.scatter_scale),
            ("Expansion scale", self.expansion_scale),
            ("Point size base", self.point_size_base),
            ("Point size scale", self.point_size_scale),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::ConfigError(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.particles.point_count == 0 {
            return Err(Error::ConfigError(
                "Point count must be greater than 0".to_string(),
            ));
        }

        self.gesture.validate()?;
        self.animation.validate()?;

        if self.session.target_fps == 0 {
            return Err(Error::ConfigError("Target FPS must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r##"# Hand Particle Morph Configuration

# Particle cloud
particles:
  point_count: 5000
  template: "sphere"
  color: "#00ffcc"

# Gesture signal smoothing
gesture:
  filter: "exponential"
  smoothing_alpha: 0.2
  distance_offset: 0.1
  distance_range: 0.3
  position_scale_x: 12.0
  position_scale_y: 8.0

# Morph animation
animation:
  expanding_lerp: 0.25
  settling_lerp: 0.08
  scatter_scale: 0.8
  expansion_scale: 6.0
  point_size_base: 0.04
  point_size_scale: 0.08

# Tick loop
session:
  target_fps: 60
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.particles.point_count, DEFAULT_POINT_COUNT);
        assert_eq!(parsed.particles.color, Rgb::default());
        assert_eq!(parsed.animation, AnimationSettings::default());
        assert_eq!(parsed.session.max_frames, None);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = serde_yaml::from_str("particles:\n  template: flower\n").unwrap();
        assert_eq!(parsed.particles.template, Template::Flower);
        assert_eq!(parsed.particles.point_count, DEFAULT_POINT_COUNT);
        assert_eq!(parsed.gesture.filter, "exponential");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.particles.point_count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.animation.settling_lerp = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gesture.distance_range = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gesture.filter = "kalman".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.target_fps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_color_fails_to_parse() {
        let result: std::result::Result<Config, _> =
            serde_yaml::from_str("particles:\n  color: \"#zzzzzz\"\n");
        assert!(result.is_err());
    }
}
