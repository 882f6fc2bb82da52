//! Constants used throughout the library

use std::time::Duration;

/// Number of hand landmarks per detection
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Landmark index of the palm base (wrist)
pub const PALM_BASE_INDEX: usize = 0;

/// Landmark indices of the thumb, index, middle, ring and pinky tips
pub const FINGERTIP_INDICES: [usize; 5] = [4, 8, 12, 16, 20];

/// Default number of particles in the cloud
pub const DEFAULT_POINT_COUNT: usize = 5000;

/// Default smoothing factor for expansion and position
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.2;

/// Average fingertip distance that maps to expansion 0
pub const EXPANSION_DISTANCE_OFFSET: f32 = 0.1;

/// Distance span mapped onto expansion [0, 1]
pub const EXPANSION_DISTANCE_RANGE: f32 = 0.3;

/// Scale from normalized palm offset to world X (mirrored)
pub const POSITION_SCALE_X: f32 = 12.0;

/// Scale from normalized palm offset to world Y
pub const POSITION_SCALE_Y: f32 = 8.0;

/// Sphere template radius
pub const SPHERE_RADIUS: f64 = 2.0;

/// Number of petals of the flower template
pub const FLOWER_PETALS: f64 = 5.0;

/// Flower template petal radius
pub const FLOWER_RADIUS: f64 = 2.5;

/// Flower template depth flattening
pub const FLOWER_DEPTH_SCALE: f64 = 0.3;

/// Lerp factor while the hand is opening
pub const EXPANDING_LERP: f32 = 0.25;

/// Lerp factor while the hand is closing or holding still
pub const SETTLING_LERP: f32 = 0.08;

/// Scatter amount per unit of expansion while opening
pub const SCATTER_SCALE: f32 = 0.8;

/// Cloud scale gained per unit of expansion
pub const EXPANSION_SCALE: f32 = 6.0;

/// Point size at expansion 0
pub const POINT_SIZE_BASE: f32 = 0.04;

/// Point size gained per unit of expansion
pub const POINT_SIZE_SCALE: f32 = 0.08;

/// Default particle tint
pub const DEFAULT_COLOR: &str = "#00ffcc";

/// Default tick rate of the animation loop
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Exponential filter bounds
pub const EXPONENTIAL_ALPHA_MIN: f32 = 0.0;
pub const EXPONENTIAL_ALPHA_MAX: f32 = 1.0;

/// Consecutive source faults after which the detector thread stops
pub const MAX_CONSECUTIVE_DETECTOR_FAULTS: u32 = 50;

/// Pause after a source fault before asking for the next frame
pub const DETECTOR_FAULT_BACKOFF: Duration = Duration::from_millis(5);

/// Length of the UI test pulse
pub const TEST_PULSE_DURATION: Duration = Duration::from_millis(800);
