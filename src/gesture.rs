//! Gesture signal processing.
//!
//! Turns each landmark detection into a bounded, smoothed control signal: an
//! "expansion" scalar describing how open the hand is, and a 2D position
//! derived from the palm base. The smoothing memory lives in the processor, so
//! a lost hand simply leaves the last signal in place.

use crate::{
    config::GestureSettings,
    filters::{create_filter, SignalFilter},
    landmarks::{Landmark, LandmarkSet},
    Result,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Object translation in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Smoothed control signal fed to the animator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureSignal {
    /// How open the hand is, in [0, 1]
    pub expansion: f32,
    /// Smoothed hand position
    pub position: Position,
}

/// Map an average fingertip distance onto [0, 1].
#[must_use]
pub fn normalize_expansion(avg_distance: f32, offset: f32, range: f32) -> f32 {
    ((avg_distance - offset) / range).clamp(0.0, 1.0)
}

/// Raw position target for a palm base, mirrored on X for a selfie camera.
#[must_use]
pub fn target_position(palm_base: Landmark, scale_x: f32, scale_y: f32) -> Position {
    Position {
        x: (0.5 - palm_base.x) * scale_x,
        y: (0.5 - palm_base.y) * scale_y,
    }
}

/// Stateful processor owning the smoothing memory of the gesture signal
pub struct GestureProcessor {
    settings: GestureSettings,
    expansion: Box<dyn SignalFilter>,
    position_x: Box<dyn SignalFilter>,
    position_y: Box<dyn SignalFilter>,
    tracking: bool,
    dropped_frames: u64,
}

impl GestureProcessor {
    /// Create a processor with zeroed signal state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured filter or normalization is invalid.
    pub fn new(settings: &GestureSettings) -> Result<Self> {
        settings.validate()?;
        let make = || create_filter(&settings.filter, settings.smoothing_alpha);
        Ok(Self {
            settings: settings.clone(),
            expansion: make()?,
            position_x: make()?,
            position_y: make()?,
            tracking: false,
            dropped_frames: 0,
        })
    }

    /// Feed one detector result; `None` means no hand is visible.
    ///
    /// Invalid landmark sets are dropped and leave both the signal and the
    /// tracking flag untouched.
    pub fn update(&mut self, landmarks: Option<&[Landmark]>) -> GestureSignal {
        let Some(points) = landmarks else {
            if self.tracking {
                debug!("Hand lost, holding last gesture signal");
            }
            self.tracking = false;
            return self.signal();
        };

        match LandmarkSet::new(points) {
            Ok(hand) => self.apply(&hand),
            Err(e) => {
                self.dropped_frames += 1;
                debug!("Dropping landmark frame: {e}");
            }
        }

        self.signal()
    }

    fn apply(&mut self, hand: &LandmarkSet) {
        let normalized = normalize_expansion(
            hand.average_fingertip_distance(),
            self.settings.distance_offset,
            self.settings.distance_range,
        );
        self.expansion.apply(normalized);

        let target = target_position(
            hand.palm_base(),
            self.settings.position_scale_x,
            self.settings.position_scale_y,
        );
        self.position_x.apply(target.x);
        self.position_y.apply(target.y);

        if !self.tracking {
            debug!("Hand acquired");
        }
        self.tracking = true;
    }

    /// Current smoothed signal
    #[must_use]
    pub fn signal(&self) -> GestureSignal {
        GestureSignal {
            expansion: self.expansion.value(),
            position: Position::new(self.position_x.value(), self.position_y.value()),
        }
    }

    /// Whether the last detector result contained a hand
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Number of malformed frames dropped since creation or last reset
    #[must_use]
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    /// Return to the startup state
    pub fn reset(&mut self) {
        self.expansion.reset();
        self.position_x.reset();
        self.position_y.reset();
        self.tracking = false;
        self.dropped_frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EXPANSION_DISTANCE_OFFSET, EXPANSION_DISTANCE_RANGE};

    fn normalize(d: f32) -> f32 {
        normalize_expansion(d, EXPANSION_DISTANCE_OFFSET, EXPANSION_DISTANCE_RANGE)
    }

    #[test]
    fn test_normalize_expansion() {
        assert_eq!(normalize(0.1), 0.0);
        assert!((normalize(0.4) - 1.0).abs() < 1e-6);
        assert!((normalize(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(2.0), 1.0);
    }

    #[test]
    fn test_centered_palm_targets_origin() {
        let target = target_position(Landmark::new(0.5, 0.5, 0.0), 12.0, 8.0);
        assert_eq!(target, Position::new(0.0, 0.0));
    }

    #[test]
    fn test_target_is_mirrored() {
        let target = target_position(Landmark::new(0.0, 1.0, 0.0), 12.0, 8.0);
        assert_eq!(target, Position::new(6.0, -4.0));
    }

    #[test]
    fn test_no_hand_before_any_detection() {
        let mut processor = GestureProcessor::new(&GestureSettings::default()).unwrap();
        let signal = processor.update(None);
        assert_eq!(signal, GestureSignal::default());
        assert!(!processor.is_tracking());
    }
}
