//! Hand landmark model.
//!
//! A detector reports 21 keypoints per hand with x/y normalized to the camera
//! frame and a relative depth. [`LandmarkSet`] only exists in validated form,
//! so downstream math never has to re-check counts or ranges.

use crate::{
    constants::{FINGERTIP_INDICES, NUM_HAND_LANDMARKS, PALM_BASE_INDEX},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// A single detected hand keypoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalized to [0, 1]
    pub x: f32,
    /// Vertical position, normalized to [0, 1]
    pub y: f32,
    /// Depth relative to the palm base
    pub z: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other` in the image plane (z ignored)
    #[must_use]
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Validated set of exactly 21 hand landmarks
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; NUM_HAND_LANDMARKS],
}

impl LandmarkSet {
    /// Validate raw detector output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Landmark`] if the count is not 21, if x/y fall outside
    /// [0, 1], or if any coordinate is not finite.
    pub fn new(points: &[Landmark]) -> Result<Self> {
        let points: [Landmark; NUM_HAND_LANDMARKS] = points.try_into().map_err(|_| {
            Error::Landmark(format!(
                "Expected {NUM_HAND_LANDMARKS} landmarks, got {}",
                points.len()
            ))
        })?;

        for (index, point) in points.iter().enumerate() {
            if !(point.x.is_finite() && point.y.is_finite() && point.z.is_finite()) {
                return Err(Error::Landmark(format!(
                    "Landmark {index} has non-finite coordinates: {point:?}"
                )));
            }
            if !(0.0..=1.0).contains(&point.x) || !(0.0..=1.0).contains(&point.y) {
                return Err(Error::Landmark(format!(
                    "Landmark {index} outside normalized frame: ({}, {})",
                    point.x, point.y
                )));
            }
        }

        Ok(Self { points })
    }

    /// Reference point for distance and position
    #[must_use]
    pub fn palm_base(&self) -> Landmark {
        self.points[PALM_BASE_INDEX]
    }

    /// Thumb, index, middle, ring and pinky tips, in that order
    pub fn fingertips(&self) -> impl Iterator<Item = Landmark> + '_ {
        FINGERTIP_INDICES.iter().map(|&i| self.points[i])
    }

    /// Mean planar distance from the palm base to the five fingertips
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Five fingertips
    pub fn average_fingertip_distance(&self) -> f32 {
        let palm = self.palm_base();
        let total: f32 = self.fingertips().map(|tip| tip.planar_distance(&palm)).sum();
        total / FINGERTIP_INDICES.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand(x: f32, y: f32) -> Vec<Landmark> {
        vec![Landmark::new(x, y, 0.0); NUM_HAND_LANDMARKS]
    }

    #[test]
    fn test_rejects_wrong_count() {
        let err = LandmarkSet::new(&flat_hand(0.5, 0.5)[..20]).unwrap_err();
        assert!(err.to_string().contains("Expected 21 landmarks, got 20"));
        assert!(LandmarkSet::new(&[]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut points = flat_hand(0.5, 0.5);
        points[8].x = 1.2;
        assert!(LandmarkSet::new(&points).is_err());

        let mut points = flat_hand(0.5, 0.5);
        points[3].y = -0.01;
        assert!(LandmarkSet::new(&points).is_err());

        let mut points = flat_hand(0.5, 0.5);
        points[0].z = f32::NAN;
        assert!(LandmarkSet::new(&points).is_err());
    }

    #[test]
    fn test_average_fingertip_distance() {
        let mut points = flat_hand(0.5, 0.5);
        for &tip in &FINGERTIP_INDICES {
            points[tip] = Landmark::new(0.5, 0.2, 0.0);
        }
        let set = LandmarkSet::new(&points).unwrap();
        assert!((set.average_fingertip_distance() - 0.3).abs() < 1e-6);
        assert_eq!(set.palm_base(), Landmark::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_depth_ignored_in_distance() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 5.0);
        assert!((a.planar_distance(&b) - 0.5).abs() < 1e-6);
    }
}
