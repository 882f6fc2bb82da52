//! Signal filtering algorithms for smoothing gesture measurements.
//!
//! Hand landmark detections jitter from frame to frame; each channel of the
//! gesture signal (expansion, position x, position y) runs through its own
//! filter so the particle cloud reacts smoothly.

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::constants::{EXPONENTIAL_ALPHA_MAX, EXPONENTIAL_ALPHA_MIN};
use crate::{Error, Result};

/// Trait for all single-channel signal filters
pub trait SignalFilter: Send + Sync {
    /// Feed one sample and return the filtered value
    fn apply(&mut self, sample: f32) -> f32;

    /// Last filtered value, without feeding a new sample
    fn value(&self) -> f32;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
#[derive(Debug, Default)]
pub struct NoFilter {
    last: f32,
}

impl SignalFilter for NoFilter {
    fn apply(&mut self, sample: f32) -> f32 {
        self.last = sample;
        sample
    }

    fn value(&self) -> f32 {
        self.last
    }

    fn reset(&mut self) {
        self.last = 0.0;
    }

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a signal filter from a type name with optional parameter.
///
/// Accepted forms: `none`, `exponential` (default alpha) and
/// `exponential:<alpha>`.
///
/// # Errors
///
/// Returns [`Error::FilterError`] for unknown names or out-of-range parameters.
pub fn create_filter(filter_type: &str, default_alpha: f32) -> Result<Box<dyn SignalFilter>> {
    let lowered = filter_type.trim().to_lowercase();
    let mut parts = lowered.splitn(2, ':');
    let name = parts.next().unwrap_or_default();
    let param = parts.next();

    match name {
        "none" | "nofilter" => {
            if param.is_some() {
                return Err(Error::FilterError(format!("Filter '{name}' takes no parameters")));
            }
            Ok(Box::new(NoFilter::default()))
        }
        "exponential" | "ema" => {
            let alpha = match param {
                Some(raw) => raw
                    .parse::<f32>()
                    .map_err(|e| Error::FilterError(format!("Invalid alpha '{raw}': {e}")))?,
                None => default_alpha,
            };
            if !(alpha > EXPONENTIAL_ALPHA_MIN && alpha <= EXPONENTIAL_ALPHA_MAX) {
                return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {filter_type}"))),
    }
}
