//! Hand-gesture driven particle morphing.
//!
//! This library turns noisy per-frame hand landmark detections into a stable
//! control signal and uses it to morph a fixed-size particle cloud between
//! template shapes:
//! - Gesture signal processing: hand openness and palm position, smoothed
//!   with an exponential filter and frozen while the hand is lost
//! - Template point generation: a deterministic spherical spiral and a
//!   randomly sampled five-petal flower
//! - Particle morph animation: per-frame easing toward the scaled template,
//!   fast with scatter while the hand opens, slow and clean while it closes
//!
//! Camera capture, the landmark model and the GPU renderer stay outside the
//! crate behind the [`source::LandmarkSource`] and [`render::RenderSink`]
//! traits.
//!
//! # Examples
//!
//! ## Gesture Signal
//!
//! ```
//! use hand_particle_morph::{config::GestureSettings, gesture::GestureProcessor, landmarks::Landmark};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut processor = GestureProcessor::new(&GestureSettings::default())?;
//!
//! // 21 landmarks from the detector, palm base first
//! let mut hand = vec![Landmark::new(0.5, 0.5, 0.0); 21];
//! for tip in [4, 8, 12, 16, 20] {
//!     hand[tip] = Landmark::new(0.5, 0.1, 0.0);
//! }
//!
//! let signal = processor.update(Some(hand.as_slice()));
//! println!("Expansion: {:.2}, position: ({:.2}, {:.2})",
//!          signal.expansion, signal.position.x, signal.position.y);
//!
//! // No hand: the signal holds its last value
//! assert_eq!(processor.update(None), signal);
//! assert!(!processor.is_tracking());
//! # Ok(())
//! # }
//! ```
//!
//! ## Morph Animation
//!
//! ```
//! use hand_particle_morph::{
//!     animator::ParticleAnimator, config::AnimationSettings, control::ParticleConfig,
//!     templates::Template,
//! };
//!
//! let mut animator = ParticleAnimator::new(Template::Sphere, 1000, AnimationSettings::default());
//! let mut config = ParticleConfig::default();
//!
//! config.expansion = 0.6;
//! config.template = Template::Flower;
//! for _ in 0..60 {
//!     animator.tick(&config);
//! }
//!
//! let frame = animator.frame(&config, true, 60);
//! println!("{} points, size {:.3}", frame.point_count(), frame.point_size);
//! ```
//!
//! ## Complete Pipeline Example
//!
//! ```no_run
//! use hand_particle_morph::{
//!     config::Config, render::LogSink, session::Session, source::SyntheticHand,
//!     templates::Template,
//! };
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::default();
//! config.session.max_frames = Some(600);
//!
//! let source = SyntheticHand::new(120, Duration::from_millis(33));
//! let mut session = Session::start(&config, source, LogSink::new(60))?;
//!
//! // UI side: switch template while running
//! session.controls().set_template(Template::Flower)?;
//!
//! session.run()?;
//! let stats = session.stop();
//! println!("Detector delivered {} frames", stats.frames);
//! # Ok(())
//! # }
//! ```

/// Hand landmark model and validation
pub mod landmarks;

/// Signal filtering algorithms for smoothing gesture measurements
pub mod filters;

/// Gesture signal processing (expansion and position)
pub mod gesture;

/// Template point generators
pub mod templates;

/// Particle morph animator
pub mod animator;

/// Particle configuration snapshots and control messages
pub mod control;

/// Particle tint parsing
pub mod color;

/// Render adapter seam
pub mod render;

/// Landmark sources (replay, synthetic)
pub mod source;

/// Running pipeline wiring detector, animator and renderer
pub mod session;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
