//! Particle configuration snapshots and the channel that carries them.
//!
//! The UI and the detector thread never touch the tick loop's state directly.
//! They send [`ControlMessage`]s; the tick loop drains them at the start of
//! every frame and folds them into its own [`ParticleConfig`] copy, so each
//! tick sees a consistent snapshot and the last writer wins.

use crate::{
    color::Rgb,
    config::ParticleSettings,
    gesture::{GestureSignal, Position},
    templates::Template,
    Error, Result,
};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::time::Duration;

/// Everything the animator reads once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub color: Rgb,
    pub template: Template,
    /// Hand openness in [0, 1]
    pub expansion: f32,
    pub position: Position,
}

impl ParticleConfig {
    #[must_use]
    pub fn new(template: Template, color: Rgb) -> Self {
        Self {
            color,
            template,
            expansion: 0.0,
            position: Position::default(),
        }
    }

    /// Overwrite the gesture-driven fields, keeping appearance
    pub fn apply_signal(&mut self, signal: GestureSignal) {
        self.expansion = signal.expansion;
        self.position = signal.position;
    }

    #[must_use]
    pub fn signal(&self) -> GestureSignal {
        GestureSignal {
            expansion: self.expansion,
            position: self.position,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::new(Template::default(), Rgb::default())
    }
}

impl From<&ParticleSettings> for ParticleConfig {
    fn from(settings: &ParticleSettings) -> Self {
        Self::new(settings.template, settings.color)
    }
}

/// Whole-value updates sent to the tick loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMessage {
    /// New gesture signal from the detector thread
    Signal { signal: GestureSignal, tracking: bool },
    /// Template chosen in the UI
    Template(Template),
    /// Tint chosen in the UI
    Color(Rgb),
    /// Manual expansion override, clamped to [0, 1] when applied
    Expansion(f32),
    /// Full expansion that the session resets to 0 once the duration passes
    Pulse(Duration),
}

/// Sending side handed to the UI and the detector thread
#[derive(Debug, Clone)]
pub struct ControlHandle {
    sender: Sender<ControlMessage>,
}

impl ControlHandle {
    pub fn send(&self, message: ControlMessage) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|_| Error::ChannelClosed("particle session has stopped".to_string()))
    }

    pub fn set_template(&self, template: Template) -> Result<()> {
        self.send(ControlMessage::Template(template))
    }

    pub fn set_color(&self, color: Rgb) -> Result<()> {
        self.send(ControlMessage::Color(color))
    }

    /// Drive the cloud without a hand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for NaN, or [`Error::ChannelClosed`]
    /// once the session is gone.
    pub fn set_expansion(&self, expansion: f32) -> Result<()> {
        if expansion.is_nan() {
            return Err(Error::InvalidInput("Expansion must be a number".to_string()));
        }
        self.send(ControlMessage::Expansion(expansion))
    }

    /// Expand fully for `duration`, then fall back to 0
    pub fn pulse(&self, duration: Duration) -> Result<()> {
        self.send(ControlMessage::Pulse(duration))
    }

    pub fn publish_signal(&self, signal: GestureSignal, tracking: bool) -> Result<()> {
        self.send(ControlMessage::Signal { signal, tracking })
    }
}

/// Receiving side owned by the tick loop
#[derive(Debug)]
pub struct ControlInbox {
    receiver: Receiver<ControlMessage>,
}

/// Result of draining the inbox once
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrainSummary {
    /// Messages applied this drain
    pub applied: usize,
    /// Tracking state from the newest signal message, if any arrived
    pub tracking: Option<bool>,
    /// Duration of the newest pulse request, if any arrived
    pub pulse: Option<Duration>,
    /// Every sender is gone; nothing further will arrive
    pub disconnected: bool,
}

impl ControlInbox {
    /// Apply every pending message to `config` in arrival order without
    /// blocking.
    pub fn drain_into(&self, config: &mut ParticleConfig) -> DrainSummary {
        let mut summary = DrainSummary::default();
        loop {
            let message = match self.receiver.try_recv() {
                Ok(message) => message,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    summary.disconnected = true;
                    break;
                }
            };

            summary.applied += 1;
            match message {
                ControlMessage::Signal { signal, tracking } => {
                    config.apply_signal(signal);
                    summary.tracking = Some(tracking);
                }
                ControlMessage::Template(template) => config.template = template,
                ControlMessage::Color(color) => config.color = color,
                ControlMessage::Expansion(expansion) => {
                    config.expansion = if expansion.is_nan() { 0.0 } else { expansion.clamp(0.0, 1.0) };
                }
                ControlMessage::Pulse(duration) => {
                    config.expansion = 1.0;
                    summary.pulse = Some(duration);
                }
            }
        }
        summary
    }
}

/// Create a connected handle/inbox pair
#[must_use]
pub fn control_channel() -> (ControlHandle, ControlInbox) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (ControlHandle { sender }, ControlInbox { receiver })
}
