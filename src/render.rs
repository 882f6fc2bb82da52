//! Render adapter seam.
//!
//! The GPU backend lives outside this crate. Each tick it is handed a
//! [`FrameView`] borrowing the animator's buffer; implementations own their
//! geometry, texture and material objects and free them in `Drop`, so a
//! session that ends for any reason releases everything it created.

use crate::{color::Rgb, gesture::Position, templates::Template, Result};
use log::{debug, info};

/// Per-tick output read by the renderer
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Interleaved xyz of every particle
    pub positions: &'a [f32],
    /// Material tint
    pub color: Rgb,
    /// Material point size
    pub point_size: f32,
    /// Object translation
    pub position: Position,
    /// Template currently morphed toward
    pub template: Template,
    /// Whether a hand is currently detected
    pub tracking: bool,
    /// Tick counter since the session started
    pub frame: u64,
}

impl FrameView<'_> {
    /// Number of particles
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Largest absolute coordinate, a cheap measure of how spread the cloud is
    #[must_use]
    pub fn extent(&self) -> f32 {
        self.positions.iter().fold(0.0_f32, |acc, v| acc.max(v.abs()))
    }
}

/// Consumer of animation frames
pub trait RenderSink {
    /// Upload one frame.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the session: there is no headless fallback.
    fn render(&mut self, frame: &FrameView<'_>) -> Result<()>;
}

/// Headless sink that logs a summary line at a fixed frame interval
pub struct LogSink {
    interval: u64,
    frames: u64,
}

impl LogSink {
    #[must_use]
    pub fn new(interval: u64) -> Self {
        info!("Log sink created, reporting every {} frames", interval.max(1));
        Self {
            interval: interval.max(1),
            frames: 0,
        }
    }

    /// Frames received so far
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, frame: &FrameView<'_>) -> Result<()> {
        self.frames += 1;
        if frame.frame % self.interval == 0 {
            info!(
                "frame {:>6} | {} | {} pts | extent {:.2} | size {:.3} | pos ({:.2}, {:.2}) | {} | {}",
                frame.frame,
                frame.template,
                frame.point_count(),
                frame.extent(),
                frame.point_size,
                frame.position.x,
                frame.position.y,
                frame.color,
                if frame.tracking { "tracking" } else { "searching" },
            );
        }
        Ok(())
    }
}

impl Drop for LogSink {
    fn drop(&mut self) {
        debug!("Log sink released after {} frames", self.frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_view_metrics() {
        let positions = [1.0, -3.0, 0.5, 2.0, 0.0, -0.25];
        let view = FrameView {
            positions: &positions,
            color: Rgb::default(),
            point_size: 0.04,
            position: Position::default(),
            template: Template::Sphere,
            tracking: false,
            frame: 0,
        };
        assert_eq!(view.point_count(), 2);
        assert_eq!(view.extent(), 3.0);
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let positions = [0.0; 3];
        let mut sink = LogSink::new(0);
        for frame in 0..5 {
            let view = FrameView {
                positions: &positions,
                color: Rgb::default(),
                point_size: 0.04,
                position: Position::default(),
                template: Template::Flower,
                tracking: true,
                frame,
            };
            sink.render(&view).unwrap();
        }
        assert_eq!(sink.frames(), 5);
    }
}
