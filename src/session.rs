//! Particle session: the running pipeline.
//!
//! A session owns every moving part. A named detector thread pulls results
//! from a [`LandmarkSource`], runs them through the [`GestureProcessor`] and
//! publishes signal snapshots. The caller's frame loop calls [`Session::tick`]
//! (or [`Session::run`]), which folds pending snapshots into the
//! [`ParticleConfig`], advances the [`ParticleAnimator`] and hands the frame to
//! the [`RenderSink`]. Stopping, whether explicit or by drop, halts the
//! detector, stops the source and releases the sink.

use crate::{
    animator::{MorphPhase, ParticleAnimator},
    config::{Config, SessionSettings},
    constants::{DETECTOR_FAULT_BACKOFF, MAX_CONSECUTIVE_DETECTOR_FAULTS},
    control::{control_channel, ControlHandle, ControlInbox, ParticleConfig},
    gesture::GestureProcessor,
    render::RenderSink,
    source::LandmarkSource,
    Error, Result,
};
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Counters reported by the detector thread when it exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectorStats {
    /// Results received from the source
    pub frames: u64,
    /// Frames the source failed to deliver
    pub faults: u64,
    /// Whether the detector gave up after too many consecutive faults
    pub gave_up: bool,
    /// Landmark sets rejected by validation
    pub dropped: u64,
}

struct DetectorWorker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<DetectorStats>,
}

/// Calls [`LandmarkSource::stop`] on every exit path of the detector thread
struct SourceGuard<L: LandmarkSource>(L);

impl<L: LandmarkSource> Drop for SourceGuard<L> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Running particle pipeline
pub struct Session<S: RenderSink> {
    settings: SessionSettings,
    config: ParticleConfig,
    animator: ParticleAnimator,
    inbox: ControlInbox,
    controls: ControlHandle,
    sink: Option<S>,
    detector: Option<DetectorWorker>,
    stats: Option<DetectorStats>,
    tracking: bool,
    pulse_deadline: Option<Instant>,
    frame: u64,
}

impl<S: RenderSink> Session<S> {
    /// Validate `config`, start `source` and begin detecting.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, the source cannot start or the
    /// detector thread cannot be spawned.
    pub fn start<L>(config: &Config, source: L, sink: S) -> Result<Self>
    where
        L: LandmarkSource + 'static,
    {
        Self::start_with_rng(config, source, sink, StdRng::from_os_rng())
    }

    /// Same as [`Session::start`] with a caller-provided RNG for template
    /// sampling and jitter
    pub fn start_with_rng<L>(config: &Config, mut source: L, sink: S, rng: StdRng) -> Result<Self>
    where
        L: LandmarkSource + 'static,
    {
        config.validate()?;
        let processor = GestureProcessor::new(&config.gesture)?;

        info!(
            "Starting particle session: {} points, {} template, {}",
            config.particles.point_count, config.particles.template, config.particles.color
        );
        let animator = ParticleAnimator::with_rng(
            config.particles.template,
            config.particles.point_count,
            config.animation,
            rng,
        );

        source.start()?;
        let (controls, inbox) = control_channel();
        let detector = spawn_detector(source, processor, controls.clone())?;

        Ok(Self {
            settings: config.session.clone(),
            config: ParticleConfig::from(&config.particles),
            animator,
            inbox,
            controls,
            sink: Some(sink),
            detector: Some(detector),
            stats: None,
            tracking: false,
            pulse_deadline: None,
            frame: 0,
        })
    }

    /// Handle for UI updates (template, color)
    #[must_use]
    pub fn controls(&self) -> ControlHandle {
        self.controls.clone()
    }

    /// Apply pending updates, advance the animation one frame and render it.
    ///
    /// # Errors
    ///
    /// Render failures are fatal and returned as-is; ticking a stopped session
    /// returns [`Error::Render`].
    pub fn tick(&mut self) -> Result<MorphPhase> {
        let summary = self.inbox.drain_into(&mut self.config);
        if let Some(tracking) = summary.tracking {
            if tracking != self.tracking {
                debug!("Tracking {}", if tracking { "acquired" } else { "lost" });
            }
            self.tracking = tracking;
        }

        match summary.pulse {
            Some(duration) => self.pulse_deadline = Some(Instant::now() + duration),
            None => {
                if self.pulse_deadline.is_some_and(|end| Instant::now() >= end) {
                    debug!("Test pulse over, expansion back to 0");
                    self.pulse_deadline = None;
                    self.config.expansion = 0.0;
                }
            }
        }

        let phase = self.animator.tick(&self.config);

        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| Error::Render("session has been stopped".to_string()))?;
        sink.render(&self.animator.frame(&self.config, self.tracking, self.frame))?;

        self.frame += 1;
        Ok(phase)
    }

    /// Tick at the configured rate until the frame budget is spent or the
    /// source is exhausted. Returns the number of ticks performed.
    #[allow(clippy::cast_precision_loss)] // FPS readout only
    pub fn run(&mut self) -> Result<u64> {
        let frame_time = Duration::from_secs_f64(1.0 / f64::from(self.settings.target_fps.max(1)));
        let first = self.frame;
        let mut last_fps_update = Instant::now();
        let mut frames_since_update = 0_u64;

        info!("Entering tick loop at {} fps", self.settings.target_fps);
        loop {
            if self
                .settings
                .max_frames
                .is_some_and(|max| self.frame - first >= max)
            {
                info!("Frame budget reached");
                break;
            }

            let source_done = self.source_finished();
            let tick_start = Instant::now();
            self.tick()?;
            frames_since_update += 1;

            if source_done {
                info!("Landmark source finished, leaving tick loop");
                break;
            }

            if last_fps_update.elapsed() >= Duration::from_secs(1) {
                let fps = frames_since_update as f64 / last_fps_update.elapsed().as_secs_f64();
                debug!("{fps:.1} fps");
                frames_since_update = 0;
                last_fps_update = Instant::now();
            }

            if let Some(rest) = frame_time.checked_sub(tick_start.elapsed()) {
                thread::sleep(rest);
            }
        }

        Ok(self.frame - first)
    }

    /// Whether the detector thread has exited
    #[must_use]
    pub fn source_finished(&self) -> bool {
        self.detector
            .as_ref()
            .map_or(true, |worker| worker.handle.is_finished())
    }

    /// Stop detecting and release the render sink.
    pub fn stop(mut self) -> DetectorStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> DetectorStats {
        if let Some(worker) = self.detector.take() {
            worker.stop.store(true, Ordering::Relaxed);
            match worker.handle.join() {
                Ok(stats) => {
                    info!(
                        "Detector stopped: {} frames, {} faults, {} dropped",
                        stats.frames, stats.faults, stats.dropped
                    );
                    self.stats = Some(stats);
                }
                Err(_) => warn!("Detector thread panicked"),
            }
        }

        if self.sink.take().is_some() {
            debug!("Render sink released after {} frames", self.frame);
        }

        self.stats.unwrap_or_default()
    }

    /// Snapshot the animator read on the last tick
    #[must_use]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    #[must_use]
    pub fn animator(&self) -> &ParticleAnimator {
        &self.animator
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Ticks performed since the session started
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl<S: RenderSink> Drop for Session<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_detector<L>(
    source: L,
    mut processor: GestureProcessor,
    controls: ControlHandle,
) -> Result<DetectorWorker>
where
    L: LandmarkSource + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    // Built before spawning so a failed spawn still stops the source
    let source = SourceGuard(source);

    let handle = thread::Builder::new()
        .name("landmark-detector".to_string())
        .spawn(move || {
            let mut source = source;
            let mut stats = DetectorStats::default();
            let mut consecutive_faults = 0_u32;

            while !stop_flag.load(Ordering::Relaxed) {
                match source.0.next_frame() {
                    Ok(Some(frame)) => {
                        stats.frames += 1;
                        consecutive_faults = 0;
                        let signal = processor.update(frame.landmarks());
                        if controls.publish_signal(signal, processor.is_tracking()).is_err() {
                            debug!("Session gone, detector exiting");
                            break;
                        }
                    }
                    Ok(None) => {
                        info!("Landmark source exhausted after {} frames", stats.frames);
                        break;
                    }
                    Err(e) => {
                        stats.faults += 1;
                        consecutive_faults += 1;
                        if consecutive_faults >= MAX_CONSECUTIVE_DETECTOR_FAULTS {
                            warn!("Detector failed {consecutive_faults} times in a row, giving up: {e}");
                            stats.gave_up = true;
                            break;
                        }
                        warn!("Skipping detector frame: {e}");
                        thread::sleep(DETECTOR_FAULT_BACKOFF);
                    }
                }
            }

            stats.dropped = processor.dropped_frames();
            stats
        })
        .map_err(|e| Error::Detector(format!("Failed to spawn detector thread: {e}")))?;

    Ok(DetectorWorker { stop, handle })
}
