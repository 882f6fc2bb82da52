//! Landmark sources.
//!
//! The hand detector is an external collaborator that delivers one result per
//! processed camera frame at its own cadence. [`LandmarkSource`] is the seam
//! the session's detector thread pulls from. Two sources ship with the crate:
//! [`ReplaySource`] for recorded sessions and [`SyntheticHand`] for headless
//! runs without a camera.

use crate::{
    constants::{FINGERTIP_INDICES, NUM_HAND_LANDMARKS, PALM_BASE_INDEX},
    landmarks::Landmark,
    Error, Result,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    f32::consts::{FRAC_PI_2, TAU},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    thread,
    time::Duration,
};

/// One detector result
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorFrame {
    /// Landmarks of the first detected hand, unvalidated
    Hand(Vec<Landmark>),
    /// The detector ran but found no hand
    NoHand,
}

impl DetectorFrame {
    /// Landmarks if a hand was reported
    #[must_use]
    pub fn landmarks(&self) -> Option<&[Landmark]> {
        match self {
            Self::Hand(points) => Some(points),
            Self::NoHand => None,
        }
    }
}

/// Producer of detector results, driven from the detector thread
pub trait LandmarkSource: Send {
    /// Open the underlying device or file.
    ///
    /// # Errors
    ///
    /// A start failure aborts session startup.
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Block until the next detector result.
    ///
    /// `Ok(None)` means the source is exhausted. Errors are per-frame faults:
    /// the caller logs them and asks again.
    fn next_frame(&mut self) -> Result<Option<DetectorFrame>>;

    /// Release the device; called exactly once when the detector thread exits.
    fn stop(&mut self) {}
}

impl<T: LandmarkSource + ?Sized> LandmarkSource for Box<T> {
    fn start(&mut self) -> Result<()> {
        (**self).start()
    }

    fn next_frame(&mut self) -> Result<Option<DetectorFrame>> {
        (**self).next_frame()
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

/// Replays a fixed list of frames as fast as they are asked for
pub struct ScriptedSource {
    frames: VecDeque<Result<DetectorFrame>>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = DetectorFrame>) -> Self {
        Self {
            frames: frames.into_iter().map(Ok).collect(),
        }
    }

    /// Like [`ScriptedSource::new`], but individual entries may be faults
    #[must_use]
    pub fn with_results(frames: impl IntoIterator<Item = Result<DetectorFrame>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<DetectorFrame>> {
        self.frames.pop_front().transpose()
    }
}

/// One recorded detector result as stored in a replay file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// `null` when no hand was detected
    pub landmarks: Option<Vec<[f32; 3]>>,
}

impl From<ReplayRecord> for DetectorFrame {
    fn from(record: ReplayRecord) -> Self {
        match record.landmarks {
            Some(points) => Self::Hand(points.into_iter().map(Landmark::from).collect()),
            None => Self::NoHand,
        }
    }
}

impl From<&DetectorFrame> for ReplayRecord {
    fn from(frame: &DetectorFrame) -> Self {
        Self {
            landmarks: frame
                .landmarks()
                .map(|points| points.iter().map(|p| [p.x, p.y, p.z]).collect()),
        }
    }
}

/// Reads JSON-lines recordings, one [`ReplayRecord`] per line
pub struct ReplaySource<R> {
    reader: R,
    interval: Duration,
    line: String,
    line_number: usize,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording on disk
    pub fn open<P: AsRef<Path>>(path: P, interval: Duration) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening landmark replay: {}", path.display());
        let file = File::open(path)
            .map_err(|e| Error::Detector(format!("Cannot open replay {}: {e}", path.display())))?;
        if !file.metadata()?.is_file() {
            return Err(Error::Detector(format!(
                "Replay {} is not a regular file",
                path.display()
            )));
        }
        Ok(Self::from_reader(BufReader::new(file), interval))
    }
}

impl<R: BufRead + Send> ReplaySource<R> {
    #[must_use]
    pub fn from_reader(reader: R, interval: Duration) -> Self {
        Self {
            reader,
            interval,
            line: String::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead + Send> LandmarkSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<DetectorFrame>> {
        loop {
            self.line.clear();
            self.line_number += 1;
            if self.reader.read_line(&mut self.line)? == 0 {
                self.line_number -= 1;
                debug!("Replay finished after {} lines", self.line_number);
                return Ok(None);
            }

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }

            let record: ReplayRecord = serde_json::from_str(text).map_err(|e| {
                Error::Detector(format!("Replay line {} is malformed: {e}", self.line_number))
            })?;

            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
            return Ok(Some(record.into()));
        }
    }
}

/// Write frames as a JSON-lines recording readable by [`ReplaySource`]
pub fn write_replay<W: std::io::Write>(mut writer: W, frames: &[DetectorFrame]) -> Result<()> {
    for frame in frames {
        serde_json::to_writer(&mut writer, &ReplayRecord::from(frame))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Procedural hand that drifts in a slow circle and opens and closes.
///
/// Every `period` frames the hand is hidden for the last eighth of the cycle
/// so consumers see tracking loss.
pub struct SyntheticHand {
    frame: u64,
    period: u64,
    limit: Option<u64>,
    interval: Duration,
}

impl SyntheticHand {
    /// `period` frames per open/close cycle, `interval` between frames
    #[must_use]
    pub fn new(period: u64, interval: Duration) -> Self {
        Self {
            frame: 0,
            period: period.max(8),
            limit: None,
            interval,
        }
    }

    /// Stop after `frames` results
    #[must_use]
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    /// Landmarks for a given frame index, or `None` when the hand is hidden
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Frame counters stay small
    pub fn landmarks_at(&self, frame: u64) -> Option<Vec<Landmark>> {
        let cycle = frame % self.period;
        if cycle >= self.period - self.period / 8 {
            return None;
        }

        let phase = cycle as f32 / self.period as f32 * TAU;
        let openness = 0.5 - 0.5 * phase.cos();
        let reach = 0.05 + 0.35 * openness;

        let drift = frame as f32 / (self.period as f32 * 4.0) * TAU;
        let palm = Landmark::new(0.5 + 0.15 * drift.cos(), 0.6 + 0.1 * drift.sin(), 0.0);

        let mut points = vec![palm; NUM_HAND_LANDMARKS];
        for (finger, &tip) in FINGERTIP_INDICES.iter().enumerate() {
            let angle = -FRAC_PI_2 + (finger as f32 - 2.0) * 0.35;
            for joint in 1..=4 {
                let along = reach * joint as f32 / 4.0;
                points[tip - 4 + joint] = Landmark::new(
                    (palm.x + along * angle.cos()).clamp(0.0, 1.0),
                    (palm.y + along * angle.sin()).clamp(0.0, 1.0),
                    -0.01 * joint as f32,
                );
            }
        }
        points[PALM_BASE_INDEX] = palm;
        Some(points)
    }
}

impl LandmarkSource for SyntheticHand {
    fn start(&mut self) -> Result<()> {
        info!("Synthetic hand started, {} frames per gesture cycle", self.period);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<DetectorFrame>> {
        if self.limit.is_some_and(|limit| self.frame >= limit) {
            return Ok(None);
        }
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }

        let frame = match self.landmarks_at(self.frame) {
            Some(points) => DetectorFrame::Hand(points),
            None => DetectorFrame::NoHand,
        };
        self.frame += 1;
        Ok(Some(frame))
    }

    fn stop(&mut self) {
        info!("Synthetic hand stopped after {} frames", self.frame);
    }
}
