//! Recorded tracking session played back as a device.
//!
//! The file holds one JSON [`TrackingFrame`] per line (blank lines and lines
//! starting with `#` are skipped). Frames are delivered on a dedicated thread
//! at a fixed interval, the same way a live controller calls back.

use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::tracking::{FrameListener, TrackingDevice, TrackingFrame};

pub struct ReplayDevice {
    frames: Vec<TrackingFrame>,
    interval: Duration,
    worker: Option<JoinHandle<()>>,
}

impl ReplayDevice {
    pub fn from_frames(frames: Vec<TrackingFrame>, interval: Duration) -> Self {
        Self { frames, interval, worker: None }
    }

    /// Parse a recording. Any malformed line fails the whole file.
    pub fn parse(text: &str, interval: Duration) -> Result<Self> {
        let mut frames = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let frame: TrackingFrame = serde_json::from_str(line)
                .map_err(|e| Error::Device(format!("recording line {}: {e}", lineno + 1)))?;
            frames.push(frame);
        }
        Ok(Self::from_frames(frames, interval))
    }

    pub fn open(path: &Path, interval: Duration) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Device(format!("{}: {e}", path.display())))?;
        Self::parse(&text, interval)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Wait for playback to finish.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("replay thread panicked");
            }
        }
    }
}

impl TrackingDevice for ReplayDevice {
    fn start(&mut self, mut listener: FrameListener) -> Result<()> {
        if self.worker.is_some() {
            return Err(Error::Device("replay already started".to_string()));
        }
        let frames = std::mem::take(&mut self.frames);
        let interval = self.interval;

        let worker = thread::Builder::new()
            .name("tracking-replay".to_string())
            .spawn(move || {
                log::info!("tracking device connected (replay, {} frames)", frames.len());
                for frame in &frames {
                    listener(frame);
                    if !interval.is_zero() {
                        thread::sleep(interval);
                    }
                }
                log::info!("replay finished");
            })?;
        self.worker = Some(worker);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{GestureKind, GestureState};
    use std::sync::{Arc, Mutex};

    const RECORDING: &str = r#"
# two frames, the second with a finished key tap
{"hands":[{"stabilized_palm_position":{"x":0,"y":200,"z":0},"pinch_strength":0.1}]}

{"gestures":[{"kind":"key_tap","state":"stop"}]}
"#;

    #[test]
    fn parse_skips_comments_and_blanks() {
        let device = ReplayDevice::parse(RECORDING, Duration::ZERO).unwrap();
        assert_eq!(device.len(), 2);
    }

    #[test]
    fn parse_reports_bad_line() {
        let err = ReplayDevice::parse("{}\nnot json", Duration::ZERO).err().unwrap();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn frames_reach_listener_in_order() {
        let mut device = ReplayDevice::parse(RECORDING, Duration::ZERO).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        device
            .start(Box::new(move |f: &TrackingFrame| sink.lock().unwrap().push(f.clone())))
            .unwrap();
        device.join();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].hands.len(), 1);
        assert_eq!(seen[1].gestures[0].kind, GestureKind::KeyTap);
        assert_eq!(seen[1].gestures[0].state, GestureState::Stop);
    }

    #[test]
    fn second_start_is_rejected() {
        let mut device = ReplayDevice::from_frames(vec![], Duration::ZERO);
        device.start(Box::new(|_: &TrackingFrame| {})).unwrap();
        assert!(device.start(Box::new(|_: &TrackingFrame| {})).is_err());
        device.join();
    }
}
