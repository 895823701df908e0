//! Painter configuration (TOML).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::knob::RollBands;
use crate::tracking::GestureKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    pub window_title: String,
    /// Render loop key-poll interval.
    pub poll_interval_ms: u64,
    /// JPEG quality used when saving (1..=100).
    pub jpeg_quality: u8,
    /// Pointer marker size in pixels.
    pub marker_size: u32,
    pub camera: CameraConfig,
    pub tracking: TrackingConfig,
    pub brush: BrushConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Pinch strength at which hovering turns into drawing.
    pub pinch_threshold: f32,
    /// Finger roll (hundredths of a radian) that counts a color channel up.
    pub roll_increase: [u32; 2],
    /// Finger roll that counts a color channel down.
    pub roll_decrease: [u32; 2],
    pub reset_gesture: GestureKind,
    pub eraser_gesture: GestureKind,
    /// Delay between frames when replaying a recording.
    pub replay_interval_ms: u64,
}

/// Initial trackbar values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub thickness: i32,
    pub max_thickness: i32,
    pub rgb: [i32; 3],
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            window_title: "Hand Painter".to_string(),
            poll_interval_ms: 15,
            jpeg_quality: 100,
            marker_size: 10,
            camera: CameraConfig::default(),
            tracking: TrackingConfig::default(),
            brush: BrushConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, width: 640, height: 480 }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: crate::tracker::DEFAULT_PINCH_THRESHOLD,
            roll_increase: [0, 60],
            roll_decrease: [250, 314],
            reset_gesture: GestureKind::KeyTap,
            eraser_gesture: GestureKind::ScreenTap,
            replay_interval_ms: 16,
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self { thickness: 12, max_thickness: 128, rgb: [0, 255, 0] }
    }
}

impl TrackingConfig {
    pub fn roll_bands(&self) -> RollBands {
        RollBands {
            increase: self.roll_increase[0]..=self.roll_increase[1],
            decrease: self.roll_decrease[0]..=self.roll_decrease[1],
        }
    }
}

impl PainterConfig {
    /// Check ranges that would make the painter misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 1000 {
            return Err(Error::Config(format!(
                "poll_interval_ms must be in [1, 1000], got {}", self.poll_interval_ms
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::Config(format!(
                "jpeg_quality must be in [1, 100], got {}", self.jpeg_quality
            )));
        }
        let t = &self.tracking;
        if !(0.0..=1.0).contains(&t.pinch_threshold) {
            return Err(Error::Config(format!(
                "pinch_threshold must be in [0, 1], got {}", t.pinch_threshold
            )));
        }
        for (name, band) in [("roll_increase", t.roll_increase), ("roll_decrease", t.roll_decrease)] {
            if band[0] > band[1] {
                return Err(Error::Config(format!("{name} is empty: {:?}", band)));
            }
        }
        if t.reset_gesture == t.eraser_gesture {
            return Err(Error::Config("reset and eraser gestures must differ".to_string()));
        }
        if self.brush.max_thickness < 1 {
            return Err(Error::Config("max_thickness must be >= 1".to_string()));
        }
        if self.marker_size == 0 {
            return Err(Error::Config("marker_size must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
