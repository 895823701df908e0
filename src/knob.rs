//! Finger-roll color knob.
//!
//! While two hands are tracked, the roll of three fingers on the second hand
//! nudges the R/G/B sliders: a flat finger counts up, a finger rolled over
//! counts down. The tracking thread only accumulates; the render loop drains
//! the totals once per tick and applies them to the sliders.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::tracking::{FingerKind, Hand, TrackingFrame};

/// Finger driving each color channel (index = channel).
pub const CHANNEL_FINGERS: [FingerKind; 3] = [FingerKind::Thumb, FingerKind::Index, FingerKind::Pinky];

/// Roll bands in hundredths of a radian (|roll| * 100, so 0..=314).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollBands {
    pub increase: RangeInclusive<u32>,
    pub decrease: RangeInclusive<u32>,
}

impl Default for RollBands {
    fn default() -> Self {
        Self { increase: 0..=60, decrease: 250..=314 }
    }
}

impl RollBands {
    pub fn step(&self, roll: u32) -> i32 {
        if self.increase.contains(&roll) {
            1
        } else if self.decrease.contains(&roll) {
            -1
        } else {
            0
        }
    }
}

/// |roll| in hundredths of a radian, truncated.
pub fn roll_centiradians(roll_radians: f32) -> Option<u32> {
    if !roll_radians.is_finite() {
        return None;
    }
    Some((roll_radians.abs() * 100.0) as u32)
}

#[derive(Debug, Default)]
pub struct ColorKnob {
    pending: [AtomicI32; 3],
    bands: RollBands,
}

impl ColorKnob {
    pub fn new(bands: RollBands) -> Self {
        Self { pending: Default::default(), bands }
    }

    /// Add `delta` to one channel. Safe from any thread.
    pub fn accumulate(&self, channel: usize, delta: i32) {
        if delta != 0 {
            self.pending[channel].fetch_add(delta, Ordering::AcqRel);
        }
    }

    /// Sample one frame. Needs at least two hands; reads the second hand's fingers.
    pub fn sample(&self, frame: &TrackingFrame) {
        if frame.hands.len() < 2 {
            return;
        }
        self.sample_hand(&frame.hands[1]);
    }

    fn sample_hand(&self, hand: &Hand) {
        for (channel, kind) in CHANNEL_FINGERS.iter().enumerate() {
            let Some(finger) = hand.extended_finger(*kind) else { continue };
            if let Some(roll) = roll_centiradians(finger.intermediate_roll) {
                self.accumulate(channel, self.bands.step(roll));
            }
        }
    }

    /// Current totals without clearing them.
    pub fn pending(&self) -> [i32; 3] {
        std::array::from_fn(|c| self.pending[c].load(Ordering::Acquire))
    }

    /// Read-and-zero every channel. An increment racing with the drain lands
    /// either in this result or in the next one, never nowhere.
    pub fn drain(&self) -> [i32; 3] {
        std::array::from_fn(|c| self.pending[c].swap(0, Ordering::AcqRel))
    }
}
