//! What the render loop needs from a window toolkit, plus the slider bank
//! backing the on-screen trackbars.

use std::time::Duration;

use crate::error::Result;
use crate::types::{FrameBuffer, Point};

pub const THICKNESS: &str = "Thickness";
pub const RED: &str = "R";
pub const GREEN: &str = "G";
pub const BLUE: &str = "B";

/// Color sliders in channel order (matches the color knob's channels).
pub const COLOR_SLIDERS: [&str; 3] = [RED, GREEN, BLUE];

/// Keys the render loop reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Escape,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseState {
    pub position: Point,
    pub left_down: bool,
}

/// Window capabilities. Only the render thread may hold and call this.
pub trait Toolkit {
    /// Show `frame` in the window.
    fn present(&mut self, frame: &FrameBuffer) -> Result<()>;

    /// Wait up to `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> Option<KeyCode>;

    fn trackbar(&self, name: &str) -> Option<i32>;

    /// Set a trackbar, clamped to its range. Unknown names are ignored.
    fn set_trackbar(&mut self, name: &str, value: i32);

    /// Mouse over the window, if the toolkit tracks one.
    fn mouse(&self) -> Option<MouseState> {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slider {
    pub name: String,
    pub value: i32,
    pub max: i32,
}

/// Named integer sliders, each clamped to `0..=max`.
#[derive(Clone, Debug, Default)]
pub struct SliderBank {
    sliders: Vec<Slider>,
    selected: usize,
}

impl SliderBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slider (or reset an existing one) with an initial value.
    pub fn create(&mut self, name: &str, max: i32, initial: i32) {
        let max = max.max(0);
        let value = initial.clamp(0, max);
        match self.sliders.iter_mut().find(|s| s.name == name) {
            Some(s) => {
                s.max = max;
                s.value = value;
            }
            None => self.sliders.push(Slider { name: name.to_string(), value, max }),
        }
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.sliders.iter().find(|s| s.name == name).map(|s| s.value)
    }

    pub fn set(&mut self, name: &str, value: i32) {
        if let Some(s) = self.sliders.iter_mut().find(|s| s.name == name) {
            s.value = value.clamp(0, s.max);
        }
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the keyboard selection up/down, wrapping around.
    pub fn select_step(&mut self, step: i32) {
        if self.sliders.is_empty() {
            return;
        }
        let n = self.sliders.len() as i32;
        self.selected = (self.selected as i32 + step).rem_euclid(n) as usize;
    }

    /// Nudge the selected slider.
    pub fn adjust_selected(&mut self, delta: i32) {
        if let Some(s) = self.sliders.get_mut(self.selected) {
            s.value = (s.value + delta).clamp(0, s.max);
        }
    }
}
