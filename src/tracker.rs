//! Pointer tracking: turns the palm trajectory into hover moves and paint strokes.
//!
//! Every in-bounds sample either hovers (moves the marker) or draws a segment
//! from the previous point. Drawing needs a previous point, so the first sample
//! after the hand shows up (or comes back inside the canvas) always hovers and
//! never produces a line from a stale position.

use crate::brush::BrushParams;
use crate::canvas::Canvas;
use crate::tracking::Vec3;
use crate::types::Point;

/// Pinch strength at or above which a hovering hand starts drawing.
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.70;

/// Classification of the latest sample. The `at` point doubles as the
/// previous point for the next sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrackState {
    #[default]
    Idle,
    Hovering { at: Point },
    Drawing { at: Point },
}

impl TrackState {
    pub fn previous_point(&self) -> Option<Point> {
        match *self {
            TrackState::Idle => None,
            TrackState::Hovering { at } | TrackState::Drawing { at } => Some(at),
        }
    }
}

/// What the tracker needs from one hand sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Palm position already normalized to the interaction box (0..1 inside).
    pub normalized: Vec3,
    pub pinch_strength: f32,
}

/// Project a normalized position onto a `width` x `height` canvas.
/// Device y grows upward, canvas y grows downward. Truncates toward zero, so
/// anything in `0.0..1.0` stays on the canvas.
pub fn project(normalized: Vec3, width: usize, height: usize) -> Point {
    let x = normalized.x * width as f32;
    let y = (1.0 - normalized.y) * height as f32;
    Point::new(x as i32, y as i32)
}

#[derive(Debug)]
pub struct PointerTracker {
    state: TrackState,
    pinch_threshold: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_THRESHOLD)
    }
}

impl PointerTracker {
    pub fn new(pinch_threshold: f32) -> Self {
        Self { state: TrackState::Idle, pinch_threshold }
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Forget the previous point (reset gesture). The marker stays where it is.
    pub fn reset(&mut self) {
        self.state = TrackState::Idle;
    }

    /// Feed one sample (`None` = no hand tracked) and apply its effect to the canvas.
    pub fn observe(
        &mut self,
        sample: Option<PointerSample>,
        canvas: &Canvas,
        brush: BrushParams,
    ) -> TrackState {
        let Some(sample) = sample else {
            self.go_idle(canvas);
            return self.state;
        };

        let (width, height) = canvas.dimensions();
        let cp = project(sample.normalized, width, height);
        let inside = cp.x >= 0 && cp.y >= 0 && (cp.x as usize) < width && (cp.y as usize) < height;
        if !inside {
            self.go_idle(canvas);
            return self.state;
        }

        self.state = match self.state.previous_point() {
            Some(prev) if sample.pinch_strength >= self.pinch_threshold => {
                canvas.draw_segment(prev, cp, brush.color, brush.thickness);
                TrackState::Drawing { at: cp }
            }
            _ => {
                canvas.set_pointer(Some(cp));
                TrackState::Hovering { at: cp }
            }
        };
        self.state
    }

    /// Hide the marker once when the hand leaves; repeated idle samples are free.
    fn go_idle(&mut self, canvas: &Canvas) {
        if self.state != TrackState::Idle {
            log::trace!("pointer left the canvas");
            canvas.set_pointer(None);
        }
        self.state = TrackState::Idle;
    }
}
