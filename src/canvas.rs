//! Layered canvas shared between the tracking callback and the render loop.
//!
//! Layers:
//! - `base`: the loaded image (or the latest camera frame).
//! - `paint`: user strokes only; black means "nothing painted here".
//! - `presentation`: base + paint + pointer marker, rebuilt on every mutation.
//!
//! Every operation runs inside one mutex, so a reader never sees a half-drawn
//! composite. The render loop learns about changes only through
//! [`Canvas::take_presentation_if_pending`].

use parking_lot::Mutex;

use crate::draw::{blend_additive, draw_marker, draw_thick_line, MarkerShape};
use crate::types::{FrameBuffer, Point, Rgb};

/// Color written into the paint layer while erasing (transparent in the blend).
pub const ERASE_COLOR: Rgb = Rgb::BLACK;

/// Appearance of the pointer marker.
#[derive(Clone, Copy, Debug)]
pub struct MarkerStyle {
    pub size: u32,
    pub thickness: u32,
    pub color: Rgb,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self { size: 10, thickness: 3, color: Rgb::new(0x00, 0x99, 0x00) }
    }
}

struct CanvasState {
    base: FrameBuffer,
    paint: FrameBuffer,
    presentation: FrameBuffer,
    pointer: Option<Point>,
    eraser: bool,
    repaint_pending: bool,
}

impl CanvasState {
    /// Rebuild the presentation buffer and flag it for the render loop.
    fn composite(&mut self, marker: &MarkerStyle) {
        if !self.presentation.same_size(&self.base) {
            self.presentation = FrameBuffer::new(self.base.width, self.base.height);
        }
        blend_additive(&self.base, &self.paint, &mut self.presentation);

        if let Some(at) = self.pointer {
            let shape = if self.eraser { MarkerShape::Square } else { MarkerShape::TriangleDown };
            draw_marker(
                &mut self.presentation,
                at,
                shape,
                marker.size,
                marker.thickness,
                marker.color.packed(),
            );
        }

        self.repaint_pending = true;
    }
}

pub struct Canvas {
    state: Mutex<CanvasState>,
    marker: MarkerStyle,
}

impl Canvas {
    pub fn new(base: FrameBuffer) -> Self {
        Self::with_marker(base, MarkerStyle::default())
    }

    /// Build the canvas around `base`; the first composite is pending right away
    /// so the render loop shows the image on its first tick.
    pub fn with_marker(base: FrameBuffer, marker: MarkerStyle) -> Self {
        let paint = FrameBuffer::new(base.width, base.height);
        let presentation = FrameBuffer::new(base.width, base.height);
        let mut state = CanvasState {
            base,
            paint,
            presentation,
            pointer: None,
            eraser: false,
            repaint_pending: false,
        };
        state.composite(&marker);
        Self { state: Mutex::new(state), marker }
    }

    /// Paint a stroke segment. In eraser mode `color` is ignored and the
    /// segment clears paint instead.
    pub fn draw_segment(&self, from: Point, to: Point, color: Rgb, thickness: u32) {
        let mut state = self.state.lock();
        let ink = if state.eraser { ERASE_COLOR } else { color };
        log::trace!("segment {:?} -> {:?} ink={:?} thickness={}", from, to, ink, thickness);
        draw_thick_line(&mut state.paint, from, to, thickness, ink.packed());
        state.composite(&self.marker);
    }

    /// Move (or hide, with `None`) the pointer marker. Never touches the paint layer.
    pub fn set_pointer(&self, point: Option<Point>) {
        let mut state = self.state.lock();
        state.pointer = point;
        state.composite(&self.marker);
    }

    /// Wipe every stroke; the base image stays.
    pub fn clear_overlay(&self) {
        let mut state = self.state.lock();
        state.paint.clear();
        state.composite(&self.marker);
    }

    /// Flip eraser mode and return the previous value.
    pub fn toggle_eraser(&self) -> bool {
        let mut state = self.state.lock();
        let previous = state.eraser;
        state.eraser = !previous;
        state.composite(&self.marker);
        previous
    }

    /// Swap in a new background (camera frame). A size change re-derives an
    /// empty paint layer at the new size.
    pub fn replace_base(&self, base: FrameBuffer) {
        let mut state = self.state.lock();
        if !state.paint.same_size(&base) {
            log::debug!(
                "base resized {}x{} -> {}x{}, paint layer reset",
                state.base.width, state.base.height, base.width, base.height
            );
            state.paint = FrameBuffer::new(base.width, base.height);
        }
        state.base = base;
        state.composite(&self.marker);
    }

    /// The latest composite, exactly once per batch of mutations.
    pub fn take_presentation_if_pending(&self) -> Option<FrameBuffer> {
        let mut state = self.state.lock();
        if !state.repaint_pending {
            return None;
        }
        state.repaint_pending = false;
        Some(state.presentation.clone())
    }

    /// Base + paint without the pointer marker (what gets saved).
    pub fn flatten(&self) -> FrameBuffer {
        let state = self.state.lock();
        let mut out = FrameBuffer::new(state.base.width, state.base.height);
        blend_additive(&state.base, &state.paint, &mut out);
        out
    }

    pub fn dimensions(&self) -> (usize, usize) {
        let state = self.state.lock();
        (state.base.width, state.base.height)
    }

    pub fn pointer(&self) -> Option<Point> {
        self.state.lock().pointer
    }

    pub fn eraser_active(&self) -> bool {
        self.state.lock().eraser
    }
}
