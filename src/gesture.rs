//! Gesture routing: discrete device gestures become canvas actions.
//!
//! Only `Stop` events act. A gesture reports Start/Update for as long as the
//! user is performing it, so acting earlier would fire repeatedly.

use crate::canvas::Canvas;
use crate::tracker::PointerTracker;
use crate::tracking::{Gesture, GestureKind, GestureState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureAction {
    /// Wipe the paint layer and forget the stroke in progress.
    Reset,
    ToggleEraser,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureRouter {
    reset: GestureKind,
    eraser: GestureKind,
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::new(GestureKind::KeyTap, GestureKind::ScreenTap)
    }
}

impl GestureRouter {
    pub fn new(reset: GestureKind, eraser: GestureKind) -> Self {
        Self { reset, eraser }
    }

    /// Action bound to a finished gesture, if any.
    pub fn classify(&self, gesture: &Gesture) -> Option<GestureAction> {
        if gesture.state != GestureState::Stop {
            return None;
        }
        if gesture.kind == self.reset {
            Some(GestureAction::Reset)
        } else if gesture.kind == self.eraser {
            Some(GestureAction::ToggleEraser)
        } else {
            None
        }
    }

    /// Apply every finished gesture in reported order. Returns the actions taken.
    pub fn dispatch(
        &self,
        gestures: &[Gesture],
        tracker: &mut PointerTracker,
        canvas: &Canvas,
    ) -> Vec<GestureAction> {
        let mut taken = Vec::new();
        for action in gestures.iter().filter_map(|g| self.classify(g)) {
            match action {
                GestureAction::Reset => {
                    tracker.reset();
                    canvas.clear_overlay();
                    log::info!("reset gesture: canvas cleared");
                }
                GestureAction::ToggleEraser => {
                    let was = canvas.toggle_eraser();
                    log::info!("eraser gesture: eraser {}", if was { "off" } else { "on" });
                }
            }
            taken.push(action);
        }
        taken
    }
}
