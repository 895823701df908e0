//! Per-frame work done on the tracking device's thread.
//!
//! The listener owns the pointer tracker and holds shared handles to the
//! canvas, the brush and the color knob. It is moved into the device callback,
//! so no global painter state is needed.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::brush::SharedBrush;
use crate::canvas::Canvas;
use crate::gesture::GestureRouter;
use crate::knob::ColorKnob;
use crate::tracker::{PointerSample, PointerTracker, TrackState};
use crate::tracking::{FrameListener, TrackingFrame};

pub struct TrackingListener {
    canvas: Arc<Canvas>,
    brush: Arc<SharedBrush>,
    knob: Arc<ColorKnob>,
    tracker: PointerTracker,
    router: GestureRouter,
}

impl TrackingListener {
    pub fn new(
        canvas: Arc<Canvas>,
        brush: Arc<SharedBrush>,
        knob: Arc<ColorKnob>,
        tracker: PointerTracker,
        router: GestureRouter,
    ) -> Self {
        Self { canvas, brush, knob, tracker, router }
    }

    /// Handle one device frame: color knob, pointer, then gestures.
    pub fn on_frame(&mut self, frame: &TrackingFrame) -> TrackState {
        self.knob.sample(frame);

        let sample = frame.hands.first().and_then(|hand| {
            let normalized = frame
                .interaction_box
                .normalize_point(hand.stabilized_palm_position, false);
            if !normalized.is_finite() || !hand.pinch_strength.is_finite() {
                log::warn!("dropping hand sample with non-finite data: {:?}", hand);
                return None;
            }
            Some(PointerSample { normalized, pinch_strength: hand.pinch_strength })
        });
        let state = self.tracker.observe(sample, &self.canvas, self.brush.get());

        self.router.dispatch(&frame.gestures, &mut self.tracker, &self.canvas);
        state
    }

    /// Wrap into a device callback. A panic inside is logged and swallowed so
    /// it never unwinds into the driver.
    pub fn into_callback(mut self) -> FrameListener {
        Box::new(move |frame: &TrackingFrame| {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                self.on_frame(frame);
            }));
            if outcome.is_err() {
                log::error!("tracking frame handler panicked; frame skipped");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushParams;
    use crate::tracking::{Finger, FingerKind, Gesture, GestureKind, GestureState, Hand, InteractionBox, Vec3};
    use crate::types::{FrameBuffer, Point, Rgb};

    /// Identity-ish box: device coords 0..1 map straight to unit coords.
    fn unit_box() -> InteractionBox {
        InteractionBox { center: Vec3::new(0.5, 0.5, 0.5), size: Vec3::new(1.0, 1.0, 1.0) }
    }

    fn hand(x: f32, y: f32, pinch: f32) -> Hand {
        Hand { stabilized_palm_position: Vec3::new(x, y, 0.5), pinch_strength: pinch, fingers: vec![] }
    }

    fn frame(hands: Vec<Hand>, gestures: Vec<Gesture>) -> TrackingFrame {
        TrackingFrame { hands, gestures, interaction_box: unit_box() }
    }

    fn setup() -> (TrackingListener, Arc<Canvas>, Arc<ColorKnob>) {
        let canvas = Arc::new(Canvas::new(FrameBuffer::new(100, 100)));
        let brush = Arc::new(SharedBrush::new(BrushParams { thickness: 1, color: Rgb::new(9, 9, 9) }));
        let knob = Arc::new(ColorKnob::default());
        let listener = TrackingListener::new(
            Arc::clone(&canvas),
            brush,
            Arc::clone(&knob),
            PointerTracker::default(),
            GestureRouter::default(),
        );
        (listener, canvas, knob)
    }

    #[test]
    fn stroke_then_reset_gesture() {
        let (mut listener, canvas, _) = setup();
        listener.on_frame(&frame(vec![hand(0.105, 0.895, 0.0)], vec![]));
        let state = listener.on_frame(&frame(vec![hand(0.205, 0.895, 0.9)], vec![]));
        assert_eq!(state, TrackState::Drawing { at: Point::new(20, 10) });
        assert_eq!(canvas.flatten().get(15, 10), Some(Rgb::new(9, 9, 9)));

        let stop = Gesture { kind: GestureKind::KeyTap, state: GestureState::Stop };
        listener.on_frame(&frame(vec![hand(0.305, 0.895, 0.9)], vec![stop]));
        assert!(canvas.flatten().pixels.iter().all(|&p| p == 0));

        // the reset dropped the previous point: this pinch only hovers
        let state = listener.on_frame(&frame(vec![hand(0.405, 0.895, 0.9)], vec![]));
        assert_eq!(state, TrackState::Hovering { at: Point::new(40, 10) });
    }

    #[test]
    fn gestures_route_without_hands() {
        let (mut listener, canvas, _) = setup();
        let stop = Gesture { kind: GestureKind::ScreenTap, state: GestureState::Stop };
        assert_eq!(listener.on_frame(&frame(vec![], vec![stop])), TrackState::Idle);
        assert!(canvas.eraser_active());
    }

    #[test]
    fn second_hand_feeds_color_knob() {
        let (mut listener, _, knob) = setup();
        let mut left = hand(0.5, 0.5, 0.0);
        left.fingers.push(Finger { kind: FingerKind::Index, extended: true, intermediate_roll: 0.1 });
        listener.on_frame(&frame(vec![hand(0.5, 0.5, 0.0), left], vec![]));
        assert_eq!(knob.drain(), [0, 1, 0]);
    }

    #[test]
    fn non_finite_position_is_treated_as_no_hand() {
        let (mut listener, canvas, _) = setup();
        listener.on_frame(&frame(vec![hand(0.5, 0.5, 0.0)], vec![]));
        let state = listener.on_frame(&frame(vec![hand(f32::NAN, 0.5, 0.9)], vec![]));
        assert_eq!(state, TrackState::Idle);
        assert_eq!(canvas.pointer(), None);
    }

    #[test]
    fn callback_drives_the_listener() {
        let (listener, canvas, _) = setup();
        let mut callback = listener.into_callback();
        callback(&frame(vec![hand(0.5, 0.5, 0.0)], vec![]));
        assert_eq!(canvas.pointer(), Some(Point::new(50, 50)));
    }
}
