//! End-to-end: a recorded hand session drives the canvas on the device thread
//! while a scripted toolkit runs the render loop.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use hand_painter::replay::ReplayDevice;
use hand_painter::toolkit::{SliderBank, BLUE, GREEN, RED, THICKNESS};
use hand_painter::tracking::{
    Finger, FingerKind, Gesture, GestureKind, GestureState, Hand, InteractionBox, Vec3,
};
use hand_painter::{
    Canvas, ColorKnob, FrameBuffer, GestureRouter, KeyCode, PointerTracker, RenderLoop, Result,
    Rgb, SharedBrush, Tick, Toolkit, TrackingDevice, TrackingFrame, TrackingListener,
};

struct FakeWindow {
    keys: VecDeque<Option<KeyCode>>,
    sliders: SliderBank,
    presented: Vec<FrameBuffer>,
}

impl FakeWindow {
    fn new(keys: Vec<Option<KeyCode>>) -> Self {
        let mut sliders = SliderBank::new();
        sliders.create(THICKNESS, 128, 1);
        sliders.create(RED, 255, 200);
        sliders.create(GREEN, 255, 0);
        sliders.create(BLUE, 255, 10);
        Self { keys: keys.into(), sliders, presented: Vec::new() }
    }
}

impl Toolkit for FakeWindow {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.presented.push(frame.clone());
        Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Option<KeyCode> {
        self.keys.pop_front().unwrap_or(Some(KeyCode::Escape))
    }

    fn trackbar(&self, name: &str) -> Option<i32> {
        self.sliders.get(name)
    }

    fn set_trackbar(&mut self, name: &str, value: i32) {
        self.sliders.set(name, value);
    }
}

fn unit_box() -> InteractionBox {
    InteractionBox { center: Vec3::new(0.5, 0.5, 0.5), size: Vec3::new(1.0, 1.0, 1.0) }
}

fn palm(x: f32, y: f32, pinch: f32) -> Hand {
    Hand { stabilized_palm_position: Vec3::new(x, y, 0.5), pinch_strength: pinch, fingers: vec![] }
}

fn frame(hands: Vec<Hand>, gestures: Vec<Gesture>) -> TrackingFrame {
    TrackingFrame { hands, gestures, interaction_box: unit_box() }
}

#[test]
fn replayed_session_paints_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("painting.png");

    let canvas = Arc::new(Canvas::new(FrameBuffer::new(100, 100)));
    let knob = Arc::new(ColorKnob::default());
    let brush = Arc::new(SharedBrush::default());
    let mut render = RenderLoop::new(
        FakeWindow::new(vec![None, None, Some(KeyCode::Char('s')), None]),
        Arc::clone(&canvas),
        Arc::clone(&knob),
        Arc::clone(&brush),
        &dest,
    );

    // First tick publishes the slider brush (200,0,10) before any stroke arrives.
    assert_eq!(render.tick().unwrap(), Tick::Continue);

    let mut second = palm(0.5, 0.5, 0.0);
    second.fingers.push(Finger { kind: FingerKind::Pinky, extended: true, intermediate_roll: 3.0 });
    let frames = vec![
        frame(vec![palm(0.1, 0.5, 0.0)], vec![]),
        frame(vec![palm(0.5, 0.5, 0.9)], vec![]),
        frame(vec![palm(0.9, 0.5, 0.2), second], vec![]),
        frame(vec![], vec![Gesture { kind: GestureKind::ScreenTap, state: GestureState::Start }]),
    ];
    let listener = TrackingListener::new(
        Arc::clone(&canvas),
        Arc::clone(&brush),
        Arc::clone(&knob),
        PointerTracker::default(),
        GestureRouter::default(),
    );
    let mut device = ReplayDevice::from_frames(frames, Duration::ZERO);
    device.start(listener.into_callback()).unwrap();
    device.join();

    assert_eq!(render.tick().unwrap(), Tick::Continue);
    let shown = render.toolkit().presented.last().unwrap().clone();
    assert_eq!(shown.get(30, 50), Some(Rgb::new(200, 0, 10)));
    assert_eq!(shown.get(70, 50), Some(Rgb::BLACK));
    // pinky rolled over on the second hand counted blue down by one
    assert_eq!(render.toolkit().trackbar(BLUE), Some(9));
    // the hand left: no marker, and the Start-state tap did nothing
    assert_eq!(canvas.pointer(), None);
    assert!(!canvas.eraser_active());

    assert_eq!(render.tick().unwrap(), Tick::Continue);
    let saved = hand_painter::codec::load_image(&dest).unwrap();
    assert_eq!(saved.get(30, 50), Some(Rgb::new(200, 0, 10)));

    assert_eq!(render.tick().unwrap(), Tick::Continue);
    assert_eq!(render.tick().unwrap(), Tick::Quit);
}

#[test]
fn reset_gesture_during_session_clears_strokes() {
    let canvas = Arc::new(Canvas::new(FrameBuffer::filled(50, 50, Rgb::new(0, 0, 40))));
    let brush = Arc::new(SharedBrush::default());
    let mut listener = TrackingListener::new(
        Arc::clone(&canvas),
        brush,
        Arc::new(ColorKnob::default()),
        PointerTracker::default(),
        GestureRouter::default(),
    );

    listener.on_frame(&frame(vec![palm(0.2, 0.5, 0.0)], vec![]));
    listener.on_frame(&frame(vec![palm(0.8, 0.5, 1.0)], vec![]));
    assert_ne!(canvas.flatten().get(25, 25), Some(Rgb::new(0, 0, 40)));

    let tap = |state| Gesture { kind: GestureKind::KeyTap, state };
    listener.on_frame(&frame(
        vec![palm(0.8, 0.5, 1.0)],
        vec![tap(GestureState::Start), tap(GestureState::Update), tap(GestureState::Stop)],
    ));
    assert!(canvas.flatten().pixels.iter().all(|&p| p == Rgb::new(0, 0, 40).packed()));
}
