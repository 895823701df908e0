//! Hand-tracking device data model.
//!
//! These types mirror what a hand-tracking controller reports per frame:
//! hands with a stabilized palm position and pinch strength, per-finger bone
//! orientation, discrete gestures, and the interaction box used to normalize
//! coordinates. A [`TrackingDevice`] delivers frames to a listener on its own
//! thread.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Device-space position in millimeters (or unit-cube coords once normalized).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Axis-aligned volume above the sensor in which hands are tracked.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionBox {
    pub center: Vec3,
    /// Width, height and depth of the box.
    pub size: Vec3,
}

impl Default for InteractionBox {
    fn default() -> Self {
        Self { center: Vec3::new(0.0, 200.0, 0.0), size: Vec3::new(240.0, 240.0, 150.0) }
    }
}

impl InteractionBox {
    /// Map a device-space point into the unit cube, 0..1 on each axis.
    /// Points outside the box land outside 0..1 unless `clamp` is set.
    pub fn normalize_point(&self, p: Vec3, clamp: bool) -> Vec3 {
        let axis = |v: f32, c: f32, s: f32| {
            let n = if s > 0.0 { (v - c) / s + 0.5 } else { 0.5 };
            if clamp { n.clamp(0.0, 1.0) } else { n }
        };
        Vec3 {
            x: axis(p.x, self.center.x, self.size.x),
            y: axis(p.y, self.center.y, self.size.y),
            z: axis(p.z, self.center.z, self.size.z),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerKind {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finger {
    pub kind: FingerKind,
    pub extended: bool,
    /// Roll of the intermediate bone about its own axis, radians (-PI..PI).
    pub intermediate_roll: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub stabilized_palm_position: Vec3,
    /// 0 = open hand, 1 = full pinch.
    pub pinch_strength: f32,
    #[serde(default)]
    pub fingers: Vec<Finger>,
}

impl Hand {
    /// First extended finger of the given kind.
    pub fn extended_finger(&self, kind: FingerKind) -> Option<&Finger> {
        self.fingers.iter().find(|f| f.extended && f.kind == kind)
    }
}

/// Discrete gestures the device recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Circle,
    Swipe,
    KeyTap,
    ScreenTap,
}

/// Lifecycle phase of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    Start,
    Update,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gesture {
    pub kind: GestureKind,
    pub state: GestureState,
}

/// One sample from the device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingFrame {
    #[serde(default)]
    pub hands: Vec<Hand>,
    #[serde(default)]
    pub gestures: Vec<Gesture>,
    #[serde(default)]
    pub interaction_box: InteractionBox,
}

/// Callback invoked on the device thread for every frame.
pub type FrameListener = Box<dyn FnMut(&TrackingFrame) + Send + 'static>;

/// A source of tracking frames. `start` must return promptly; frames are
/// delivered asynchronously on a thread owned by the device.
pub trait TrackingDevice {
    fn start(&mut self, listener: FrameListener) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_box_to_unit_cube() {
        let ibox = InteractionBox::default();
        let n = ibox.normalize_point(Vec3::new(0.0, 200.0, 0.0), false);
        assert_eq!(n, Vec3::new(0.5, 0.5, 0.5));

        let corner = ibox.normalize_point(Vec3::new(-120.0, 320.0, 75.0), false);
        assert_eq!(corner, Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn normalize_clamps_only_when_asked() {
        let ibox = InteractionBox::default();
        let far = Vec3::new(240.0, 200.0, 0.0);
        assert!(ibox.normalize_point(far, false).x > 1.0);
        assert_eq!(ibox.normalize_point(far, true).x, 1.0);
    }

    #[test]
    fn extended_finger_skips_curled_ones() {
        let hand = Hand {
            fingers: vec![
                Finger { kind: FingerKind::Thumb, extended: false, intermediate_roll: 1.0 },
                Finger { kind: FingerKind::Thumb, extended: true, intermediate_roll: 0.2 },
            ],
            ..Hand::default()
        };
        assert_eq!(hand.extended_finger(FingerKind::Thumb).map(|f| f.intermediate_roll), Some(0.2));
        assert!(hand.extended_finger(FingerKind::Pinky).is_none());
    }

    #[test]
    fn frame_parses_from_json() {
        let line = r#"{"hands":[{"stabilized_palm_position":{"x":1,"y":2,"z":3},"pinch_strength":0.9}],
                       "gestures":[{"kind":"key_tap","state":"stop"}]}"#;
        let frame: TrackingFrame = serde_json::from_str(line).unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert!(frame.hands[0].fingers.is_empty());
        assert_eq!(frame.gestures[0], Gesture { kind: GestureKind::KeyTap, state: GestureState::Stop });
        assert_eq!(frame.interaction_box, InteractionBox::default());
    }
}
