//! Hand Painter
//!
//! Paint strokes onto an image with a hand-tracking controller. A device
//! thread turns palm motion, pinch strength, finger roll and gestures into
//! canvas mutations; a single render loop owns the window and presents the
//! canvas whenever it changed.

pub mod brush;
pub mod camera;
pub mod canvas;
pub mod cli;
pub mod codec;
pub mod config;
pub mod draw;
pub mod error;
pub mod gesture;
pub mod knob;
pub mod listener;
pub mod render_loop;
pub mod replay;
pub mod toolkit;
pub mod tracker;
pub mod tracking;
pub mod types;
pub mod window;

pub use brush::{BrushParams, SharedBrush};
pub use canvas::{Canvas, MarkerStyle};
pub use error::{Error, Result};
pub use gesture::{GestureAction, GestureRouter};
pub use knob::{ColorKnob, RollBands};
pub use listener::TrackingListener;
pub use render_loop::{RenderLoop, Tick};
pub use toolkit::{KeyCode, MouseState, Toolkit};
pub use tracker::{PointerTracker, TrackState};
pub use tracking::{TrackingDevice, TrackingFrame};
pub use types::{FrameBuffer, Point, Rgb};
