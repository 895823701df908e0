//! The render loop: the only code that talks to the window.
//!
//! Each tick:
//! 1. poll for a key (this is also what paces the loop),
//! 2. drain the color knob into the R/G/B sliders,
//! 3. publish the brush read from the sliders,
//! 4. paint with the mouse if the left button is held,
//! 5. pull a camera frame into the base layer if the camera is on,
//! 6. present the canvas if anything changed,
//! 7. act on the key: Esc quits, `s` saves, `v` turns the camera on.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::brush::{BrushParams, SharedBrush};
use crate::camera::FrameSource;
use crate::canvas::Canvas;
use crate::codec::save_image;
use crate::error::{Error, Result};
use crate::knob::ColorKnob;
use crate::toolkit::{KeyCode, Toolkit, COLOR_SLIDERS, THICKNESS};
use crate::types::{Point, Rgb};

pub const SAVE_KEY: KeyCode = KeyCode::Char('s');
pub const CAMERA_KEY: KeyCode = KeyCode::Char('v');
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Opens the live camera on demand.
pub type CameraOpener = Box<dyn FnMut() -> Result<Box<dyn FrameSource>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Quit,
}

pub struct RenderLoop<T: Toolkit> {
    toolkit: T,
    canvas: Arc<Canvas>,
    knob: Arc<ColorKnob>,
    brush: Arc<SharedBrush>,
    save_path: PathBuf,
    jpeg_quality: u8,
    poll_interval: Duration,
    open_camera: CameraOpener,
    camera: Option<Box<dyn FrameSource>>,
    camera_failing: bool,
    mouse_prev: Option<Point>,
}

impl<T: Toolkit> RenderLoop<T> {
    pub fn new(
        toolkit: T,
        canvas: Arc<Canvas>,
        knob: Arc<ColorKnob>,
        brush: Arc<SharedBrush>,
        save_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            toolkit,
            canvas,
            knob,
            brush,
            save_path: save_path.into(),
            jpeg_quality: 100,
            poll_interval: Duration::from_millis(15),
            open_camera: Box::new(|| -> Result<Box<dyn FrameSource>> {
                Err(Error::CameraInit("no camera available".to_string()))
            }),
            camera: None,
            camera_failing: false,
            mouse_prev: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn with_camera_opener(mut self, opener: CameraOpener) -> Self {
        self.open_camera = opener;
        self
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera.is_some()
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Run until the quit key (or a closed window).
    pub fn run(&mut self) -> Result<()> {
        log::info!("render loop started (Esc quit, s save, v camera)");
        while self.tick()? == Tick::Continue {}
        log::info!("render loop stopped");
        Ok(())
    }

    /// One pass of the loop. Only presentation failures are returned as errors.
    pub fn tick(&mut self) -> Result<Tick> {
        let key = self.toolkit.poll_key(self.poll_interval);

        self.apply_knob();
        let brush = self.publish_brush();
        self.paint_with_mouse(brush);
        self.refresh_camera();

        if let Some(frame) = self.canvas.take_presentation_if_pending() {
            self.toolkit.present(&frame)?;
        }

        match key {
            Some(QUIT_KEY) => return Ok(Tick::Quit),
            Some(SAVE_KEY) => {
                if let Err(e) = self.save() {
                    log::error!("{e}");
                }
            }
            Some(CAMERA_KEY) => self.enable_camera(),
            _ => {}
        }
        Ok(Tick::Continue)
    }

    /// Move each color slider by the knob's pending delta (clamped by the slider).
    fn apply_knob(&mut self) {
        let deltas = self.knob.drain();
        for (name, delta) in COLOR_SLIDERS.iter().zip(deltas) {
            if delta == 0 {
                continue;
            }
            let current = self.toolkit.trackbar(name).unwrap_or(0);
            self.toolkit.set_trackbar(name, current.saturating_add(delta));
        }
    }

    fn publish_brush(&self) -> BrushParams {
        let channel = |name: &str| self.toolkit.trackbar(name).unwrap_or(0).clamp(0, 255) as u8;
        let params = BrushParams {
            thickness: self.toolkit.trackbar(THICKNESS).unwrap_or(1).max(1) as u32,
            color: Rgb::new(channel(COLOR_SLIDERS[0]), channel(COLOR_SLIDERS[1]), channel(COLOR_SLIDERS[2])),
        };
        self.brush.publish(params);
        params
    }

    /// Left-drag paints segments, the same way a pinched hand does.
    fn paint_with_mouse(&mut self, brush: BrushParams) {
        let (w, h) = self.canvas.dimensions();
        let held = match self.toolkit.mouse() {
            Some(m) if m.left_down => Some(m.position),
            _ => None,
        };
        let inside = held.filter(|p| p.x >= 0 && p.y >= 0 && (p.x as usize) < w && (p.y as usize) < h);

        match (self.mouse_prev, inside) {
            (Some(prev), Some(cur)) if prev != cur => {
                self.canvas.draw_segment(prev, cur, brush.color, brush.thickness);
            }
            _ => {}
        }
        self.mouse_prev = inside;
    }

    fn enable_camera(&mut self) {
        if self.camera.is_some() {
            log::debug!("camera already enabled");
            return;
        }
        match (self.open_camera)() {
            Ok(source) => {
                log::info!("live camera background enabled");
                self.camera = Some(source);
                self.camera_failing = false;
                self.refresh_camera();
            }
            Err(e) => log::warn!("camera unavailable: {e}"),
        }
    }

    /// A failing camera leaves the last background in place; warn once per outage.
    fn refresh_camera(&mut self) {
        let Some(camera) = self.camera.as_mut() else { return };
        match camera.next_frame() {
            Ok(Some(frame)) => {
                self.camera_failing = false;
                self.canvas.replace_base(frame);
            }
            Ok(None) => log::trace!("camera returned no frame"),
            Err(e) => {
                if !self.camera_failing {
                    log::warn!("camera frame failed, background not refreshed: {e}");
                }
                self.camera_failing = true;
            }
        }
    }

    /// Save the flattened canvas (no pointer marker) to the destination path.
    pub fn save(&self) -> Result<()> {
        let frame = self.canvas.flatten();
        save_image(&self.save_path, &frame, self.jpeg_quality)?;
        log::info!("current image saved: {}", self.save_path.display());
        Ok(())
    }
}
