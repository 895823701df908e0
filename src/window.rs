// minifb-backed toolkit: the painter window plus keyboard-driven trackbars.
// Visual effects provided here:
// 1) A window that shows the composited canvas.
// 2) A small HUD in the top-left listing the sliders; ">" marks the selected one.
// Controls: Up/Down select a slider, Left/Right nudge it (PageUp/PageDown by 10).

use std::thread;
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

use crate::draw::draw_text_5x7;
use crate::error::{Error, Result};
use crate::toolkit::{KeyCode, MouseState, SliderBank, Toolkit};
use crate::types::{FrameBuffer, Point};

const HUD_COLOR: u32 = 0x00_FF_FF_FF;

pub struct Drawer {
    window: Window,          // the on-screen window you see
    sliders: SliderBank,     // trackbar values, shown in the HUD
    last: Option<FrameBuffer>, // last canvas presented, kept to redraw the HUD
    scratch: FrameBuffer,    // canvas + HUD, what actually goes to the screen
    hud_dirty: bool,         // a slider moved since the last blit
}

impl Drawer {
    /// Create a window sized to the canvas.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // poll_key paces the loop; no extra throttling inside minifb
        window.set_target_fps(0);
        Ok(Self {
            window,
            sliders: SliderBank::new(),
            last: None,
            scratch: FrameBuffer::new(width, height),
            hud_dirty: false,
        })
    }

    /// Add a trackbar shown in the HUD.
    pub fn create_trackbar(&mut self, name: &str, max: i32, initial: i32) {
        self.sliders.create(name, max, initial);
    }

    fn draw_hud(&mut self) {
        for (i, s) in self.sliders.sliders().iter().enumerate() {
            let mark = if i == self.sliders.selected() { '>' } else { ' ' };
            let line = format!("{mark}{} {}", s.name, s.value);
            draw_text_5x7(&mut self.scratch, 8, 8 + 10 * i as i32, &line, HUD_COLOR);
        }
    }

    /// Push canvas + HUD to the screen.
    fn blit(&mut self) -> Result<()> {
        let Some(last) = &self.last else { return Ok(()) };
        if !self.scratch.same_size(last) {
            self.scratch = FrameBuffer::new(last.width, last.height);
        }
        self.scratch.pixels.copy_from_slice(&last.pixels);
        self.draw_hud();
        self.hud_dirty = false;
        self.window
            .update_with_buffer(&self.scratch.pixels, self.scratch.width, self.scratch.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }
}

/// Handle slider keys; true when a slider changed.
fn handle_slider_key(sliders: &mut SliderBank, key: Key) -> bool {
    match key {
        Key::Up => sliders.select_step(-1),
        Key::Down => sliders.select_step(1),
        Key::Left => sliders.adjust_selected(-1),
        Key::Right => sliders.adjust_selected(1),
        Key::PageDown => sliders.adjust_selected(-10),
        Key::PageUp => sliders.adjust_selected(10),
        _ => return false,
    }
    true
}

/// Apply one batch of keys. `repeating` includes auto-repeats (slider keys
/// only), `fresh` holds new presses (action keys). Returns whether any slider
/// changed and the first action key.
fn route_keys(sliders: &mut SliderBank, repeating: &[Key], fresh: &[Key]) -> (bool, Option<KeyCode>) {
    let mut changed = false;
    for &key in repeating {
        changed |= handle_slider_key(sliders, key);
    }
    (changed, fresh.iter().copied().find_map(key_code))
}

/// Map a window-relative mouse position onto the buffer shown with
/// `ScaleMode::AspectRatioStretch`: the buffer is scaled uniformly and centred,
/// so positions on the letterbox bars map to nothing.
pub fn window_to_buffer(
    pos: (f32, f32),
    window: (usize, usize),
    buffer: (usize, usize),
) -> Option<Point> {
    let (ww, wh) = (window.0 as f32, window.1 as f32);
    let (bw, bh) = (buffer.0 as f32, buffer.1 as f32);
    if ww <= 0.0 || wh <= 0.0 || bw <= 0.0 || bh <= 0.0 {
        return None;
    }
    let scale = (ww / bw).min(wh / bh);
    let off_x = (ww - bw * scale) / 2.0;
    let off_y = (wh - bh * scale) / 2.0;
    let x = ((pos.0 - off_x) / scale).floor();
    let y = ((pos.1 - off_y) / scale).floor();
    if x < 0.0 || y < 0.0 || x >= bw || y >= bh {
        return None;
    }
    Some(Point::new(x as i32, y as i32))
}

fn key_code(key: Key) -> Option<KeyCode> {
    match key {
        Key::Escape => Some(KeyCode::Escape),
        Key::S => Some(KeyCode::Char('s')),
        Key::V => Some(KeyCode::Char('v')),
        _ => None,
    }
}

impl Toolkit for Drawer {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.last = Some(frame.clone());
        self.blit()
    }

    fn poll_key(&mut self, timeout: Duration) -> Option<KeyCode> {
        let deadline = Instant::now() + timeout;
        loop {
            // a closed window reads as Escape so the loop exits cleanly
            if !self.window.is_open() {
                return Some(KeyCode::Escape);
            }
            self.window.update();

            // sliders auto-repeat while held; action keys fire once per press
            let repeating = self.window.get_keys_pressed(KeyRepeat::Yes);
            let fresh = self.window.get_keys_pressed(KeyRepeat::No);
            let (changed, action) = route_keys(&mut self.sliders, &repeating, &fresh);
            self.hud_dirty |= changed;
            if self.hud_dirty && self.last.is_some() {
                if let Err(e) = self.blit() {
                    log::warn!("HUD redraw failed: {e}");
                }
            }
            if action.is_some() {
                return action;
            }

            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            thread::sleep((deadline - now).min(Duration::from_millis(2)));
        }
    }

    fn trackbar(&self, name: &str) -> Option<i32> {
        self.sliders.get(name)
    }

    fn set_trackbar(&mut self, name: &str, value: i32) {
        let before = self.sliders.get(name);
        self.sliders.set(name, value);
        self.hud_dirty |= self.sliders.get(name) != before;
    }

    /// Mouse position in canvas pixels; `None` off the window or on the letterbox.
    fn mouse(&self) -> Option<MouseState> {
        let pos = self.window.get_mouse_pos(MouseMode::Discard)?;
        let buffer = (self.scratch.width, self.scratch.height);
        let position = window_to_buffer(pos, self.window.get_size(), buffer)?;
        Some(MouseState { position, left_down: self.window.get_mouse_down(MouseButton::Left) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscaled_window_maps_one_to_one() {
        assert_eq!(window_to_buffer((10.0, 20.0), (640, 480), (640, 480)), Some(Point::new(10, 20)));
        assert_eq!(window_to_buffer((640.0, 0.0), (640, 480), (640, 480)), None);
    }

    #[test]
    fn stretched_window_scales_back_to_canvas() {
        // 640x480 canvas shown at 2x
        assert_eq!(window_to_buffer((1000.0, 500.0), (1280, 960), (640, 480)), Some(Point::new(500, 250)));
        assert_eq!(window_to_buffer((1279.0, 959.0), (1280, 960), (640, 480)), Some(Point::new(639, 479)));
    }

    #[test]
    fn letterbox_bars_map_to_nothing() {
        // 100x100 canvas in a 300x100 window: 100px bars left and right
        assert_eq!(window_to_buffer((50.0, 50.0), (300, 100), (100, 100)), None);
        assert_eq!(window_to_buffer((150.0, 50.0), (300, 100), (100, 100)), Some(Point::new(50, 50)));
        assert_eq!(window_to_buffer((250.0, 50.0), (300, 100), (100, 100)), None);
    }

    #[test]
    fn camera_base_of_another_size_is_mapped() {
        // window still 320x240, canvas swapped for a 640x480 camera frame
        assert_eq!(window_to_buffer((160.0, 120.0), (320, 240), (640, 480)), Some(Point::new(320, 240)));
    }

    fn bank() -> SliderBank {
        let mut sliders = SliderBank::new();
        sliders.create("R", 255, 100);
        sliders
    }

    #[test]
    fn slider_keys_after_an_action_key_still_apply() {
        let mut sliders = bank();
        let (changed, action) = route_keys(&mut sliders, &[Key::S, Key::Right, Key::PageUp], &[Key::S]);
        assert!(changed);
        assert_eq!(action, Some(KeyCode::Char('s')));
        assert_eq!(sliders.get("R"), Some(111));
    }

    #[test]
    fn held_action_key_does_not_repeat() {
        let mut sliders = bank();
        // auto-repeat of a held `s` shows up only in the repeating batch
        let (changed, action) = route_keys(&mut sliders, &[Key::S], &[]);
        assert!(!changed);
        assert_eq!(action, None);

        let (_, action) = route_keys(&mut sliders, &[Key::Escape], &[Key::Escape]);
        assert_eq!(action, Some(KeyCode::Escape));
    }

    #[test]
    fn empty_sizes_map_to_nothing() {
        assert_eq!(window_to_buffer((1.0, 1.0), (0, 0), (10, 10)), None);
        assert_eq!(window_to_buffer((1.0, 1.0), (10, 10), (0, 0)), None);
    }
}
