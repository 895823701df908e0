// Live camera background.
// Visual expectation: once the camera is enabled, every render tick swaps the
// canvas base layer for the newest camera frame; your strokes stay on top.

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that can hand the render loop a fresh background frame.
pub trait FrameSource {
    /// Next frame, or `None` when the source had nothing this time.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>>;
}

// A small wrapper around nokhwa::Camera so the render loop stays clean.
pub struct CameraCapture {
    cam: Camera,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution (falls back if not exact).
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // Ask for RGB frames, closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // This fails if no device exists at that index.
        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera {index}: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        log::info!("camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self { cam })
    }
}

impl FrameSource for CameraCapture {
    /// Grab one frame (blocks until the camera has one) as 0x00RRGGBB pixels.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        if w == 0 || h == 0 {
            return Ok(None);
        }
        // Pack each RGB<u8> pixel as 0x00RRGGBB.
        let pixels = rgb_img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();

        Ok(Some(FrameBuffer { width: w as usize, height: h as usize, pixels }))
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.cam.stop_stream() {
            log::warn!("camera stop failed: {e}");
        }
    }
}
