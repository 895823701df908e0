// Image file I/O on top of the `image` crate, plus conversions between
// `image` RGB buffers and our packed 0x00RRGGBB frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

/// Pack an RGB image as 0x00RRGGBB pixels.
pub fn frame_from_rgb(img: &RgbImage) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    FrameBuffer { width: w as usize, height: h as usize, pixels }
}

/// Unpack a frame back into an RGB image.
pub fn rgb_from_frame(frame: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(frame.width as u32, frame.height as u32, |x, y| {
        let px = frame.pixels[y as usize * frame.width + x as usize];
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    })
}

/// Decode the image at `path`. Fails on unreadable or empty images.
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?
        .to_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::ImageLoad(format!("{}: image is empty", path.display())));
    }
    Ok(frame_from_rgb(&img))
}

/// Write `frame` to `path`. `.jpg`/`.jpeg` use `quality` (1..=100); any other
/// extension is encoded by the format `image` infers from it.
pub fn save_image(path: &Path, frame: &FrameBuffer, quality: u8) -> Result<()> {
    let img = rgb_from_frame(frame);
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));

    let fail = |e: String| Error::ImageSave(format!("{}: {e}", path.display()));
    if is_jpeg {
        let file = File::create(path).map_err(|e| fail(e.to_string()))?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
        img.write_with_encoder(encoder).map_err(|e| fail(e.to_string()))
    } else {
        img.save(path).map_err(|e| fail(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb as Color;

    fn sample() -> FrameBuffer {
        let mut fb = FrameBuffer::filled(6, 4, Color::new(10, 200, 30));
        fb.pixels[0] = Color::new(255, 0, 0).packed();
        fb
    }

    #[test]
    fn png_save_then_load_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        save_image(&path, &sample(), 100).unwrap();
        assert_eq!(load_image(&path).unwrap(), sample());
    }

    #[test]
    fn jpeg_save_produces_a_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.JPG");
        save_image(&path, &sample(), 100).unwrap();
        let back = load_image(&path).unwrap();
        assert_eq!((back.width, back.height), (6, 4));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad(_)));
    }

    #[test]
    fn unwritable_path_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.jpg");
        let err = save_image(&path, &sample(), 90).unwrap_err();
        assert!(matches!(err, Error::ImageSave(_)));
    }
}
