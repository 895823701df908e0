// Software drawing utilities on packed 0x00RRGGBB frames.
// Visual effects provided here:
// 1) Thick brush lines (the strokes you paint).
// 2) Pointer markers: a down-triangle for the brush, a square for the eraser.
// 3) Saturating additive layer blend (base image + paint layer).
// 4) A tiny 5x7 bitmap font for the slider HUD.

use crate::types::{FrameBuffer, Point};

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Walk the Bresenham line from p0 to p1, calling `plot` on every cell.
fn bresenham(p0: Point, p1: Point, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (p0.x, p0.y);
    let (x1, y1) = (p1.x, p1.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        plot(x0, y0);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a thin line between p0 and p1 using Bresenham.
/// Visual: a straight 1-pixel line.
pub fn draw_line(fb: &mut FrameBuffer, p0: Point, p1: Point, color: u32) {
    bresenham(p0, p1, |x, y| put_pixel(fb, x, y, color));
}

/// Fill a solid disc of the given diameter centered at (cx,cy).
/// Diameter 1 is a single pixel; clipped at the frame edges.
pub fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, diameter: u32, color: u32) {
    let r = diameter.max(1) as f32 / 2.0;
    let r2 = r * r;
    let reach = r.floor() as i32;
    for y in (cy - reach)..=(cy + reach) {
        for x in (cx - reach)..=(cx + reach) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Draw a line `thickness` pixels wide with round caps.
/// Visual: a brush stroke; we stamp a disc at every Bresenham step.
pub fn draw_thick_line(fb: &mut FrameBuffer, p0: Point, p1: Point, thickness: u32, color: u32) {
    if thickness <= 1 {
        draw_line(fb, p0, p1, color);
        return;
    }
    bresenham(p0, p1, |x, y| fill_disc(fb, x, y, thickness, color));
}

/// Which outline to draw at the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    /// Brush mode: a triangle pointing down at the pen tip.
    TriangleDown,
    /// Eraser mode: a square block.
    Square,
}

/// Draw an outlined marker of `size` pixels centered at `center`.
pub fn draw_marker(
    fb: &mut FrameBuffer,
    center: Point,
    shape: MarkerShape,
    size: u32,
    thickness: u32,
    color: u32,
) {
    let h = (size / 2) as i32;
    let (cx, cy) = (center.x, center.y);
    let top_left = Point::new(cx - h, cy - h);
    let top_right = Point::new(cx + h, cy - h);

    match shape {
        MarkerShape::Square => {
            let bottom_right = Point::new(cx + h, cy + h);
            let bottom_left = Point::new(cx - h, cy + h);
            draw_thick_line(fb, top_left, top_right, thickness, color);
            draw_thick_line(fb, top_right, bottom_right, thickness, color);
            draw_thick_line(fb, bottom_right, bottom_left, thickness, color);
            draw_thick_line(fb, bottom_left, top_left, thickness, color);
        }
        MarkerShape::TriangleDown => {
            let tip = Point::new(cx, cy + h);
            draw_thick_line(fb, top_left, top_right, thickness, color);
            draw_thick_line(fb, top_right, tip, thickness, color);
            draw_thick_line(fb, tip, top_left, thickness, color);
        }
    }
}

/// Additive blend of two packed pixels with saturation to 255 per channel.
#[inline]
pub fn add_saturating(a: u32, b: u32) -> u32 {
    let r = (((a >> 16) & 0xFF) + ((b >> 16) & 0xFF)).min(255);
    let g = (((a >> 8) & 0xFF) + ((b >> 8) & 0xFF)).min(255);
    let bl = ((a & 0xFF) + (b & 0xFF)).min(255);
    (r << 16) | (g << 8) | bl
}

/// dst = base + overlay, pixel-wise, saturating. All three must share a size.
/// Visual: strokes show on top of the image; black paint leaves the image untouched.
pub fn blend_additive(base: &FrameBuffer, overlay: &FrameBuffer, dst: &mut FrameBuffer) {
    debug_assert!(base.same_size(overlay) && base.same_size(dst));
    for ((out, &b), &o) in dst.pixels.iter_mut().zip(&base.pixels).zip(&overlay.pixels) {
        *out = add_saturating(b, o);
    }
}

/* ---------- 5x7 bitmap font (subset needed for "R 255  G 0  B 0  SIZE 12") ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Slider labels
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),

        // Punctuation: space, selection arrow, colon
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '>' => g!(0b01000,0b00100,0b00010,0b00001,0b00010,0b00100,0b01000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass offset by (1,1) in black, then the glyph itself
        for (offset, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
