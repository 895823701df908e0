//! Brush parameters published by the render loop and read by the tracking thread.

use parking_lot::RwLock;

use crate::types::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrushParams {
    /// Stroke width in pixels, always >= 1.
    pub thickness: u32,
    pub color: Rgb,
}

impl Default for BrushParams {
    fn default() -> Self {
        Self { thickness: 12, color: Rgb::new(0, 255, 0) }
    }
}

/// Latest brush settings. The tracking callback may read a value one render
/// tick old; that lag is acceptable.
#[derive(Debug, Default)]
pub struct SharedBrush {
    params: RwLock<BrushParams>,
}

impl SharedBrush {
    pub fn new(params: BrushParams) -> Self {
        Self { params: RwLock::new(params) }
    }

    pub fn get(&self) -> BrushParams {
        *self.params.read()
    }

    pub fn publish(&self, params: BrushParams) {
        let mut current = self.params.write();
        if *current != params {
            log::debug!("brush -> thickness={} color={:?}", params.thickness, params.color);
            *current = params;
        }
    }
}
