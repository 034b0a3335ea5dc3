//! One bit per pixel glyph images.

use crate::raster::RasterGlyph;

/// Coverage values above this are foreground.
pub const THRESHOLD: u8 = 127;

/// `true` if a coverage value is drawn as foreground.
#[inline]
pub fn is_foreground(coverage: u8) -> bool {
    coverage > THRESHOLD
}

/// A thresholded glyph bitmap.
///
/// The bits are the source buffer flattened in memory order. When the
/// rasterizer pads its rows (`pitch > width`) the padding pixels are part of
/// the sequence, exactly as the device-side decoder expects them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitPlane {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BitPlane {
    pub fn new(width: u32, height: u32, bits: Vec<bool>) -> Self {
        BitPlane {
            width,
            height,
            bits,
        }
    }

    /// Threshold a rasterized glyph.
    pub fn from_raster(glyph: &RasterGlyph) -> Self {
        Self::from_coverage(glyph.width, glyph.rows, &glyph.buffer)
    }

    /// Threshold a buffer of coverage values.
    pub fn from_coverage(width: u32, height: u32, coverage: &[u8]) -> Self {
        BitPlane {
            width,
            height,
            bits: coverage.iter().copied().map(is_foreground).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The number of pixels in the declared `width * height` area.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The pixel at `(x, y)`, using `width` as the row length.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.bits.get(idx).copied()
    }

    /// Render the plane as rows of `#` and `.`.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.area() + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.get(x, y).unwrap_or(false) {
                    '#'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}
