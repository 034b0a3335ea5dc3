//! A glyph source backed by a map, for driving the compiler in tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use flashfont::{GlyphSource, RasterGlyph};

#[derive(Debug, thiserror::Error)]
#[error("could not render U+{0:04X}")]
pub struct RenderFailed(pub u32);

#[derive(Debug, Default)]
pub struct MapSource {
    pub glyphs: BTreeMap<u32, RasterGlyph>,
    /// Rendered for codepoints without a glyph, like a `.notdef` box.
    pub missing: RasterGlyph,
    /// A codepoint that claims support but fails to render.
    pub broken: Option<u32>,
    pub height: Option<u8>,
}

impl MapSource {
    pub fn new(glyphs: impl IntoIterator<Item = (u32, RasterGlyph)>) -> Self {
        MapSource {
            glyphs: glyphs.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl GlyphSource for MapSource {
    type Error = RenderFailed;

    fn set_pixel_height(&mut self, height: u8) -> Result<(), Self::Error> {
        self.height = Some(height);
        Ok(())
    }

    fn is_supported(&mut self, codepoint: u32) -> bool {
        self.glyphs.contains_key(&codepoint) || self.broken == Some(codepoint)
    }

    fn rasterize(&mut self, codepoint: u32) -> Result<RasterGlyph, Self::Error> {
        if self.broken == Some(codepoint) {
            return Err(RenderFailed(codepoint));
        }
        Ok(self
            .glyphs
            .get(&codepoint)
            .cloned()
            .unwrap_or_else(|| self.missing.clone()))
    }
}

/// A `width` x `height` glyph with a one pixel border.
pub fn boxed(width: u32, height: u32) -> RasterGlyph {
    let buffer = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    255
                } else {
                    0
                }
            })
        })
        .collect();
    RasterGlyph::new(width, height, buffer)
        .with_bearings(1, height as i32)
        .with_advance(width as i32 + 2)
}

/// A 5x7 capital A.
pub fn letter_a() -> RasterGlyph {
    #[rustfmt::skip]
    let rows = [
        "..#..",
        ".#.#.",
        "#...#",
        "#...#",
        "#####",
        "#...#",
        "#...#",
    ];
    let buffer = rows
        .iter()
        .flat_map(|row| row.bytes().map(|b| if b == b'#' { 200 } else { 30 }))
        .collect();
    RasterGlyph::new(5, 7, buffer)
        .with_bearings(0, 7)
        .with_advance(6)
}
