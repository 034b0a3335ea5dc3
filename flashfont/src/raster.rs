//! The interface to an outline rasterizer.

/// A rasterized glyph, before thresholding.
///
/// `buffer` holds one byte of coverage per pixel, row-major, with `pitch`
/// bytes per row. Rasterizers may pad rows, so `pitch` can exceed `width`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterGlyph {
    pub width: u32,
    pub rows: u32,
    pub pitch: u32,
    /// Horizontal distance from the pen position to the left edge of the bitmap.
    pub left: i32,
    /// Vertical distance from the baseline to the top row of the bitmap.
    pub top: i32,
    /// Horizontal advance, in whole pixels.
    pub advance: i32,
    pub buffer: Vec<u8>,
}

impl RasterGlyph {
    /// Create a glyph whose rows are not padded.
    pub fn new(width: u32, rows: u32, buffer: Vec<u8>) -> Self {
        debug_assert_eq!(buffer.len(), (width * rows) as usize);
        RasterGlyph {
            width,
            rows,
            pitch: width,
            buffer,
            ..Default::default()
        }
    }

    /// A glyph with no pixels, such as a space.
    pub fn empty(advance: i32) -> Self {
        RasterGlyph {
            advance,
            ..Default::default()
        }
    }

    pub fn with_bearings(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_advance(mut self, advance: i32) -> Self {
        self.advance = advance;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// A source of rasterized glyphs, keyed by codepoint.
///
/// The compiler calls [`set_pixel_height`](GlyphSource::set_pixel_height)
/// once, then queries codepoints in ascending order.
pub trait GlyphSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Select the pixel height that subsequent glyphs are rendered at.
    fn set_pixel_height(&mut self, height: u8) -> Result<(), Self::Error>;

    /// `true` if the font has an outline for this codepoint.
    fn is_supported(&mut self, codepoint: u32) -> bool;

    /// Render a codepoint.
    ///
    /// For unsupported codepoints this renders whatever the font uses for a
    /// missing glyph.
    fn rasterize(&mut self, codepoint: u32) -> Result<RasterGlyph, Self::Error>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &mut T {
    type Error = T::Error;

    fn set_pixel_height(&mut self, height: u8) -> Result<(), Self::Error> {
        (**self).set_pixel_height(height)
    }

    fn is_supported(&mut self, codepoint: u32) -> bool {
        (**self).is_supported(codepoint)
    }

    fn rasterize(&mut self, codepoint: u32) -> Result<RasterGlyph, Self::Error> {
        (**self).rasterize(codepoint)
    }
}
