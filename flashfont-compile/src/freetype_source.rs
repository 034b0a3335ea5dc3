//! A [`GlyphSource`] backed by FreeType.

use std::path::Path;

use flashfont::{GlyphSource, RasterGlyph};
use freetype::{face::LoadFlag, Face, Library};

pub struct FreeTypeSource {
    face: Face,
    // dropped after the face
    _library: Library,
}

impl FreeTypeSource {
    /// Open the first face in the font file at `path`.
    pub fn open(path: &Path) -> Result<Self, freetype::Error> {
        let library = Library::init()?;
        let face = library.new_face(path, 0)?;
        Ok(Self {
            face,
            _library: library,
        })
    }

    /// The face's family and style names, joined by an underscore.
    pub fn name(&self) -> String {
        let family = self.face.family_name().unwrap_or_default();
        let style = self.face.style_name().unwrap_or_default();
        format!("{family}_{style}")
    }
}

impl GlyphSource for FreeTypeSource {
    type Error = freetype::Error;

    fn set_pixel_height(&mut self, height: u8) -> Result<(), Self::Error> {
        self.face.set_pixel_sizes(0, height as u32)
    }

    fn is_supported(&mut self, codepoint: u32) -> bool {
        self.face.get_char_index(codepoint as usize) != 0
    }

    fn rasterize(&mut self, codepoint: u32) -> Result<RasterGlyph, Self::Error> {
        self.face.load_char(codepoint as usize, LoadFlag::RENDER)?;
        let slot = self.face.glyph();
        let bitmap = slot.bitmap();
        let width = bitmap.width().max(0) as u32;
        let rows = bitmap.rows().max(0) as u32;
        let pitch = bitmap.pitch().unsigned_abs();
        // an empty bitmap has no buffer at all
        let buffer = if rows == 0 || pitch == 0 {
            Vec::new()
        } else {
            bitmap.buffer().to_vec()
        };
        Ok(RasterGlyph {
            width,
            rows,
            pitch,
            left: slot.bitmap_left(),
            top: slot.bitmap_top(),
            // 26.6 fixed point, floored
            advance: (slot.advance().x >> 6) as i32,
            buffer,
        })
    }
}
