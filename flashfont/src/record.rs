//! Glyph records: a header followed by an encoded bitmap.

use crate::bitplane::BitPlane;
use crate::encode::{encode_bitmap, EncodedBitmap, SizeComparison};
use crate::raster::RasterGlyph;
use crate::raw::GlyphHeader;
use crate::{CompileError, BLOCK_SIZE};

/// A single glyph, ready to be written into the glyph table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRecord {
    pub header: GlyphHeader,
    pub bitmap: EncodedBitmap,
    /// Sizes of both encodings, if run-length coding was attempted.
    pub comparison: Option<SizeComparison>,
}

impl GlyphRecord {
    /// Build the record for a rasterized glyph.
    ///
    /// `max_height` is the font's pixel height, used to measure the top
    /// offset down from the top of the line. `tracking` is added to the
    /// advance. Metrics that do not fit their fields are an error.
    pub fn from_raster(
        codepoint: u32,
        glyph: &RasterGlyph,
        max_height: u8,
        tracking: i32,
        allow_rle: bool,
    ) -> Result<Self, CompileError> {
        let width = fit::<u8>(codepoint, "bitmap width", glyph.width as i64)?;
        let height = fit::<u8>(codepoint, "bitmap height", glyph.rows as i64)?;
        let left = fit::<i8>(codepoint, "left offset", glyph.left as i64)?;
        let top = fit::<i8>(
            codepoint,
            "top offset",
            max_height as i64 - glyph.top as i64,
        )?;
        let advance = fit::<i8>(
            codepoint,
            "horizontal advance",
            glyph.advance as i64 + tracking as i64,
        )?;

        let encoding = encode_bitmap(&BitPlane::from_raster(glyph), allow_rle);
        Ok(GlyphRecord {
            header: GlyphHeader::new(width, height, left, top, encoding.bitmap.is_rle(), advance),
            bitmap: encoding.bitmap,
            comparison: encoding.comparison,
        })
    }

    /// The length of the record in bytes; always a multiple of 4.
    pub fn byte_len(&self) -> usize {
        GlyphHeader::RAW_BYTE_LEN + self.bitmap.bytes().len()
    }

    pub fn block_count(&self) -> usize {
        self.byte_len() / BLOCK_SIZE
    }

    /// Append the record's bytes to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(bytemuck::bytes_of(&self.header));
        out.extend_from_slice(self.bitmap.bytes());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        self.write_into(&mut out);
        out
    }
}

fn fit<T: TryFrom<i64>>(codepoint: u32, field: &'static str, value: i64) -> Result<T, CompileError> {
    T::try_from(value).map_err(|_| CompileError::FieldOverflow {
        codepoint,
        field,
        value,
    })
}
