//! Reading compiled flash fonts.
//!
//! This mirrors what a device does with a font: find a codepoint in the
//! offset table, jump to its glyph record and decode the bitmap.

use crate::bitplane::BitPlane;
use crate::bits::BitReader;
use crate::raw::{FontHeader, GlyphHeader, OffsetEntry};
use crate::{ReadError, BLOCK_SIZE, VERSION};

/// A parsed flash font.
#[derive(Clone, Copy, Debug)]
pub struct FlashFont<'a> {
    header: FontHeader,
    offsets: &'a [OffsetEntry],
    glyph_table: &'a [u8],
}

impl<'a> FlashFont<'a> {
    /// Parse and validate the header and offset table.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let header_bytes = data
            .get(..FontHeader::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let header: FontHeader = bytemuck::pod_read_unaligned(header_bytes);
        if header.version != VERSION {
            return Err(ReadError::InvalidVersion(header.version));
        }

        let table_end = FontHeader::RAW_BYTE_LEN
            + header.number_of_glyphs() as usize * OffsetEntry::RAW_BYTE_LEN;
        let offsets: &[OffsetEntry] = data
            .get(FontHeader::RAW_BYTE_LEN..table_end)
            .map(bytemuck::cast_slice)
            .ok_or(ReadError::OutOfBounds)?;
        let glyph_table = &data[table_end..];
        if glyph_table.len() < BLOCK_SIZE || glyph_table.len() % BLOCK_SIZE != 0 {
            return Err(ReadError::MalformedData("glyph table is not block aligned"));
        }

        let blocks = glyph_table.len() / BLOCK_SIZE;
        let mut prev: Option<&OffsetEntry> = None;
        for entry in offsets {
            if let Some(prev) = prev {
                if entry.codepoint() <= prev.codepoint() {
                    return Err(ReadError::UnsortedOffsets(entry.codepoint()));
                }
                if entry.block_offset() <= prev.block_offset() {
                    return Err(ReadError::InvalidGlyphOffset(entry.block_offset()));
                }
            }
            let offset = entry.block_offset();
            if offset == 0 || offset as usize + GlyphHeader::RAW_BYTE_LEN / BLOCK_SIZE > blocks {
                return Err(ReadError::InvalidGlyphOffset(offset));
            }
            prev = Some(entry);
        }

        Ok(FlashFont {
            header,
            offsets,
            glyph_table,
        })
    }

    pub fn header(&self) -> &FontHeader {
        &self.header
    }

    pub fn offsets(&self) -> &'a [OffsetEntry] {
        self.offsets
    }

    pub fn max_height(&self) -> u8 {
        self.header.max_height
    }

    pub fn wildcard_codepoint(&self) -> u16 {
        self.header.wildcard_codepoint()
    }

    /// The glyph for a codepoint, if the font has one.
    pub fn glyph(&self, codepoint: u16) -> Option<GlyphRef<'a>> {
        let idx = self
            .offsets
            .binary_search_by_key(&codepoint, OffsetEntry::codepoint)
            .ok()?;
        self.glyph_at_index(idx)
    }

    /// The glyph for a codepoint, or the wildcard glyph if it is missing.
    pub fn glyph_or_wildcard(&self, codepoint: u16) -> Option<GlyphRef<'a>> {
        self.glyph(codepoint)
            .or_else(|| self.glyph(self.wildcard_codepoint()))
    }

    /// Iterate over every glyph in codepoint order.
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphRef<'a>> + '_ {
        (0..self.offsets.len()).filter_map(move |idx| self.glyph_at_index(idx))
    }

    fn glyph_at_index(&self, idx: usize) -> Option<GlyphRef<'a>> {
        let entry = self.offsets.get(idx)?;
        let start = entry.block_offset() as usize * BLOCK_SIZE;
        let end = self
            .offsets
            .get(idx + 1)
            .map(|next| next.block_offset() as usize * BLOCK_SIZE)
            .unwrap_or(self.glyph_table.len());
        let record = self.glyph_table.get(start..end)?;
        let header_bytes = record.get(..GlyphHeader::RAW_BYTE_LEN)?;
        Some(GlyphRef {
            codepoint: entry.codepoint(),
            block_offset: entry.block_offset(),
            header: bytemuck::pod_read_unaligned(header_bytes),
            payload: &record[GlyphHeader::RAW_BYTE_LEN..],
        })
    }
}

/// A single glyph record in a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRef<'a> {
    pub codepoint: u16,
    pub block_offset: u16,
    pub header: GlyphHeader,
    pub payload: &'a [u8],
}

impl GlyphRef<'_> {
    /// The total size of the record, in blocks.
    pub fn block_count(&self) -> usize {
        (GlyphHeader::RAW_BYTE_LEN + self.payload.len()) / BLOCK_SIZE
    }

    /// Decode the bitmap, truncated to `width * height` pixels.
    pub fn bit_plane(&self) -> Result<BitPlane, ReadError> {
        let width = self.header.bitmap_width as u32;
        let height = self.header.bitmap_height as u32;
        let count = width as usize * height as usize;
        let bits = match self.header.rle_flag() {
            0 => decode_plain(self.payload, count)?,
            1 => decode_run_length(self.payload, count)?,
            _ => return Err(ReadError::MalformedData("rle flag is not 0 or 1")),
        };
        Ok(BitPlane::new(width, height, bits))
    }
}

/// Unpack `count` bits from little-endian 32-bit words.
pub fn decode_plain(payload: &[u8], count: usize) -> Result<Vec<bool>, ReadError> {
    if payload.len() * 8 < count {
        return Err(ReadError::MalformedData("plain bitmap is too short"));
    }
    Ok((0..count)
        .map(|i| payload[i / 8] & (1 << (i % 8)) != 0)
        .collect())
}

/// Expand a run-length coded stream into `count` bits.
pub fn decode_run_length(payload: &[u8], count: usize) -> Result<Vec<bool>, ReadError> {
    let mut bits = Vec::with_capacity(count);
    if count == 0 {
        return Ok(bits);
    }
    let mut reader = BitReader::new(payload);
    let mut current = reader
        .read_bit()
        .ok_or(ReadError::MalformedData("empty run-length stream"))?;
    while bits.len() < count {
        let run = reader
            .read_elias_gamma()
            .ok_or(ReadError::MalformedData("run-length stream ended early"))?;
        let run = (run as usize).min(count - bits.len());
        bits.extend(std::iter::repeat_n(current, run));
        current = !current;
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_bitmap, encode_run_length, pack_plain};
    use crate::{FontAssembler, GlyphRecord, RasterGlyph};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_bytes_are_words_in_lsb_order() {
        // little-endian words with bit 0 first are the same as LSB-first bytes
        let bits: Vec<bool> = (0..40).map(|i| i % 3 == 0).collect();
        assert_eq!(decode_plain(&pack_plain(&bits), 40).unwrap(), bits);
    }

    #[test]
    fn run_length_decodes() {
        let bits = vec![false, false, false, true, true, false, true, true, true, true];
        let encoded = encode_run_length(&bits).unwrap();
        assert_eq!(decode_run_length(&encoded, bits.len()).unwrap(), bits);
    }

    #[test]
    fn truncated_streams_are_errors() {
        assert!(decode_plain(&[0xff], 9).is_err());
        assert!(decode_run_length(&[], 1).is_err());
        // initial bit 1, then nothing but padding
        assert!(decode_run_length(&[0x80, 0, 0, 0], 4).is_err());
    }

    #[test]
    fn reads_assembled_font() {
        let mut assembler = FontAssembler::new(10, 0x3456);
        let glyph = RasterGlyph::new(4, 2, vec![255, 0, 0, 255, 0, 255, 255, 0])
            .with_bearings(0, 8)
            .with_advance(5);
        let record = GlyphRecord::from_raster(0x41, &glyph, 10, 0, false).unwrap();
        assembler.push(0x41, &record).unwrap();
        let fallback = GlyphRecord::from_raster(0x3456, &RasterGlyph::empty(3), 10, 0, false)
            .unwrap();
        assembler.push(0x3456, &fallback).unwrap();
        let bytes = assembler.finish().into_bytes();

        let font = FlashFont::new(&bytes).unwrap();
        assert_eq!(font.max_height(), 10);
        assert_eq!(font.header().number_of_glyphs(), 2);
        let a = font.glyph(0x41).unwrap();
        assert_eq!(a.block_offset, 1);
        assert_eq!(a.header.offset_top, 2);
        assert_eq!(a.payload.len(), 4);
        assert_eq!(
            a.bit_plane().unwrap(),
            BitPlane::from_raster(&glyph)
        );
        assert_eq!(font.glyph(0x42), None);
        assert_eq!(font.glyph_or_wildcard(0x42).unwrap().codepoint, 0x3456);
        assert_eq!(font.glyphs().count(), 2);
    }

    #[test]
    fn rle_payload_round_trip() {
        let glyph = RasterGlyph::new(8, 8, vec![0; 64]);
        let plane = BitPlane::from_raster(&glyph);
        let encoding = encode_bitmap(&plane, true);
        assert!(encoding.bitmap.is_rle());
        assert_eq!(decode_run_length(encoding.bitmap.bytes(), 64).unwrap(), plane.bits());
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(FlashFont::new(&[2, 12]).unwrap_err(), ReadError::OutOfBounds);
        assert_eq!(
            FlashFont::new(&[3, 12, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap_err(),
            ReadError::InvalidVersion(3)
        );
        // one glyph pointing at the sentinel block
        let bytes = [2, 12, 1, 0, 0x56, 0x34, 0x41, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            FlashFont::new(&bytes).unwrap_err(),
            ReadError::InvalidGlyphOffset(0)
        );
    }
}
