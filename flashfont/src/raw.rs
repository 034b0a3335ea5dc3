//! Raw little-endian records as they appear in a flash font.
//!
//! Every record here has an alignment of 1 and no internal padding, so they
//! can be written with [`bytemuck::bytes_of`] and read straight out of a byte
//! slice.

use bytemuck_derive::{Pod, Zeroable};

/// The font header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct FontHeader {
    pub version: u8,
    pub max_height: u8,
    number_of_glyphs: [u8; 2],
    wildcard_codepoint: [u8; 2],
}

impl FontHeader {
    pub const RAW_BYTE_LEN: usize = 6;

    pub fn new(version: u8, max_height: u8, number_of_glyphs: u16, wildcard_codepoint: u16) -> Self {
        FontHeader {
            version,
            max_height,
            number_of_glyphs: number_of_glyphs.to_le_bytes(),
            wildcard_codepoint: wildcard_codepoint.to_le_bytes(),
        }
    }

    pub fn number_of_glyphs(&self) -> u16 {
        u16::from_le_bytes(self.number_of_glyphs)
    }

    pub fn wildcard_codepoint(&self) -> u16 {
        u16::from_le_bytes(self.wildcard_codepoint)
    }
}

/// One entry in the offset table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct OffsetEntry {
    codepoint: [u8; 2],
    block_offset: [u8; 2],
}

impl OffsetEntry {
    pub const RAW_BYTE_LEN: usize = 4;

    pub fn new(codepoint: u16, block_offset: u16) -> Self {
        OffsetEntry {
            codepoint: codepoint.to_le_bytes(),
            block_offset: block_offset.to_le_bytes(),
        }
    }

    pub fn codepoint(&self) -> u16 {
        u16::from_le_bytes(self.codepoint)
    }

    /// The glyph's position, in 4-byte blocks from the start of the glyph table.
    pub fn block_offset(&self) -> u16 {
        u16::from_le_bytes(self.block_offset)
    }
}

/// The fixed-size header at the start of each glyph record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct GlyphHeader {
    pub bitmap_width: u8,
    pub bitmap_height: u8,
    pub offset_left: i8,
    pub offset_top: i8,
    rle_flag: u8,
    reserved: [u8; 2],
    pub horizontal_advance: i8,
}

impl GlyphHeader {
    pub const RAW_BYTE_LEN: usize = 8;

    pub fn new(
        bitmap_width: u8,
        bitmap_height: u8,
        offset_left: i8,
        offset_top: i8,
        rle: bool,
        horizontal_advance: i8,
    ) -> Self {
        GlyphHeader {
            bitmap_width,
            bitmap_height,
            offset_left,
            offset_top,
            rle_flag: rle as u8,
            reserved: [0; 2],
            horizontal_advance,
        }
    }

    /// `true` if the payload is run-length encoded.
    pub fn is_rle(&self) -> bool {
        self.rle_flag != 0
    }

    /// The raw flag byte; anything other than 0 or 1 is malformed.
    pub fn rle_flag(&self) -> u8 {
        self.rle_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sizes() {
        assert_eq!(std::mem::size_of::<FontHeader>(), FontHeader::RAW_BYTE_LEN);
        assert_eq!(std::mem::size_of::<OffsetEntry>(), OffsetEntry::RAW_BYTE_LEN);
        assert_eq!(std::mem::size_of::<GlyphHeader>(), GlyphHeader::RAW_BYTE_LEN);
        assert_eq!(std::mem::align_of::<GlyphHeader>(), 1);
    }

    #[test]
    fn header_bytes_are_little_endian() {
        let header = FontHeader::new(2, 12, 0x0102, 0x3456);
        assert_eq!(bytemuck::bytes_of(&header), &[2, 12, 0x02, 0x01, 0x56, 0x34]);

        let entry = OffsetEntry::new(0x41, 0x0203);
        assert_eq!(bytemuck::bytes_of(&entry), &[0x41, 0, 0x03, 0x02]);
    }

    #[test]
    fn glyph_header_layout() {
        let header = GlyphHeader::new(5, 7, -1, 3, true, -2);
        assert_eq!(
            bytemuck::bytes_of(&header),
            &[5, 7, 0xff, 3, 1, 0, 0, 0xfe]
        );
        let read: GlyphHeader = bytemuck::pod_read_unaligned(bytemuck::bytes_of(&header));
        assert!(read.is_rle());
        assert_eq!(read.horizontal_advance, -2);
    }
}
