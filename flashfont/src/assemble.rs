//! Laying out the header, offset table and glyph table.

use crate::encode::SizeComparison;
use crate::raw::{FontHeader, OffsetEntry};
use crate::record::GlyphRecord;
use crate::{CompileError, BLOCK_SIZE, MAX_GLYPHS, VERSION};

/// Running totals of how glyphs were encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodingStats {
    pub glyph_count: usize,
    /// Glyphs stored run-length encoded.
    pub rle_glyphs: usize,
    /// Glyphs for which run-length coding was attempted.
    pub compared_glyphs: usize,
    /// Run-length blocks summed over the compared glyphs.
    pub rle_blocks: usize,
    /// Plain blocks summed over the compared glyphs.
    pub plain_blocks: usize,
}

impl EncodingStats {
    fn record(&mut self, glyph: &GlyphRecord) {
        self.glyph_count += 1;
        if glyph.bitmap.is_rle() {
            self.rle_glyphs += 1;
        }
        if let Some(sizes) = glyph.comparison {
            self.compared_glyphs += 1;
            self.rle_blocks += sizes.rle_blocks;
            self.plain_blocks += sizes.plain_blocks;
        }
    }

    /// Run-length size as a percentage of plain size, over compared glyphs.
    pub fn rle_ratio(&self) -> Option<f64> {
        (self.plain_blocks > 0).then(|| self.rle_blocks as f64 / self.plain_blocks as f64 * 100.)
    }
}

/// Accumulates glyph records into a font.
///
/// Glyphs must be pushed in ascending codepoint order. The first block of
/// the glyph table is reserved as the "missing glyph" marker, so the first
/// glyph lands at block 1.
#[derive(Clone, Debug)]
pub struct FontAssembler {
    max_height: u8,
    wildcard: u16,
    next_offset: u32,
    offsets: Vec<OffsetEntry>,
    glyph_table: Vec<u8>,
    stats: EncodingStats,
}

impl FontAssembler {
    pub fn new(max_height: u8, wildcard: u16) -> Self {
        FontAssembler {
            max_height,
            wildcard,
            next_offset: 1,
            offsets: Vec::new(),
            glyph_table: vec![0; BLOCK_SIZE],
            stats: EncodingStats::default(),
        }
    }

    /// The block offset the next glyph will be written at.
    pub fn next_offset(&self) -> u32 {
        self.next_offset
    }

    /// Append a glyph.
    pub fn push(&mut self, codepoint: u32, glyph: &GlyphRecord) -> Result<(), CompileError> {
        let overflow = CompileError::OffsetOverflow {
            codepoint,
            offset: self.next_offset,
        };
        let block_offset = u16::try_from(self.next_offset).map_err(|_| overflow)?;
        let codepoint16 = u16::try_from(codepoint).map_err(|_| CompileError::FieldOverflow {
            codepoint,
            field: "codepoint",
            value: codepoint as i64,
        })?;
        debug_assert!(self.offsets.len() < MAX_GLYPHS);
        debug_assert!(self
            .offsets
            .last()
            .map(|last| last.codepoint() < codepoint16)
            .unwrap_or(true));

        let sizes = size_note(glyph.comparison);
        log::debug!(
            "U+{codepoint:04X} ({}x{}) at block {block_offset}, {} blocks{}{sizes}",
            glyph.header.bitmap_width,
            glyph.header.bitmap_height,
            glyph.block_count(),
            if glyph.bitmap.is_rle() { " (rle)" } else { "" },
        );
        self.offsets.push(OffsetEntry::new(codepoint16, block_offset));
        glyph.write_into(&mut self.glyph_table);
        self.next_offset += glyph.block_count() as u32;
        self.stats.record(glyph);
        Ok(())
    }

    /// Write out the header, offset table and glyph table.
    pub fn finish(self) -> CompiledFont {
        debug_assert_eq!(self.glyph_table.len(), self.next_offset as usize * BLOCK_SIZE);
        let header = FontHeader::new(
            VERSION,
            self.max_height,
            self.offsets.len() as u16,
            self.wildcard,
        );
        let mut bytes = Vec::with_capacity(
            FontHeader::RAW_BYTE_LEN
                + self.offsets.len() * OffsetEntry::RAW_BYTE_LEN
                + self.glyph_table.len(),
        );
        bytes.extend_from_slice(bytemuck::bytes_of(&header));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.offsets));
        bytes.extend_from_slice(&self.glyph_table);
        CompiledFont {
            bytes,
            stats: self.stats,
        }
    }
}

/// Both encoding sizes and their ratio, for the per-glyph log line.
fn size_note(comparison: Option<SizeComparison>) -> String {
    match comparison {
        Some(sizes) => format!(
            ", rle {} plain {} ({:.0}%)",
            sizes.rle_blocks,
            sizes.plain_blocks,
            sizes.rle_blocks as f64 / sizes.plain_blocks.max(1) as f64 * 100.
        ),
        None => String::new(),
    }
}

/// A finished flash font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledFont {
    bytes: Vec<u8>,
    stats: EncodingStats,
}

impl CompiledFont {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn stats(&self) -> &EncodingStats {
        &self.stats
    }
}
