//! Encoding glyph bitmaps.
//!
//! Each glyph is stored in one of two ways, flagged per glyph:
//!
//! - **plain**: the bits packed into little-endian 32-bit words, first pixel
//!   in bit 0, with the last word zero-padded.
//! - **run-length**: the value of the first pixel, followed by the lengths
//!   of alternating runs of equal pixels, each written with Elias gamma
//!   coding, zero-padded to a whole number of 32-bit words.
//!
//! The run-length form is only used when it is strictly smaller.

use crate::bitplane::BitPlane;
use crate::bits::BitWriter;
use crate::BLOCK_SIZE;

const BITS_PER_BLOCK: usize = BLOCK_SIZE * 8;

/// An encoded glyph payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodedBitmap {
    Plain(Vec<u8>),
    RunLength(Vec<u8>),
}

impl EncodedBitmap {
    pub fn bytes(&self) -> &[u8] {
        match self {
            EncodedBitmap::Plain(bytes) | EncodedBitmap::RunLength(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            EncodedBitmap::Plain(bytes) | EncodedBitmap::RunLength(bytes) => bytes,
        }
    }

    pub fn is_rle(&self) -> bool {
        matches!(self, EncodedBitmap::RunLength(_))
    }

    /// The size of the payload in 4-byte blocks.
    pub fn block_count(&self) -> usize {
        self.bytes().len() / BLOCK_SIZE
    }
}

/// The sizes of both candidate encodings of a bitmap, in blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeComparison {
    pub plain_blocks: usize,
    pub rle_blocks: usize,
}

/// The chosen encoding of a bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoding {
    pub bitmap: EncodedBitmap,
    /// Present if a run-length encoding was attempted.
    pub comparison: Option<SizeComparison>,
}

/// The number of blocks a plain `width` x `height` bitmap occupies.
pub fn plain_block_count(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(BITS_PER_BLOCK)
}

/// Pack bits into little-endian 32-bit words, first bit in the lowest bit.
pub fn pack_plain(bits: &[bool]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bits.len().div_ceil(BITS_PER_BLOCK) * BLOCK_SIZE);
    for chunk in bits.chunks(BITS_PER_BLOCK) {
        let word = chunk
            .iter()
            .enumerate()
            .fold(0u32, |word, (i, bit)| word | ((*bit as u32) << i));
        out.extend_from_slice(&word.to_le_bytes());
    }
    out
}

/// Run-length encode bits, returning `None` if there are none.
pub fn encode_run_length(bits: &[bool]) -> Option<Vec<u8>> {
    let (&first, rest) = bits.split_first()?;
    let mut writer = BitWriter::default();
    writer.push(first);

    let mut current = first;
    let mut run = 1u32;
    for &bit in rest {
        if bit == current {
            run += 1;
        } else {
            writer.write_elias_gamma(run);
            current = bit;
            run = 1;
        }
    }
    writer.write_elias_gamma(run);
    Some(writer.finish())
}

/// Encode a bitmap, choosing the smaller representation.
///
/// Run-length coding is only considered when `allow_rle` is set and the
/// bitmap has at least one pixel, and is only chosen when it needs strictly
/// fewer blocks than `width * height` bits packed plainly.
pub fn encode_bitmap(plane: &BitPlane, allow_rle: bool) -> Encoding {
    let mut comparison = None;
    if allow_rle {
        if let Some(rle) = encode_run_length(plane.bits()) {
            let sizes = SizeComparison {
                plain_blocks: plain_block_count(plane.width(), plane.height()),
                rle_blocks: rle.len() / BLOCK_SIZE,
            };
            if sizes.rle_blocks < sizes.plain_blocks {
                return Encoding {
                    bitmap: EncodedBitmap::RunLength(rle),
                    comparison: Some(sizes),
                };
            }
            comparison = Some(sizes);
        }
    }
    Encoding {
        bitmap: EncodedBitmap::Plain(pack_plain(plane.bits())),
        comparison,
    }
}
