//! Compiling outline fonts into flash fonts.
//!
//! A flash font is a compact, fixed-format binary blob of pre-rasterized
//! monochrome glyph bitmaps, intended for devices that can index into a table
//! but cannot parse or rasterize outline fonts themselves.
//!
//! The compiler is a single pass:
//!
//! - [`select`] decides which codepoints are included,
//! - a [`GlyphSource`] rasterizes each of them,
//! - [`encode`] turns each bitmap into either a plain bit-packed or an
//!   Elias-gamma run-length coded payload, whichever is smaller,
//! - [`FontAssembler`] lays out the header, offset table and glyph table.
//!
//! [`compile`] drives the whole pipeline; [`FlashFont`] reads the result
//! back.
//!
//! # Format
//!
//! All integers are little-endian.
//!
//! ```text
//! FontHeader:   u8 version, u8 max_height, u16 number_of_glyphs, u16 wildcard_codepoint
//! OffsetTable:  [u16 codepoint, u16 block_offset; number_of_glyphs]
//! GlyphTable:   u32 0 (the "missing glyph" block), then for each glyph:
//!               u8 width, u8 height, i8 offset_left, i8 offset_top,
//!               u8 rle_flag, u8 reserved[2], i8 horizontal_advance,
//!               payload (a multiple of 4 bytes)
//! ```
//!
//! Offsets are counted in 4-byte blocks from the start of the glyph table.
//!
//! # Example
//!
//! ```
//! use flashfont::{compile, CompileError, CompileOptions, GlyphSource};
//!
//! fn build_pfo(source: &mut impl GlyphSource) -> Result<Vec<u8>, CompileError> {
//!     let options = CompileOptions::new(12).with_rle(true);
//!     Ok(compile(source, &options)?.into_bytes())
//! }
//! ```

pub mod assemble;
pub mod bitplane;
mod bits;
pub mod compile;
pub mod encode;
mod error;
pub mod raster;
pub mod raw;
pub mod reader;
pub mod record;
pub mod select;

pub use assemble::{CompiledFont, EncodingStats, FontAssembler};
pub use bitplane::BitPlane;
pub use compile::{compile, CompileOptions};
pub use encode::EncodedBitmap;
pub use error::{CompileError, ReadError};
pub use raster::{GlyphSource, RasterGlyph};
pub use reader::{FlashFont, GlyphRef};
pub use record::GlyphRecord;
pub use select::{CodepointFilter, Selection};

/// The format version written into every font header.
pub const VERSION: u8 = 2;

/// The first codepoint considered for inclusion.
pub const MIN_CODEPOINT: u32 = 0x20;

/// The last codepoint considered for inclusion.
pub const MAX_CODEPOINT: u32 = 0xFFFF;

/// The maximum number of glyphs in a single font.
pub const MAX_GLYPHS: usize = 256;

/// The default wildcard codepoint.
///
/// The device draws this glyph for any character the font does not contain,
/// so it is chosen to be a codepoint fonts are unlikely to support.
pub const DEFAULT_WILDCARD_CODEPOINT: u16 = 0x3456;

/// The default ellipsis codepoint (U+2026 HORIZONTAL ELLIPSIS).
pub const DEFAULT_ELLIPSIS_CODEPOINT: u16 = 0x2026;

/// The size in bytes of one glyph table block.
pub const BLOCK_SIZE: usize = 4;
