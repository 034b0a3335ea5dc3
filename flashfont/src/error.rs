//! Errors that occur while compiling or reading flash fonts

use thiserror::Error;

/// An error that aborts compilation.
///
/// No partial output is produced: the header and offset table are only known
/// once every glyph has been processed.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Supplied filter '{pattern}' is not a valid regular expression: {source}")]
    InvalidFilter {
        pattern: String,
        source: regex::Error,
    },

    #[error("Invalid pixel height {0}, expected a value in 1..=255")]
    InvalidHeight(u32),

    #[error("The {role} codepoint U+{codepoint:04X} is outside U+0020..=U+FFFF and would never be included")]
    InvalidReserved { role: &'static str, codepoint: u16 },

    #[error("Glyph U+{codepoint:04X}: {field} {value} does not fit in the glyph record")]
    FieldOverflow {
        codepoint: u32,
        field: &'static str,
        value: i64,
    },

    #[error("Glyph U+{codepoint:04X} would start at block {offset}, beyond the 16-bit offset range")]
    OffsetOverflow { codepoint: u32, offset: u32 },

    #[error("Glyph source failed at U+{codepoint:04X}: {source}")]
    Source {
        codepoint: u32,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Glyph source could not be configured: {0}")]
    SourceSetup(Box<dyn std::error::Error + Send + Sync>),
}

/// An error encountered while reading a compiled flash font.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("An offset was out of bounds")]
    OutOfBounds,

    #[error("Unsupported font version {0}")]
    InvalidVersion(u8),

    #[error("Offset table is not sorted at codepoint U+{0:04X}")]
    UnsortedOffsets(u16),

    #[error("Glyph offset {0} points at the missing-glyph block or past the end of the font")]
    InvalidGlyphOffset(u16),

    #[error("Malformed data: '{0}'")]
    MalformedData(&'static str),
}
