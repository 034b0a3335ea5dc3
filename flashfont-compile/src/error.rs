use std::{io, path::PathBuf};

use flashfont::{CompileError, ReadError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open font '{}': {source}", path.display())]
    OpenFont {
        path: PathBuf,
        source: freetype::Error,
    },
    #[error("Failed to compile '{}': {source}", path.display())]
    Compile {
        path: PathBuf,
        source: CompileError,
    },
    #[error("'{}' is not a flash font: {source}", path.display())]
    Parse { path: PathBuf, source: ReadError },
    #[error("Failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Glyph U+{codepoint:04X} is corrupt: {source}")]
    CorruptGlyph { codepoint: u16, source: ReadError },
    #[error("{0}")]
    InvalidOptions(CompileError),
    #[error("No glyph for {0:?} and no wildcard glyph to fall back to")]
    MissingGlyph(char),
    #[error("{failed} of {total} fonts failed to compile")]
    Batch { failed: usize, total: usize },
}
