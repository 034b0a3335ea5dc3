//! The compiler pipeline: select, rasterize, encode, assemble.

use rayon::prelude::*;

use crate::assemble::{CompiledFont, FontAssembler};
use crate::raster::{GlyphSource, RasterGlyph};
use crate::record::GlyphRecord;
use crate::select::{CodepointFilter, CodepointSelector, Selection};
use crate::{
    CompileError, DEFAULT_ELLIPSIS_CODEPOINT, DEFAULT_WILDCARD_CODEPOINT, MAX_CODEPOINT,
    MIN_CODEPOINT,
};

/// Settings for a single compilation.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// The pixel height glyphs are rendered at.
    pub height: u32,
    /// Added to every glyph's horizontal advance.
    pub tracking: i32,
    pub filter: Option<CodepointFilter>,
    /// Whether run-length encoding may be used.
    pub rle: bool,
    pub wildcard: u16,
    pub ellipsis: u16,
}

impl CompileOptions {
    pub fn new(height: u32) -> Self {
        CompileOptions {
            height,
            tracking: 0,
            filter: None,
            rle: false,
            wildcard: DEFAULT_WILDCARD_CODEPOINT,
            ellipsis: DEFAULT_ELLIPSIS_CODEPOINT,
        }
    }

    pub fn with_tracking(mut self, tracking: i32) -> Self {
        self.tracking = tracking;
        self
    }

    /// Only include characters matching `pattern` (plus the reserved codepoints).
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, CompileError> {
        self.filter = CodepointFilter::new(pattern)?;
        Ok(self)
    }

    pub fn with_rle(mut self, rle: bool) -> Self {
        self.rle = rle;
        self
    }

    pub fn with_reserved(mut self, wildcard: u16, ellipsis: u16) -> Self {
        self.wildcard = wildcard;
        self.ellipsis = ellipsis;
        self
    }

    /// The height as stored in the header.
    pub fn max_height(&self) -> Result<u8, CompileError> {
        u8::try_from(self.height)
            .ok()
            .filter(|height| *height > 0)
            .ok_or(CompileError::InvalidHeight(self.height))
    }

    /// Check that the wildcard and ellipsis fall inside the enumerated range.
    pub fn check_reserved(&self) -> Result<(), CompileError> {
        for (role, codepoint) in [("wildcard", self.wildcard), ("ellipsis", self.ellipsis)] {
            if !(MIN_CODEPOINT..=MAX_CODEPOINT).contains(&(codepoint as u32)) {
                return Err(CompileError::InvalidReserved { role, codepoint });
            }
        }
        Ok(())
    }

    fn selector(&self) -> CodepointSelector<'_> {
        CodepointSelector {
            wildcard: self.wildcard,
            ellipsis: self.ellipsis,
            filter: self.filter.as_ref(),
        }
    }
}

/// Compile a flash font from a glyph source.
///
/// Selection and rasterization run in codepoint order on the calling thread;
/// encoding runs in parallel and is collected back into that order before
/// the tables are assembled.
pub fn compile<S: GlyphSource>(
    source: &mut S,
    options: &CompileOptions,
) -> Result<CompiledFont, CompileError> {
    let max_height = options.max_height()?;
    options.check_reserved()?;
    source
        .set_pixel_height(max_height)
        .map_err(|e| CompileError::SourceSetup(Box::new(e)))?;

    let selected = options.selector().select(source);
    let rasters = selected
        .into_iter()
        .map(|(codepoint, selection)| {
            let glyph = source
                .rasterize(codepoint)
                .map_err(|e| CompileError::Source {
                    codepoint,
                    source: Box::new(e),
                })?;
            if selection == Selection::WildcardFallback && glyph.is_empty() {
                log::warn!("Fallback for wildcard U+{codepoint:04X} has no pixels");
            }
            Ok((codepoint, glyph))
        })
        .collect::<Result<Vec<(u32, RasterGlyph)>, CompileError>>()?;

    let records = rasters
        .par_iter()
        .map(|(codepoint, glyph)| {
            GlyphRecord::from_raster(*codepoint, glyph, max_height, options.tracking, options.rle)
                .map(|record| (*codepoint, record))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut assembler = FontAssembler::new(max_height, options.wildcard);
    for (codepoint, record) in &records {
        assembler.push(*codepoint, record)?;
    }
    let font = assembler.finish();

    let stats = font.stats();
    log::info!(
        "Compiled {} glyphs at {max_height}px into {} bytes",
        stats.glyph_count,
        font.as_bytes().len()
    );
    if let Some(ratio) = stats.rle_ratio() {
        log::info!(
            "{} of {} glyphs run-length encoded, {ratio:.1}% of plain size",
            stats.rle_glyphs,
            stats.compared_glyphs
        );
    }
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_limits() {
        assert!(matches!(
            CompileOptions::new(0).max_height(),
            Err(CompileError::InvalidHeight(0))
        ));
        assert!(matches!(
            CompileOptions::new(256).max_height(),
            Err(CompileError::InvalidHeight(256))
        ));
        assert_eq!(CompileOptions::new(255).max_height().unwrap(), 255);
    }

    #[test]
    fn reserved_limits() {
        let options = CompileOptions::new(12);
        assert!(options.check_reserved().is_ok());
        assert!(options.clone().with_reserved(0x20, 0xFFFF).check_reserved().is_ok());
        assert!(matches!(
            options.clone().with_reserved(0x1F, 0x2026).check_reserved(),
            Err(CompileError::InvalidReserved {
                role: "wildcard",
                codepoint: 0x1F
            })
        ));
        assert!(matches!(
            options.with_reserved(0x3456, 0).check_reserved(),
            Err(CompileError::InvalidReserved { role: "ellipsis", .. })
        ));
    }

    #[test]
    fn builder() {
        let options = CompileOptions::new(14)
            .with_tracking(-1)
            .with_rle(true)
            .with_filter("[0-9]")
            .unwrap();
        assert_eq!(options.tracking, -1);
        assert!(options.rle);
        assert_eq!(options.filter.as_ref().map(|f| f.pattern()), Some("[0-9]"));
        assert!(CompileOptions::new(14).with_filter("(").is_err());
    }
}
