//! Choosing which codepoints end up in a font.

use regex::Regex;

use crate::raster::GlyphSource;
use crate::{CompileError, MAX_CODEPOINT, MAX_GLYPHS, MIN_CODEPOINT};

/// A filter on the characters included in a font.
///
/// The pattern must match at the start of the single-character string for
/// each codepoint.
#[derive(Clone, Debug)]
pub struct CodepointFilter {
    pattern: String,
    regex: Regex,
}

impl CodepointFilter {
    /// Compile a filter, returning `None` for the match-everything pattern `.*`.
    pub fn new(pattern: &str) -> Result<Option<Self>, CompileError> {
        if pattern == ".*" {
            return Ok(None);
        }
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
            CompileError::InvalidFilter {
                pattern: pattern.to_owned(),
                source,
            }
        })?;
        Ok(Some(CodepointFilter {
            pattern: pattern.to_owned(),
            regex,
        }))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// `true` if the character for this codepoint matches.
    ///
    /// Surrogates are not characters and never match.
    pub fn matches(&self, codepoint: u32) -> bool {
        let Some(c) = char::from_u32(codepoint) else {
            return false;
        };
        let mut buf = [0u8; 4];
        self.regex.is_match(c.encode_utf8(&mut buf))
    }
}

/// The outcome of considering one codepoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The font has a glyph for the codepoint.
    Supported,
    /// The wildcard codepoint, which the font has no glyph for; whatever the
    /// source renders for a missing glyph is used instead.
    WildcardFallback,
    /// Not in the font; left out.
    Unsupported,
}

impl Selection {
    pub fn is_included(self) -> bool {
        !matches!(self, Selection::Unsupported)
    }
}

/// Which codepoints are always candidates, and which ones must pass a filter.
#[derive(Clone, Debug)]
pub struct CodepointSelector<'a> {
    pub wildcard: u16,
    pub ellipsis: u16,
    pub filter: Option<&'a CodepointFilter>,
}

impl CodepointSelector<'_> {
    /// `true` if the codepoint should be looked up in the font at all.
    pub fn is_candidate(&self, codepoint: u32) -> bool {
        if self.is_reserved(codepoint) {
            return true;
        }
        self.filter
            .map(|filter| filter.matches(codepoint))
            .unwrap_or(true)
    }

    pub fn is_reserved(&self, codepoint: u32) -> bool {
        codepoint == self.wildcard as u32 || codepoint == self.ellipsis as u32
    }

    /// Decide how a candidate codepoint is handled.
    pub fn classify<S: GlyphSource>(&self, source: &mut S, codepoint: u32) -> Selection {
        if source.is_supported(codepoint) {
            Selection::Supported
        } else if codepoint == self.wildcard as u32 {
            Selection::WildcardFallback
        } else {
            Selection::Unsupported
        }
    }

    /// Walk the codepoint range in ascending order and return every included
    /// codepoint, stopping once [`MAX_GLYPHS`] have been accepted.
    pub fn select<S: GlyphSource>(&self, source: &mut S) -> Vec<(u32, Selection)> {
        let mut selected = Vec::new();
        for codepoint in MIN_CODEPOINT..=MAX_CODEPOINT {
            if selected.len() == MAX_GLYPHS {
                log::info!(
                    "Reached the limit of {MAX_GLYPHS} glyphs, stopping before U+{codepoint:04X}"
                );
                break;
            }
            if !self.is_candidate(codepoint) {
                continue;
            }
            let selection = self.classify(source, codepoint);
            if !selection.is_included() {
                continue;
            }
            if selection == Selection::WildcardFallback {
                log::debug!("No glyph for wildcard U+{codepoint:04X}, using fallback");
            }
            selected.push((codepoint, selection));
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterGlyph;
    use rstest::rstest;

    /// Supports a fixed set of codepoints.
    struct Supports(Vec<u32>);

    impl GlyphSource for Supports {
        type Error = std::convert::Infallible;

        fn set_pixel_height(&mut self, _: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn is_supported(&mut self, codepoint: u32) -> bool {
            self.0.contains(&codepoint)
        }

        fn rasterize(&mut self, _: u32) -> Result<RasterGlyph, Self::Error> {
            Ok(RasterGlyph::default())
        }
    }

    fn selector(filter: Option<&CodepointFilter>) -> CodepointSelector<'_> {
        CodepointSelector {
            wildcard: 0x3456,
            ellipsis: 0x2026,
            filter,
        }
    }

    #[rstest]
    #[case("[A-Z]", 'Q', true)]
    #[case("[A-Z]", 'q', false)]
    #[case("[a-z0-9]", '7', true)]
    #[case("\\p{Greek}", 'λ', true)]
    #[case("$", 'a', false)]
    #[case("a|b", 'b', true)]
    fn filter_matches(#[case] pattern: &str, #[case] c: char, #[case] expected: bool) {
        let filter = CodepointFilter::new(pattern).unwrap().unwrap();
        assert_eq!(filter.matches(c as u32), expected);
    }

    #[test]
    fn only_unsupported_is_excluded() {
        assert!(Selection::Supported.is_included());
        assert!(Selection::WildcardFallback.is_included());
        assert!(!Selection::Unsupported.is_included());
    }

    #[test]
    fn match_all_is_no_filter() {
        assert!(CodepointFilter::new(".*").unwrap().is_none());
    }

    #[test]
    fn invalid_filter() {
        let err = CodepointFilter::new("[a-").unwrap_err();
        assert!(matches!(err, CompileError::InvalidFilter { ref pattern, .. } if pattern == "[a-"));
    }

    #[test]
    fn surrogates_never_match() {
        let filter = CodepointFilter::new(".").unwrap().unwrap();
        assert!(!filter.matches(0xD800));
        assert!(filter.matches(0xE000));
    }

    #[test]
    fn unsupported_are_skipped() {
        let mut source = Supports(vec![0x41, 0x43]);
        let selected = selector(None).select(&mut source);
        assert_eq!(
            selected,
            vec![
                (0x41, Selection::Supported),
                (0x43, Selection::Supported),
                (0x3456, Selection::WildcardFallback),
            ]
        );
    }

    #[test]
    fn reserved_bypass_filter() {
        let filter = CodepointFilter::new("x").unwrap().unwrap();
        let mut source = Supports(vec![0x41, 0x78, 0x2026, 0x3456]);
        let selected = selector(Some(&filter)).select(&mut source);
        assert_eq!(
            selected,
            vec![
                (0x78, Selection::Supported),
                (0x2026, Selection::Supported),
                (0x3456, Selection::Supported),
            ]
        );
    }

    #[test]
    fn cap_drops_everything_after() {
        // 0x20..0x120 fills the font before either reserved codepoint
        let mut source = Supports((0x20..0x200).chain([0x2026, 0x3456]).collect());
        let selected = selector(None).select(&mut source);
        assert_eq!(selected.len(), MAX_GLYPHS);
        assert_eq!(selected.first(), Some(&(0x20, Selection::Supported)));
        assert_eq!(selected.last(), Some(&(0x11F, Selection::Supported)));
        assert!(!selected.iter().any(|(cp, _)| *cp == 0x3456));
    }
}
