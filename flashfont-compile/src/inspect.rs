//! Human readable dumps of compiled fonts.

use flashfont::{FlashFont, GlyphRef};

use crate::error::Error;

fn codepoint_label(codepoint: u16) -> String {
    match char::from_u32(codepoint as u32).filter(|c| !c.is_control()) {
        Some(c) => format!("U+{codepoint:04X} {c:?}"),
        None => format!("U+{codepoint:04X}"),
    }
}

fn glyph_row(glyph: &GlyphRef) -> String {
    let header = &glyph.header;
    format!(
        "{:<14}{:>7}{:>8}{:>8}{:>6}{:>6}{:>9}  {}\n",
        codepoint_label(glyph.codepoint),
        glyph.block_offset,
        glyph.block_count(),
        format!("{}x{}", header.bitmap_width, header.bitmap_height),
        header.offset_left,
        header.offset_top,
        header.horizontal_advance,
        if header.is_rle() { "rle" } else { "plain" },
    )
}

/// The font header followed by one line per glyph.
pub fn describe(font: &FlashFont) -> String {
    let header = font.header();
    let mut out = format!(
        "version {}, max height {}, {} glyphs, wildcard U+{:04X}\n",
        header.version,
        header.max_height,
        header.number_of_glyphs(),
        header.wildcard_codepoint(),
    );
    out.push_str(&format!(
        "{:<14}{:>7}{:>8}{:>8}{:>6}{:>6}{:>9}  encoding\n",
        "codepoint", "offset", "blocks", "size", "left", "top", "advance"
    ));
    for glyph in font.glyphs() {
        out.push_str(&glyph_row(&glyph));
    }
    out
}

/// Draw the glyph the device would show for `c`.
pub fn render(font: &FlashFont, c: char) -> Result<String, Error> {
    let glyph = match u16::try_from(c as u32) {
        Ok(codepoint) => font.glyph_or_wildcard(codepoint),
        Err(_) => font.glyph(font.wildcard_codepoint()),
    }
    .ok_or(Error::MissingGlyph(c))?;
    let plane = glyph
        .bit_plane()
        .map_err(|source| Error::CorruptGlyph {
            codepoint: glyph.codepoint,
            source,
        })?;
    let mut out = glyph_row(&glyph);
    if glyph.codepoint as u32 != c as u32 {
        out.push_str(&format!("{c:?} is not in the font, showing the wildcard\n"));
    }
    out.push_str(&plane.to_ascii());
    Ok(out)
}
