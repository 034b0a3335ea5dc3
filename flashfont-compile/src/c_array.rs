//! Writing compiled fonts as C source, for firmware that links fonts in
//! instead of loading them from flash.

use std::io::{self, Write};

const BYTES_PER_LINE: usize = 16;

/// Turn a font name into a valid C identifier.
///
/// Characters that can't appear in an identifier become underscores, and a
/// leading digit is prefixed with one.
pub fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Write `bytes` as a `static const uint8_t` array named `name`.
///
/// Each full line of sixteen bytes is followed by a comment giving the
/// range it covers.
pub fn write_c_array(out: &mut impl Write, name: &str, bytes: &[u8]) -> io::Result<()> {
    write!(out, "static const uint8_t {}[] = {{\n\t", identifier(name))?;
    for (i, byte) in bytes.iter().enumerate() {
        if i != 0 && i % BYTES_PER_LINE == 0 {
            write!(out, "/* bytes {} - {} */\n\t", i - BYTES_PER_LINE, i)?;
        }
        write!(out, "0x{byte:02x}, ")?;
    }
    writeln!(out, "\n}};")
}

/// Write a header that includes each of `headers`.
pub fn write_index(out: &mut impl Write, headers: &[String]) -> io::Result<()> {
    writeln!(out, "#pragma once")?;
    for header in headers {
        writeln!(out, "#include \"{header}\"")?;
    }
    Ok(())
}
