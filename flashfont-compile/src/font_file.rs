//! Compiling font files and writing the results to disk.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use flashfont::{CompileOptions, CompiledFont};

use crate::{c_array, error::Error, freetype_source::FreeTypeSource};

/// A font compiled from a file, along with the name used for its C array.
pub struct Compiled {
    pub name: String,
    pub font: CompiledFont,
}

pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<Compiled, Error> {
    let mut source = FreeTypeSource::open(path).map_err(|source| Error::OpenFont {
        path: path.to_owned(),
        source,
    })?;
    let font = flashfont::compile(&mut source, options).map_err(|source| Error::Compile {
        path: path.to_owned(),
        source,
    })?;
    Ok(Compiled {
        name: source.name(),
        font,
    })
}

pub fn write_pfo(path: &Path, font: &CompiledFont) -> Result<(), Error> {
    std::fs::write(path, font.as_bytes()).map_err(|source| Error::Write {
        path: path.to_owned(),
        source,
    })?;
    log::info!("Wrote {} bytes to {}", font.as_bytes().len(), path.display());
    Ok(())
}

pub fn write_c_header(path: &Path, compiled: &Compiled) -> Result<(), Error> {
    write_with(path, |out| {
        c_array::write_c_array(out, &compiled.name, compiled.font.as_bytes())
    })
}

pub fn write_index(path: &Path, headers: &[String]) -> Result<(), Error> {
    write_with(path, |out| c_array::write_index(out, headers))
}

fn write_with(
    path: &Path,
    f: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<(), Error> {
    File::create(path)
        .map(BufWriter::new)
        .and_then(|mut out| {
            f(&mut out)?;
            out.flush()
        })
        .map_err(|source| Error::Write {
            path: path.to_owned(),
            source,
        })
}
