//! Compiling every font in a directory.

use std::path::{Path, PathBuf};

use flashfont::CompileOptions;
use rayon::prelude::*;

use crate::{error::Error, font_file};

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];
const INDEX_HEADER: &str = "fonts.h";

/// The font files directly inside `dir`, sorted by path.
pub fn font_paths(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let read_err = |source| Error::Read {
        path: dir.to_owned(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let is_font = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                FONT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_font && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Compile one font, writing `.pfo` and `.h` files next to it.
///
/// Returns the file name of the generated header.
fn compile_one(path: &Path, options: &CompileOptions) -> Result<String, Error> {
    let compiled = font_file::compile_file(path, options)?;
    log::info!("Rendered {}", compiled.name);
    font_file::write_pfo(&path.with_extension("pfo"), &compiled.font)?;
    let header = path.with_extension("h");
    font_file::write_c_header(&header, &compiled)?;
    Ok(header
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Compile every font in `dir` and write a `fonts.h` including their headers.
///
/// Fonts are compiled in parallel. A font that fails is logged and left out
/// of the index; the error returned at the end reports how many failed.
pub fn run(dir: &Path, options: &CompileOptions) -> Result<Vec<String>, Error> {
    let paths = font_paths(dir)?;
    if paths.is_empty() {
        log::warn!("No fonts found in {}", dir.display());
    }
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| compile_one(path, options))
        .collect();

    let mut headers = Vec::new();
    let mut failed = 0;
    for result in results {
        match result {
            Ok(header) => headers.push(header),
            Err(e) => {
                log::warn!("{e}");
                failed += 1;
            }
        }
    }
    font_file::write_index(&dir.join(INDEX_HEADER), &headers)?;
    if failed > 0 {
        return Err(Error::Batch {
            failed,
            total: paths.len(),
        });
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finds_fonts_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.ttf", "a.OTF", "notes.txt", "c.ttf.bak", "fonts.h"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.ttf")).unwrap();
        let names: Vec<_> = font_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.OTF", "b.ttf"]);
    }

    #[test]
    fn missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = font_paths(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn empty_dir_writes_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let headers = run(dir.path(), &CompileOptions::new(12)).unwrap();
        assert!(headers.is_empty());
        let index = std::fs::read_to_string(dir.path().join(INDEX_HEADER)).unwrap();
        assert_eq!(index, "#pragma once\n");
    }

    #[test]
    fn broken_font_is_skipped_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        let err = run(dir.path(), &CompileOptions::new(12)).unwrap_err();
        assert!(matches!(err, Error::Batch { failed: 1, total: 1 }));
        assert!(!dir.path().join("broken.pfo").exists());
        let index = std::fs::read_to_string(dir.path().join(INDEX_HEADER)).unwrap();
        assert_eq!(index, "#pragma once\n");
    }
}
