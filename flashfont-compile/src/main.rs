//! Compile TrueType and OpenType fonts into flash fonts.
//!
//! `flashfont compile` builds a single `.pfo` file (and optionally a C
//! header), `flashfont batch` builds every font in a directory, and
//! `flashfont inspect` dumps an existing `.pfo`.

mod batch;
mod c_array;
mod error;
mod font_file;
mod freetype_source;
mod inspect;

use std::path::PathBuf;

use clap::Parser;
use flashfont::{CompileOptions, FlashFont, DEFAULT_ELLIPSIS_CODEPOINT, DEFAULT_WILDCARD_CODEPOINT};

use error::Error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log progress (-v) or every glyph (-vv); RUST_LOG overrides this
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Compile a single font into a .pfo file
    Compile {
        /// Pixel height at which to render the font
        height: u32,
        /// The TrueType or OpenType font to compile
        input_font: PathBuf,
        /// The .pfo file to write
        output_pfo: PathBuf,
        /// Adjustment added to every glyph's horizontal advance
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        tracking: i32,
        /// Regex matching the characters to include
        #[arg(long)]
        filter: Option<String>,
        /// Run-length encode glyphs where that is smaller
        #[arg(long)]
        rle: bool,
        /// Codepoint drawn for unsupported characters, in hex [default: 3456]
        #[arg(long, value_parser = parse_codepoint)]
        wildcard: Option<u16>,
        /// Codepoint drawn for truncated text, in hex [default: 2026]
        #[arg(long, value_parser = parse_codepoint)]
        ellipsis: Option<u16>,
        /// Also write the font as a C array to this file
        #[arg(long)]
        c_header: Option<PathBuf>,
    },
    /// Compile every font in a directory, writing .pfo and .h files next to
    /// each and a fonts.h that includes them all
    Batch {
        /// Directory containing .ttf and .otf files
        dir: PathBuf,
        /// Pixel height at which to render the fonts
        #[arg(long)]
        height: u32,
        /// Run-length encode glyphs where that is smaller
        #[arg(long)]
        rle: bool,
    },
    /// Print the header and glyph table of a .pfo file
    Inspect {
        /// The .pfo file to read
        file: PathBuf,
        /// Draw the glyph for this character
        #[arg(long)]
        render: Option<char>,
    },
}

/// Parse a codepoint given as `3456`, `0x3456` or `U+3456`.
fn parse_codepoint(arg: &str) -> Result<u16, String> {
    let digits = ["0x", "0X", "U+", "u+"]
        .iter()
        .find_map(|prefix| arg.strip_prefix(prefix))
        .unwrap_or(arg);
    u16::from_str_radix(digits, 16).map_err(|e| format!("'{arg}' is not a BMP codepoint: {e}"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Compile {
            height,
            input_font,
            output_pfo,
            tracking,
            filter,
            rle,
            wildcard,
            ellipsis,
            c_header,
        } => {
            let mut options = CompileOptions::new(height)
                .with_tracking(tracking)
                .with_rle(rle)
                .with_reserved(
                    wildcard.unwrap_or(DEFAULT_WILDCARD_CODEPOINT),
                    ellipsis.unwrap_or(DEFAULT_ELLIPSIS_CODEPOINT),
                );
            if let Some(pattern) = filter {
                options = options
                    .with_filter(&pattern)
                    .map_err(Error::InvalidOptions)?;
            }
            let compiled = font_file::compile_file(&input_font, &options)?;
            font_file::write_pfo(&output_pfo, &compiled.font)?;
            if let Some(path) = c_header {
                font_file::write_c_header(&path, &compiled)?;
            }
            if let Some(ratio) = compiled.font.stats().rle_ratio() {
                println!("{ratio:.2}% total");
            }
        }
        Command::Batch { dir, height, rle } => {
            let options = CompileOptions::new(height).with_rle(rle);
            // fail before touching the directory
            options.max_height().map_err(Error::InvalidOptions)?;
            let headers = batch::run(&dir, &options)?;
            println!("Compiled {} fonts in {}", headers.len(), dir.display());
        }
        Command::Inspect { file, render } => {
            let bytes = std::fs::read(&file).map_err(|source| Error::Read {
                path: file.clone(),
                source,
            })?;
            let font = FlashFont::new(&bytes).map_err(|source| Error::Parse {
                path: file.clone(),
                source,
            })?;
            match render {
                Some(c) => print!("{}", inspect::render(&font, c)?),
                None => print!("{}", inspect::describe(&font)),
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(e) = run(args.command) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
