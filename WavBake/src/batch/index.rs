//! Aggregate include header

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::formats::header::HEADER_EXTENSION;

/// Render an include header for the given clip stems
///
/// Stems are sorted and deduplicated so the output does not depend on the
/// order clips finished in.
#[must_use]
pub fn render_index(include_prefix: &str, stems: &[&str]) -> String {
    let mut sorted = stems.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut out = String::from("#pragma once\n\n");
    for stem in sorted {
        let _ = writeln!(out, "#include \"{include_prefix}{stem}.{HEADER_EXTENSION}\"");
    }
    out
}

/// Write an include header listing every stem
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_index<P: AsRef<Path>>(path: P, include_prefix: &str, stems: &[&str]) -> Result<()> {
    tracing::info!("Writing index {:?} ({} headers)", path.as_ref(), stems.len());

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(render_index(include_prefix, stems).as_bytes())?;
    writer.flush()?;
    Ok(())
}
