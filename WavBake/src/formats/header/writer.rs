//! Header asset emission

use super::{AssetRecord, BYTES_PER_LINE, LINE_INDENT};
use crate::error::{Error, Result};
use crate::formats::wav::AudioPayload;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render bytes as the body of a C array literal.
///
/// Each byte is ` 0xNN` in lower-case hex. A newline and indent precede every
/// eighth element starting with the first, and the last element has no
/// trailing comma.
#[must_use]
pub fn format_hex_listing(bytes: &[u8]) -> String {
    // "\n   " per line plus " 0xNN," per byte
    let mut out = String::with_capacity(bytes.len() * 6 + bytes.len() / BYTES_PER_LINE * 4 + 4);
    let last = bytes.len().saturating_sub(1);

    for (index, byte) in bytes.iter().enumerate() {
        if index % BYTES_PER_LINE == 0 {
            out.push('\n');
            out.push_str(LINE_INDENT);
        }
        let _ = write!(out, " 0x{byte:02x}");
        if index != last {
            out.push(',');
        }
    }

    out
}

/// Derive a symbol prefix from a header path.
///
/// Takes the file stem, upper-cases it and replaces `.` with `_`. Nothing else
/// is sanitized, so stems with other punctuation give invalid identifiers.
///
/// # Errors
/// Returns [`Error::InvalidPath`] if the path has no file stem.
pub fn symbol_name<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .ok_or_else(|| Error::InvalidPath(format!("no file stem in {}", path.display())))?;
    Ok(symbol_from_stem(&stem.to_string_lossy()))
}

/// Upper-case a stem and replace `.` with `_`
#[must_use]
pub fn symbol_from_stem(stem: &str) -> String {
    stem.to_uppercase().replace('.', "_")
}

/// Write a header asset for `payload` to `writer`
///
/// # Errors
/// Returns an error if writing fails. Output already written is not rolled back.
pub fn emit_asset<W: Write>(payload: &AudioPayload, record: &AssetRecord, mut writer: W) -> Result<()> {
    let keyword = record.keyword.as_str();
    let sample_count = payload.len();
    debug_assert_eq!(
        record.sample_size, sample_count,
        "record for {} describes a different payload",
        record.symbol
    );

    writeln!(
        writer,
        "{keyword} uint32_t {} = {};",
        record.sample_rate_name(),
        record.sample_rate
    )?;
    writeln!(
        writer,
        "{keyword} uint32_t {} = {};",
        record.sample_size_name(),
        sample_count
    )?;
    writeln!(
        writer,
        "{keyword} uint32_t {} = {};",
        record.samples_per_block_name(),
        record.samples_per_block
    )?;
    writeln!(writer)?;

    match &record.placement {
        Some(placement) => write!(
            writer,
            "const uint8_t {placement} {}[] = {{",
            record.audio_data_name()
        )?,
        None => write!(writer, "const uint8_t {}[] = {{", record.audio_data_name())?,
    }

    writer.write_all(format_hex_listing(payload.as_bytes()).as_bytes())?;
    writer.write_all(b"\n};\n")?;
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) a header file and write the asset into it.
///
/// Missing parent directories are created.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_asset<P: AsRef<Path>>(path: P, payload: &AudioPayload, record: &AssetRecord) -> Result<()> {
    if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    emit_asset(payload, record, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::header::ConstKeyword;
    use pretty_assertions::assert_eq;

    fn render(payload: &AudioPayload, record: &AssetRecord) -> String {
        let mut out = Vec::new();
        emit_asset(payload, record, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_nine_byte_listing() {
        let bytes: Vec<u8> = (0..9).collect();
        let listing = format_hex_listing(&bytes);
        assert_eq!(
            listing,
            "\n    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,\n    0x08"
        );

        // Exactly one break between elements, at the 7 -> 8 boundary
        let body = listing.trim_start_matches('\n');
        assert_eq!(body.matches('\n').count(), 1);
        assert!(body.contains("0x07,\n    0x08"));
        assert!(!listing.ends_with(','));
    }

    #[test]
    fn test_listing_lowercase_zero_padded() {
        assert_eq!(format_hex_listing(&[0x0A, 0xFF]), "\n    0x0a, 0xff");
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(format_hex_listing(&[]), "");
    }

    #[test]
    fn test_symbol_name() {
        assert_eq!(symbol_name("audio/billion.h").unwrap(), "BILLION");
        assert_eq!(symbol_name("audio/one.alt.h").unwrap(), "ONE_ALT");
        // Other punctuation is passed through
        assert_eq!(symbol_name("audio/twenty-one.h").unwrap(), "TWENTY-ONE");
        assert!(symbol_name("").is_err());
    }

    #[test]
    fn test_scenario_foo() {
        let payload = AudioPayload::new(vec![0xde, 0xad, 0xbe, 0xef]);
        let record = AssetRecord::new("FOO", &payload, 22058, 2).with_placement(Some("INFLASH"));

        assert_eq!(
            render(&payload, &record),
            "constexpr uint32_t FOO_SAMPLE_RATE = 22058;\n\
             constexpr uint32_t FOO_SAMPLE_SIZE = 4;\n\
             constexpr uint32_t FOO_SAMPLES_PER_BLOCK = 2;\n\
             \n\
             const uint8_t INFLASH FOO_AUDIO_DATA[] = {\n    0xde, 0xad, 0xbe, 0xef\n};\n"
        );
    }

    #[test]
    fn test_pcm_variant_has_no_qualifier() {
        let payload = AudioPayload::new(vec![0x01, 0x00, 0xff, 0x7f]);
        let record = AssetRecord::new("TWO", &payload, 22050, 2).with_keyword(ConstKeyword::Const);
        let text = render(&payload, &record);

        assert!(text.starts_with("const uint32_t TWO_SAMPLE_RATE = 22050;\n"));
        assert!(text.contains("const uint8_t TWO_AUDIO_DATA[] = {"));
        assert!(!text.contains("INFLASH"));
        assert!(text.ends_with("\n};\n"));
    }

    #[test]
    fn test_write_asset_creates_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out").join("nested").join("one.h");
        let payload = AudioPayload::new(vec![0xde, 0xad]);
        let record = AssetRecord::new("ONE", &payload, 22058, 2);

        write_asset(&dest, &payload, &record).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), render(&payload, &record));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "describes a different payload")]
    fn test_record_for_other_payload_is_rejected() {
        let payload = AudioPayload::new(vec![0xde, 0xad, 0xbe, 0xef]);
        let record = AssetRecord::new("FOO", &AudioPayload::new(vec![0xde]), 22058, 2);
        render(&payload, &record);
    }
}
