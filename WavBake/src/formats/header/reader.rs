//! Reading emitted header assets back
//!
//! Only understands the layout written by [`emit_asset`](super::emit_asset);
//! this is not a C parser.

use super::{AssetRecord, ConstKeyword};
use crate::error::{Error, Result};
use crate::formats::wav::AudioPayload;
use std::path::Path;

/// A header asset read back from text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAsset {
    /// Constants and qualifiers
    pub record: AssetRecord,
    /// Array contents
    pub payload: AudioPayload,
}

/// Read a header asset from disk
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read, or
/// [`Error::InvalidHeaderListing`] if it is not an emitted asset.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<ParsedAsset> {
    let text = std::fs::read_to_string(path)?;
    parse_header_listing(&text)
}

/// Parse a header asset
///
/// # Errors
/// Returns [`Error::InvalidHeaderListing`] if a constant or the array is missing,
/// malformed, or if the array length disagrees with the size constant.
pub fn parse_header_listing(text: &str) -> Result<ParsedAsset> {
    let mut keyword = None;
    let mut sample_rate = None;
    let mut sample_size = None;
    let mut samples_per_block = None;

    let mut lines = text.lines();
    let mut array_line = None;

    for line in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("const uint8_t ") {
            array_line = Some(line);
            break;
        }

        let (kw, name, value) = parse_constant(line)?;
        keyword.get_or_insert(kw);
        if let Some(symbol) = name.strip_suffix("_SAMPLES_PER_BLOCK") {
            samples_per_block = Some((symbol.to_string(), value));
        } else if let Some(symbol) = name.strip_suffix("_SAMPLE_RATE") {
            sample_rate = Some((symbol.to_string(), value));
        } else if let Some(symbol) = name.strip_suffix("_SAMPLE_SIZE") {
            sample_size = Some((symbol.to_string(), value));
        } else {
            return Err(invalid(format!("unexpected constant {name}")));
        }
    }

    let array_line = array_line.ok_or_else(|| invalid("missing byte array declaration"))?;
    let (placement, symbol, first_body) = parse_array_decl(array_line)?;

    // Collect everything up to the closing brace
    let mut body = String::from(first_body);
    let mut closed = body.contains("};");
    if !closed {
        for line in lines {
            body.push('\n');
            body.push_str(line);
            if line.trim_start().starts_with("};") {
                closed = true;
                break;
            }
        }
    }
    if !closed {
        return Err(invalid("unterminated byte array"));
    }
    let body = body.split("};").next().unwrap_or_default();
    let bytes = parse_hex_listing(body)?;

    let (rate_symbol, rate) = sample_rate.ok_or_else(|| invalid("missing SAMPLE_RATE"))?;
    let (size_symbol, size) = sample_size.ok_or_else(|| invalid("missing SAMPLE_SIZE"))?;
    let (block_symbol, per_block) =
        samples_per_block.ok_or_else(|| invalid("missing SAMPLES_PER_BLOCK"))?;

    for other in [&rate_symbol, &size_symbol, &block_symbol] {
        if *other != symbol {
            return Err(invalid(format!(
                "constant prefix {other} does not match array prefix {symbol}"
            )));
        }
    }

    if size as usize != bytes.len() {
        return Err(invalid(format!(
            "SAMPLE_SIZE is {size} but array holds {} bytes",
            bytes.len()
        )));
    }

    let payload = AudioPayload::new(bytes);
    let record = AssetRecord::new(symbol, &payload, rate, per_block)
        .with_placement(placement)
        .with_keyword(keyword.unwrap_or_default());

    Ok(ParsedAsset { record, payload })
}

/// Parse the body of an array literal (`0xNN` entries separated by commas and whitespace)
///
/// # Errors
/// Returns [`Error::InvalidHeaderListing`] for any entry that is not a `0x` byte literal.
pub fn parse_hex_listing(body: &str) -> Result<Vec<u8>> {
    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let digits = token
                .strip_prefix("0x")
                .ok_or_else(|| invalid(format!("expected 0x literal, found {token:?}")))?;
            u8::from_str_radix(digits, 16)
                .map_err(|e| invalid(format!("bad byte literal {token:?}: {e}")))
        })
        .collect()
}

/// Split `constexpr uint32_t NAME = 123;` into its parts
fn parse_constant(line: &str) -> Result<(ConstKeyword, &str, u32)> {
    let (kw, rest) = line
        .split_once(' ')
        .ok_or_else(|| invalid(format!("unrecognized line {line:?}")))?;
    let keyword =
        ConstKeyword::from_keyword(kw).ok_or_else(|| invalid(format!("unrecognized line {line:?}")))?;
    let rest = rest
        .strip_prefix("uint32_t ")
        .ok_or_else(|| invalid(format!("expected uint32_t constant in {line:?}")))?;
    let (name, value) = rest
        .split_once('=')
        .ok_or_else(|| invalid(format!("missing '=' in {line:?}")))?;
    let value = value.trim().trim_end_matches(';').trim();
    let value = value
        .parse::<u32>()
        .map_err(|e| invalid(format!("bad value in {line:?}: {e}")))?;
    Ok((keyword, name.trim(), value))
}

/// Split `const uint8_t [QUALIFIER ]NAME_AUDIO_DATA[] = {...` into qualifier, symbol and trailing text
fn parse_array_decl(line: &str) -> Result<(Option<&str>, String, &str)> {
    let rest = line
        .strip_prefix("const uint8_t ")
        .ok_or_else(|| invalid("expected const uint8_t array"))?;
    let (decl, body) = rest
        .split_once("[] = {")
        .ok_or_else(|| invalid(format!("malformed array declaration {line:?}")))?;

    let mut parts: Vec<&str> = decl.split_whitespace().collect();
    let name = parts
        .pop()
        .ok_or_else(|| invalid("array declaration has no name"))?;
    let placement = match parts.as_slice() {
        [] => None,
        [placement] => Some(*placement),
        _ => return Err(invalid(format!("too many qualifiers in {line:?}"))),
    };
    let symbol = name
        .strip_suffix("_AUDIO_DATA")
        .ok_or_else(|| invalid(format!("array {name} is not an _AUDIO_DATA array")))?;

    Ok((placement, symbol.to_string(), body))
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidHeaderListing {
        message: message.into(),
    }
}
