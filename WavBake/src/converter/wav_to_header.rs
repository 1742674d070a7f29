//! Encoded audio to header conversion

use std::path::Path;

use crate::error::Result;
use crate::formats::header::{AssetRecord, symbol_name, write_asset};
use crate::formats::wav::{AudioPayload, read_container};
use crate::profile::EncodingProfile;

use super::ProgressCallback;

/// Convert an encoded WAV container to a header asset.
///
/// The container must match the profile's codec, rate and channel count.
/// Symbols are named after `dest`'s file stem.
///
/// # Errors
/// Returns an error if the container is invalid or the header cannot be written.
pub fn convert_wav_to_header<P: AsRef<Path>>(source: P, dest: P, profile: EncodingProfile) -> Result<AssetRecord> {
    convert_wav_to_header_with_progress(source, dest, profile, &|_: &str| {})
}

/// Convert an encoded WAV container to a header asset with progress callback
///
/// # Errors
/// Returns an error if the container is invalid or the header cannot be written.
pub fn convert_wav_to_header_with_progress<P: AsRef<Path>>(
    source: P,
    dest: P,
    profile: EncodingProfile,
    progress: ProgressCallback,
) -> Result<AssetRecord> {
    tracing::info!("Converting WAV→H: {:?} → {:?}", source.as_ref(), dest.as_ref());

    progress("Parsing container...");
    let (payload, format) = read_container(&source, &profile.expected_format())?;
    tracing::debug!(
        "{} bytes of {} at {} Hz, {} samples per block",
        payload.len(),
        crate::formats::wav::format_name(format.audio_format),
        format.sample_rate,
        format.samples_per_block
    );

    let record = AssetRecord::new(
        symbol_name(&dest)?,
        &payload,
        format.sample_rate,
        u32::from(format.samples_per_block),
    )
    .with_placement(profile.placement())
    .with_keyword(profile.const_keyword());

    progress("Writing header...");
    write_asset(&dest, &payload, &record)?;

    tracing::info!("Conversion complete");
    Ok(record)
}

/// Convert headerless 16-bit PCM to a header asset.
///
/// The whole file is the payload. `SAMPLES_PER_BLOCK` is the sample count
/// (byte length / 2), since the data is not blocked.
///
/// # Errors
/// Returns an error if the file cannot be read or the header cannot be written.
pub fn convert_raw_to_header<P: AsRef<Path>>(source: P, dest: P, profile: EncodingProfile) -> Result<AssetRecord> {
    tracing::info!("Converting RAW→H: {:?} → {:?}", source.as_ref(), dest.as_ref());

    let payload = AudioPayload::new(std::fs::read(&source)?);
    let record = raw_record(symbol_name(&dest)?, &payload, profile);
    write_asset(&dest, &payload, &record)?;

    tracing::info!("Conversion complete");
    Ok(record)
}

/// Convert whatever the profile's transcoder produces to a header asset
///
/// # Errors
/// Returns an error if the source is invalid or the header cannot be written.
pub fn convert_to_header<P: AsRef<Path>>(source: P, dest: P, profile: EncodingProfile) -> Result<AssetRecord> {
    if profile.is_container() {
        convert_wav_to_header(source, dest, profile)
    } else {
        convert_raw_to_header(source, dest, profile)
    }
}

fn raw_record(symbol: String, payload: &AudioPayload, profile: EncodingProfile) -> AssetRecord {
    let samples = u32::try_from(payload.len() / 2).unwrap_or(u32::MAX);
    AssetRecord::new(symbol, payload, profile.sample_rate(), samples)
        .with_placement(profile.placement())
        .with_keyword(profile.const_keyword())
}
