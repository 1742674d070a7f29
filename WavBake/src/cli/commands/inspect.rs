//! CLI command for inspecting containers and generated headers

use std::path::Path;

use crate::formats::header::{HEADER_EXTENSION, read_header};
use crate::formats::wav::{format_name, read_container};
use crate::profile::EncodingProfile;

/// Print what a WAV container or header holds
pub fn execute(path: &Path, profile: EncodingProfile) -> anyhow::Result<()> {
    let is_header = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(HEADER_EXTENSION));

    if is_header {
        inspect_header(path)
    } else {
        inspect_container(path, profile)
    }
}

fn inspect_container(path: &Path, profile: EncodingProfile) -> anyhow::Result<()> {
    let (payload, format) = read_container(path, &profile.expected_format())?;

    println!("Container: {}", path.display());
    println!();
    println!(
        "  Format:            {} ({})",
        format_name(format.audio_format),
        format.audio_format
    );
    println!("  Channels:          {}", format.channels);
    println!("  Sample rate:       {} Hz", format.sample_rate);
    println!("  Byte rate:         {}", format.avg_bytes_per_sec);
    println!("  Block align:       {}", format.block_align);
    println!("  Bits per sample:   {}", format.bits_per_sample);
    println!("  Samples per block: {}", format.samples_per_block);
    println!("  Payload:           {} bytes", payload.len());
    Ok(())
}

fn inspect_header(path: &Path) -> anyhow::Result<()> {
    let asset = read_header(path)?;
    let record = &asset.record;

    println!("Header: {}", path.display());
    println!();
    println!("  Symbol:            {}", record.symbol);
    println!("  Keyword:           {}", record.keyword.as_str());
    println!(
        "  Placement:         {}",
        record.placement.as_deref().unwrap_or("(none)")
    );
    println!("  Sample rate:       {} Hz", record.sample_rate);
    println!("  Samples per block: {}", record.samples_per_block);
    println!("  Payload:           {} bytes", asset.payload.len());
    Ok(())
}
