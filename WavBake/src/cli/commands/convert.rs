//! CLI interface for single-file conversion
use std::path::Path;

use crate::cli::progress::simple_spinner;
use crate::converter::{convert_raw_to_header, convert_wav_to_header_with_progress};
use crate::profile::EncodingProfile;

pub fn execute(source: &Path, destination: &Path, profile: Option<EncodingProfile>) -> anyhow::Result<()> {
    println!("Converting {} to {}", source.display(), destination.display());

    // Auto-detect from the source extension unless given
    let profile = if let Some(profile) = profile {
        profile
    } else {
        let ext = source
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| anyhow::anyhow!("Cannot detect encoding from source file extension"))?;
        match ext.as_str() {
            "wav" => EncodingProfile::Adpcm,
            "raw" | "pcm" => EncodingProfile::Pcm,
            other => anyhow::bail!("Unsupported source format: .{other} (expected .wav or .raw)"),
        }
    };

    let record = if profile.is_container() {
        let pb = simple_spinner("Converting...");
        let result = convert_wav_to_header_with_progress(source, destination, profile, &|msg: &str| {
            pb.set_message(msg.to_string());
        });
        pb.finish_and_clear();
        result?
    } else {
        convert_raw_to_header(source, destination, profile)?
    };

    println!(
        "Wrote {} ({} bytes, {} Hz, {} samples per block)",
        record.audio_data_name(),
        record.sample_size,
        record.sample_rate,
        record.samples_per_block
    );
    Ok(())
}
