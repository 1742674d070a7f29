//! Format conversion utilities
//!
//! Single-file conversions from transcoder output to header assets:
//! - WAV (IMA ADPCM container) → H
//! - RAW (headerless 16-bit PCM) → H

mod wav_to_header;

/// Progress callback type for conversion operations.
/// The callback receives a message describing the current step.
pub type ProgressCallback<'a> = &'a dyn Fn(&str);

pub use wav_to_header::{
    convert_raw_to_header, convert_to_header, convert_wav_to_header,
    convert_wav_to_header_with_progress,
};
