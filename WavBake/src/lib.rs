//! # WavBake
//!
//! Turns short spoken-word clips into C/C++ header assets that firmware can
//! embed directly in flash.
//!
//! ## Pipeline
//!
//! Each clip goes through three stages:
//!
//! 1. **Transcode** - `sox` re-encodes the clip as IMA ADPCM (or raw 16-bit PCM)
//!    and trims silence
//! 2. **Parse** - the RIFF/WAVE container is validated and its `data` chunk
//!    extracted
//! 3. **Emit** - the payload is written out as a `uint8_t` array with its
//!    sample rate, size and block constants
//!
//! ## Quick Start
//!
//! ### Converting a Single File
//!
//! ```no_run
//! use wavbake::converter::convert_wav_to_header;
//! use wavbake::profile::EncodingProfile;
//!
//! let record = convert_wav_to_header("one.wav", "one.h", EncodingProfile::Adpcm)?;
//! println!("{} bytes", record.sample_size);
//! # Ok::<(), wavbake::Error>(())
//! ```
//!
//! ### Baking a Directory
//!
//! ```no_run
//! use wavbake::batch::{batch_bake, find_clips};
//! use wavbake::config::BakeConfig;
//! use wavbake::transcode::SoxTranscoder;
//!
//! let config = BakeConfig::default();
//! let clips = find_clips(&config.clip_dir)?;
//! let sox = SoxTranscoder::locate(&config.transcoder)?;
//! let result = batch_bake(&clips, &config, &sox, |_| {})?;
//! println!("{} baked, {} failed", result.success_count, result.fail_count);
//! # Ok::<(), wavbake::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `wavbake` command-line binary

pub mod error;
pub mod formats;
pub mod profile;
pub mod config;
pub mod transcode;
pub mod synth;
pub mod speech;
pub mod converter;
pub mod batch;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::wav::{AudioPayload, ExpectedFormat, FormatDescriptor, parse_container, read_container};
    pub use crate::formats::header::{AssetRecord, ConstKeyword, emit_asset, format_hex_listing, parse_header_listing, symbol_name};
    pub use crate::profile::EncodingProfile;
    pub use crate::config::BakeConfig;
    pub use crate::transcode::{SoxTranscoder, TranscodeRequest, Transcoder, TrimPolicy};
    pub use crate::synth::{GttsSynthesizer, Synthesizer};
    pub use crate::speech::{NumberWord, number_to_words};
    pub use crate::converter;
    pub use crate::batch::{BakeProgress, BakeResult, batch_bake, find_clips};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
