//! RIFF/WAVE container format
//!
//! Only the subset needed to pull a single-codec, mono, fixed-rate payload out
//! of a transcoder's output is supported. The container is a 12-byte RIFF
//! envelope followed by a sequence of chunks, each an 8-byte header (ASCII tag
//! plus little-endian length) and a payload padded to an even length.
//!
//! ## Chunks
//!
//! - `fmt ` - codec parameters, see [`FormatDescriptor`]
//! - `fact` - sample count for compressed codecs, ignored
//! - `data` - the audio payload, returned as-is
//!
//! Any other chunk (`LIST`, `JUNK`, ...) is skipped.

mod reader;
mod writer;

pub use reader::{parse_container, read_container};
pub use writer::{ContainerBuilder, write_container};

use crate::error::{Error, Result};

/// "RIFF" envelope tag
pub const RIFF_TAG: [u8; 4] = *b"RIFF";

/// "WAVE" form tag
pub const WAVE_TAG: [u8; 4] = *b"WAVE";

/// Format chunk tag (note the trailing space)
pub const FMT_TAG: [u8; 4] = *b"fmt ";

/// Fact chunk tag
pub const FACT_TAG: [u8; 4] = *b"fact";

/// Data chunk tag
pub const DATA_TAG: [u8; 4] = *b"data";

/// Size of the RIFF envelope (tag + size + form tag)
pub const RIFF_HEADER_SIZE: usize = 12;

/// Size of a chunk header (tag + length)
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Minimum `fmt ` payload: the 16-byte PCM layout plus extension size and samples-per-block
pub const MIN_FMT_SIZE: usize = 20;

/// `WAVE_FORMAT_PCM`
pub const WAVE_FORMAT_PCM: u16 = 0x0001;

/// `WAVE_FORMAT_IMA_ADPCM` (DVI ADPCM)
pub const WAVE_FORMAT_IMA_ADPCM: u16 = 0x0011;

/// Outer RIFF wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffEnvelope {
    /// Declared size of everything after the size field. Not checked against the file length.
    pub size: u32,
}

/// A chunk header read from the container body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Four-character chunk tag
    pub tag: [u8; 4],
    /// Payload length, excluding the pad byte
    pub length: u32,
}

impl ChunkHeader {
    /// Whether an odd-length payload is followed by a pad byte
    #[must_use]
    pub fn is_padded(&self) -> bool {
        self.length % 2 == 1
    }

    /// Tag as a printable string
    #[must_use]
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// Codec parameters from the `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatDescriptor {
    /// Audio format code (1 = PCM, 17 = IMA ADPCM)
    pub audio_format: u16,
    /// Number of channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub avg_bytes_per_sec: u32,
    /// Block alignment in bytes
    pub block_align: u16,
    /// Bits per sample (4 for IMA ADPCM)
    pub bits_per_sample: u16,
    /// Size of the format extension (`cbSize`)
    pub extension_size: u16,
    /// Samples per block, only meaningful for block-based codecs
    pub samples_per_block: u16,
}

impl FormatDescriptor {
    /// Descriptor for mono IMA ADPCM at the given rate and block size.
    ///
    /// Each block carries a 4-byte header holding the first sample, then
    /// two 4-bit samples per byte.
    #[must_use]
    pub fn ima_adpcm(sample_rate: u32, samples_per_block: u16) -> Self {
        let block_align = 4 + samples_per_block.saturating_sub(1).div_ceil(2);
        let avg_bytes_per_sec = if samples_per_block == 0 {
            0
        } else {
            (u64::from(sample_rate) * u64::from(block_align) / u64::from(samples_per_block)) as u32
        };
        Self {
            audio_format: WAVE_FORMAT_IMA_ADPCM,
            channels: 1,
            sample_rate,
            avg_bytes_per_sec,
            block_align,
            bits_per_sample: 4,
            extension_size: 2,
            samples_per_block,
        }
    }

    /// Descriptor for mono 16-bit linear PCM at the given rate
    #[must_use]
    pub fn pcm16(sample_rate: u32) -> Self {
        Self {
            audio_format: WAVE_FORMAT_PCM,
            channels: 1,
            sample_rate,
            avg_bytes_per_sec: sample_rate * 2,
            block_align: 2,
            bits_per_sample: 16,
            extension_size: 0,
            samples_per_block: 1,
        }
    }
}

/// Raw bytes of a `data` chunk
///
/// The parser never interprets these; they are handed to the emitter untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioPayload(Vec<u8>);

impl AudioPayload {
    /// Wrap owned payload bytes
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Number of payload bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the payload bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take ownership of the payload bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for AudioPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AudioPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Codec constraints a container must satisfy, checked by exact equality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedFormat {
    /// Required audio format code
    pub audio_format: u16,
    /// Required sample rate in Hz
    pub sample_rate: u32,
    /// Required channel count
    pub channels: u16,
}

impl ExpectedFormat {
    /// Mono IMA ADPCM at the given rate
    #[must_use]
    pub fn ima_adpcm(sample_rate: u32) -> Self {
        Self {
            audio_format: WAVE_FORMAT_IMA_ADPCM,
            sample_rate,
            channels: 1,
        }
    }

    /// Mono linear PCM at the given rate
    #[must_use]
    pub fn pcm(sample_rate: u32) -> Self {
        Self {
            audio_format: WAVE_FORMAT_PCM,
            sample_rate,
            channels: 1,
        }
    }

    /// Check a descriptor against these constraints
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedAudioFormat`] naming actual and expected values
    /// if format code, sample rate or channel count differ.
    pub fn check(&self, format: &FormatDescriptor) -> Result<()> {
        if format.audio_format != self.audio_format
            || format.sample_rate != self.sample_rate
            || format.channels != self.channels
        {
            return Err(Error::UnsupportedAudioFormat {
                actual_format: format.audio_format,
                actual_rate: format.sample_rate,
                actual_channels: format.channels,
                expected_format: self.audio_format,
                expected_rate: self.sample_rate,
                expected_channels: self.channels,
            });
        }
        Ok(())
    }
}

/// Human-readable name for a format code
#[must_use]
pub fn format_name(code: u16) -> &'static str {
    match code {
        WAVE_FORMAT_PCM => "PCM",
        0x0002 => "Microsoft ADPCM",
        0x0003 => "IEEE float",
        WAVE_FORMAT_IMA_ADPCM => "IMA ADPCM",
        0xFFFE => "Extensible",
        _ => "Unknown",
    }
}
