//! Error types for `WavBake`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `WavBake` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== RIFF/WAVE Container Errors ====================
    /// The container is shorter than the 12-byte RIFF envelope.
    #[error("malformed container: expected 12-byte RIFF header, found {available} bytes")]
    MalformedContainer {
        /// Number of bytes actually available.
        available: usize,
    },

    /// The first tag of the envelope is not `RIFF`.
    #[error("not a RIFF file: found tag {0:?}")]
    BadRiffTag([u8; 4]),

    /// The form tag of the envelope is not `WAVE`.
    #[error("not a WAVE file: found form tag {0:?}")]
    BadFormTag([u8; 4]),

    /// The `fmt ` chunk is too short to hold the fields we need.
    #[error("invalid fmt chunk of length {length} (need at least {required} bytes)")]
    InvalidFormatChunk {
        /// Number of fmt payload bytes available.
        length: usize,
        /// Minimum number of bytes required.
        required: usize,
    },

    /// A `data` chunk appeared before any `fmt ` chunk.
    #[error("audio format not found: data chunk precedes fmt chunk")]
    MissingFormatChunk,

    /// The container's codec, rate or channel count differs from what was expected.
    #[error(
        "unsupported WAV format; format: {actual_format}, rate: {actual_rate}, channels: {actual_channels} \
         (expected format: {expected_format}, rate: {expected_rate}, channels: {expected_channels})"
    )]
    UnsupportedAudioFormat {
        /// Audio format code found in the container.
        actual_format: u16,
        /// Sample rate found in the container.
        actual_rate: u32,
        /// Channel count found in the container.
        actual_channels: u16,
        /// Audio format code the caller required.
        expected_format: u16,
        /// Sample rate the caller required.
        expected_rate: u32,
        /// Channel count the caller required.
        expected_channels: u16,
    },

    /// The `data` chunk declares more bytes than the container holds.
    #[error("truncated payload: expected {expected} bytes, got {actual}")]
    TruncatedPayload {
        /// Declared data chunk length.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The chunk stream ended without a `data` chunk.
    #[error("unexpected end of file while looking for data chunk")]
    MissingDataChunk,

    // ==================== Header Asset Errors ====================
    /// An emitted header could not be read back.
    #[error("invalid header listing: {message}")]
    InvalidHeaderListing {
        /// Description of what is invalid.
        message: String,
    },

    // ==================== External Tool Errors ====================
    /// The transcoder binary could not be located.
    #[error("transcoder not found: {binary}")]
    TranscoderNotFound {
        /// Binary name or path that was looked up.
        binary: String,
    },

    /// The transcoder exited with a non-zero status.
    #[error("transcoder failed for {} (exit code {code:?}): {stderr}", input.display())]
    TranscoderFailed {
        /// Clip being transcoded.
        input: PathBuf,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The transcoder did not finish in time and was killed.
    #[error("transcoder timed out after {timeout_secs}s for {}", input.display())]
    TranscoderTimeout {
        /// Clip being transcoded.
        input: PathBuf,
        /// The timeout that expired.
        timeout_secs: u64,
    },

    /// The speech synthesizer could not be located.
    #[error("speech synthesizer not found: {binary}")]
    SynthesizerNotFound {
        /// Binary name or path that was looked up.
        binary: String,
    },

    /// The speech synthesizer failed for a word.
    #[error("speech synthesis failed for '{word}': {message}")]
    SynthesizerFailed {
        /// Word being synthesized.
        word: String,
        /// Error output or description.
        message: String,
    },

    // ==================== Configuration Errors ====================
    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Unknown encoding profile name.
    #[error("unknown encoding profile '{0}' (expected: adpcm, pcm)")]
    UnknownProfile(String),

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `WavBake` operations.
pub type Result<T> = std::result::Result<T, Error>;
