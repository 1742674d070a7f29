//! Audio transcoding
//!
//! Clips are re-encoded by an external tool. The pipeline only sees the
//! [`Transcoder`] trait, so tests can substitute a fake that writes fixtures.

mod sox;

pub use sox::{SOX_BINARY, SoxTranscoder};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::profile::EncodingProfile;

/// Effects that strip leading and trailing silence
pub const TRIM_EFFECTS: [&str; 10] = [
    "silence", "1", "0.1", "0.2%", "reverse", "silence", "1", "0.1", "0.2%", "reverse",
];

/// Whether silence is removed while transcoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimPolicy {
    /// Strip leading and trailing silence
    Trim,
    /// Leave the clip as recorded
    Keep,
}

impl TrimPolicy {
    /// Effect arguments appended after the output path
    #[must_use]
    pub fn effect_args(self) -> &'static [&'static str] {
        match self {
            Self::Trim => &TRIM_EFFECTS,
            Self::Keep => &[],
        }
    }

    /// Log description
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Trim => "silence removed",
            Self::Keep => "no processing",
        }
    }
}

/// One clip to transcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub profile: EncodingProfile,
    pub trim: TrimPolicy,
}

impl TranscodeRequest {
    /// Create a request that trims silence
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q, profile: EncodingProfile) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            profile,
            trim: TrimPolicy::Trim,
        }
    }

    /// Set the trim policy
    #[must_use]
    pub fn with_trim(mut self, trim: TrimPolicy) -> Self {
        self.trim = trim;
        self
    }
}

/// Something that turns a source clip into an encoded file
pub trait Transcoder: Send + Sync {
    /// Produce `request.output` from `request.input`
    ///
    /// # Errors
    /// Implementations return an error if the output could not be produced.
    fn transcode(&self, request: &TranscodeRequest) -> Result<()>;
}
