//! Batch progress and result types

use std::path::PathBuf;

use crate::formats::header::AssetRecord;
use crate::transcode::TrimPolicy;

/// Progress information for a batch bake
#[derive(Debug, Clone)]
pub struct BakeProgress {
    /// Current operation phase
    pub phase: BakePhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Clip being processed (if applicable)
    pub current_file: Option<String>,
}

impl BakeProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: BakePhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a clip name
    #[must_use]
    pub fn with_file(phase: BakePhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a batch bake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BakePhase {
    /// Running the transcoder on a clip
    Transcoding,
    /// Writing the aggregate include header
    WritingIndex,
    /// Operation complete
    Complete,
}

impl BakePhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transcoding => "Baking clips",
            Self::WritingIndex => "Writing index",
            Self::Complete => "Complete",
        }
    }
}

/// A clip that made it all the way to a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakedClip {
    /// Clip file stem
    pub stem: String,
    /// Transcoder output
    pub intermediate: PathBuf,
    /// Generated header
    pub header: PathBuf,
    /// Whether silence was trimmed
    pub trim: TrimPolicy,
    /// What was written into the header
    pub record: AssetRecord,
}

/// Result of a batch bake
#[derive(Debug, Clone, Default)]
pub struct BakeResult {
    /// Number of clips baked
    pub success_count: usize,
    /// Number of clips that failed
    pub fail_count: usize,
    /// One message per clip, in clip order
    pub results: Vec<String>,
    /// Successfully baked clips, in clip order
    pub baked: Vec<BakedClip>,
    /// Aggregate include header, if one was written
    pub index: Option<PathBuf>,
}

impl BakeResult {
    /// Messages for failed clips only
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| r.starts_with("Failed"))
            .map(String::as_str)
    }
}
