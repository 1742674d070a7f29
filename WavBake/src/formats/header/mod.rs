//! C/C++ header assets
//!
//! Each baked clip becomes a header declaring three `uint32_t` constants and
//! a byte array holding the raw payload:
//!
//! ```text
//! constexpr uint32_t ONE_SAMPLE_RATE = 22058;
//! constexpr uint32_t ONE_SAMPLE_SIZE = 4;
//! constexpr uint32_t ONE_SAMPLES_PER_BLOCK = 505;
//!
//! const uint8_t INFLASH ONE_AUDIO_DATA[] = {
//!     0xde, 0xad, 0xbe, 0xef
//! };
//! ```
//!
//! All four symbols share a prefix derived from the header's file stem.

mod reader;
mod writer;

pub use reader::{ParsedAsset, parse_hex_listing, parse_header_listing, read_header};
pub use writer::{emit_asset, format_hex_listing, symbol_from_stem, symbol_name, write_asset};

use crate::formats::wav::AudioPayload;

/// Number of array elements per line in the hex listing
pub const BYTES_PER_LINE: usize = 8;

/// Indentation written before each line of the hex listing
pub const LINE_INDENT: &str = "   ";

/// Header file extension
pub const HEADER_EXTENSION: &str = "h";

/// Keyword used for the scalar constant declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstKeyword {
    /// `constexpr uint32_t` (C++)
    #[default]
    Constexpr,
    /// `const uint32_t`
    Const,
}

impl ConstKeyword {
    /// Keyword as written in the header
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constexpr => "constexpr",
            Self::Const => "const",
        }
    }

    /// Parse a keyword as written in the header
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "constexpr" => Some(Self::Constexpr),
            "const" => Some(Self::Const),
            _ => None,
        }
    }
}

/// Metadata written alongside a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Symbol prefix, e.g. `ONE` for `ONE_AUDIO_DATA`
    pub symbol: String,
    /// Sample rate constant
    pub sample_rate: u32,
    /// Payload length in bytes
    pub sample_size: usize,
    /// Samples-per-block constant
    pub samples_per_block: u32,
    /// Storage placement token inserted before the array name (e.g. `INFLASH`)
    pub placement: Option<String>,
    /// Keyword for the scalar constants
    pub keyword: ConstKeyword,
}

impl AssetRecord {
    /// Create a record for a payload with no placement qualifier
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        payload: &AudioPayload,
        sample_rate: u32,
        samples_per_block: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            sample_rate,
            sample_size: payload.len(),
            samples_per_block,
            placement: None,
            keyword: ConstKeyword::default(),
        }
    }

    /// Set the storage placement qualifier
    #[must_use]
    pub fn with_placement(mut self, placement: Option<&str>) -> Self {
        self.placement = placement.map(str::to_string);
        self
    }

    /// Set the scalar constant keyword
    #[must_use]
    pub fn with_keyword(mut self, keyword: ConstKeyword) -> Self {
        self.keyword = keyword;
        self
    }

    /// Name of the sample rate constant
    #[must_use]
    pub fn sample_rate_name(&self) -> String {
        format!("{}_SAMPLE_RATE", self.symbol)
    }

    /// Name of the sample size constant
    #[must_use]
    pub fn sample_size_name(&self) -> String {
        format!("{}_SAMPLE_SIZE", self.symbol)
    }

    /// Name of the samples-per-block constant
    #[must_use]
    pub fn samples_per_block_name(&self) -> String {
        format!("{}_SAMPLES_PER_BLOCK", self.symbol)
    }

    /// Name of the byte array
    #[must_use]
    pub fn audio_data_name(&self) -> String {
        format!("{}_AUDIO_DATA", self.symbol)
    }
}
