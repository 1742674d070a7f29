//! Encoding profiles
//!
//! A profile ties together everything that differs between the compressed and
//! linear outputs: what the transcoder is asked to produce, what the parser
//! must see, and how the header is declared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::formats::header::ConstKeyword;
use crate::formats::wav::ExpectedFormat;

/// Sample rate used for IMA ADPCM output
pub const ADPCM_SAMPLE_RATE: u32 = 22058;

/// Sample rate used for linear PCM output
pub const PCM_SAMPLE_RATE: u32 = 22050;

/// Storage placement token for compressed assets
pub const FLASH_PLACEMENT: &str = "INFLASH";

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingProfile {
    /// 4-bit IMA ADPCM in a WAV container, stored in flash
    #[default]
    #[serde(alias = "ima-adpcm")]
    Adpcm,
    /// 16-bit signed little-endian PCM, headerless
    Pcm,
}

impl EncodingProfile {
    /// Sample rate the transcoder is asked for and the parser expects
    #[must_use]
    pub fn sample_rate(self) -> u32 {
        match self {
            Self::Adpcm => ADPCM_SAMPLE_RATE,
            Self::Pcm => PCM_SAMPLE_RATE,
        }
    }

    /// Codec constraints for the intermediate file
    #[must_use]
    pub fn expected_format(self) -> ExpectedFormat {
        match self {
            Self::Adpcm => ExpectedFormat::ima_adpcm(self.sample_rate()),
            Self::Pcm => ExpectedFormat::pcm(self.sample_rate()),
        }
    }

    /// Extension of the intermediate file
    #[must_use]
    pub fn intermediate_extension(self) -> &'static str {
        match self {
            Self::Adpcm => "wav",
            Self::Pcm => "raw",
        }
    }

    /// Default directory for transcoder output
    #[must_use]
    pub fn default_intermediate_dir(self) -> &'static str {
        match self {
            Self::Adpcm => "number_adpcm_files",
            Self::Pcm => "number_raw_files",
        }
    }

    /// Default directory for generated headers
    #[must_use]
    pub fn default_header_dir(self) -> &'static str {
        match self {
            Self::Adpcm => "../audio",
            Self::Pcm => "..",
        }
    }

    /// Whether the intermediate file is a RIFF container (as opposed to raw samples)
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Adpcm)
    }

    /// Encoding arguments passed to sox, before the output path
    #[must_use]
    pub fn sox_encoding_args(self) -> Vec<String> {
        let rate = self.sample_rate().to_string();
        match self {
            Self::Adpcm => vec![
                "--encoding".into(),
                "ima-adpcm".into(),
                "--rate".into(),
                rate,
            ],
            Self::Pcm => vec![
                "--rate".into(),
                rate,
                "--bits".into(),
                "16".into(),
                "--encoding".into(),
                "signed-integer".into(),
                "--endian".into(),
                "little".into(),
            ],
        }
    }

    /// Keyword for the header's scalar constants
    #[must_use]
    pub fn const_keyword(self) -> ConstKeyword {
        match self {
            Self::Adpcm => ConstKeyword::Constexpr,
            Self::Pcm => ConstKeyword::Const,
        }
    }

    /// Placement token inserted before the array name
    #[must_use]
    pub fn placement(self) -> Option<&'static str> {
        match self {
            Self::Adpcm => Some(FLASH_PLACEMENT),
            Self::Pcm => None,
        }
    }

    /// Short name as accepted on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adpcm => "adpcm",
            Self::Pcm => "pcm",
        }
    }
}

impl fmt::Display for EncodingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adpcm" | "ima-adpcm" | "ima" => Ok(Self::Adpcm),
            "pcm" | "raw" | "linear" => Ok(Self::Pcm),
            _ => Err(Error::UnknownProfile(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::wav::{WAVE_FORMAT_IMA_ADPCM, WAVE_FORMAT_PCM};

    #[test]
    fn test_adpcm_profile() {
        let profile = EncodingProfile::Adpcm;
        let expected = profile.expected_format();
        assert_eq!(expected.audio_format, WAVE_FORMAT_IMA_ADPCM);
        assert_eq!(expected.sample_rate, 22058);
        assert_eq!(expected.channels, 1);
        assert_eq!(profile.placement(), Some("INFLASH"));
        assert_eq!(profile.intermediate_extension(), "wav");
        assert_eq!(
            profile.sox_encoding_args(),
            ["--encoding", "ima-adpcm", "--rate", "22058"]
        );
    }

    #[test]
    fn test_pcm_profile() {
        let profile = EncodingProfile::Pcm;
        assert_eq!(profile.expected_format().audio_format, WAVE_FORMAT_PCM);
        assert_eq!(profile.sample_rate(), 22050);
        assert_eq!(profile.placement(), None);
        assert_eq!(profile.const_keyword(), ConstKeyword::Const);
        assert!(!profile.is_container());
        assert_eq!(profile.default_intermediate_dir(), "number_raw_files");
        assert_eq!(profile.default_header_dir(), "..");
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!("ADPCM".parse::<EncodingProfile>().unwrap(), EncodingProfile::Adpcm);
        assert_eq!("pcm".parse::<EncodingProfile>().unwrap(), EncodingProfile::Pcm);
        assert!("mp3".parse::<EncodingProfile>().is_err());
    }
}
