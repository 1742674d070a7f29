//! Pipeline configuration
//!
//! Directories, encoding and tool settings for a bake. A config can be loaded
//! from TOML; every field has a default so a partial file is fine. Directories
//! left unset follow the profile (`number_raw_files` and `..` for `pcm`):
//!
//! ```toml
//! clip_dir = "number_mp3_files"
//! header_dir = "../audio"
//! profile = "adpcm"
//! no_trim = ["billion.mp3"]
//!
//! [transcoder]
//! timeout_secs = 30
//!
//! [synth]
//! timeout_secs = 20
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::EncodingProfile;

/// Default timeout for the transcoder and the synthesizer
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Clip transcoded without silence trimming unless configured otherwise
pub const DEFAULT_NO_TRIM: &str = "billion.mp3";

/// Batch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Directory holding the source clips
    pub clip_dir: PathBuf,
    /// Directory for transcoder output
    pub intermediate_dir: PathBuf,
    /// Directory for generated headers
    pub header_dir: PathBuf,
    /// Output encoding
    pub profile: EncodingProfile,
    /// Clip file names that are transcoded without silence trimming
    pub no_trim: BTreeSet<String>,
    /// Transcoder settings
    pub transcoder: TranscoderConfig,
    /// Speech synthesizer settings
    pub synth: SynthConfig,
    /// File name of the aggregate include header, if one should be written
    pub index_file: Option<String>,
    /// Prefix for paths in the aggregate include header
    pub include_prefix: String,
    /// Worker thread count (defaults to one per core)
    pub jobs: Option<usize>,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self::for_profile(EncodingProfile::default())
    }
}

impl BakeConfig {
    /// Defaults for a profile, with its intermediate and header directories
    #[must_use]
    pub fn for_profile(profile: EncodingProfile) -> Self {
        Self {
            clip_dir: PathBuf::from("number_mp3_files"),
            intermediate_dir: PathBuf::from(profile.default_intermediate_dir()),
            header_dir: PathBuf::from(profile.default_header_dir()),
            profile,
            no_trim: BTreeSet::from([DEFAULT_NO_TRIM.to_string()]),
            transcoder: TranscoderConfig::default(),
            synth: SynthConfig::default(),
            index_file: None,
            include_prefix: "audio/".to_string(),
            jobs: None,
        }
    }

    /// Load a config from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Parse a config from TOML text
    ///
    /// Directories the text does not set take the defaults of its profile.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`](crate::Error::ConfigParse) on invalid TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        let keys: toml::Table = toml::from_str(text)?;

        let defaults = Self::for_profile(config.profile);
        if !keys.contains_key("intermediate_dir") {
            config.intermediate_dir = defaults.intermediate_dir;
        }
        if !keys.contains_key("header_dir") {
            config.header_dir = defaults.header_dir;
        }
        Ok(config)
    }

    /// Switch profile, moving directories still at the old profile's defaults
    pub fn set_profile(&mut self, profile: EncodingProfile) {
        let old = self.profile;
        if self.intermediate_dir == Path::new(old.default_intermediate_dir()) {
            self.intermediate_dir = PathBuf::from(profile.default_intermediate_dir());
        }
        if self.header_dir == Path::new(old.default_header_dir()) {
            self.header_dir = PathBuf::from(profile.default_header_dir());
        }
        self.profile = profile;
    }

    /// Whether a clip (by file name) skips silence trimming
    #[must_use]
    pub fn is_trim_exempt(&self, file_name: &str) -> bool {
        self.no_trim.contains(file_name)
    }
}

/// Transcoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderConfig {
    /// Explicit sox binary; looked up on PATH when unset
    pub binary: Option<PathBuf>,
    /// Seconds before a transcode is killed
    pub timeout_secs: u64,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            binary: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TranscoderConfig {
    /// Timeout as a [`Duration`]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Speech synthesizer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Explicit gtts-cli binary; looked up on PATH when unset
    pub binary: Option<PathBuf>,
    /// Language code
    pub lang: String,
    /// Top-level domain selecting the accent
    pub tld: String,
    /// Seconds before one synthesis is killed
    pub timeout_secs: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            binary: None,
            lang: "en".to_string(),
            tld: "com.au".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SynthConfig {
    /// Timeout as a [`Duration`]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = BakeConfig::default();
        assert_eq!(config.profile, EncodingProfile::Adpcm);
        assert!(config.is_trim_exempt("billion.mp3"));
        assert!(!config.is_trim_exempt("million.mp3"));
        assert_eq!(config.transcoder.timeout(), Duration::from_secs(60));
        assert_eq!(config.synth.timeout(), Duration::from_secs(60));
        assert_eq!(config.intermediate_dir, PathBuf::from("number_adpcm_files"));
        assert_eq!(config.header_dir, PathBuf::from("../audio"));
    }

    #[test]
    fn test_partial_toml() {
        let config = BakeConfig::from_toml_str(
            r#"
            profile = "pcm"
            header_dir = "out"
            no_trim = ["one.mp3", "two.mp3"]

            [transcoder]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.profile, EncodingProfile::Pcm);
        assert_eq!(config.header_dir, PathBuf::from("out"));
        assert!(config.is_trim_exempt("two.mp3"));
        assert!(!config.is_trim_exempt("billion.mp3"));
        assert_eq!(config.transcoder.timeout_secs, 5);
        assert_eq!(config.transcoder.binary, None);
        assert_eq!(config.clip_dir, PathBuf::from("number_mp3_files"));
        assert_eq!(config.synth.tld, "com.au");
        assert_eq!(config.intermediate_dir, PathBuf::from("number_raw_files"));
    }

    #[test]
    fn test_pcm_directories_follow_profile() {
        let config = BakeConfig::from_toml_str("profile = \"pcm\"").unwrap();
        assert_eq!(config.intermediate_dir, PathBuf::from("number_raw_files"));
        assert_eq!(config.header_dir, PathBuf::from(".."));

        let config = BakeConfig::from_toml_str(
            "profile = \"pcm\"\nintermediate_dir = \"number_adpcm_files\"",
        )
        .unwrap();
        assert_eq!(config.intermediate_dir, PathBuf::from("number_adpcm_files"));
        assert_eq!(config.header_dir, PathBuf::from(".."));
    }

    #[test]
    fn test_set_profile_keeps_explicit_dirs() {
        let mut config = BakeConfig::default();
        config.set_profile(EncodingProfile::Pcm);
        assert_eq!(config, BakeConfig::for_profile(EncodingProfile::Pcm));

        let mut config = BakeConfig {
            header_dir: PathBuf::from("firmware/audio"),
            ..BakeConfig::default()
        };
        config.set_profile(EncodingProfile::Pcm);
        assert_eq!(config.intermediate_dir, PathBuf::from("number_raw_files"));
        assert_eq!(config.header_dir, PathBuf::from("firmware/audio"));
    }

    #[test]
    fn test_synth_timeout() {
        let config = BakeConfig::from_toml_str("[synth]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.synth.timeout(), Duration::from_secs(5));
        assert_eq!(config.synth.lang, "en");
        assert_eq!(config.transcoder.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(BakeConfig::from_toml_str("profile = \"flac\"").is_err());
    }
}
