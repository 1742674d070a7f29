//! Speech synthesis of the number vocabulary
//!
//! Clips are produced once by an external text-to-speech tool and then fed
//! through the bake pipeline like any other recording.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rayon::prelude::*;

use crate::config::SynthConfig;
use crate::error::{Error, Result};
use crate::speech::NumberWord;
use crate::utils::process::{resolve_binary, run_with_timeout};

/// Binary name searched on PATH
pub const GTTS_BINARY: &str = "gtts-cli";

/// Extension of synthesized clips
pub const CLIP_EXTENSION: &str = "mp3";

/// Something that speaks a word into an audio file
pub trait Synthesizer: Send + Sync {
    /// Write a recording of `word` to `output`
    ///
    /// # Errors
    /// Implementations return an error if the recording could not be produced.
    fn synthesize(&self, word: &str, output: &Path) -> Result<()>;
}

/// Google TTS through `gtts-cli`
#[derive(Debug, Clone)]
pub struct GttsSynthesizer {
    binary: PathBuf,
    lang: String,
    tld: String,
    timeout: Duration,
}

impl GttsSynthesizer {
    /// Resolve the binary from config, falling back to PATH
    ///
    /// # Errors
    /// Returns [`Error::SynthesizerNotFound`] if no usable binary exists.
    pub fn locate(config: &SynthConfig) -> Result<Self> {
        let binary = resolve_binary(config.binary.as_deref(), GTTS_BINARY).ok_or_else(|| {
            Error::SynthesizerNotFound {
                binary: config
                    .binary
                    .as_ref()
                    .map_or_else(|| GTTS_BINARY.to_string(), |p| p.display().to_string()),
            }
        })?;

        Ok(Self {
            binary,
            lang: config.lang.clone(),
            tld: config.tld.clone(),
            timeout: config.timeout(),
        })
    }

    /// Arguments for one word
    #[must_use]
    pub fn command_args(&self, word: &str, output: &Path) -> Vec<String> {
        vec![
            word.to_string(),
            "--lang".to_string(),
            self.lang.clone(),
            "--tld".to_string(),
            self.tld.clone(),
            "--output".to_string(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

impl Synthesizer for GttsSynthesizer {
    fn synthesize(&self, word: &str, output: &Path) -> Result<()> {
        let args = self.command_args(word, output);
        tracing::debug!("Running {:?} {:?}", self.binary, args);

        let result = run_with_timeout(Command::new(&self.binary).args(&args), self.timeout)?;
        match result {
            Some(out) if out.status.success() => Ok(()),
            Some(out) => Err(Error::SynthesizerFailed {
                word: word.to_string(),
                message: out.stderr.trim().to_string(),
            }),
            None => Err(Error::SynthesizerFailed {
                word: word.to_string(),
                message: format!("timed out after {}s", self.timeout.as_secs()),
            }),
        }
    }
}

/// Outcome of synthesizing a word list
#[derive(Debug, Default)]
pub struct SynthResult {
    pub success_count: usize,
    pub fail_count: usize,
    /// One line per failed word
    pub failures: Vec<String>,
}

/// Synthesize every word of the vocabulary into `clip_dir` as `<word>.mp3`
///
/// Words are independent and run in parallel; a failure is recorded and the
/// rest carry on.
///
/// # Errors
/// Returns an error only if `clip_dir` cannot be created.
pub fn synthesize_vocabulary<S: Synthesizer + ?Sized>(
    synthesizer: &S,
    clip_dir: &Path,
    words: &[NumberWord],
) -> Result<SynthResult> {
    std::fs::create_dir_all(clip_dir)?;

    let success = AtomicUsize::new(0);
    let failures: Vec<String> = words
        .par_iter()
        .filter_map(|word| {
            let output = clip_dir
                .join(word.clip_stem())
                .with_extension(CLIP_EXTENSION);
            match synthesizer.synthesize(word.as_str(), &output) {
                Ok(()) => {
                    tracing::info!("Synthesized {:?}", output);
                    success.fetch_add(1, Ordering::SeqCst);
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to synthesize '{}': {}", word, e);
                    Some(format!("Failed {word}: {e}"))
                }
            }
        })
        .collect();

    Ok(SynthResult {
        success_count: success.load(Ordering::SeqCst),
        fail_count: failures.len(),
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct TouchSynthesizer;

    impl Synthesizer for TouchSynthesizer {
        fn synthesize(&self, word: &str, output: &Path) -> Result<()> {
            if word == "and" {
                return Err(Error::SynthesizerFailed {
                    word: word.to_string(),
                    message: "rate limited".to_string(),
                });
            }
            std::fs::write(output, word)?;
            Ok(())
        }
    }

    #[test]
    fn test_gtts_args() {
        let synth = GttsSynthesizer {
            binary: PathBuf::from("gtts-cli"),
            lang: "en".to_string(),
            tld: "com.au".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(
            synth.command_args("seven", Path::new("clips/seven.mp3")).join(" "),
            "seven --lang en --tld com.au --output clips/seven.mp3"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_uses_configured_timeout() {
        let config = SynthConfig {
            binary: Some(PathBuf::from("sh")),
            timeout_secs: 7,
            ..SynthConfig::default()
        };
        let synth = GttsSynthesizer::locate(&config).unwrap();
        assert_eq!(synth.timeout, Duration::from_secs(7));
        assert_eq!(synth.tld, "com.au");
    }

    #[test]
    fn test_vocabulary_batch() {
        let dir = tempfile::tempdir().unwrap();
        let result = synthesize_vocabulary(&TouchSynthesizer, dir.path(), &NumberWord::ALL).unwrap();

        assert_eq!(result.success_count, 32);
        assert_eq!(result.fail_count, 1);
        assert!(result.failures[0].starts_with("Failed and"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("billion.mp3")).unwrap(),
            "billion"
        );
        assert!(!dir.path().join("and.mp3").exists());
    }
}
