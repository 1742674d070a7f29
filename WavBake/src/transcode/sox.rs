//! `sox` backed transcoder

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use super::{TranscodeRequest, Transcoder};
use crate::config::TranscoderConfig;
use crate::error::{Error, Result};
use crate::utils::process::{resolve_binary, run_with_timeout};

/// Binary name searched on PATH
pub const SOX_BINARY: &str = "sox";

/// Runs `sox` once per clip
#[derive(Debug, Clone)]
pub struct SoxTranscoder {
    binary: PathBuf,
    timeout: Duration,
}

impl SoxTranscoder {
    /// Use a specific binary and timeout
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Resolve the binary from config, falling back to PATH
    ///
    /// # Errors
    /// Returns [`Error::TranscoderNotFound`] if no usable binary exists.
    pub fn locate(config: &TranscoderConfig) -> Result<Self> {
        let binary = resolve_binary(config.binary.as_deref(), SOX_BINARY).ok_or_else(|| {
            Error::TranscoderNotFound {
                binary: config
                    .binary
                    .as_ref()
                    .map_or_else(|| SOX_BINARY.to_string(), |p| p.display().to_string()),
            }
        })?;
        tracing::debug!("Using transcoder {:?}", binary);
        Ok(Self::new(binary, config.timeout()))
    }

    /// Arguments for one request: input, encoding, output, then effects
    #[must_use]
    pub fn command_args(request: &TranscodeRequest) -> Vec<OsString> {
        let mut args = vec![request.input.clone().into_os_string()];
        args.extend(request.profile.sox_encoding_args().into_iter().map(OsString::from));
        args.push(request.output.clone().into_os_string());
        args.extend(request.trim.effect_args().iter().map(OsString::from));
        args
    }
}

impl Transcoder for SoxTranscoder {
    fn transcode(&self, request: &TranscodeRequest) -> Result<()> {
        let args = Self::command_args(request);
        tracing::debug!("Running {:?} {:?}", self.binary, args);

        let mut command = Command::new(&self.binary);
        command.args(&args);

        let output = run_with_timeout(&mut command, self.timeout)?.ok_or_else(|| {
            Error::TranscoderTimeout {
                input: request.input.clone(),
                timeout_secs: self.timeout.as_secs(),
            }
        })?;

        if !output.status.success() {
            return Err(Error::TranscoderFailed {
                input: request.input.clone(),
                code: output.status.code(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EncodingProfile;
    use crate::transcode::TrimPolicy;
    use pretty_assertions::assert_eq;

    fn joined(args: &[OsString]) -> String {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_adpcm_trimmed_args() {
        let request = TranscodeRequest::new("in/one.mp3", "out/one.wav", EncodingProfile::Adpcm);
        assert_eq!(
            joined(&SoxTranscoder::command_args(&request)),
            "in/one.mp3 --encoding ima-adpcm --rate 22058 out/one.wav \
             silence 1 0.1 0.2% reverse silence 1 0.1 0.2% reverse"
        );
    }

    #[test]
    fn test_pcm_untrimmed_args() {
        let request = TranscodeRequest::new("billion.mp3", "billion.raw", EncodingProfile::Pcm)
            .with_trim(TrimPolicy::Keep);
        assert_eq!(
            joined(&SoxTranscoder::command_args(&request)),
            "billion.mp3 --rate 22050 --bits 16 --encoding signed-integer --endian little billion.raw"
        );
    }

    #[test]
    fn test_missing_binary() {
        let config = TranscoderConfig {
            binary: Some(PathBuf::from("/nonexistent/sox-xyz")),
            ..TranscoderConfig::default()
        };
        assert!(matches!(
            SoxTranscoder::locate(&config),
            Err(Error::TranscoderNotFound { .. })
        ));
    }

    /// `sh` runs the "input" as a script, standing in for a misbehaving sox
    #[cfg(unix)]
    fn shell_request(dir: &std::path::Path, script: &str) -> TranscodeRequest {
        let input = dir.join("clip.sh");
        std::fs::write(&input, script).unwrap();
        TranscodeRequest::new(input, dir.join("clip.wav"), EncodingProfile::Adpcm)
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_reported() {
        let dir = tempfile::tempdir().unwrap();
        let request = shell_request(dir.path(), "sleep 5\n");
        let transcoder = SoxTranscoder::new("sh", Duration::from_millis(200));

        assert!(matches!(
            transcoder.transcode(&request),
            Err(Error::TranscoderTimeout { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let request = shell_request(dir.path(), "echo 'no handler for file' >&2\nexit 2\n");
        let transcoder = SoxTranscoder::new("sh", Duration::from_secs(10));

        match transcoder.transcode(&request) {
            Err(Error::TranscoderFailed { code, stderr, .. }) => {
                assert_eq!(code, Some(2));
                assert_eq!(stderr, "no handler for file");
            }
            other => panic!("expected TranscoderFailed, got {other:?}"),
        }
    }
}
