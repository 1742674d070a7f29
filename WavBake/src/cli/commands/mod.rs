use clap::Subcommand;
use std::path::PathBuf;

use crate::config::BakeConfig;
use crate::profile::EncodingProfile;

pub mod bake;
pub mod convert;
pub mod inspect;
pub mod say;
pub mod synth;

#[derive(Subcommand)]
pub enum Commands {
    /// Transcode every clip in a directory and write one header per clip
    Bake {
        /// Directory of source .mp3 clips
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Directory for generated headers
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Directory for transcoder output
        #[arg(long)]
        intermediate: Option<PathBuf>,

        /// Output encoding (adpcm, pcm)
        #[arg(short, long)]
        profile: Option<EncodingProfile>,

        /// Clip file names to transcode without silence trimming (repeatable)
        #[arg(long = "no-trim")]
        no_trim: Vec<String>,

        /// Path to the sox binary
        #[arg(long)]
        sox: Option<PathBuf>,

        /// Seconds before a transcode is killed
        #[arg(long)]
        timeout: Option<u64>,

        /// Also write an include header with this file name
        #[arg(long)]
        index: Option<String>,

        /// Number of worker threads
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Convert one transcoded file (.wav or .raw) to a header
    Convert {
        /// Source file
        #[arg(short, long)]
        source: PathBuf,

        /// Destination header
        #[arg(short, long)]
        destination: PathBuf,

        /// Encoding (auto-detected from the source extension if not specified)
        #[arg(short, long)]
        profile: Option<EncodingProfile>,
    },

    /// Show the format of a WAV file or the contents of a generated header
    Inspect {
        /// WAV container or header file
        path: PathBuf,

        /// Encoding the WAV file must match
        #[arg(short, long, default_value = "adpcm")]
        profile: EncodingProfile,
    },

    /// Synthesize the spoken-number vocabulary with gtts-cli
    Synth {
        /// Directory for the synthesized clips
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only these words (defaults to the whole vocabulary)
        #[arg(short, long)]
        word: Vec<String>,

        /// Path to the gtts-cli binary
        #[arg(long)]
        gtts: Option<PathBuf>,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Top-level domain selecting the accent
        #[arg(long)]
        tld: Option<String>,
    },

    /// Print the words used to speak a number
    Say {
        /// Number to speak
        number: u32,

        /// Header directory to check for missing clips
        #[arg(long)]
        headers: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self, mut config: BakeConfig) -> anyhow::Result<()> {
        match self {
            Commands::Bake {
                source,
                destination,
                intermediate,
                profile,
                no_trim,
                sox,
                timeout,
                index,
                jobs,
                quiet,
            } => {
                if let Some(profile) = profile {
                    config.set_profile(*profile);
                }
                if let Some(dir) = source {
                    config.clip_dir.clone_from(dir);
                }
                if let Some(dir) = destination {
                    config.header_dir.clone_from(dir);
                }
                if let Some(dir) = intermediate {
                    config.intermediate_dir.clone_from(dir);
                }
                config.no_trim.extend(no_trim.iter().cloned());
                if sox.is_some() {
                    config.transcoder.binary.clone_from(sox);
                }
                if let Some(secs) = timeout {
                    config.transcoder.timeout_secs = *secs;
                }
                if index.is_some() {
                    config.index_file.clone_from(index);
                }
                if jobs.is_some() {
                    config.jobs = *jobs;
                }
                bake::execute(&config, !*quiet)
            }
            Commands::Convert {
                source,
                destination,
                profile,
            } => convert::execute(source, destination, *profile),
            Commands::Inspect { path, profile } => inspect::execute(path, *profile),
            Commands::Synth {
                output,
                word,
                gtts,
                lang,
                tld,
            } => {
                if let Some(dir) = output {
                    config.clip_dir.clone_from(dir);
                }
                if gtts.is_some() {
                    config.synth.binary.clone_from(gtts);
                }
                if let Some(lang) = lang {
                    config.synth.lang.clone_from(lang);
                }
                if let Some(tld) = tld {
                    config.synth.tld.clone_from(tld);
                }
                synth::execute(&config, word)
            }
            Commands::Say { number, headers } => say::execute(*number, headers.as_deref()),
        }
    }
}
