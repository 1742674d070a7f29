//! Clip discovery and parallel baking

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::index::write_index;
use super::types::{BakePhase, BakeProgress, BakeResult, BakedClip};
use crate::config::BakeConfig;
use crate::converter::convert_to_header;
use crate::error::{Error, Result};
use crate::formats::header::HEADER_EXTENSION;
use crate::transcode::{TranscodeRequest, Transcoder, TrimPolicy};

/// Extension of source clips
pub const CLIP_EXTENSION: &str = "mp3";

/// Find source clips in a directory
///
/// Only the directory itself is searched. Matching is on a case-insensitive
/// `.mp3` extension and the result is sorted.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn find_clips<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut clips = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CLIP_EXTENSION))
        {
            clips.push(path.to_path_buf());
        }
    }

    clips.sort();
    Ok(clips)
}

/// Trim policy for a clip under `config`
#[must_use]
pub fn trim_policy(clip: &Path, config: &BakeConfig) -> TrimPolicy {
    let exempt = clip
        .file_name()
        .is_some_and(|name| config.is_trim_exempt(&name.to_string_lossy()));
    if exempt { TrimPolicy::Keep } else { TrimPolicy::Trim }
}

/// Transcoder request for a clip under `config`
///
/// # Errors
/// Returns [`Error::InvalidPath`] if the clip has no file stem.
pub fn clip_request(clip: &Path, config: &BakeConfig) -> Result<TranscodeRequest> {
    let stem = clip_stem(clip)?;
    let output = config
        .intermediate_dir
        .join(format!("{stem}.{}", config.profile.intermediate_extension()));
    Ok(TranscodeRequest::new(clip, output, config.profile).with_trim(trim_policy(clip, config)))
}

/// Run the whole pipeline for one clip: transcode, parse, emit
///
/// Output directories must already exist.
///
/// # Errors
/// Returns the first error from any stage.
pub fn bake_clip(clip: &Path, config: &BakeConfig, transcoder: &dyn Transcoder) -> Result<BakedClip> {
    let request = clip_request(clip, config)?;
    let stem = clip_stem(clip)?;
    let header = config.header_dir.join(format!("{stem}.{HEADER_EXTENSION}"));

    transcoder.transcode(&request)?;
    tracing::info!(
        "{} -> {} {}",
        clip.display(),
        request.output.display(),
        request.trim.describe()
    );

    let record = convert_to_header(&request.output, &header, config.profile)?;

    Ok(BakedClip {
        stem,
        intermediate: request.output,
        header,
        trim: request.trim,
        record,
    })
}

/// Bake clips in parallel
///
/// Each clip is independent. A failing clip is logged and recorded in the
/// result; the others still produce headers. When `config.index_file` is set,
/// an aggregate include header listing every baked clip is written last.
///
/// # Arguments
/// * `clips` - Source clips, usually from [`find_clips`]
/// * `config` - Directories, profile and trim exemptions
/// * `transcoder` - Produces the intermediate file for each clip
/// * `progress` - Callback for progress updates
///
/// # Errors
/// Returns an error only for batch-level failures: the output directories
/// cannot be created or the index cannot be written.
pub fn batch_bake<F>(
    clips: &[PathBuf],
    config: &BakeConfig,
    transcoder: &dyn Transcoder,
    progress: F,
) -> Result<BakeResult>
where
    F: Fn(&BakeProgress) + Send + Sync,
{
    std::fs::create_dir_all(&config.intermediate_dir)?;
    std::fs::create_dir_all(&config.header_dir)?;

    let mut result = match config.jobs {
        Some(jobs) => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(|| bake_all(clips, config, transcoder, &progress)),
            Err(e) => {
                tracing::warn!("Could not start {} workers, using the global pool: {}", jobs, e);
                bake_all(clips, config, transcoder, &progress)
            }
        },
        None => bake_all(clips, config, transcoder, &progress),
    };

    if let Some(index_name) = &config.index_file {
        progress(&BakeProgress::new(BakePhase::WritingIndex, clips.len(), clips.len()));
        let stems: Vec<&str> = result.baked.iter().map(|c| c.stem.as_str()).collect();
        let index = config.header_dir.join(index_name);
        write_index(&index, &config.include_prefix, &stems)?;
        result.index = Some(index);
    }

    progress(&BakeProgress::new(BakePhase::Complete, clips.len(), clips.len()));
    Ok(result)
}

fn bake_all<F>(clips: &[PathBuf], config: &BakeConfig, transcoder: &dyn Transcoder, progress: &F) -> BakeResult
where
    F: Fn(&BakeProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = clips.len();

    let outcomes: Vec<(String, Option<BakedClip>)> = clips
        .par_iter()
        .map(|clip| {
            let display_name = clip
                .file_name()
                .map_or_else(|| clip.to_string_lossy(), |n| n.to_string_lossy())
                .to_string();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BakeProgress::with_file(
                BakePhase::Transcoding,
                current,
                total,
                display_name.clone(),
            ));

            match bake_clip(clip, config, transcoder) {
                Ok(baked) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    (format!("Baked: {display_name} -> {}", baked.header.display()), Some(baked))
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!("Failed to bake {}: {}", display_name, e);
                    (format!("Failed {display_name}: {e}"), None)
                }
            }
        })
        .collect();

    let (results, baked): (Vec<String>, Vec<Option<BakedClip>>) = outcomes.into_iter().unzip();

    BakeResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
        baked: baked.into_iter().flatten().collect(),
        index: None,
    }
}

fn clip_stem(clip: &Path) -> Result<String> {
    clip.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidPath(format!("no file stem in {}", clip.display())))
}
