//! CLI command for batch baking

use std::time::Instant;

use crate::batch::{batch_bake, find_clips};
use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_step, print_summary, simple_bar};
use crate::config::BakeConfig;
use crate::transcode::SoxTranscoder;

/// Bake every clip in `config.clip_dir`
///
/// Fails after printing the summary if any clip failed, so the exit status
/// reflects it while the successful headers stay on disk.
pub fn execute(config: &BakeConfig, show_progress: bool) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 2, LOOKING_GLASS, &format!("Scanning {}...", config.clip_dir.display()));
    let clips = find_clips(&config.clip_dir)?;

    if clips.is_empty() {
        println!("No clips found in: {}", config.clip_dir.display());
        return Ok(());
    }

    let transcoder = SoxTranscoder::locate(&config.transcoder)?;

    print_step(
        2,
        2,
        DISK,
        &format!(
            "Baking {} clips ({}) into {}",
            clips.len(),
            config.profile,
            config.header_dir.display()
        ),
    );

    let pb = simple_bar(clips.len() as u64);
    if !show_progress {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let result = batch_bake(&clips, config, &transcoder, |progress| {
        pb.set_position(progress.current as u64);
        if let Some(ref name) = progress.current_file {
            pb.set_message(name.clone());
        } else {
            pb.set_message(progress.phase.as_str());
        }
    })?;

    pb.finish_and_clear();

    print_summary("Bake complete", result.success_count, result.fail_count, result.failures());
    if let Some(index) = &result.index {
        println!("  Index: {}", index.display());
    }
    println!();
    print_done(start.elapsed());

    if result.fail_count > 0 {
        anyhow::bail!("{} of {} clips failed", result.fail_count, clips.len());
    }

    Ok(())
}
