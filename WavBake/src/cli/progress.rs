//! CLI progress display utilities
//!
//! Step lines with emoji markers, plus spinner and bar styles shared by the
//! commands.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for scanning and inspecting
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Speaker - for synthesis and transcoding
pub static SPEAKER: Emoji<'_, '_> = Emoji("🔊 ", "");
/// Floppy disk - for writing headers
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/2] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Print a batch summary with the failed items listed
pub fn print_summary<'a>(
    title: &str,
    success: usize,
    failed: usize,
    failures: impl Iterator<Item = &'a str>,
) {
    println!();
    println!("{title}:");
    println!("  Success: {}", style(success).green());
    println!("  Failed: {}", if failed > 0 { style(failed).red() } else { style(failed) });

    if failed > 0 {
        println!();
        println!("Failures:");
        for msg in failures {
            println!("  {msg}");
        }
    }
}

/// Progress bar style with percentage
///
/// Format: `one.mp3 [####------] 4/10 (40%)`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style_with_percent() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
        .expect("valid template")
        .progress_chars("##-")
}

/// Create a progress bar for `total` items
#[must_use]
pub fn simple_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(bar_style_with_percent());
    pb
}

/// Create a spinner for a single long-running step
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn simple_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
