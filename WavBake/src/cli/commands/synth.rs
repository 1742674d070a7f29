//! CLI command for synthesizing the vocabulary

use std::time::Instant;

use crate::cli::progress::{SPEAKER, print_done, print_step, print_summary, simple_spinner};
use crate::config::BakeConfig;
use crate::speech::NumberWord;
use crate::synth::{GttsSynthesizer, synthesize_vocabulary};

/// Synthesize `words` (or the whole vocabulary) into `config.clip_dir`
pub fn execute(config: &BakeConfig, words: &[String]) -> anyhow::Result<()> {
    let start = Instant::now();

    let selected: Vec<NumberWord> = if words.is_empty() {
        NumberWord::ALL.to_vec()
    } else {
        words
            .iter()
            .map(|w| {
                NumberWord::ALL
                    .into_iter()
                    .find(|nw| nw.as_str().eq_ignore_ascii_case(w))
                    .ok_or_else(|| anyhow::anyhow!("'{w}' is not in the number vocabulary"))
            })
            .collect::<anyhow::Result<_>>()?
    };

    let synthesizer = GttsSynthesizer::locate(&config.synth)?;

    print_step(
        1,
        1,
        SPEAKER,
        &format!(
            "Synthesizing {} words into {}",
            selected.len(),
            config.clip_dir.display()
        ),
    );

    let pb = simple_spinner("Synthesizing...");
    let result = synthesize_vocabulary(&synthesizer, &config.clip_dir, &selected)?;
    pb.finish_and_clear();

    print_summary(
        "Synthesis complete",
        result.success_count,
        result.fail_count,
        result.failures.iter().map(String::as_str),
    );
    println!();
    print_done(start.elapsed());

    if result.fail_count > 0 {
        anyhow::bail!("{} of {} words failed", result.fail_count, selected.len());
    }
    Ok(())
}
