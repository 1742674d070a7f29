//! CLI command for spelling out numbers

use std::path::Path;

use crate::formats::header::HEADER_EXTENSION;
use crate::speech::number_to_words;

/// Print the words for `number`, and which of their headers are missing
pub fn execute(number: u32, headers: Option<&Path>) -> anyhow::Result<()> {
    let words = number_to_words(number);
    let spoken: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
    println!("{number}: {}", spoken.join(" "));

    let Some(dir) = headers else {
        return Ok(());
    };

    let mut missing: Vec<String> = words
        .iter()
        .map(|w| format!("{}.{HEADER_EXTENSION}", w.clip_stem()))
        .filter(|name| !dir.join(name).is_file())
        .collect();
    missing.sort();
    missing.dedup();

    if missing.is_empty() {
        println!("All {} clip headers present in {}", words.len(), dir.display());
        Ok(())
    } else {
        println!("Missing from {}:", dir.display());
        for name in &missing {
            println!("  {name}");
        }
        anyhow::bail!("{} clip headers missing", missing.len())
    }
}
