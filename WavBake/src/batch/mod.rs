//! Batch baking
//!
//! Discovers clips, runs transcode → parse → emit for each of them in
//! parallel, and optionally writes an include header covering the batch.

mod bake;
mod index;
mod types;

pub use bake::{CLIP_EXTENSION, bake_clip, batch_bake, clip_request, find_clips, trim_policy};
pub use index::{render_index, write_index};
pub use types::{BakePhase, BakeProgress, BakeResult, BakedClip};
