//! Utility functions

pub mod process;

pub use process::{ProcessOutput, resolve_binary, run_with_timeout};
