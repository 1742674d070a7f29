//! File format handlers
//!
//! - `wav` - RIFF/WAVE containers holding the transcoded audio
//! - `header` - C/C++ header assets embedding the payload

pub mod wav;
pub mod header;

// Re-export main types
pub use wav::{AudioPayload, ExpectedFormat, FormatDescriptor, parse_container, read_container};
pub use header::{AssetRecord, ConstKeyword, ParsedAsset, emit_asset, read_header, write_asset};
