//! RIFF/WAVE container writing
//!
//! Builds containers chunk by chunk. Used to produce fixtures for the parser
//! and for re-wrapping payloads; it does no encoding of its own.

use super::{DATA_TAG, FMT_TAG, FormatDescriptor, MIN_FMT_SIZE, RIFF_TAG, WAVE_TAG};
use crate::error::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use std::path::Path;

/// Incremental container builder
///
/// Chunks are written in the order they are added, each padded to an even length.
///
/// ```
/// use wavbake::formats::wav::{ContainerBuilder, FormatDescriptor};
///
/// let wav = ContainerBuilder::new()
///     .format(&FormatDescriptor::ima_adpcm(22058, 505))
///     .data(&[0xde, 0xad, 0xbe, 0xef])
///     .build();
/// assert_eq!(&wav[0..4], b"RIFF");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilder {
    body: Vec<u8>,
}

impl ContainerBuilder {
    /// Start an empty container
    #[must_use]
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    /// Append an arbitrary chunk
    #[must_use]
    pub fn chunk(mut self, tag: [u8; 4], payload: &[u8]) -> Self {
        self.body.extend_from_slice(&tag);
        self.body
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.body.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            self.body.push(0);
        }
        self
    }

    /// Append a 20-byte `fmt ` chunk
    #[must_use]
    pub fn format(self, format: &FormatDescriptor) -> Self {
        let bytes = encode_format(format);
        self.chunk(FMT_TAG, &bytes)
    }

    /// Append a `data` chunk
    #[must_use]
    pub fn data(self, payload: &[u8]) -> Self {
        self.chunk(DATA_TAG, payload)
    }

    /// Finish the container, prefixing the RIFF envelope
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.body.len());
        out.extend_from_slice(&RIFF_TAG);
        out.extend_from_slice(&(4 + self.body.len() as u32).to_le_bytes());
        out.extend_from_slice(&WAVE_TAG);
        out.extend_from_slice(&self.body);
        out
    }
}

/// Write a single-`data`-chunk container to disk
///
/// # Errors
/// Returns an error if file writing fails.
pub fn write_container<P: AsRef<Path>>(
    path: P,
    format: &FormatDescriptor,
    payload: &[u8],
) -> Result<()> {
    let bytes = ContainerBuilder::new().format(format).data(payload).build();
    let mut file = std::fs::File::create(path)?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(())
}

/// Encode a descriptor as the 20-byte `fmt ` layout
fn encode_format(format: &FormatDescriptor) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MIN_FMT_SIZE);
    // Writes into a Vec cannot fail
    let _ = buf.write_u16::<LittleEndian>(format.audio_format);
    let _ = buf.write_u16::<LittleEndian>(format.channels);
    let _ = buf.write_u32::<LittleEndian>(format.sample_rate);
    let _ = buf.write_u32::<LittleEndian>(format.avg_bytes_per_sec);
    let _ = buf.write_u16::<LittleEndian>(format.block_align);
    let _ = buf.write_u16::<LittleEndian>(format.bits_per_sample);
    let _ = buf.write_u16::<LittleEndian>(format.extension_size);
    let _ = buf.write_u16::<LittleEndian>(format.samples_per_block);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_size_covers_body() {
        let wav = ContainerBuilder::new()
            .format(&FormatDescriptor::ima_adpcm(22058, 2))
            .data(&[1, 2, 3])
            .build();
        let declared = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]) as usize;
        assert_eq!(declared, wav.len() - 8);
    }

    #[test]
    fn test_format_layout_little_endian() {
        let bytes = encode_format(&FormatDescriptor::ima_adpcm(22058, 505));
        assert_eq!(bytes.len(), MIN_FMT_SIZE);
        assert_eq!(&bytes[0..2], &[0x11, 0x00]);
        assert_eq!(&bytes[4..8], &22058u32.to_le_bytes());
        assert_eq!(&bytes[18..20], &505u16.to_le_bytes());
    }

    #[test]
    fn test_odd_chunk_padded() {
        let wav = ContainerBuilder::new().chunk(*b"JUNK", &[7, 7, 7]).build();
        assert_eq!(wav.len(), 12 + 8 + 4);
        assert_eq!(wav[wav.len() - 1], 0);
    }
}
