//! RIFF/WAVE container parsing

use super::{
    AudioPayload, CHUNK_HEADER_SIZE, ChunkHeader, DATA_TAG, ExpectedFormat, FACT_TAG, FMT_TAG,
    FormatDescriptor, MIN_FMT_SIZE, RIFF_HEADER_SIZE, RIFF_TAG, RiffEnvelope, WAVE_TAG,
};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::path::Path;

/// Read a container from disk and extract its payload
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any of the container
/// errors described on [`parse_container`].
pub fn read_container<P: AsRef<Path>>(
    path: P,
    expected: &ExpectedFormat,
) -> Result<(AudioPayload, FormatDescriptor)> {
    let data = std::fs::read(path)?;
    parse_container(&data, expected)
}

/// Parse a container and extract the `data` payload with its format
///
/// Chunks are walked in order. The last `fmt ` chunk before `data` wins;
/// anything after `data` is never read.
///
/// # Errors
///
/// - [`Error::MalformedContainer`] if fewer than 12 bytes are available
/// - [`Error::BadRiffTag`] / [`Error::BadFormTag`] if the envelope tags are wrong
/// - [`Error::InvalidFormatChunk`] if a `fmt ` chunk has fewer than 20 bytes
/// - [`Error::MissingFormatChunk`] if `data` comes before any `fmt `
/// - [`Error::UnsupportedAudioFormat`] if the format does not match `expected`
/// - [`Error::TruncatedPayload`] if the `data` chunk is cut short
/// - [`Error::MissingDataChunk`] if the chunk stream ends without `data`
pub fn parse_container(
    data: &[u8],
    expected: &ExpectedFormat,
) -> Result<(AudioPayload, FormatDescriptor)> {
    let mut cursor = Cursor::new(data);

    let envelope = read_envelope(&mut cursor)?;
    tracing::trace!("RIFF envelope declares {} bytes", envelope.size);

    let mut format: Option<FormatDescriptor> = None;

    while let Some(header) = read_chunk_header(&mut cursor)? {
        match header.tag {
            FMT_TAG => {
                let body = take(&mut cursor, header.length as usize);
                format = Some(parse_format(body)?);
            }
            FACT_TAG => {
                take(&mut cursor, header.length as usize);
            }
            DATA_TAG => {
                let format = format.ok_or(Error::MissingFormatChunk)?;
                expected.check(&format)?;

                let expected_len = header.length as usize;
                let body = take(&mut cursor, expected_len);
                if body.len() != expected_len {
                    return Err(Error::TruncatedPayload {
                        expected: expected_len,
                        actual: body.len(),
                    });
                }

                return Ok((AudioPayload::new(body.to_vec()), format));
            }
            _ => {
                tracing::debug!("Skipping chunk: {:?}", header.tag_str());
                take(&mut cursor, header.length as usize);
            }
        }

        if header.is_padded() {
            take(&mut cursor, 1);
        }
    }

    Err(Error::MissingDataChunk)
}

/// Read and validate the 12-byte RIFF envelope
fn read_envelope(cursor: &mut Cursor<&[u8]>) -> Result<RiffEnvelope> {
    let available = remaining(cursor);
    if available < RIFF_HEADER_SIZE {
        return Err(Error::MalformedContainer { available });
    }

    let mut riff = [0u8; 4];
    cursor.read_exact(&mut riff)?;
    let size = cursor.read_u32::<LittleEndian>()?;
    let mut form = [0u8; 4];
    cursor.read_exact(&mut form)?;

    if riff != RIFF_TAG {
        return Err(Error::BadRiffTag(riff));
    }
    if form != WAVE_TAG {
        return Err(Error::BadFormTag(form));
    }

    Ok(RiffEnvelope { size })
}

/// Read the next chunk header, or `None` when fewer than 8 bytes remain
fn read_chunk_header(cursor: &mut Cursor<&[u8]>) -> Result<Option<ChunkHeader>> {
    if remaining(cursor) < CHUNK_HEADER_SIZE {
        return Ok(None);
    }

    let mut tag = [0u8; 4];
    cursor.read_exact(&mut tag)?;
    let length = cursor.read_u32::<LittleEndian>()?;

    Ok(Some(ChunkHeader { tag, length }))
}

/// Decode the first 20 bytes of a `fmt ` chunk
fn parse_format(body: &[u8]) -> Result<FormatDescriptor> {
    if body.len() < MIN_FMT_SIZE {
        return Err(Error::InvalidFormatChunk {
            length: body.len(),
            required: MIN_FMT_SIZE,
        });
    }

    let mut fmt = Cursor::new(&body[..MIN_FMT_SIZE]);
    Ok(FormatDescriptor {
        audio_format: fmt.read_u16::<LittleEndian>()?,
        channels: fmt.read_u16::<LittleEndian>()?,
        sample_rate: fmt.read_u32::<LittleEndian>()?,
        avg_bytes_per_sec: fmt.read_u32::<LittleEndian>()?,
        block_align: fmt.read_u16::<LittleEndian>()?,
        bits_per_sample: fmt.read_u16::<LittleEndian>()?,
        extension_size: fmt.read_u16::<LittleEndian>()?,
        samples_per_block: fmt.read_u16::<LittleEndian>()?,
    })
}

/// Bytes left after the cursor position
fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    let len = cursor.get_ref().len();
    len.saturating_sub(cursor.position() as usize)
}

/// Advance by up to `len` bytes and return what was consumed.
///
/// Stops at the end of input, so a short result means the container was cut off.
fn take<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize) -> &'a [u8] {
    let data: &'a [u8] = *cursor.get_ref();
    let start = (cursor.position() as usize).min(data.len());
    let end = start.saturating_add(len).min(data.len());
    cursor.set_position(end as u64);
    &data[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::wav::{ContainerBuilder, WAVE_FORMAT_IMA_ADPCM};
    use pretty_assertions::assert_eq;

    fn adpcm() -> ExpectedFormat {
        ExpectedFormat::ima_adpcm(22058)
    }

    fn fmt_chunk(rate: u32, samples_per_block: u16) -> FormatDescriptor {
        FormatDescriptor::ima_adpcm(rate, samples_per_block)
    }

    #[test]
    fn test_scenario_deadbeef() {
        let wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .data(&[0xDE, 0xAD, 0xBE, 0xEF])
            .build();

        let (payload, format) = parse_container(&wav, &adpcm()).unwrap();
        assert_eq!(payload.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(format.sample_rate, 22058);
        assert_eq!(format.samples_per_block, 2);
        assert_eq!(format.audio_format, 17);
    }

    #[test]
    fn test_too_short_is_malformed() {
        let err = parse_container(b"RIFF\0\0\0\0WAV", &adpcm()).unwrap_err();
        assert!(matches!(err, Error::MalformedContainer { available: 11 }));
    }

    #[test]
    fn test_bad_riff_tag() {
        let mut wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .data(&[1, 2])
            .build();
        wav[0..4].copy_from_slice(b"RIFX");
        let err = parse_container(&wav, &adpcm()).unwrap_err();
        assert!(matches!(err, Error::BadRiffTag(tag) if &tag == b"RIFX"));
    }

    #[test]
    fn test_bad_form_tag() {
        let mut wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .data(&[1, 2])
            .build();
        wav[8..12].copy_from_slice(b"AVI ");
        let err = parse_container(&wav, &adpcm()).unwrap_err();
        assert!(matches!(err, Error::BadFormTag(tag) if &tag == b"AVI "));
    }

    #[test]
    fn test_short_fmt_chunk() {
        // 16-byte PCM-style fmt chunk lacks samples-per-block
        let wav = ContainerBuilder::new()
            .chunk(FMT_TAG, &[0u8; 16])
            .data(&[1, 2])
            .build();
        let err = parse_container(&wav, &adpcm()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFormatChunk {
                length: 16,
                required: 20
            }
        ));
    }

    #[test]
    fn test_data_before_fmt_fails_without_lookahead() {
        let wav = ContainerBuilder::new()
            .data(&[1, 2, 3, 4])
            .format(&fmt_chunk(22058, 2))
            .build();
        let err = parse_container(&wav, &adpcm()).unwrap_err();
        assert!(matches!(err, Error::MissingFormatChunk));
    }

    #[test]
    fn test_rate_off_by_one_rejected() {
        for rate in [22057, 22059] {
            let wav = ContainerBuilder::new()
                .format(&fmt_chunk(rate, 2))
                .data(&[1, 2])
                .build();
            let err = parse_container(&wav, &adpcm()).unwrap_err();
            assert!(matches!(err, Error::UnsupportedAudioFormat { actual_rate, .. } if actual_rate == rate));
        }
    }

    #[test]
    fn test_wrong_codec_rejected() {
        let wav = ContainerBuilder::new()
            .format(&FormatDescriptor::pcm16(22058))
            .data(&[1, 2])
            .build();
        let err = parse_container(&wav, &adpcm()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedAudioFormat {
                actual_format: 1,
                expected_format: 17,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_odd_chunk_is_skipped() {
        let plain = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .data(&[9, 8, 7, 6, 5])
            .build();
        let with_junk = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .chunk(*b"JUNK", &[0xAA, 0xBB, 0xCC])
            .chunk(*b"LIST", &[0x11; 7])
            .data(&[9, 8, 7, 6, 5])
            .build();

        // 3-byte chunk gets one pad byte, 7-byte chunk gets one pad byte
        assert_eq!(with_junk.len(), plain.len() + (8 + 3 + 1) + (8 + 7 + 1));

        let a = parse_container(&plain, &adpcm()).unwrap();
        let b = parse_container(&with_junk, &adpcm()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_even_chunk_has_no_pad() {
        let wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .chunk(*b"JUNK", &[0xAA; 4])
            .data(&[1])
            .build();
        // 12 envelope + 28 fmt + 12 junk + 8 data header + 1 + 1 pad
        assert_eq!(wav.len(), 12 + 28 + 12 + 8 + 2);
        let (payload, _) = parse_container(&wav, &adpcm()).unwrap();
        assert_eq!(payload.as_bytes(), &[1]);
    }

    #[test]
    fn test_fact_chunk_ignored() {
        let wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 505))
            .chunk(FACT_TAG, &1010u32.to_le_bytes())
            .data(&[0x42; 256])
            .build();
        let (payload, format) = parse_container(&wav, &adpcm()).unwrap();
        assert_eq!(payload.len(), 256);
        assert_eq!(format.samples_per_block, 505);
    }

    #[test]
    fn test_odd_fmt_and_fact_chunks_are_padded() {
        // 20 descriptor bytes plus one trailing extension byte
        let mut fmt = Vec::new();
        fmt.extend_from_slice(&WAVE_FORMAT_IMA_ADPCM.to_le_bytes());
        fmt.extend_from_slice(&1u16.to_le_bytes());
        fmt.extend_from_slice(&22058u32.to_le_bytes());
        fmt.extend_from_slice(&11165u32.to_le_bytes());
        fmt.extend_from_slice(&256u16.to_le_bytes());
        fmt.extend_from_slice(&4u16.to_le_bytes());
        fmt.extend_from_slice(&2u16.to_le_bytes());
        fmt.extend_from_slice(&2u16.to_le_bytes());
        fmt.push(0x7f);
        assert_eq!(fmt.len(), 21);

        let fmt_only = ContainerBuilder::new()
            .chunk(FMT_TAG, &fmt)
            .data(&[0xde, 0xad])
            .build();
        let (payload, format) = parse_container(&fmt_only, &adpcm()).unwrap();
        assert_eq!(payload.as_bytes(), &[0xde, 0xad]);
        assert_eq!(format.samples_per_block, 2);

        let with_fact = ContainerBuilder::new()
            .chunk(FMT_TAG, &fmt)
            .chunk(FACT_TAG, &[1, 2, 3])
            .data(&[0xde, 0xad])
            .build();
        let (payload, format) = parse_container(&with_fact, &adpcm()).unwrap();
        assert_eq!(payload.as_bytes(), &[0xde, 0xad]);
        assert_eq!(format.samples_per_block, 2);
    }

    #[test]
    fn test_last_fmt_before_data_wins() {
        let wav = ContainerBuilder::new()
            .format(&fmt_chunk(8000, 2))
            .format(&fmt_chunk(22058, 9))
            .data(&[1, 2])
            .build();
        let (_, format) = parse_container(&wav, &adpcm()).unwrap();
        assert_eq!(format.samples_per_block, 9);
    }

    #[test]
    fn test_truncated_payload() {
        let mut wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .data(&[1, 2, 3, 4, 5, 6])
            .build();
        wav.truncate(wav.len() - 2);
        let err = parse_container(&wav, &adpcm()).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedPayload {
                expected: 6,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_missing_data_chunk() {
        let wav = ContainerBuilder::new().format(&fmt_chunk(22058, 2)).build();
        let err = parse_container(&wav, &adpcm()).unwrap_err();
        assert!(matches!(err, Error::MissingDataChunk));
    }

    #[test]
    fn test_chunks_after_data_not_read() {
        let mut wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .data(&[1, 2])
            .build();
        // Trailing garbage that would not parse as a chunk
        wav.extend_from_slice(b"garbage!!");
        let (payload, _) = parse_container(&wav, &adpcm()).unwrap();
        assert_eq!(payload.as_bytes(), &[1, 2]);
    }

    #[test]
    fn test_riff_size_not_validated() {
        let mut wav = ContainerBuilder::new()
            .format(&fmt_chunk(22058, 2))
            .data(&[1, 2])
            .build();
        wav[4..8].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        assert!(parse_container(&wav, &adpcm()).is_ok());
    }
}
