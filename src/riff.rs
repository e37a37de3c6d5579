//! RIFF/WAVE chunk walking.
//!
//! [`parse_wav`] validates the container, then reads top-level chunks until it
//! reaches `data` (the samples themselves are never read) or runs out of
//! bytes. Every body is handed to its decoder through a cursor bounded to the
//! declared chunk size, so decoders cannot drift into the next chunk.

use serde::Serialize;

use crate::chunks::*;
use crate::cursor::latin1;
use crate::metrics;
use crate::prelude::*;

/// Knobs for [`parse_wav_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Consume the pad byte after odd-sized top-level chunks. When `false`,
    /// padding is only honoured inside INFO and adtl lists.
    pub word_align: bool,
    /// Fail on a chunk body that is shorter than its own layout requires,
    /// instead of skipping the rest of that chunk.
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            word_align: true,
            strict: false,
        }
    }
}

impl ParseOptions {
    pub fn with_word_align(mut self, word_align: bool) -> Self {
        self.word_align = word_align;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Everything learned about a file while walking its chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WavHeader {
    pub chunk_id: String,
    pub riff_size: u32,
    pub format: String,
    pub fmt: Option<FmtChunk>,
    pub data_chunk_size: Option<u32>,
    /// Seconds, set once the `data` chunk is reached.
    pub duration: Option<f64>,
    pub metadata: Metadata,
    pub chapters: Vec<Chapter>,
    pub cue_points: Vec<CuePoint>,
    pub skipped_chunks: Vec<String>,
}

impl WavHeader {
    pub fn byte_rate(&self) -> u32 {
        self.fmt.map_or(0, |fmt| fmt.byte_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.fmt.map_or(0, |fmt| fmt.sample_rate)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(MetaValue::as_text)
    }

    fn record_data_chunk(&mut self, size: u32, fmt_malformed: bool) -> ParseResult<()> {
        self.data_chunk_size = Some(size);
        if self.fmt.is_none() {
            return Err(ParseError::DivideByZero(if fmt_malformed {
                "fmt chunk is malformed, byte rate unknown"
            } else {
                "data chunk precedes fmt chunk, byte rate unknown"
            }));
        }
        self.duration = Some(metrics::duration_seconds(size, self.byte_rate())?);
        Ok(())
    }
}

pub fn parse_wav(data: &[u8]) -> ParseResult<WavHeader> {
    parse_wav_with(data, &ParseOptions::default())
}

pub fn parse_wav_with(data: &[u8], options: &ParseOptions) -> ParseResult<WavHeader> {
    let mut cursor = ByteCursor::new(data);
    let mut header = WavHeader::default();

    let riff_tag = cursor.read_up_to(4);
    header.chunk_id = container_tag(riff_tag);
    if riff_tag != RIFF_CHUNK_ID {
        return Err(ParseError::InvalidContainer {
            tag: header.chunk_id,
            format: String::new(),
        });
    }
    // A size field cut short leaves no room for the format tag either.
    header.riff_size = cursor.read_u32_le().unwrap_or_default();
    let wave_tag = cursor.read_up_to(4);
    header.format = container_tag(wave_tag);
    if wave_tag != WAVE_FORMAT_ID {
        return Err(ParseError::InvalidContainer {
            tag: header.chunk_id,
            format: header.format,
        });
    }
    if header.riff_size as u64 + CHUNK_HEADER_SIZE as u64 != data.len() as u64 {
        debug!(
            riff_size = header.riff_size,
            file_len = data.len(),
            "RIFF size does not match buffer length"
        );
    }

    let mut fmt_malformed = false;
    while cursor.remaining() >= CHUNK_HEADER_SIZE {
        let offset = cursor.offset();
        let chunk_id = cursor.read_tag()?;
        let chunk_size = cursor.read_u32_le()?;
        let tag = latin1(&chunk_id);
        debug!(chunk = %tag, size = chunk_size, offset, "chunk");

        if &chunk_id == DATA_CHUNK_ID {
            header.record_data_chunk(chunk_size, fmt_malformed)?;
            break;
        }

        let mut body = cursor.take(chunk_size as usize)?;
        let decoded = match &chunk_id {
            FMT_CHUNK_ID => FmtChunk::read(&mut body).map(|fmt| header.fmt = Some(fmt)),
            BEXT_CHUNK_ID => read_bext(&mut body, chunk_size, &mut header.metadata),
            LIST_CHUNK_ID => read_list(&mut body, &mut header),
            AXML_CHUNK_ID => read_axml(&mut body, &mut header.metadata),
            CUE_CHUNK_ID => read_cue(&mut body, &mut header.cue_points),
            _ => {
                trace!(chunk = %tag, size = chunk_size, "skipping unrecognized chunk");
                header.skipped_chunks.push(tag.clone());
                Ok(())
            }
        };

        if let Err(err) = decoded {
            if options.strict {
                return Err(err);
            }
            fmt_malformed |= &chunk_id == FMT_CHUNK_ID && header.fmt.is_none();
            warn!(
                chunk = %tag,
                size = chunk_size,
                offset,
                error = %err,
                "malformed chunk body, skipping remainder"
            );
        }

        if options.word_align {
            cursor.skip_padding(chunk_size)?;
        }
    }

    Ok(header)
}

fn container_tag(bytes: &[u8]) -> String {
    latin1(bytes).trim_end_matches('\0').to_string()
}

fn read_list(body: &mut ByteCursor, header: &mut WavHeader) -> ParseResult<()> {
    let list_type = body.read_tag()?;
    match &list_type {
        INFO_LIST_ID => read_info_list(body, &mut header.metadata),
        ADTL_LIST_ID => read_adtl_list(body, &mut header.chapters),
        _ => {
            trace!(list = %latin1(&list_type), "skipping LIST");
            Ok(())
        }
    }
}
