use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

mod adtl;
mod axml;
mod bext;
mod cue;
mod fmt_chunk;
mod info;
pub use adtl::{Chapter, read_adtl_list};
pub use axml::{extract_isrc, read_axml};
pub use bext::{BEXT_FIXED_SIZE, read_bext};
pub use cue::{CuePoint, read_cue};
pub use fmt_chunk::FmtChunk;
pub use info::{info_tag_name, read_info_list};

// Chunk Identifiers
pub const RIFF_CHUNK_ID: &[u8; 4] = b"RIFF";
pub const WAVE_FORMAT_ID: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK_ID: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK_ID: &[u8; 4] = b"data";
pub const BEXT_CHUNK_ID: &[u8; 4] = b"bext";
pub const LIST_CHUNK_ID: &[u8; 4] = b"LIST";
pub const AXML_CHUNK_ID: &[u8; 4] = b"axml";
pub const CUE_CHUNK_ID: &[u8; 4] = b"cue ";

// LIST types
pub const INFO_LIST_ID: &[u8; 4] = b"INFO";
pub const ADTL_LIST_ID: &[u8; 4] = b"adtl";

// adtl entries
pub const LABL_CHUNK_ID: &[u8; 4] = b"labl";
pub const NOTE_CHUNK_ID: &[u8; 4] = b"note";

/// Tag + little-endian size.
pub const CHUNK_HEADER_SIZE: usize = 8;

// Metadata keys written by the decoders
pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_ORIGINATOR: &str = "originator";
pub const KEY_ORIGINATOR_REFERENCE: &str = "originator_reference";
pub const KEY_ORIGINATION_DATE: &str = "origination_date";
pub const KEY_ORIGINATION_TIME: &str = "origination_time";
pub const KEY_TIME_REFERENCE: &str = "time_reference";
pub const KEY_BEXT_VERSION: &str = "bext_version";
pub const KEY_UMID: &str = "umid";
pub const KEY_LOUDNESS_VALUE: &str = "loudness_value";
pub const KEY_LOUDNESS_RANGE: &str = "loudness_range";
pub const KEY_MAX_TRUE_PEAK_LEVEL: &str = "max_true_peak_level";
pub const KEY_MAX_MOMENTARY_LOUDNESS: &str = "max_momentary_loudness";
pub const KEY_MAX_SHORT_TERM_LOUDNESS: &str = "max_short_term_loudness";
pub const KEY_CODING_HISTORY: &str = "coding_history";
pub const KEY_ISRC: &str = "isrc";

/// A decoded metadata value: text fields stay text, integer fields stay numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Text(text) => write!(f, "{}", text),
            MetaValue::Unsigned(value) => write!(f, "{}", value),
            MetaValue::Signed(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<u64> for MetaValue {
    fn from(value: u64) -> Self {
        MetaValue::Unsigned(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Signed(value)
    }
}

pub type Metadata = BTreeMap<String, MetaValue>;

/// Inserts a text field unless it is empty.
pub(crate) fn insert_text(metadata: &mut Metadata, key: &str, value: String) {
    if !value.is_empty() {
        metadata.insert(key.to_string(), MetaValue::Text(value));
    }
}

#[cfg(test)]
pub(crate) fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + CHUNK_HEADER_SIZE + 1);
    out.extend_from_slice(id);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}
