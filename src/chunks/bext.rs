use super::*;
use crate::prelude::*;

/// Bytes in a `bext` body before the coding history starts.
pub const BEXT_FIXED_SIZE: usize = 602;
const BEXT_RESERVED_SIZE: usize = 180;

/// Decodes a Broadcast Wave `bext` body into `metadata`.
///
/// Fields are merged as they are read, so a body that runs out early still
/// leaves everything before the truncation point in the map.
pub fn read_bext(body: &mut ByteCursor, size: u32, metadata: &mut Metadata) -> ParseResult<()> {
    // Description: 256 bytes, NUL padded
    insert_text(metadata, KEY_DESCRIPTION, body.read_fixed_string(256)?);
    // Originator: 32 bytes
    insert_text(metadata, KEY_ORIGINATOR, body.read_fixed_string(32)?);
    // OriginatorReference: 32 bytes
    insert_text(metadata, KEY_ORIGINATOR_REFERENCE, body.read_fixed_string(32)?);
    // OriginationDate: 10 bytes, yyyy-mm-dd
    insert_text(metadata, KEY_ORIGINATION_DATE, body.read_fixed_string(10)?);
    // OriginationTime: 8 bytes, hh:mm:ss
    insert_text(metadata, KEY_ORIGINATION_TIME, body.read_fixed_string(8)?);

    // TimeReference: samples since midnight, low word first
    let low = body.read_u32_le()? as u64;
    let high = body.read_u32_le()? as u64;
    metadata.insert(KEY_TIME_REFERENCE.to_string(), (low | (high << 32)).into());

    let version = body.read_u16_le()?;
    metadata.insert(KEY_BEXT_VERSION.to_string(), (version as u64).into());

    // UMID: 64 bytes, only kept if set
    let umid = body.read_bytes(64)?;
    if umid.iter().any(|&b| b != 0) {
        let hex: String = umid.iter().map(|b| format!("{:02X}", b)).collect();
        metadata.insert(KEY_UMID.to_string(), hex.into());
    }

    // Loudness fields are stored as signed hundredths (LUFS, LU, dBTP)
    for key in [
        KEY_LOUDNESS_VALUE,
        KEY_LOUDNESS_RANGE,
        KEY_MAX_TRUE_PEAK_LEVEL,
        KEY_MAX_MOMENTARY_LOUDNESS,
        KEY_MAX_SHORT_TERM_LOUDNESS,
    ] {
        let value = body.read_u16_le()? as i16;
        metadata.insert(key.to_string(), (value as i64).into());
    }

    body.skip(BEXT_RESERVED_SIZE)?;

    // CodingHistory: remainder of the declared size
    let history_len = (size as usize).saturating_sub(BEXT_FIXED_SIZE);
    let history = body.read_fixed_string(history_len)?;
    insert_text(metadata, KEY_CODING_HISTORY, history.trim_end().to_string());

    Ok(())
}
