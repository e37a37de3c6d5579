use serde::Serialize;

use crate::cursor::latin1;
use crate::prelude::*;

const CUE_POINT_SIZE: usize = 24;

/// One entry of a `cue ` chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuePoint {
    pub id: u32,
    pub position: u32,
    pub data_chunk_id: String,
    pub chunk_start: u32,
    pub block_start: u32,
    pub sample_offset: u32,
}

/// Appends the points of a `cue ` body to `cue_points`.
pub fn read_cue(body: &mut ByteCursor, cue_points: &mut Vec<CuePoint>) -> ParseResult<()> {
    let count = body.read_u32_le()? as usize;
    if count.saturating_mul(CUE_POINT_SIZE) > body.remaining() {
        warn!(
            count,
            available = body.remaining() / CUE_POINT_SIZE,
            "cue chunk declares more points than it holds"
        );
    }

    for _ in 0..count {
        cue_points.push(CuePoint {
            id: body.read_u32_le()?,
            position: body.read_u32_le()?,
            data_chunk_id: latin1(&body.read_tag()?),
            chunk_start: body.read_u32_le()?,
            block_start: body.read_u32_le()?,
            sample_offset: body.read_u32_le()?,
        });
    }
    Ok(())
}
