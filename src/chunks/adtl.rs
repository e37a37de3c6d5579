use serde::Serialize;

use super::*;
use crate::cursor::latin1;
use crate::prelude::*;

/// A `labl` or `note` annotation, used as a chapter marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub cue_point_id: u32,
    pub text: String,
}

/// Appends every `labl`/`note` entry of a `LIST/adtl` body to `chapters`,
/// in the order they appear. Other entries (`ltxt`, ...) are skipped.
pub fn read_adtl_list(body: &mut ByteCursor, chapters: &mut Vec<Chapter>) -> ParseResult<()> {
    while body.remaining() >= CHUNK_HEADER_SIZE {
        let id = body.read_tag()?;
        let size = body.read_u32_le()?;
        let mut entry = body.take(size as usize)?;

        match &id {
            LABL_CHUNK_ID | NOTE_CHUNK_ID => {
                let cue_point_id = entry.read_u32_le()?;
                let text = entry.read_fixed_string((size as usize).saturating_sub(4))?;
                chapters.push(Chapter { cue_point_id, text });
            }
            _ => trace!(tag = %latin1(&id), size, "skipping adtl entry"),
        }

        body.skip_padding(size)?;
    }
    Ok(())
}
