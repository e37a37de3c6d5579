use super::*;
use crate::cursor::latin1;
use crate::prelude::*;

/// Decodes `LIST/INFO` entries into `metadata`, keyed by their 4-character ID.
///
/// Each entry is `(id, len, value)`; odd-length values are followed by a pad
/// byte. Entries already read are kept if a later one is truncated.
pub fn read_info_list(body: &mut ByteCursor, metadata: &mut Metadata) -> ParseResult<()> {
    while body.remaining() >= CHUNK_HEADER_SIZE {
        let id = body.read_tag()?;
        let len = body.read_u32_le()?;
        let value = body.read_fixed_string(len as usize)?;
        body.skip_padding(len)?;
        trace!(tag = %latin1(&id), len, "info entry");
        metadata.insert(latin1(&id), MetaValue::Text(value));
    }
    Ok(())
}

/// Readable name for a RIFF INFO tag, `None` for IDs outside the standard set.
pub fn info_tag_name(id: &str) -> Option<&'static str> {
    let name = match id {
        "IARL" => "archival_location",
        "IART" => "artist",
        "ICMS" => "commissioned",
        "ICMT" => "comment",
        "ICOP" => "copyright",
        "ICRD" => "creation_date",
        "ICRP" => "cropped",
        "IDIM" => "dimensions",
        "IDPI" => "dots_per_inch",
        "IENG" => "engineer",
        "IGNR" => "genre",
        "IKEY" => "keywords",
        "ILGT" => "lightness",
        "IMED" => "medium",
        "INAM" => "title",
        "IPLT" => "palette_setting",
        "IPRD" => "album",
        "IPRT" | "ITRK" => "track",
        "ISBJ" => "subject",
        "ISFT" => "encoder",
        "ISHP" => "sharpness",
        "ISRC" => "source",
        "ISRF" => "source_form",
        "ITCH" => "technician",
        _ => return None,
    };
    Some(name)
}
