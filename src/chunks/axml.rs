use super::*;
use crate::prelude::*;

const ISRC_ELEMENT: &[u8] = b"dc:identifier";
const ISRC_PREFIX: &str = "ISRC:";

/// Reads an `axml` body and merges its ISRC, if any, into `metadata`.
/// Nothing else in the document is interpreted.
pub fn read_axml(body: &mut ByteCursor, metadata: &mut Metadata) -> ParseResult<()> {
    let bytes = body.read_bytes(body.remaining())?;
    let xml = String::from_utf8_lossy(bytes);
    if let Some(isrc) = extract_isrc(xml.trim_end_matches('\0')) {
        debug!(%isrc, "axml identifier");
        metadata.insert(KEY_ISRC.to_string(), MetaValue::Text(isrc));
    }
    Ok(())
}

/// Finds `<dc:identifier>ISRC:...</dc:identifier>` and returns the code.
pub fn extract_isrc(xml: &str) -> Option<String> {
    use quick_xml::{Reader, events::Event};

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_identifier = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => in_identifier = e.name().as_ref() == ISRC_ELEMENT,
            Ok(Event::Text(ref e)) if in_identifier => {
                if let Some(isrc) = e.unescape().ok().as_deref().and_then(isrc_value) {
                    return Some(isrc);
                }
            }
            Ok(Event::End(_)) => in_identifier = false,
            Ok(Event::Eof) => return None,
            Err(_) => {
                // Malformed document: fall back to a plain text scan
                return scan_isrc(xml);
            }
            _ => {}
        }
    }
}

fn isrc_value(text: &str) -> Option<String> {
    let code = text.trim().strip_prefix(ISRC_PREFIX)?.trim();
    (!code.is_empty()).then(|| code.to_string())
}

fn scan_isrc(xml: &str) -> Option<String> {
    const OPEN: &str = "<dc:identifier>";
    const CLOSE: &str = "</dc:identifier>";

    let mut rest = xml;
    while let Some(start) = rest.find(OPEN) {
        rest = &rest[start + OPEN.len()..];
        let end = rest.find(CLOSE)?;
        if let Some(isrc) = isrc_value(&rest[..end]) {
            return Some(isrc);
        }
        rest = &rest[end + CLOSE.len()..];
    }
    None
}
