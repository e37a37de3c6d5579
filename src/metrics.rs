//! Values derived from a parsed header: duration, bitrates, chapter timing.

use serde::Serialize;

use crate::chunks::{Chapter, CuePoint};
use crate::prelude::*;

/// Playback length in seconds of `data_size` bytes at `byte_rate` bytes per second.
pub fn duration_seconds(data_size: u32, byte_rate: u32) -> ParseResult<f64> {
    if byte_rate == 0 {
        return Err(ParseError::DivideByZero(
            "byte rate is zero, duration is undefined",
        ));
    }
    Ok(data_size as f64 / byte_rate as f64)
}

pub fn millis(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).floor() as u64
}

/// Whole-file bitrate in kb/s, `None` when the duration is zero or unknown.
pub fn overall_bitrate_kbps(file_bytes: u64, duration: f64) -> Option<u64> {
    if !duration.is_finite() || duration <= 0.0 {
        return None;
    }
    Some((file_bytes as f64 * 8.0 / duration / 1000.0).round() as u64)
}

pub fn stream_bitrate_kbps(byte_rate: u32) -> u64 {
    (byte_rate as f64 * 8.0 / 1000.0).round() as u64
}

pub fn format_bitrate(kbps: u64) -> String {
    format!("{} kb/s", kbps)
}

/// `HH:MM:SS.mmm`, always with hours, every field zero padded.
pub fn format_duration(seconds: f64) -> String {
    let total_ms = millis(seconds);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let milliseconds = total_ms % 1000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterTiming {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub title: String,
}

/// Sample frame a chapter starts at. Labels refer to cue points by ID; when
/// the file carries a `cue ` chunk the ID is resolved to that point's sample
/// offset, otherwise the ID itself is taken as the frame.
pub fn chapter_sample(chapter: &Chapter, cue_points: &[CuePoint]) -> u64 {
    cue_points
        .iter()
        .find(|point| point.id == chapter.cue_point_id)
        .map_or(chapter.cue_point_id, |point| point.sample_offset) as u64
}

/// Start/end in milliseconds for each chapter. A chapter ends where the next
/// one starts; the last one ends at the end of the audio.
pub fn chapter_timings(
    chapters: &[Chapter],
    cue_points: &[CuePoint],
    sample_rate: u32,
    duration: Option<f64>,
) -> ParseResult<Vec<ChapterTiming>> {
    if chapters.is_empty() {
        return Ok(Vec::new());
    }
    if sample_rate == 0 {
        return Err(ParseError::DivideByZero(
            "sample rate is zero, chapter times are undefined",
        ));
    }

    let starts: Vec<u64> = chapters
        .iter()
        .map(|chapter| chapter_sample(chapter, cue_points) * 1000 / sample_rate as u64)
        .collect();
    let last_end = duration.map(millis);

    Ok(chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| {
            let start_ms = starts[index];
            let end_ms = starts
                .get(index + 1)
                .copied()
                .or(last_end)
                .unwrap_or(start_ms);
            ChapterTiming {
                index,
                start_ms,
                end_ms,
                title: chapter.text.clone(),
            }
        })
        .collect())
}

/// Value of the `T=<value>,` token in a BWF coding history, trimmed.
pub fn recording_facility(coding_history: &str) -> Option<String> {
    let mut rest = coding_history;
    let mut preceded_by_separator = true;

    while let Some(pos) = rest.find("T=") {
        let at_token_start = match rest[..pos].chars().next_back() {
            Some(c) => c == ',' || c.is_whitespace(),
            None => preceded_by_separator,
        };
        let value = &rest[pos + 2..];
        if at_token_start {
            if let Some(end) = value.find(',') {
                let facility = value[..end].trim();
                if !facility.is_empty() && !facility.contains('\n') {
                    return Some(facility.to_string());
                }
            }
        }
        preceded_by_separator = false;
        rest = value;
    }
    None
}
