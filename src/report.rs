//! Presentation-ready summary of a parsed file.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::chunks::*;
use crate::metrics::{self, ChapterTiming};
use crate::prelude::*;
use crate::riff::WavHeader;

const NOT_AVAILABLE: &str = "N/A";
const CHAPTER_TIME_BASE: &str = "1/1000";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(rename = "ISRC", skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_facility: Option<String>,
}

impl ReportTags {
    fn from_header(header: &WavHeader) -> Self {
        let text = |key: &str| header.text(key).map(str::to_string);
        let coding_history = text(KEY_CODING_HISTORY);
        Self {
            date: text(KEY_ORIGINATION_DATE),
            creation_time: text(KEY_ORIGINATION_TIME),
            time_reference: header.metadata.get(KEY_TIME_REFERENCE).map(|v| v.to_string()),
            recording_facility: coding_history
                .as_deref()
                .and_then(metrics::recording_facility),
            coding_history,
            title: text("INAM"),
            artist: text("IART"),
            isrc: text(KEY_ISRC),
            album: text("IPRD"),
            track: text("ITRK").or_else(|| text("IPRT")),
        }
    }

    fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("date", &self.date),
            ("creation_time", &self.creation_time),
            ("time_reference", &self.time_reference),
            ("coding_history", &self.coding_history),
            ("title", &self.title),
            ("artist", &self.artist),
            ("ISRC", &self.isrc),
            ("album", &self.album),
            ("track", &self.track),
            ("recording_facility", &self.recording_facility),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    pub codec: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub bitrate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterTags {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportChapter {
    pub id: usize,
    pub time_base: String,
    pub start: u64,
    pub end: u64,
    pub tags: ChapterTags,
}

impl From<ChapterTiming> for ReportChapter {
    fn from(timing: ChapterTiming) -> Self {
        Self {
            id: timing.index,
            time_base: CHAPTER_TIME_BASE.to_string(),
            start: timing.start_ms,
            end: timing.end_ms,
            tags: ChapterTags {
                title: timing.title,
            },
        }
    }
}

/// What the command line prints for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WavReport {
    pub filename: String,
    pub size: u64,
    pub duration: String,
    pub bitrate: String,
    pub tags: ReportTags,
    /// Metadata not covered by `tags`, INFO entries under their readable names.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<ReportChapter>,
}

impl WavReport {
    pub fn build(filename: &str, file_size: u64, header: &WavHeader) -> ParseResult<Self> {
        let duration = header.duration;

        let stream = header.fmt.map(|fmt| StreamInfo {
            codec: fmt.codec_name(),
            sample_rate: fmt.sample_rate,
            channels: fmt.num_channels,
            bits_per_sample: fmt.bits_per_sample,
            bitrate: metrics::format_bitrate(metrics::stream_bitrate_kbps(fmt.byte_rate)),
        });

        let chapters = metrics::chapter_timings(
            &header.chapters,
            &header.cue_points,
            header.sample_rate(),
            duration,
        )?
        .into_iter()
        .map(ReportChapter::from)
        .collect();

        Ok(Self {
            filename: filename.to_string(),
            size: file_size,
            duration: duration.map_or_else(|| NOT_AVAILABLE.to_string(), metrics::format_duration),
            bitrate: duration
                .and_then(|d| metrics::overall_bitrate_kbps(file_size, d))
                .map_or_else(|| NOT_AVAILABLE.to_string(), metrics::format_bitrate),
            tags: ReportTags::from_header(header),
            extra: extra_metadata(&header.metadata),
            stream,
            chapters,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_compact(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

const REPORTED_KEYS: &[&str] = &[
    KEY_ORIGINATION_DATE,
    KEY_ORIGINATION_TIME,
    KEY_TIME_REFERENCE,
    KEY_CODING_HISTORY,
    KEY_ISRC,
    "INAM",
    "IART",
    "IPRD",
    "ITRK",
    "IPRT",
];

fn extra_metadata(metadata: &Metadata) -> BTreeMap<String, String> {
    metadata
        .iter()
        .filter(|(key, _)| !REPORTED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| {
            let name = info_tag_name(key).map_or_else(|| key.clone(), str::to_string);
            (name, value.to_string())
        })
        .collect()
}

impl fmt::Display for WavReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input: {}", self.filename)?;
        writeln!(
            f,
            "  Duration: {}, bitrate: {}, size: {} bytes",
            self.duration, self.bitrate, self.size
        )?;

        let tags = self.tags.entries();
        if !tags.is_empty() || !self.extra.is_empty() {
            writeln!(f, "  Metadata:")?;
            for (key, value) in tags {
                writeln!(f, "    {:<20}: {}", key, value)?;
            }
            for (key, value) in &self.extra {
                writeln!(f, "    {:<20}: {}", key, value)?;
            }
        }

        if !self.chapters.is_empty() {
            writeln!(f, "  Chapters:")?;
            for chapter in &self.chapters {
                writeln!(
                    f,
                    "    Chapter #{}: start {:.3}, end {:.3}",
                    chapter.id,
                    chapter.start as f64 / 1000.0,
                    chapter.end as f64 / 1000.0
                )?;
                writeln!(f, "      {:<18}: {}", "title", chapter.tags.title)?;
            }
        }

        match &self.stream {
            Some(stream) => write!(
                f,
                "  Stream #0: Audio: {}, {} Hz, {} channels, {} bits, {}",
                stream.codec,
                stream.sample_rate,
                stream.channels,
                stream.bits_per_sample,
                stream.bitrate
            ),
            None => write!(f, "  Stream #0: no fmt chunk"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::{Chapter, FmtChunk};

    fn header() -> WavHeader {
        let mut header = WavHeader {
            fmt: Some(FmtChunk {
                audio_format: 1,
                num_channels: 1,
                sample_rate: 8000,
                byte_rate: 16000,
                block_align: 2,
                bits_per_sample: 16,
            }),
            data_chunk_size: Some(16000),
            duration: Some(1.0),
            ..Default::default()
        };
        header.metadata.insert("INAM".into(), MetaValue::Text("Song".into()));
        header.metadata.insert("ICMT".into(), MetaValue::Text("Take 2".into()));
        header.metadata.insert(
            KEY_CODING_HISTORY.into(),
            MetaValue::Text("A=PCM,T=Room 1,".into()),
        );
        header.metadata.insert(KEY_TIME_REFERENCE.into(), MetaValue::Unsigned(42));
        header
    }

    #[test]
    fn builds_tags_stream_and_extra() {
        let report = WavReport::build("a.wav", 16044, &header()).unwrap();
        assert_eq!(report.duration, "00:00:01.000");
        assert_eq!(report.bitrate, "128 kb/s");
        assert_eq!(report.tags.title.as_deref(), Some("Song"));
        assert_eq!(report.tags.time_reference.as_deref(), Some("42"));
        assert_eq!(report.tags.recording_facility.as_deref(), Some("Room 1"));
        assert_eq!(report.extra.get("comment").map(String::as_str), Some("Take 2"));

        let stream = report.stream.unwrap();
        assert_eq!(stream.codec, "pcm_s16le");
        assert_eq!(stream.bitrate, "128 kb/s");
        assert!(report.chapters.is_empty());
    }

    #[test]
    fn json_omits_missing_fields_and_empty_chapters() {
        let report = WavReport::build("a.wav", 16044, &header()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(json.get("chapters").is_none());
        assert!(json["tags"].get("ISRC").is_none());
        assert_eq!(json["tags"]["title"], "Song");
        assert_eq!(json["stream"]["sample_rate"], 8000);
    }

    #[test]
    fn chapters_use_millisecond_time_base() {
        let mut header = header();
        header.chapters = vec![
            Chapter {
                cue_point_id: 0,
                text: "A".into(),
            },
            Chapter {
                cue_point_id: 4000,
                text: "B".into(),
            },
        ];
        let report = WavReport::build("a.wav", 16044, &header).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json_compact().unwrap()).unwrap();
        assert_eq!(json["chapters"][1]["time_base"], "1/1000");
        assert_eq!(json["chapters"][1]["start"], 500);
        assert_eq!(json["chapters"][1]["end"], 1000);
        assert_eq!(json["chapters"][0]["tags"]["title"], "A");

        let text = report.to_string();
        assert!(text.contains("Chapter #1: start 0.500, end 1.000"));
    }

    #[test]
    fn missing_data_chunk_reports_not_available() {
        let mut header = header();
        header.duration = None;
        header.data_chunk_size = None;
        let report = WavReport::build("a.wav", 44, &header).unwrap();
        assert_eq!(report.duration, "N/A");
        assert_eq!(report.bitrate, "N/A");
    }
}
